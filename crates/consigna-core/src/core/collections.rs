// crates/consigna-core/src/core/collections.rs
// ============================================================================
// Module: Consigna Collections Model
// Description: Installments, collection actions, and idempotency keys.
// Purpose: Capture overdue state and at-most-once action scheduling records.
// Dependencies: serde, bigdecimal, time, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Collections records model the lifecycle of overdue installments and the
//! actions scheduled against them. At most one [`CollectionAction`] may
//! exist per `(installment, action type, days overdue)` tuple; the
//! [`ActionKey`] carries that idempotency invariant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;
use time::Date;

use crate::core::identifiers::ClientId;
use crate::core::identifiers::InstallmentId;

// ============================================================================
// SECTION: Installments
// ============================================================================

/// Installment lifecycle status.
///
/// # Invariants
/// - `Paid` and `Defaulted` are terminal and set externally, never by the
///   scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not yet due or not yet flagged overdue.
    Pending,
    /// Settled in full.
    Paid,
    /// Past due date with an outstanding balance.
    Overdue,
    /// Written off after the collection window.
    Defaulted,
}

/// Installment within a contract payment plan.
///
/// # Invariants
/// - `expected_amount` is the amount owed, not the amount collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Installment identifier.
    pub id: InstallmentId,
    /// Owning client.
    pub client_id: ClientId,
    /// Contractual due date.
    pub due_date: Date,
    /// Amount owed for this installment.
    pub expected_amount: BigDecimal,
    /// Lifecycle status.
    pub status: InstallmentStatus,
}

// ============================================================================
// SECTION: Collection Actions
// ============================================================================

/// Collection action channels.
///
/// # Invariants
/// - Message channels are immediate: they are dispatched within the sweep
///   that creates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Reminder email.
    EmailReminder,
    /// Reminder SMS.
    SmsReminder,
    /// WhatsApp message.
    WhatsappMessage,
    /// Manual phone call task for an operator.
    PhoneCall,
    /// Formal written notice.
    FormalNotice,
}

impl ActionType {
    /// Returns true for message channels dispatched within the same sweep.
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::EmailReminder | Self::SmsReminder | Self::WhatsappMessage)
    }
}

/// Collection action status.
///
/// # Invariants
/// - `Scheduled` actions for non-immediate channels are worked off by an
///   external operator queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Created and awaiting execution.
    Scheduled,
    /// Dispatched to the client.
    Sent,
}

/// Idempotency key for collection actions.
///
/// # Invariants
/// - At most one action exists per key; stores must enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionKey {
    /// Target installment.
    pub installment_id: InstallmentId,
    /// Action channel.
    pub action: ActionType,
    /// Days overdue at creation time.
    pub days_overdue: u32,
}

/// Collection action produced by the scheduler.
///
/// # Invariants
/// - `key` is unique across the store (check-then-create plus storage
///   constraint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAction {
    /// Idempotency key identifying the action.
    pub key: ActionKey,
    /// Client the action targets.
    pub client_id: ClientId,
    /// Outstanding amount at scheduling time.
    pub amount: BigDecimal,
    /// Action status.
    pub status: ActionStatus,
}
