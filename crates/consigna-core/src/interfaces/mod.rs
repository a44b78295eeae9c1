// crates/consigna-core/src/interfaces/mod.rs
// ============================================================================
// Module: Consigna Interfaces
// Description: Backend-agnostic interfaces for storage, time, messaging, and adapters.
// Purpose: Define the contract surfaces the engine consumes without backend details.
// Dependencies: crate::core, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Interfaces define how the engine integrates with the hosting platform
//! without embedding backend-specific details: persistence (`Store`),
//! time (`Clock`), side-effect messaging (`Notifier`), external service
//! calls (`ProviderAdapter` / `AdapterResolver`), and provider health
//! bookkeeping (`HealthRegistry`). Implementations must be deterministic
//! where the contract says so and fail closed on invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use time::Date;

use crate::core::ActionKey;
use crate::core::ActionStatus;
use crate::core::ClientId;
use crate::core::CollectionAction;
use crate::core::CommissionResult;
use crate::core::OperationKind;
use crate::core::OrchestrationResult;
use crate::core::PricingQuote;
use crate::core::ProviderHealth;
use crate::core::ProviderName;
use crate::core::ProposalId;
use crate::core::ScoreResult;
use crate::core::ScoringPolicy;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Score persistence record handed to the store.
///
/// # Invariants
/// - Derived from inputs on demand; never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Proposal the score belongs to.
    pub proposal_id: ProposalId,
    /// Policy selected by the caller.
    pub policy: ScoringPolicy,
    /// Derived score and bucket.
    pub result: ScoreResult,
}

/// Orchestration audit record handed to the store.
///
/// # Invariants
/// - `result.attempts` preserves attempt order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Operation family that was orchestrated.
    pub operation: OperationKind,
    /// Full orchestration outcome, including the attempt trail.
    pub result: OrchestrationResult,
}

/// Store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Duplicate` signals an idempotency-key collision, not a fault.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("store io error: {0}")]
    Io(String),
    /// Uniqueness constraint violation on an idempotency key.
    #[error("duplicate record: {0}")]
    Duplicate(String),
    /// Store reported an error.
    #[error("store error: {0}")]
    Store(String),
}

/// Persistence surface for engine outputs.
///
/// Transactional semantics are the store's responsibility, not the
/// engine's. Stores backing concurrent sweeps must enforce a uniqueness
/// constraint on [`ActionKey`] rather than relying on the scheduler's
/// check-then-create.
pub trait Store {
    /// Persists a derived score.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn save_score(&self, record: &ScoreRecord) -> Result<(), StoreError>;

    /// Persists a priced quote.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn save_quote(&self, quote: &PricingQuote) -> Result<(), StoreError>;

    /// Persists a commission payout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn save_commission(&self, commission: &CommissionResult) -> Result<(), StoreError>;

    /// Persists an orchestration audit record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn save_operation(&self, record: &OperationRecord) -> Result<(), StoreError>;

    /// Returns true when a collection action exists for the key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn collection_action_exists(&self, key: &ActionKey) -> Result<bool, StoreError>;

    /// Creates a collection action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] when an action already exists for
    /// the key, and other [`StoreError`] variants when persistence fails.
    fn create_collection_action(&self, action: &CollectionAction) -> Result<(), StoreError>;

    /// Updates the status of an existing collection action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the action is missing or the update
    /// fails.
    fn update_collection_action(
        &self,
        key: &ActionKey,
        status: ActionStatus,
    ) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Injected time source.
///
/// The engine never reads wall-clock time directly; hosts supply a clock
/// so sweeps and tests stay deterministic.
pub trait Clock {
    /// Returns the current civil date.
    fn today(&self) -> Date;
}

/// Clock pinned to a fixed date, for tests and replay.
///
/// # Invariants
/// - `today` never advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    /// Date returned by every call.
    pub date: Date,
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.date
    }
}

// ============================================================================
// SECTION: Notifier
// ============================================================================

/// Outbound message channels.
///
/// # Invariants
/// - Variants are stable for serialization and template routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    /// Email delivery.
    Email,
    /// SMS delivery.
    Sms,
    /// WhatsApp delivery.
    Whatsapp,
}

/// Outbound message handed to the notifier.
///
/// # Invariants
/// - `body` is final rendered text; the engine does not template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient client.
    pub client_id: ClientId,
    /// Delivery channel.
    pub channel: NotificationChannel,
    /// Rendered message body.
    pub body: String,
}

/// Notifier errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Delivery failed.
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Fire-and-forget message delivery.
///
/// Failures must never roll back the decision that produced the message;
/// callers swallow errors at decision boundaries.
pub trait Notifier {
    /// Delivers a message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when delivery fails.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

// ============================================================================
// SECTION: Provider Adapters
// ============================================================================

/// Request payload handed to a provider adapter.
///
/// # Invariants
/// - `payload` is a flat JSON record of request attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterRequest {
    /// Operation family being invoked.
    pub operation: OperationKind,
    /// Request attributes.
    pub payload: Value,
}

/// Adapter errors.
///
/// # Invariants
/// - Every variant, including timeouts, is an ordinary per-attempt failure
///   that triggers fallback.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Provider reported an error.
    #[error("provider error: {0}")]
    Provider(String),
    /// Provider call timed out.
    #[error("provider timeout: {0}")]
    Timeout(String),
}

/// Extension point real provider integrations plug into.
///
/// One adapter exists per external margin, e-signature, or credit-issuance
/// service. Adapters carry their own timeouts; the orchestrator treats any
/// returned error as a per-attempt failure.
pub trait ProviderAdapter {
    /// Invokes the provider with the request payload.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the provider call fails.
    fn invoke(&self, request: &AdapterRequest) -> Result<Value, AdapterError>;
}

/// Resolves provider names to adapters.
pub trait AdapterResolver {
    /// Returns the adapter registered under the name, if any.
    fn resolve(&self, name: &ProviderName) -> Option<&dyn ProviderAdapter>;
}

// ============================================================================
// SECTION: Health Registry
// ============================================================================

/// Shared provider health bookkeeping.
///
/// Implementations must make increments atomic under concurrent
/// orchestration calls (row-level update or in-process mutex) and must
/// absorb their own storage errors: bookkeeping never aborts an
/// orchestration call.
pub trait HealthRegistry {
    /// Records a successful attempt: increments the success counter and
    /// marks the provider healthy.
    fn record_success(&self, provider: &ProviderName);

    /// Records a failed attempt: increments the failure counters, marks
    /// the provider degraded, and stores the error.
    fn record_failure(&self, provider: &ProviderName, error: &str);

    /// Returns a snapshot of the provider's health, if any attempt has
    /// been recorded.
    fn health(&self, provider: &ProviderName) -> Option<ProviderHealth>;
}
