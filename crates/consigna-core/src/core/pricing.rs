// crates/consigna-core/src/core/pricing.rs
// ============================================================================
// Module: Consigna Pricing Model
// Description: Quote and commission request/result records.
// Purpose: Model pricing inputs and the rounded monetary outputs returned to callers.
// Dependencies: serde, bigdecimal, crate::core::{identifiers, rules}
// ============================================================================

//! ## Overview
//! Pricing records carry the inputs and outputs of quote generation and
//! commission calculation. All monetary fields on result records are
//! rounded to two decimal places at construction; requests carry exact
//! values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ClientId;
use crate::core::identifiers::ProposalId;
use crate::core::identifiers::RuleId;
use crate::core::rules::RuleContext;

// ============================================================================
// SECTION: Quote Requests
// ============================================================================

/// Caller-supplied risk adjustment multiplying the resolved rate.
///
/// # Invariants
/// - `factor` is a plain multiplier (`1.1` raises the rate by 10%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAdjustment {
    /// Human-readable adjustment label for the audit trail.
    pub label: String,
    /// Rate multiplier.
    pub factor: BigDecimal,
}

/// Quote generation request.
///
/// # Invariants
/// - `term_months >= 1` (validated at pricing time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Proposal the quote belongs to.
    pub proposal_id: ProposalId,
    /// Requesting client.
    pub client_id: ClientId,
    /// Rule-match context (product, convenio, role, amount).
    pub context: RuleContext,
    /// Contract term in months.
    pub term_months: u32,
    /// Caller-supplied risk adjustments, applied in order.
    pub risk: Vec<RiskAdjustment>,
}

// ============================================================================
// SECTION: Quote Results
// ============================================================================

/// Itemized fee breakdown, rounded to two decimal places.
///
/// # Invariants
/// - Fields sum to the quote's `total_fees` up to rounding of the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Origination fee (rate component plus fixed component).
    pub origination: BigDecimal,
    /// Insurance fee.
    pub insurance: BigDecimal,
    /// Averbation (payroll registration) fee.
    pub averbation: BigDecimal,
}

/// Priced quote returned to the caller.
///
/// # Invariants
/// - All monetary fields are rounded to two decimal places.
/// - `monthly_rate` lies within the matched rule's clamp bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingQuote {
    /// Proposal the quote belongs to.
    pub proposal_id: ProposalId,
    /// Pricing rule that matched.
    pub rule_id: RuleId,
    /// Resolved monthly rate (decimal fraction).
    pub monthly_rate: BigDecimal,
    /// Compound annual equivalent of `monthly_rate`.
    pub annual_rate: BigDecimal,
    /// Interest owed over the term.
    pub interest: BigDecimal,
    /// Itemized fees.
    pub fees: FeeBreakdown,
    /// Sum of all fees.
    pub total_fees: BigDecimal,
    /// Amount disbursed after fees.
    pub net_amount: BigDecimal,
    /// Principal plus interest owed by the client.
    pub total_amount: BigDecimal,
    /// Simplified effective annual cost: `(total/net - 1) * 12`. This is a
    /// business-policy approximation preserved as configured, not annuity
    /// math.
    pub effective_cost: BigDecimal,
}

// ============================================================================
// SECTION: Commission
// ============================================================================

/// Commission calculation request.
///
/// # Invariants
/// - `context.amount` is the financed amount the payout is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRequest {
    /// Proposal the payout belongs to.
    pub proposal_id: ProposalId,
    /// Rule-match context (product, convenio, role, amount).
    pub context: RuleContext,
}

/// Commission payout result.
///
/// # Invariants
/// - `amount` is rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionResult {
    /// Proposal the payout belongs to.
    pub proposal_id: ProposalId,
    /// Commission rule that matched.
    pub rule_id: RuleId,
    /// Rate applied after tier resolution (decimal fraction).
    pub rate: BigDecimal,
    /// Fixed component applied, when the rule carries one.
    pub fixed: Option<BigDecimal>,
    /// Total payout.
    pub amount: BigDecimal,
}
