// crates/consigna-core/src/core/rules.rs
// ============================================================================
// Module: Consigna Business Rules
// Description: Pricing, commission, and collection rule records.
// Purpose: Model prioritized, predicate-gated configuration records.
// Dependencies: serde, bigdecimal, crate::core::{collections, identifiers}
// ============================================================================

//! ## Overview
//! Rules are prioritized configuration records gated by applicability
//! predicates. They are owned by configuration and never mutated by the
//! engine; the engine only matches against them and reads their outcome
//! specifications.
//! Invariants:
//! - Lower `priority` means higher precedence.
//! - An absent predicate constraint means "any" (explicit wildcard), never
//!   a missing-data error.
//! - All amount ranges are half-open `[min, max)` with absent bounds
//!   open-ended.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

use crate::core::collections::ActionType;
use crate::core::identifiers::ConvenioId;
use crate::core::identifiers::RuleId;

// ============================================================================
// SECTION: Products and Ranges
// ============================================================================

/// Loan product families distinguished by rules and provider scopes.
///
/// # Invariants
/// - Variants are stable for serialization and configuration matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// New salary-advance loan.
    NewLoan,
    /// Refinancing of an existing contract.
    Refinancing,
    /// Contract ported in from another institution.
    PortedLoan,
    /// Payroll-deducted credit card line.
    CreditCard,
}

/// Half-open monetary range `[min, max)`.
///
/// # Invariants
/// - Absent bounds are open-ended.
/// - `min <= max` when both bounds are present (validated by configuration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    /// Inclusive lower bound.
    pub min: Option<BigDecimal>,
    /// Exclusive upper bound.
    pub max: Option<BigDecimal>,
}

impl AmountRange {
    /// Returns a fully open range matching any amount.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Returns true when the amount falls within `[min, max)`.
    #[must_use]
    pub fn contains(&self, amount: &BigDecimal) -> bool {
        if let Some(min) = &self.min
            && amount < min
        {
            return false;
        }
        if let Some(max) = &self.max
            && amount >= max
        {
            return false;
        }
        true
    }
}

/// Half-open days-overdue range `[min, max)`.
///
/// # Invariants
/// - Absent bounds are open-ended.
/// - `min <= max` when both bounds are present (validated by configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    /// Inclusive lower bound.
    pub min: Option<u32>,
    /// Exclusive upper bound.
    pub max: Option<u32>,
}

impl DayRange {
    /// Returns a fully open range matching any day count.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Returns true when the day count falls within `[min, max)`.
    #[must_use]
    pub fn contains(self, days: u32) -> bool {
        if let Some(min) = self.min
            && days < min
        {
            return false;
        }
        if let Some(max) = self.max
            && days >= max
        {
            return false;
        }
        true
    }
}

// ============================================================================
// SECTION: Predicates and Match Context
// ============================================================================

/// Applicability predicates gating a rule.
///
/// # Invariants
/// - `None` constraints are wildcards that match any context value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePredicates {
    /// Optional product constraint.
    pub product: Option<ProductKind>,
    /// Optional convenio (payroll partner) constraint.
    pub convenio: Option<ConvenioId>,
    /// Optional originating role constraint (e.g. broker, branch).
    pub role: Option<String>,
    /// Amount range constraint; fully open when both bounds are absent.
    pub amount: AmountRange,
}

impl RulePredicates {
    /// Returns predicates that match any context.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            product: None,
            convenio: None,
            role: None,
            amount: AmountRange::any(),
        }
    }

    /// Returns true when every present constraint is satisfied by the context.
    #[must_use]
    pub fn matches(&self, ctx: &RuleContext) -> bool {
        if let Some(product) = self.product
            && product != ctx.product
        {
            return false;
        }
        if let Some(convenio) = self.convenio
            && Some(convenio) != ctx.convenio
        {
            return false;
        }
        if let Some(role) = &self.role
            && Some(role.as_str()) != ctx.role.as_deref()
        {
            return false;
        }
        self.amount.contains(&ctx.amount)
    }
}

/// Request attributes a rule is matched against.
///
/// # Invariants
/// - Values are snapshots of the inbound request; matching never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContext {
    /// Product family of the request.
    pub product: ProductKind,
    /// Convenio of the request, when known.
    pub convenio: Option<ConvenioId>,
    /// Originating role of the request, when known.
    pub role: Option<String>,
    /// Requested amount.
    pub amount: BigDecimal,
}

// ============================================================================
// SECTION: Tiers and Fees
// ============================================================================

/// Amount sub-range carrying its own rate, used for progressive pricing.
///
/// # Invariants
/// - Range is half-open `[min_amount, max_amount)`; absent upper bound is
///   open-ended.
/// - Tiers within one rule must not overlap ambiguously; the first listed
///   containing tier wins by construction of the linear scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive lower amount bound.
    pub min_amount: BigDecimal,
    /// Exclusive upper amount bound; open-ended when absent.
    pub max_amount: Option<BigDecimal>,
    /// Rate applied when the amount falls in this tier (decimal fraction).
    pub rate: BigDecimal,
}

impl Tier {
    /// Returns true when the amount falls within `[min_amount, max_amount)`.
    #[must_use]
    pub fn contains(&self, amount: &BigDecimal) -> bool {
        if amount < &self.min_amount {
            return false;
        }
        match &self.max_amount {
            Some(max) => amount < max,
            None => true,
        }
    }
}

/// Fee schedule attached to a pricing rule.
///
/// # Invariants
/// - Rate fields are decimal fractions of the requested amount.
/// - Fee computation is additive and independent of rate resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Origination fee as a fraction of the requested amount.
    pub origination_rate: BigDecimal,
    /// Fixed origination fee.
    pub origination_fixed: BigDecimal,
    /// Insurance fee as a fraction of the requested amount.
    pub insurance_rate: BigDecimal,
    /// Fixed averbation (payroll registration) fee.
    pub averbation_fixed: BigDecimal,
}

impl FeeSchedule {
    /// Returns a schedule with every fee set to zero.
    #[must_use]
    pub fn free() -> Self {
        Self {
            origination_rate: BigDecimal::from(0),
            origination_fixed: BigDecimal::from(0),
            insurance_rate: BigDecimal::from(0),
            averbation_fixed: BigDecimal::from(0),
        }
    }
}

// ============================================================================
// SECTION: Rule Records
// ============================================================================

/// Pricing rule producing a monthly rate and fee schedule.
///
/// # Invariants
/// - Immutable once matched against a request.
/// - `minimum_rate <= maximum_rate` when both are present (validated by
///   configuration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Rule identifier.
    pub id: RuleId,
    /// Precedence; lower values match first.
    pub priority: u32,
    /// Inactive rules never match.
    pub active: bool,
    /// Applicability predicates.
    pub predicates: RulePredicates,
    /// Base monthly rate (decimal fraction) before tier resolution.
    pub base_rate: BigDecimal,
    /// Ordered tier table; first containing tier overrides the base rate.
    pub tiers: Vec<Tier>,
    /// Optional floor applied after risk adjustment.
    pub minimum_rate: Option<BigDecimal>,
    /// Optional cap applied after risk adjustment.
    pub maximum_rate: Option<BigDecimal>,
    /// Fee schedule applied to the requested amount.
    pub fees: FeeSchedule,
}

/// Commission rule producing a payout for the originating role.
///
/// # Invariants
/// - Immutable once matched against a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRule {
    /// Rule identifier.
    pub id: RuleId,
    /// Precedence; lower values match first.
    pub priority: u32,
    /// Inactive rules never match.
    pub active: bool,
    /// Applicability predicates.
    pub predicates: RulePredicates,
    /// Base commission rate (decimal fraction of the financed amount).
    pub base_rate: BigDecimal,
    /// Ordered tier table; first containing tier overrides the base rate.
    pub tiers: Vec<Tier>,
    /// Optional fixed payout added on top of the rate component.
    pub fixed_amount: Option<BigDecimal>,
}

/// Specification of a collection action fired at a day offset.
///
/// # Invariants
/// - `day` is the exact days-overdue count at which the action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Days overdue at which the action fires.
    pub day: u32,
    /// Action to schedule.
    pub action: ActionType,
}

/// Collection rule mapping overdue windows to dated actions.
///
/// # Invariants
/// - Immutable once matched against an installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRule {
    /// Rule identifier.
    pub id: RuleId,
    /// Precedence; lower values match first.
    pub priority: u32,
    /// Inactive rules never match.
    pub active: bool,
    /// Amount window the installment must fall in.
    pub amount: AmountRange,
    /// Days-overdue window the installment must fall in.
    pub days_overdue: DayRange,
    /// Actions fired at configured day offsets.
    pub actions: Vec<ActionSpec>,
}

// ============================================================================
// SECTION: Rule Book
// ============================================================================

/// Full set of rules the engine evaluates against.
///
/// # Invariants
/// - Owned by configuration; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    /// Pricing rules.
    pub pricing: Vec<PricingRule>,
    /// Commission rules.
    pub commission: Vec<CommissionRule>,
    /// Collection rules.
    pub collection: Vec<CollectionRule>,
}
