// crates/consigna-core/src/runtime/pricing.rs
// ============================================================================
// Module: Tiered Calculator
// Description: Rate resolution, fee computation, and commission payout math.
// Purpose: Turn a matched rule and an amount into rounded monetary outputs.
// Dependencies: crate::core, bigdecimal, thiserror
// ============================================================================

//! ## Overview
//! The tiered calculator resolves a monthly rate from a matched pricing
//! rule and computes the quote's fee and cost figures. Resolution order:
//! base rate, first containing tier, caller risk multipliers, clamp to the
//! rule's bounds. Fees are additive and independent of rate resolution.
//! Monetary outputs are rounded to two decimal places only at return.
//!
//! The effective-cost figure is the business-policy approximation
//! `(total/net - 1) * 12`, preserved as configured rather than replaced
//! with annuity math.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::core::CommissionRequest;
use crate::core::CommissionResult;
use crate::core::CommissionRule;
use crate::core::FeeBreakdown;
use crate::core::PricingQuote;
use crate::core::PricingRule;
use crate::core::QuoteRequest;
use crate::core::Tier;
use crate::core::annualize_monthly_rate;
use crate::core::round_money;
use crate::core::round_rate;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Calculator errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Request input is missing or malformed; reported immediately, never
    /// retried.
    #[error("pricing validation error: {0}")]
    Validation(String),
}

// ============================================================================
// SECTION: Rate Resolution
// ============================================================================

/// Resolves the applicable rate: first containing tier overrides the base.
///
/// Tiers are scanned in listed order; overlapping tiers resolve to the
/// first listed by construction of the linear scan.
fn resolve_tier_rate<'a>(
    base_rate: &'a BigDecimal,
    tiers: &'a [Tier],
    amount: &BigDecimal,
) -> &'a BigDecimal {
    tiers.iter().find(|tier| tier.contains(amount)).map_or(base_rate, |tier| &tier.rate)
}

/// Clamps a rate into the optional `[minimum, maximum]` bounds.
fn clamp_rate(
    rate: BigDecimal,
    minimum: Option<&BigDecimal>,
    maximum: Option<&BigDecimal>,
) -> BigDecimal {
    let mut rate = rate;
    if let Some(min) = minimum
        && &rate < min
    {
        rate = min.clone();
    }
    if let Some(max) = maximum
        && &rate > max
    {
        rate = max.clone();
    }
    rate
}

// ============================================================================
// SECTION: Quote Pricing
// ============================================================================

/// Prices a quote against a matched pricing rule.
///
/// # Errors
///
/// Returns [`PricingError::Validation`] when the amount or term is
/// non-positive, a risk factor is non-positive, or fees consume the whole
/// requested amount.
pub fn price(rule: &PricingRule, request: &QuoteRequest) -> Result<PricingQuote, PricingError> {
    let amount = &request.context.amount;
    if amount <= &BigDecimal::from(0) {
        return Err(PricingError::Validation("requested amount must be positive".to_string()));
    }
    if request.term_months == 0 {
        return Err(PricingError::Validation("term must be at least one month".to_string()));
    }
    for adjustment in &request.risk {
        if adjustment.factor <= BigDecimal::from(0) {
            return Err(PricingError::Validation(format!(
                "risk factor must be positive: {}",
                adjustment.label
            )));
        }
    }

    let mut rate = resolve_tier_rate(&rule.base_rate, &rule.tiers, amount).clone();
    for adjustment in &request.risk {
        rate *= &adjustment.factor;
    }
    let rate = clamp_rate(rate, rule.minimum_rate.as_ref(), rule.maximum_rate.as_ref());

    let origination = amount * &rule.fees.origination_rate + &rule.fees.origination_fixed;
    let insurance = amount * &rule.fees.insurance_rate;
    let averbation = rule.fees.averbation_fixed.clone();
    let total_fees = &origination + &insurance + &averbation;

    let net_amount = amount - &total_fees;
    if net_amount <= BigDecimal::from(0) {
        return Err(PricingError::Validation("fees consume the requested amount".to_string()));
    }

    let interest = amount * &rate * BigDecimal::from(request.term_months);
    let total_amount = amount + &interest;
    let annual_rate = annualize_monthly_rate(&rate);
    let effective_cost =
        (&total_amount / &net_amount - BigDecimal::from(1)) * BigDecimal::from(12);

    Ok(PricingQuote {
        proposal_id: request.proposal_id.clone(),
        rule_id: rule.id.clone(),
        monthly_rate: rate,
        annual_rate: round_rate(&annual_rate),
        interest: round_money(&interest),
        fees: FeeBreakdown {
            origination: round_money(&origination),
            insurance: round_money(&insurance),
            averbation: round_money(&averbation),
        },
        total_fees: round_money(&total_fees),
        net_amount: round_money(&net_amount),
        total_amount: round_money(&total_amount),
        effective_cost: round_rate(&effective_cost),
    })
}

// ============================================================================
// SECTION: Commission
// ============================================================================

/// Computes the commission payout for a matched commission rule.
///
/// # Errors
///
/// Returns [`PricingError::Validation`] when the financed amount is
/// non-positive.
pub fn commission(
    rule: &CommissionRule,
    request: &CommissionRequest,
) -> Result<CommissionResult, PricingError> {
    let amount = &request.context.amount;
    if amount <= &BigDecimal::from(0) {
        return Err(PricingError::Validation("financed amount must be positive".to_string()));
    }

    let rate = resolve_tier_rate(&rule.base_rate, &rule.tiers, amount).clone();
    let mut payout = amount * &rate;
    if let Some(fixed) = &rule.fixed_amount {
        payout += fixed;
    }

    Ok(CommissionResult {
        proposal_id: request.proposal_id.clone(),
        rule_id: rule.id.clone(),
        rate,
        fixed: rule.fixed_amount.clone(),
        amount: round_money(&payout),
    })
}
