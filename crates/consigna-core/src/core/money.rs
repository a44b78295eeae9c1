// crates/consigna-core/src/core/money.rs
// ============================================================================
// Module: Consigna Money Helpers
// Description: Decimal helpers for monetary amounts and rates.
// Purpose: Keep rounding at result boundaries and arithmetic exact elsewhere.
// Dependencies: bigdecimal
// ============================================================================

//! ## Overview
//! All monetary amounts and rates in Consigna are [`BigDecimal`] values.
//! Rates are decimal fractions (a 2.5% monthly rate is `0.025`), never
//! percentage points. Intermediate arithmetic stays exact; rounding to two
//! decimal places happens only when a result leaves the engine, via
//! [`round_money`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use bigdecimal::One;
use bigdecimal::RoundingMode;

// ============================================================================
// SECTION: Rounding
// ============================================================================

/// Number of decimal places carried by monetary results.
pub const MONEY_SCALE: i64 = 2;

/// Number of decimal places carried by derived rate figures.
pub const RATE_SCALE: i64 = 6;

/// Rounds a monetary value to two decimal places, half-up.
///
/// Callers must apply this only at result boundaries; rounding intermediate
/// values compounds error.
#[must_use]
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

/// Rounds a derived rate figure (annualization, effective cost) to six
/// decimal places, half-up.
///
/// Resolved monthly rates are never rounded: rounding could push a clamped
/// rate outside its configured bounds.
#[must_use]
pub fn round_rate(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(RATE_SCALE, RoundingMode::HalfUp)
}

// ============================================================================
// SECTION: Arithmetic
// ============================================================================

/// Raises a decimal base to a non-negative integer power by repeated
/// multiplication.
///
/// Exact for decimal bases; used for compound-interest annualization.
#[must_use]
pub fn pow_int(base: &BigDecimal, exp: u32) -> BigDecimal {
    let mut result = BigDecimal::one();
    for _ in 0..exp {
        result *= base;
    }
    result
}

/// Converts a monthly rate to its compound annual equivalent: `(1+r)^12 - 1`.
#[must_use]
pub fn annualize_monthly_rate(monthly_rate: &BigDecimal) -> BigDecimal {
    pow_int(&(BigDecimal::one() + monthly_rate), 12) - BigDecimal::one()
}
