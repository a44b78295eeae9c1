// crates/consigna-core/src/runtime/scoring.rs
// ============================================================================
// Module: Scoring Engine
// Description: Bounded decision score from client and payment-history features.
// Purpose: Compute a reproducible [0,100] score and map it to a decision bucket.
// Dependencies: crate::core, bigdecimal, thiserror
// ============================================================================

//! ## Overview
//! The scoring engine is pure and reproducible: the same inputs and policy
//! always yield the same score and bucket. Arithmetic is integer-only; the
//! payment-history term uses rounded integer division so no floating-point
//! nondeterminism can creep in. Bucket thresholds are fixed: >= 70
//! approved, >= 50 manual review, else rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::core::DecisionBucket;
use crate::core::ScoreInputs;
use crate::core::ScoreResult;
use crate::core::ScoringPolicy;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Scoring errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Input is missing or malformed; reported immediately, never retried.
    #[error("scoring validation error: {0}")]
    Validation(String),
}

// ============================================================================
// SECTION: Score Computation
// ============================================================================

/// Base score every proposal starts from.
const BASE_SCORE: i64 = 50;

/// Increment for salary at or above 5000.
const SALARY_MID_BONUS: i64 = 10;

/// Increment for salary at or above 10000, cumulative with the mid bonus.
const SALARY_HIGH_BONUS: i64 = 10;

/// Increment when the requested amount fits the available margin.
const WITHIN_MARGIN_BONUS: i64 = 15;

/// Computes the decision score for the given inputs and policy.
///
/// # Errors
///
/// Returns [`ScoringError::Validation`] when the CPF flag is invalid, the
/// requested amount or salary is out of range, or the installment counts
/// are inconsistent.
pub fn score(inputs: &ScoreInputs, policy: ScoringPolicy) -> Result<ScoreResult, ScoringError> {
    if !inputs.cpf_valid {
        return Err(ScoringError::Validation("cpf failed upstream validation".to_string()));
    }
    if inputs.requested_amount <= BigDecimal::from(0) {
        return Err(ScoringError::Validation("requested amount must be positive".to_string()));
    }
    if inputs.salary < BigDecimal::from(0) {
        return Err(ScoringError::Validation("salary must not be negative".to_string()));
    }
    let counted = inputs
        .paid_installments
        .checked_add(inputs.overdue_installments)
        .filter(|counted| *counted <= inputs.total_installments);
    if counted.is_none() {
        return Err(ScoringError::Validation(
            "paid and overdue installments exceed the total".to_string(),
        ));
    }

    let mut raw = BASE_SCORE;
    if inputs.salary >= BigDecimal::from(5000) {
        raw += SALARY_MID_BONUS;
    }
    if inputs.salary >= BigDecimal::from(10000) {
        raw += SALARY_HIGH_BONUS;
    }
    if inputs.requested_amount <= inputs.available_margin {
        raw += WITHIN_MARGIN_BONUS;
    }
    raw += history_term(inputs.paid_installments, inputs.total_installments, policy);
    raw -= i64::from(inputs.overdue_installments) * i64::from(policy.overdue_penalty());

    let clamped = raw.clamp(0, 100);
    let score = u8::try_from(clamped).unwrap_or(100);
    Ok(ScoreResult {
        score,
        bucket: DecisionBucket::from_score(score),
    })
}

/// Payment-history term: the on-time ratio scaled by the policy weight,
/// with rounded integer division.
fn history_term(paid: u32, total: u32, policy: ScoringPolicy) -> i64 {
    if total == 0 {
        return 0;
    }
    let paid = i64::from(paid);
    let total = i64::from(total);
    let weight = i64::from(policy.history_weight());
    (2 * paid * weight + total) / (2 * total)
}
