// crates/consigna-core/src/core/scoring.rs
// ============================================================================
// Module: Consigna Scoring Model
// Description: Score inputs, policies, buckets, and results.
// Purpose: Model the derived decision score and its outcome mapping.
// Dependencies: serde, bigdecimal
// ============================================================================

//! ## Overview
//! Scoring records are derived values: a [`ScoreResult`] is recomputed on
//! demand from [`ScoreInputs`] and never mutated in place. Two named
//! [`ScoringPolicy`] profiles weight the payment-history term differently;
//! the caller selects one explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Client and proposal features consumed by the scoring engine.
///
/// # Invariants
/// - `paid_installments + overdue_installments <= total_installments`
///   (validated at scoring time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Gross monthly salary.
    pub salary: BigDecimal,
    /// Requested loan amount.
    pub requested_amount: BigDecimal,
    /// Available consignable margin.
    pub available_margin: BigDecimal,
    /// Installments paid on time across prior contracts.
    pub paid_installments: u32,
    /// Installments currently or historically overdue.
    pub overdue_installments: u32,
    /// Total installments across prior contracts.
    pub total_installments: u32,
    /// CPF document validity flag from upstream validation.
    pub cpf_valid: bool,
}

// ============================================================================
// SECTION: Policies
// ============================================================================

/// Named scoring policy selecting a payment-history weighting profile.
///
/// # Invariants
/// - Policies are explicit caller choices, never an internal A/B switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Default profile: history weight 20, overdue penalty 5 per installment.
    #[default]
    Standard,
    /// History-heavy profile: history weight 30, overdue penalty 8 per
    /// installment.
    HistoryWeighted,
}

impl ScoringPolicy {
    /// Returns the payment-history weight in score points.
    #[must_use]
    pub const fn history_weight(self) -> u32 {
        match self {
            Self::Standard => 20,
            Self::HistoryWeighted => 30,
        }
    }

    /// Returns the penalty in score points per overdue installment.
    #[must_use]
    pub const fn overdue_penalty(self) -> u32 {
        match self {
            Self::Standard => 5,
            Self::HistoryWeighted => 8,
        }
    }
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Decision bucket derived from the score.
///
/// # Invariants
/// - Thresholds are fixed: >= 70 approved, >= 50 manual review, else
///   rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBucket {
    /// Auto-approved.
    Approved,
    /// Routed to a human analyst.
    ManualReview,
    /// Auto-rejected.
    Rejected,
}

impl DecisionBucket {
    /// Maps a clamped score to its decision bucket.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::Approved
        } else if score >= 50 {
            Self::ManualReview
        } else {
            Self::Rejected
        }
    }
}

/// Derived decision score.
///
/// # Invariants
/// - `score` is always within `[0, 100]`.
/// - `bucket` is always consistent with `score` per the fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Clamped integer score.
    pub score: u8,
    /// Decision bucket derived from the score.
    pub bucket: DecisionBucket,
}
