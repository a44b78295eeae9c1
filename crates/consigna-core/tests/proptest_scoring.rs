// crates/consigna-core/tests/proptest_scoring.rs
// ============================================================================
// Module: Scoring Property-Based Tests
// Description: Property tests for score bounds and bucket consistency.
// Purpose: Detect out-of-range scores across wide input ranges.
// ============================================================================

//! Property-based tests for scoring engine invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use bigdecimal::BigDecimal;
use consigna_core::DecisionBucket;
use consigna_core::ScoreInputs;
use consigna_core::ScoringPolicy;
use consigna_core::runtime::score;
use proptest::prelude::*;

// ============================================================================
// SECTION: Strategies
// ============================================================================

fn history_strategy() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..=48)
        .prop_flat_map(|total| (Just(total), 0..=total))
        .prop_flat_map(|(total, paid)| (Just(total), Just(paid), 0..=(total - paid)))
        .prop_map(|(total, paid, overdue)| (paid, overdue, total))
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn score_is_always_within_bounds(
        salary in 0i64..50_000,
        requested in 1i64..50_000,
        margin in 0i64..50_000,
        (paid, overdue, total) in history_strategy(),
        history_weighted in any::<bool>(),
    ) {
        let inputs = ScoreInputs {
            salary: BigDecimal::from(salary),
            requested_amount: BigDecimal::from(requested),
            available_margin: BigDecimal::from(margin),
            paid_installments: paid,
            overdue_installments: overdue,
            total_installments: total,
            cpf_valid: true,
        };
        let policy = if history_weighted {
            ScoringPolicy::HistoryWeighted
        } else {
            ScoringPolicy::Standard
        };
        let result = score(&inputs, policy).unwrap();
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.bucket, DecisionBucket::from_score(result.score));
    }

    #[test]
    fn scoring_is_deterministic(
        salary in 0i64..50_000,
        requested in 1i64..50_000,
        margin in 0i64..50_000,
        (paid, overdue, total) in history_strategy(),
    ) {
        let inputs = ScoreInputs {
            salary: BigDecimal::from(salary),
            requested_amount: BigDecimal::from(requested),
            available_margin: BigDecimal::from(margin),
            paid_installments: paid,
            overdue_installments: overdue,
            total_installments: total,
            cpf_valid: true,
        };
        let first = score(&inputs, ScoringPolicy::Standard).unwrap();
        let second = score(&inputs, ScoringPolicy::Standard).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn more_overdue_installments_never_raise_the_score(
        salary in 0i64..50_000,
        requested in 1i64..50_000,
        margin in 0i64..50_000,
        paid in 0u32..20,
        overdue in 1u32..20,
    ) {
        let worse = ScoreInputs {
            salary: BigDecimal::from(salary),
            requested_amount: BigDecimal::from(requested),
            available_margin: BigDecimal::from(margin),
            paid_installments: paid,
            overdue_installments: overdue,
            total_installments: paid + overdue,
            cpf_valid: true,
        };
        let mut better = worse.clone();
        better.overdue_installments = overdue - 1;
        better.total_installments = paid + overdue - 1;

        let worse_score = score(&worse, ScoringPolicy::Standard).unwrap().score;
        let better_score = score(&better, ScoringPolicy::Standard).unwrap().score;
        prop_assert!(worse_score <= better_score);
    }
}
