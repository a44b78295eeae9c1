// crates/consigna-core/tests/proptest_pricing.rs
// ============================================================================
// Module: Pricing Property-Based Tests
// Description: Property tests for clamp bounds and fee invariants.
// Purpose: Detect invariant violations across wide amount and factor ranges.
// ============================================================================

//! Property-based tests for tiered calculator invariants.

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

use std::str::FromStr;

use bigdecimal::BigDecimal;
use consigna_core::ClientId;
use consigna_core::FeeSchedule;
use consigna_core::PricingRule;
use consigna_core::ProductKind;
use consigna_core::ProposalId;
use consigna_core::QuoteRequest;
use consigna_core::RiskAdjustment;
use consigna_core::RuleContext;
use consigna_core::RuleId;
use consigna_core::RulePredicates;
use consigna_core::runtime::price;
use proptest::prelude::*;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).unwrap()
}

fn clamped_rule(fees: FeeSchedule) -> PricingRule {
    PricingRule {
        id: RuleId::new("price-prop"),
        priority: 1,
        active: true,
        predicates: RulePredicates::any(),
        base_rate: dec("0.025"),
        tiers: Vec::new(),
        minimum_rate: Some(dec("0.01")),
        maximum_rate: Some(dec("0.05")),
        fees,
    }
}

fn request(amount: i64, term_months: u32, factor_cents: i64) -> QuoteRequest {
    QuoteRequest {
        proposal_id: ProposalId::new("prop-prop"),
        client_id: ClientId::from_raw(1).unwrap(),
        context: RuleContext {
            product: ProductKind::NewLoan,
            convenio: None,
            role: None,
            amount: BigDecimal::from(amount),
        },
        term_months,
        risk: vec![RiskAdjustment {
            label: "profile".to_string(),
            // factor_cents of 100 is a neutral multiplier.
            factor: BigDecimal::new(factor_cents.into(), 2),
        }],
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn resolved_rate_stays_within_clamp_bounds(
        amount in 1i64..1_000_000,
        term in 1u32..96,
        factor_cents in 10i64..500,
    ) {
        let rule = clamped_rule(FeeSchedule::free());
        let quote = price(&rule, &request(amount, term, factor_cents)).unwrap();
        prop_assert!(quote.monthly_rate >= dec("0.01"));
        prop_assert!(quote.monthly_rate <= dec("0.05"));
    }

    #[test]
    fn total_amount_never_drops_below_principal(
        amount in 1i64..1_000_000,
        term in 1u32..96,
        factor_cents in 10i64..500,
    ) {
        let rule = clamped_rule(FeeSchedule::free());
        let quote = price(&rule, &request(amount, term, factor_cents)).unwrap();
        prop_assert!(quote.total_amount >= BigDecimal::from(amount));
        prop_assert!(quote.interest >= BigDecimal::from(0));
    }

    #[test]
    fn fees_reduce_the_net_disbursement(
        amount in 1_000i64..1_000_000,
        term in 1u32..96,
    ) {
        let rule = clamped_rule(FeeSchedule {
            origination_rate: dec("0.01"),
            origination_fixed: dec("5"),
            insurance_rate: dec("0.005"),
            averbation_fixed: dec("2.5"),
        });
        let quote = price(&rule, &request(amount, term, 100)).unwrap();
        prop_assert!(quote.net_amount < BigDecimal::from(amount));
        prop_assert!(quote.total_fees > BigDecimal::from(0));
        prop_assert!(quote.net_amount > BigDecimal::from(0));
    }

    #[test]
    fn total_fees_grow_with_the_amount(
        amount in 1_000i64..500_000,
        term in 1u32..96,
    ) {
        let rule = clamped_rule(FeeSchedule {
            origination_rate: dec("0.01"),
            origination_fixed: dec("5"),
            insurance_rate: dec("0.005"),
            averbation_fixed: dec("2.5"),
        });
        let smaller = price(&rule, &request(amount, term, 100)).unwrap();
        let larger = price(&rule, &request(amount * 2, term, 100)).unwrap();
        prop_assert!(larger.total_fees > smaller.total_fees);
    }

    #[test]
    fn effective_cost_is_positive_when_interest_accrues(
        amount in 1_000i64..1_000_000,
        term in 1u32..96,
    ) {
        let rule = clamped_rule(FeeSchedule::free());
        let quote = price(&rule, &request(amount, term, 100)).unwrap();
        prop_assert!(quote.effective_cost > BigDecimal::from(0));
    }
}
