// crates/consigna-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Rule Set Evaluator
// Description: Priority-ordered matching over typed predicate rules.
// Purpose: Select the first active rule whose predicates hold for a context.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The evaluator is a generic priority-ordered matcher over any rule family
//! implementing [`MatchableRule`]. It is side-effect-free and deterministic:
//! rules are scanned in ascending priority with listed order breaking ties,
//! and the first active rule whose every predicate is satisfied wins.
//! A miss returns `None` (a sentinel, not an error); callers decide whether
//! that is fatal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::CommissionRule;
use crate::core::PricingRule;
use crate::core::RuleContext;
use crate::core::RuleId;

// ============================================================================
// SECTION: Matchable Rule
// ============================================================================

/// Rule family interface consumed by the evaluator.
///
/// # Invariants
/// - `matches` must be pure: no side effects, deterministic for the same
///   context.
pub trait MatchableRule {
    /// Returns the rule identifier.
    fn id(&self) -> &RuleId;

    /// Returns the precedence; lower values match first.
    fn priority(&self) -> u32;

    /// Returns true when the rule may match at all.
    fn is_active(&self) -> bool;

    /// Returns true when every applicability predicate holds.
    fn matches(&self, ctx: &RuleContext) -> bool;
}

impl MatchableRule for PricingRule {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn matches(&self, ctx: &RuleContext) -> bool {
        self.predicates.matches(ctx)
    }
}

impl MatchableRule for CommissionRule {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn matches(&self, ctx: &RuleContext) -> bool {
        self.predicates.matches(ctx)
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Returns the first active rule whose predicates hold for the context.
///
/// Rules are scanned in ascending priority; listed order breaks ties.
/// Returns `None` when no rule matches.
#[must_use]
pub fn first_match<'a, R: MatchableRule>(rules: &'a [R], ctx: &RuleContext) -> Option<&'a R> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&index| rules[index].priority());
    order
        .into_iter()
        .map(|index| &rules[index])
        .find(|rule| rule.is_active() && rule.matches(ctx))
}
