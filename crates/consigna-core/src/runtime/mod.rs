// crates/consigna-core/src/runtime/mod.rs
// ============================================================================
// Module: Consigna Runtime
// Description: Engine components: evaluation, pricing, scoring, orchestration.
// Purpose: Group the executable engine logic over the core model.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime holds the executable engine components: the rule evaluator,
//! tiered calculator, scoring engine, health registry, fallback
//! orchestrator, collection scheduler, and the request-level
//! [`LendingEngine`] facade, plus the in-memory reference store.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod collections;
pub mod engine;
pub mod evaluator;
pub mod health;
pub mod orchestrator;
pub mod pricing;
pub mod scoring;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use collections::sweep;
pub use engine::EngineError;
pub use engine::LendingEngine;
pub use evaluator::MatchableRule;
pub use evaluator::first_match;
pub use health::InMemoryHealthRegistry;
pub use orchestrator::FallbackOrchestrator;
pub use pricing::PricingError;
pub use pricing::commission;
pub use pricing::price;
pub use scoring::ScoringError;
pub use scoring::score;
pub use store::InMemoryStore;
