// crates/consigna-core/src/core/mod.rs
// ============================================================================
// Module: Consigna Core Model
// Description: Data model for rules, scoring, providers, and collections.
// Purpose: Group the typed records shared by every engine component.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! The core model holds every typed record the engine reads or produces.
//! Configuration-owned records (rules, provider descriptors) are immutable
//! inputs; engine-owned records (scores, quotes, attempt trails, collection
//! actions) are derived outputs handed to the external store.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod collections;
pub mod identifiers;
pub mod money;
pub mod pricing;
pub mod providers;
pub mod rules;
pub mod scoring;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use collections::ActionKey;
pub use collections::ActionStatus;
pub use collections::ActionType;
pub use collections::CollectionAction;
pub use collections::Installment;
pub use collections::InstallmentStatus;
pub use identifiers::ClientId;
pub use identifiers::ConvenioId;
pub use identifiers::InstallmentId;
pub use identifiers::ProposalId;
pub use identifiers::ProviderName;
pub use identifiers::RuleId;
pub use money::MONEY_SCALE;
pub use money::RATE_SCALE;
pub use money::annualize_monthly_rate;
pub use money::pow_int;
pub use money::round_money;
pub use money::round_rate;
pub use pricing::CommissionRequest;
pub use pricing::CommissionResult;
pub use pricing::FeeBreakdown;
pub use pricing::PricingQuote;
pub use pricing::QuoteRequest;
pub use pricing::RiskAdjustment;
pub use providers::AttemptStatus;
pub use providers::HealthStatus;
pub use providers::OperationAttempt;
pub use providers::OperationKind;
pub use providers::OperationScope;
pub use providers::OrchestrationResult;
pub use providers::OrchestrationStatus;
pub use providers::ProviderDescriptor;
pub use providers::ProviderHealth;
pub use providers::ProviderScope;
pub use rules::ActionSpec;
pub use rules::AmountRange;
pub use rules::CollectionRule;
pub use rules::CommissionRule;
pub use rules::DayRange;
pub use rules::FeeSchedule;
pub use rules::PricingRule;
pub use rules::ProductKind;
pub use rules::RuleBook;
pub use rules::RuleContext;
pub use rules::RulePredicates;
pub use rules::Tier;
pub use scoring::DecisionBucket;
pub use scoring::ScoreInputs;
pub use scoring::ScoreResult;
pub use scoring::ScoringPolicy;
