// crates/consigna-core/src/lib.rs
// ============================================================================
// Module: Consigna Core
// Description: Decision and provider-fallback orchestration engine.
// Purpose: Evaluate lending rules and orchestrate external providers with fallback.
// Dependencies: serde, serde_json, thiserror, bigdecimal, time
// ============================================================================

//! ## Overview
//! Consigna core implements the decision engine of a salary-advance lending
//! portal: priority-ordered rule matching, tiered pricing and commission
//! math, a bounded decision score, sequential provider fallback with
//! per-attempt audit and health bookkeeping, and an idempotent collection
//! scheduler. External collaborators (storage, time, messaging, provider
//! adapters) are consumed through the trait interfaces in [`interfaces`].
//! Invariants:
//! - Engine components are deterministic given the same inputs.
//! - Monetary outputs are rounded to two decimal places only at result
//!   boundaries.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::ActionKey;
pub use self::core::ActionSpec;
pub use self::core::ActionStatus;
pub use self::core::ActionType;
pub use self::core::AmountRange;
pub use self::core::AttemptStatus;
pub use self::core::ClientId;
pub use self::core::CollectionAction;
pub use self::core::CollectionRule;
pub use self::core::CommissionRequest;
pub use self::core::CommissionResult;
pub use self::core::CommissionRule;
pub use self::core::ConvenioId;
pub use self::core::DayRange;
pub use self::core::DecisionBucket;
pub use self::core::FeeBreakdown;
pub use self::core::FeeSchedule;
pub use self::core::HealthStatus;
pub use self::core::Installment;
pub use self::core::InstallmentId;
pub use self::core::InstallmentStatus;
pub use self::core::OperationAttempt;
pub use self::core::OperationKind;
pub use self::core::OperationScope;
pub use self::core::OrchestrationResult;
pub use self::core::OrchestrationStatus;
pub use self::core::PricingQuote;
pub use self::core::PricingRule;
pub use self::core::ProductKind;
pub use self::core::ProposalId;
pub use self::core::ProviderDescriptor;
pub use self::core::ProviderHealth;
pub use self::core::ProviderName;
pub use self::core::ProviderScope;
pub use self::core::QuoteRequest;
pub use self::core::RiskAdjustment;
pub use self::core::RuleBook;
pub use self::core::RuleContext;
pub use self::core::RuleId;
pub use self::core::RulePredicates;
pub use self::core::ScoreInputs;
pub use self::core::ScoreResult;
pub use self::core::ScoringPolicy;
pub use self::core::Tier;
pub use self::core::round_money;
pub use interfaces::AdapterError;
pub use interfaces::AdapterRequest;
pub use interfaces::AdapterResolver;
pub use interfaces::Clock;
pub use interfaces::FixedClock;
pub use interfaces::HealthRegistry;
pub use interfaces::Notification;
pub use interfaces::NotificationChannel;
pub use interfaces::Notifier;
pub use interfaces::NotifyError;
pub use interfaces::OperationRecord;
pub use interfaces::ProviderAdapter;
pub use interfaces::ScoreRecord;
pub use interfaces::Store;
pub use interfaces::StoreError;
