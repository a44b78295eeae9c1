// crates/consigna-core/src/runtime/engine.rs
// ============================================================================
// Module: Lending Engine Facade
// Description: Request-level operations wiring rules, providers, and collaborators.
// Purpose: Evaluate decisions, persist results, and fan side effects to the notifier.
// Dependencies: crate::core, crate::interfaces, crate::runtime, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The lending engine is the request-level facade over the engine
//! components: it matches rules, runs the calculators, orchestrates
//! provider operations, persists every decision through the injected
//! [`Store`], and hands side-effect messages to the [`Notifier`].
//! Notifier failures never roll back a decision. Provider exhaustion
//! surfaces as [`EngineError::ServiceUnavailable`] with the full attempt
//! trail; request validation failures are reported immediately and never
//! retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::ClientId;
use crate::core::CollectionAction;
use crate::core::CommissionRequest;
use crate::core::CommissionResult;
use crate::core::Installment;
use crate::core::OperationAttempt;
use crate::core::OperationKind;
use crate::core::OperationScope;
use crate::core::OrchestrationResult;
use crate::core::PricingQuote;
use crate::core::ProposalId;
use crate::core::ProviderDescriptor;
use crate::core::QuoteRequest;
use crate::core::RuleBook;
use crate::core::ScoreInputs;
use crate::core::ScoreResult;
use crate::core::ScoringPolicy;
use crate::interfaces::AdapterError;
use crate::interfaces::AdapterRequest;
use crate::interfaces::AdapterResolver;
use crate::interfaces::Clock;
use crate::interfaces::HealthRegistry;
use crate::interfaces::Notification;
use crate::interfaces::NotificationChannel;
use crate::interfaces::Notifier;
use crate::interfaces::OperationRecord;
use crate::interfaces::ScoreRecord;
use crate::interfaces::Store;
use crate::interfaces::StoreError;
use crate::runtime::collections;
use crate::runtime::evaluator::first_match;
use crate::runtime::orchestrator::FallbackOrchestrator;
use crate::runtime::pricing;
use crate::runtime::pricing::PricingError;
use crate::runtime::scoring;
use crate::runtime::scoring::ScoringError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Engine facade errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `ServiceUnavailable` carries the full attempt trail for audit.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Request input is missing or malformed; reported immediately, never
    /// retried.
    #[error("validation error: {0}")]
    Validation(String),
    /// No rule of the named family matched the request; the caller decides
    /// whether that is fatal.
    #[error("no matching {domain} rule for request")]
    RuleNotFound {
        /// Rule family that produced no match.
        domain: &'static str,
    },
    /// Every eligible provider failed; a 503-class condition distinct from
    /// request validation failures.
    #[error("service unavailable for {operation}")]
    ServiceUnavailable {
        /// Operation family that exhausted its providers.
        operation: OperationKind,
        /// Error message of the last failed attempt.
        last_error: Option<String>,
        /// Ordered per-attempt audit trail.
        attempts: Vec<OperationAttempt>,
    },
    /// Store reported an error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PricingError> for EngineError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::Validation(message) => Self::Validation(message),
        }
    }
}

impl From<ScoringError> for EngineError {
    fn from(error: ScoringError) -> Self {
        match error {
            ScoringError::Validation(message) => Self::Validation(message),
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Request-level lending engine facade.
///
/// # Invariants
/// - Rules and provider rosters are read-only snapshots owned by
///   configuration.
/// - Every decision is persisted before the method returns.
pub struct LendingEngine<S, N, C, H: HealthRegistry, A> {
    /// Rule book the engine evaluates against.
    rules: RuleBook,
    /// Provider roster for orchestrated operations.
    providers: Vec<ProviderDescriptor>,
    /// Persistence collaborator.
    store: S,
    /// Side-effect messaging collaborator.
    notifier: N,
    /// Injected time source.
    clock: C,
    /// Fallback orchestrator with health bookkeeping.
    orchestrator: FallbackOrchestrator<H>,
    /// Adapter resolution for provider names.
    adapters: A,
}

impl<S, N, C, H, A> LendingEngine<S, N, C, H, A>
where
    S: Store,
    N: Notifier,
    C: Clock,
    H: HealthRegistry,
    A: AdapterResolver,
{
    /// Creates an engine over the given rules, roster, and collaborators.
    #[must_use]
    pub const fn new(
        rules: RuleBook,
        providers: Vec<ProviderDescriptor>,
        store: S,
        notifier: N,
        clock: C,
        health: H,
        adapters: A,
    ) -> Self {
        Self {
            rules,
            providers,
            store,
            notifier,
            clock,
            orchestrator: FallbackOrchestrator::new(health),
            adapters,
        }
    }

    /// Returns the persistence collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the health registry backing the orchestrator.
    #[must_use]
    pub const fn health_registry(&self) -> &H {
        self.orchestrator.health_registry()
    }

    /// Generates a priced quote for the request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RuleNotFound`] when no pricing rule matches,
    /// [`EngineError::Validation`] on malformed input, and
    /// [`EngineError::Store`] when persistence fails.
    pub fn quote(&self, request: &QuoteRequest) -> Result<PricingQuote, EngineError> {
        let rule = first_match(&self.rules.pricing, &request.context).ok_or(
            EngineError::RuleNotFound {
                domain: "pricing",
            },
        )?;
        let quote = pricing::price(rule, request)?;
        self.store.save_quote(&quote)?;
        self.notify_decision(
            request.client_id,
            format!(
                "proposal {}: quote priced at monthly rate {}",
                quote.proposal_id, quote.monthly_rate
            ),
        );
        Ok(quote)
    }

    /// Calculates the commission payout for the request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RuleNotFound`] when no commission rule
    /// matches, [`EngineError::Validation`] on malformed input, and
    /// [`EngineError::Store`] when persistence fails.
    pub fn commission(&self, request: &CommissionRequest) -> Result<CommissionResult, EngineError> {
        let rule = first_match(&self.rules.commission, &request.context).ok_or(
            EngineError::RuleNotFound {
                domain: "commission",
            },
        )?;
        let result = pricing::commission(rule, request)?;
        self.store.save_commission(&result)?;
        Ok(result)
    }

    /// Scores a proposal under the selected policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] on malformed input and
    /// [`EngineError::Store`] when persistence fails.
    pub fn score_proposal(
        &self,
        proposal_id: &ProposalId,
        client_id: ClientId,
        inputs: &ScoreInputs,
        policy: ScoringPolicy,
    ) -> Result<ScoreResult, EngineError> {
        let result = scoring::score(inputs, policy)?;
        self.store.save_score(&ScoreRecord {
            proposal_id: proposal_id.clone(),
            policy,
            result,
        })?;
        self.notify_decision(
            client_id,
            format!("proposal {proposal_id}: score {}", result.score),
        );
        Ok(result)
    }

    /// Queries the consignable margin through the provider roster.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ServiceUnavailable`] when every eligible
    /// provider fails and [`EngineError::Store`] when audit persistence
    /// fails.
    pub fn query_margin(
        &self,
        scope: OperationScope,
        payload: Value,
    ) -> Result<OrchestrationResult, EngineError> {
        self.execute_operation(OperationKind::MarginQuery, scope, payload)
    }

    /// Requests an e-signature envelope through the provider roster.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ServiceUnavailable`] when every eligible
    /// provider fails and [`EngineError::Store`] when audit persistence
    /// fails.
    pub fn request_signature(
        &self,
        scope: OperationScope,
        payload: Value,
    ) -> Result<OrchestrationResult, EngineError> {
        self.execute_operation(OperationKind::Signature, scope, payload)
    }

    /// Issues a credit line through the provider roster.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ServiceUnavailable`] when every eligible
    /// provider fails and [`EngineError::Store`] when audit persistence
    /// fails.
    pub fn issue_credit(
        &self,
        scope: OperationScope,
        payload: Value,
    ) -> Result<OrchestrationResult, EngineError> {
        self.execute_operation(OperationKind::CreditIssuance, scope, payload)
    }

    /// Sweeps overdue installments and schedules collection actions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when the scheduler hits a store
    /// failure other than an idempotency-key collision.
    pub fn sweep_collections(
        &self,
        installments: &[Installment],
    ) -> Result<Vec<CollectionAction>, EngineError> {
        Ok(collections::sweep(
            installments,
            &self.rules.collection,
            self.clock.today(),
            &self.store,
            &self.notifier,
        )?)
    }

    /// Runs one orchestrated provider operation and persists its audit
    /// record regardless of outcome.
    fn execute_operation(
        &self,
        operation: OperationKind,
        scope: OperationScope,
        payload: Value,
    ) -> Result<OrchestrationResult, EngineError> {
        let request = AdapterRequest {
            operation,
            payload,
        };
        let result =
            self.orchestrator.execute(&self.providers, operation, scope, |provider| {
                self.adapters.resolve(&provider.name).map_or_else(
                    || {
                        Err(AdapterError::Provider(format!(
                            "no adapter registered for {}",
                            provider.name
                        )))
                    },
                    |adapter| adapter.invoke(&request),
                )
            });
        self.store.save_operation(&OperationRecord {
            operation,
            result: result.clone(),
        })?;
        if result.is_success() {
            Ok(result)
        } else {
            Err(EngineError::ServiceUnavailable {
                operation,
                last_error: result.last_error,
                attempts: result.attempts,
            })
        }
    }

    /// Delivers a decision message fire-and-forget.
    fn notify_decision(&self, client_id: ClientId, body: String) {
        let _ = self.notifier.notify(&Notification {
            client_id,
            channel: NotificationChannel::Email,
            body,
        });
    }
}
