// crates/consigna-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Fallback Orchestrator
// Description: Ordered provider fallback with per-attempt audit and health updates.
// Purpose: Return the first provider success or an aggregate failure with the trail.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The orchestrator iterates an ordered, filtered provider list and invokes
//! the operation against each candidate exactly once, synchronously,
//! stopping at the first success. Every attempt outcome is appended to an
//! ordered trail and recorded in the health registry before the loop
//! continues. Fallback between providers is immediate: there is no backoff
//! and no cancellation once an attempt is dispatched.
//! Invariants:
//! - Candidates are filtered to active providers of the requested operation
//!   whose scope admits the request (empty scope is unrestricted), then
//!   sorted ascending by priority with listed order breaking ties.
//! - No provider is invoked more than once within a single call.
//! - Exhaustion is a service-unavailable condition, distinct from request
//!   validation failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::AttemptStatus;
use crate::core::OperationAttempt;
use crate::core::OperationKind;
use crate::core::OperationScope;
use crate::core::OrchestrationResult;
use crate::core::OrchestrationStatus;
use crate::core::ProviderDescriptor;
use crate::interfaces::AdapterError;
use crate::interfaces::HealthRegistry;

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Sequential fallback orchestrator over an injected health registry.
///
/// # Invariants
/// - Health bookkeeping happens for every attempt, success or failure.
/// - The attempt trail preserves invocation order.
pub struct FallbackOrchestrator<H: HealthRegistry> {
    /// Shared provider health bookkeeping.
    health: H,
}

impl<H: HealthRegistry> FallbackOrchestrator<H> {
    /// Creates an orchestrator around the given health registry.
    #[must_use]
    pub const fn new(health: H) -> Self {
        Self {
            health,
        }
    }

    /// Returns the underlying health registry.
    #[must_use]
    pub const fn health_registry(&self) -> &H {
        &self.health
    }

    /// Executes the operation against candidates in priority order,
    /// stopping at the first success.
    ///
    /// Repeated attempts against the same degraded provider across
    /// separate calls are allowed; a later success is how health status
    /// self-heals.
    pub fn execute<F>(
        &self,
        providers: &[ProviderDescriptor],
        operation: OperationKind,
        scope: OperationScope,
        mut invoke: F,
    ) -> OrchestrationResult
    where
        F: FnMut(&ProviderDescriptor) -> Result<Value, AdapterError>,
    {
        let mut candidates: Vec<&ProviderDescriptor> = providers
            .iter()
            .filter(|provider| {
                provider.active
                    && provider.operation == operation
                    && provider.scope.supports(scope.product, scope.convenio)
            })
            .collect();
        candidates.sort_by_key(|provider| provider.priority);

        if candidates.is_empty() {
            return OrchestrationResult {
                status: OrchestrationStatus::Failed,
                provider: None,
                data: None,
                attempts: Vec::new(),
                last_error: Some(format!("no eligible provider for {operation}")),
            };
        }

        let mut attempts = Vec::with_capacity(candidates.len());
        let mut last_error = None;
        for provider in candidates {
            match invoke(provider) {
                Ok(data) => {
                    self.health.record_success(&provider.name);
                    attempts.push(OperationAttempt {
                        provider: provider.name.clone(),
                        status: AttemptStatus::Success,
                        error: None,
                        data: Some(data.clone()),
                    });
                    return OrchestrationResult {
                        status: OrchestrationStatus::Success,
                        provider: Some(provider.name.clone()),
                        data: Some(data),
                        attempts,
                        last_error: None,
                    };
                }
                Err(error) => {
                    let message = error.to_string();
                    self.health.record_failure(&provider.name, &message);
                    attempts.push(OperationAttempt {
                        provider: provider.name.clone(),
                        status: AttemptStatus::Failed,
                        error: Some(message.clone()),
                        data: None,
                    });
                    last_error = Some(message);
                }
            }
        }

        OrchestrationResult {
            status: OrchestrationStatus::Failed,
            provider: None,
            data: None,
            attempts,
            last_error,
        }
    }
}
