// crates/consigna-providers/src/scripted.rs
// ============================================================================
// Module: Scripted Adapter
// Description: Adapter replaying a queued script of outcomes.
// Purpose: Drive fallback scenarios deterministically in tests and demos.
// Dependencies: consigna-core, serde_json, std
// ============================================================================

//! ## Overview
//! The scripted adapter replays a fixed queue of outcomes, one per
//! invocation, and counts its calls. It exists to drive orchestration
//! scenarios (fail, fail, succeed) without real providers; an exhausted
//! script fails the attempt.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::PoisonError;

use consigna_core::AdapterError;
use consigna_core::AdapterRequest;
use consigna_core::ProviderAdapter;
use serde_json::Value;

// ============================================================================
// SECTION: Scripted Adapter
// ============================================================================

/// Adapter replaying queued outcomes in order.
///
/// # Invariants
/// - Outcomes are consumed front-to-back, one per invocation.
/// - An empty queue fails the attempt.
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    /// Queued outcomes; `Err` strings become provider errors.
    outcomes: Mutex<VecDeque<Result<Value, String>>>,
    /// Number of invocations observed.
    calls: Mutex<u64>,
}

impl ScriptedAdapter {
    /// Creates an adapter with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful outcome.
    pub fn push_success(&self, data: Value) {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).push_back(Ok(data));
    }

    /// Queues a failed outcome with the given error message.
    pub fn push_failure(&self, error: impl Into<String>) {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).push_back(Err(error.into()));
    }

    /// Returns the number of invocations observed so far.
    #[must_use]
    pub fn calls(&self) -> u64 {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProviderAdapter for ScriptedAdapter {
    fn invoke(&self, _request: &AdapterRequest) -> Result<Value, AdapterError> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        let outcome = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        match outcome {
            Some(Ok(data)) => Ok(data),
            Some(Err(error)) => Err(AdapterError::Provider(error)),
            None => Err(AdapterError::Provider("script exhausted".to_string())),
        }
    }
}
