// crates/consigna-core/src/runtime/health.rs
// ============================================================================
// Module: Provider Health Registry
// Description: In-memory provider health bookkeeping with atomic updates.
// Purpose: Track per-provider success/failure counters and derived status.
// Dependencies: crate::core, crate::interfaces, std
// ============================================================================

//! ## Overview
//! The in-memory health registry records per-attempt outcomes behind a
//! mutex so concurrent orchestration calls never lose counter updates.
//! Health status is a pure function of the most recent attempt: any
//! failure degrades the provider, any success restores it. Counters only
//! increase; resets are an external maintenance action.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::HealthStatus;
use crate::core::ProviderHealth;
use crate::core::ProviderName;
use crate::interfaces::HealthRegistry;

// ============================================================================
// SECTION: In-Memory Registry
// ============================================================================

/// Mutex-guarded provider health registry.
///
/// # Invariants
/// - Increments are atomic with respect to concurrent callers.
/// - A poisoned lock is recovered; bookkeeping never panics or aborts an
///   orchestration call.
#[derive(Debug, Default)]
pub struct InMemoryHealthRegistry {
    /// Health records keyed by provider name.
    records: Mutex<BTreeMap<ProviderName, ProviderHealth>>,
}

impl InMemoryHealthRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HealthRegistry for InMemoryHealthRegistry {
    fn record_success(&self, provider: &ProviderName) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let health = records.entry(provider.clone()).or_default();
        health.success_count += 1;
        health.status = HealthStatus::Healthy;
    }

    fn record_failure(&self, provider: &ProviderName, error: &str) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let health = records.entry(provider.clone()).or_default();
        health.failure_count += 1;
        health.error_count_24h += 1;
        health.status = HealthStatus::Degraded;
        health.last_error = Some(error.to_string());
    }

    fn health(&self, provider: &ProviderName) -> Option<ProviderHealth> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.get(provider).cloned()
    }
}
