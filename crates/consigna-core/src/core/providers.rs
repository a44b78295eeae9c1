// crates/consigna-core/src/core/providers.rs
// ============================================================================
// Module: Consigna Provider Model
// Description: Provider descriptors, health, and orchestration audit records.
// Purpose: Model interchangeable external providers and per-attempt outcomes.
// Dependencies: serde, serde_json, crate::core::{identifiers, rules}
// ============================================================================

//! ## Overview
//! Providers are interchangeable external services (margin query,
//! e-signature, credit issuance) with independent availability. Descriptors
//! and rosters are owned by configuration; health counters and attempt
//! trails are produced by the engine.
//! Invariants:
//! - Health counters increase monotonically per attempt outcome.
//! - Attempt trails are ordered and ephemeral to one orchestration call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::ConvenioId;
use crate::core::identifiers::ProviderName;
use crate::core::rules::ProductKind;

// ============================================================================
// SECTION: Operations and Scope
// ============================================================================

/// Operation families served by external providers.
///
/// # Invariants
/// - Variants are stable for serialization and roster matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Consignable-margin lookup against a payroll system.
    MarginQuery,
    /// Electronic signature of contract documents.
    Signature,
    /// Credit-line issuance with the lending backend.
    CreditIssuance,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MarginQuery => "margin_query",
            Self::Signature => "signature",
            Self::CreditIssuance => "credit_issuance",
        };
        f.write_str(name)
    }
}

/// Scope restriction for a provider.
///
/// # Invariants
/// - Empty sets are unrestricted for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderScope {
    /// Product families served; empty means all.
    pub products: BTreeSet<ProductKind>,
    /// Convenios served; empty means all.
    pub convenios: BTreeSet<ConvenioId>,
}

impl ProviderScope {
    /// Returns true when the scope admits the given product and convenio.
    #[must_use]
    pub fn supports(&self, product: ProductKind, convenio: Option<ConvenioId>) -> bool {
        if !self.products.is_empty() && !self.products.contains(&product) {
            return false;
        }
        if self.convenios.is_empty() {
            return true;
        }
        match convenio {
            Some(convenio) => self.convenios.contains(&convenio),
            None => false,
        }
    }
}

/// Scope of one orchestration call, matched against provider scopes.
///
/// # Invariants
/// - Values are snapshots of the inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationScope {
    /// Product family of the request.
    pub product: ProductKind,
    /// Convenio of the request, when known.
    pub convenio: Option<ConvenioId>,
}

// ============================================================================
// SECTION: Provider Descriptors
// ============================================================================

/// Configuration record describing one external provider.
///
/// # Invariants
/// - Owned by configuration; the engine only reads it.
/// - Deactivation is a configuration action, never an engine action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Provider name; unique within a roster.
    pub name: ProviderName,
    /// Operation family this provider serves.
    pub operation: OperationKind,
    /// Fallback order; lower values are attempted first.
    pub priority: u32,
    /// Inactive providers are never candidates.
    pub active: bool,
    /// Scope restriction; empty scope is unrestricted.
    pub scope: ProviderScope,
}

// ============================================================================
// SECTION: Provider Health
// ============================================================================

/// Derived provider health status.
///
/// # Invariants
/// - Recomputed after every attempt; never reset by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Last attempt succeeded.
    #[default]
    Healthy,
    /// Last attempt failed.
    Degraded,
}

/// Rolling health counters for one provider.
///
/// # Invariants
/// - Counters increase monotonically; resets are an external maintenance
///   action outside this engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Successful attempts since the last external reset.
    pub success_count: u64,
    /// Failed attempts since the last external reset.
    pub failure_count: u64,
    /// Failed attempts within the rolling 24-hour window.
    pub error_count_24h: u64,
    /// Derived status after the most recent attempt.
    pub status: HealthStatus,
    /// Error message from the most recent failure.
    pub last_error: Option<String>,
}

// ============================================================================
// SECTION: Orchestration Audit
// ============================================================================

/// Status of one provider attempt.
///
/// # Invariants
/// - `Pending` never appears in a returned attempt trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Attempt dispatched, outcome not yet known.
    Pending,
    /// Attempt succeeded.
    Success,
    /// Attempt failed.
    Failed,
}

/// Audit record for one provider attempt within an orchestration call.
///
/// # Invariants
/// - Ephemeral: exists only for the duration of one orchestration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationAttempt {
    /// Provider attempted.
    pub provider: ProviderName,
    /// Attempt outcome.
    pub status: AttemptStatus,
    /// Error message when the attempt failed.
    pub error: Option<String>,
    /// Provider response payload when the attempt succeeded.
    pub data: Option<Value>,
}

/// Terminal status of an orchestration call.
///
/// # Invariants
/// - `Failed` is a service-unavailable condition, distinct from request
///   validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationStatus {
    /// A provider succeeded.
    Success,
    /// All candidates failed or none were eligible.
    Failed,
}

/// Result of one orchestration call, including the full attempt trail.
///
/// # Invariants
/// - `attempts` is ordered by attempt sequence.
/// - `provider` and `data` are set exactly when `status` is `Success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Terminal status.
    pub status: OrchestrationStatus,
    /// Provider that succeeded, when any did.
    pub provider: Option<ProviderName>,
    /// Response payload of the successful provider.
    pub data: Option<Value>,
    /// Ordered per-attempt audit trail.
    pub attempts: Vec<OperationAttempt>,
    /// Error message of the last failed attempt, or the eligibility error
    /// when no candidates existed.
    pub last_error: Option<String>,
}

impl OrchestrationResult {
    /// Returns true when a provider succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, OrchestrationStatus::Success)
    }
}
