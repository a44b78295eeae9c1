// crates/consigna-providers/src/margin.rs
// ============================================================================
// Module: Margin Query Adapter
// Description: Simulated consignable-margin provider backed by a fixture table.
// Purpose: Answer margin queries deterministically for covered convenios.
// Dependencies: consigna-core, serde, serde_json, bigdecimal
// ============================================================================

//! ## Overview
//! The margin adapter simulates a payroll-system margin query. Coverage is
//! a configured table keyed by convenio; queries for uncovered convenios
//! and queries while the simulated backend is unavailable fail the attempt,
//! which is exactly what triggers orchestrator fallback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use consigna_core::AdapterError;
use consigna_core::AdapterRequest;
use consigna_core::ClientId;
use consigna_core::ConvenioId;
use consigna_core::OperationKind;
use consigna_core::ProviderAdapter;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the simulated margin adapter.
///
/// # Invariants
/// - `margins` is the full coverage table; absence means the convenio is
///   not served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MarginAdapterConfig {
    /// Available margin per covered convenio.
    pub margins: BTreeMap<ConvenioId, BigDecimal>,
    /// Simulates a backend outage when true.
    pub unavailable: bool,
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Margin query payload attributes.
///
/// # Invariants
/// - Identifiers are validated by their newtype deserializers.
#[derive(Debug, Deserialize)]
struct MarginQueryPayload {
    /// Client whose margin is queried.
    client_id: ClientId,
    /// Convenio the client belongs to.
    convenio_id: ConvenioId,
}

// ============================================================================
// SECTION: Adapter Implementation
// ============================================================================

/// Simulated consignable-margin provider.
///
/// # Invariants
/// - Serves only [`OperationKind::MarginQuery`] requests.
/// - Fails closed on malformed payloads and uncovered convenios.
#[derive(Debug)]
pub struct MarginAdapter {
    /// Coverage table and outage switch.
    config: MarginAdapterConfig,
}

impl MarginAdapter {
    /// Creates a margin adapter with the given configuration.
    #[must_use]
    pub const fn new(config: MarginAdapterConfig) -> Self {
        Self {
            config,
        }
    }
}

impl ProviderAdapter for MarginAdapter {
    fn invoke(&self, request: &AdapterRequest) -> Result<Value, AdapterError> {
        if request.operation != OperationKind::MarginQuery {
            return Err(AdapterError::Provider(format!(
                "unsupported operation: {}",
                request.operation
            )));
        }
        if self.config.unavailable {
            return Err(AdapterError::Timeout("margin backend unavailable".to_string()));
        }
        let payload: MarginQueryPayload = serde_json::from_value(request.payload.clone())
            .map_err(|error| AdapterError::Provider(format!("invalid margin payload: {error}")))?;
        let Some(margin) = self.config.margins.get(&payload.convenio_id) else {
            return Err(AdapterError::Provider(format!(
                "convenio not covered: {}",
                payload.convenio_id
            )));
        };
        Ok(json!({
            "client_id": payload.client_id,
            "convenio_id": payload.convenio_id,
            "available_margin": margin.to_string(),
        }))
    }
}
