// crates/consigna-providers/src/signature.rs
// ============================================================================
// Module: E-Signature Adapter
// Description: Simulated e-signature provider issuing deterministic envelopes.
// Purpose: Exercise the signature orchestration contract without network I/O.
// Dependencies: consigna-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The signature adapter simulates an e-signature service: it validates the
//! document payload and issues a deterministic envelope identifier derived
//! from the configured prefix and the proposal. Outages and malformed
//! payloads fail the attempt.

// ============================================================================
// SECTION: Imports
// ============================================================================

use consigna_core::AdapterError;
use consigna_core::AdapterRequest;
use consigna_core::OperationKind;
use consigna_core::ProviderAdapter;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the simulated signature adapter.
///
/// # Invariants
/// - `envelope_prefix` is embedded in every issued envelope identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignatureAdapterConfig {
    /// Prefix for issued envelope identifiers.
    pub envelope_prefix: String,
    /// Simulates a backend outage when true.
    pub unavailable: bool,
}

impl Default for SignatureAdapterConfig {
    fn default() -> Self {
        Self {
            envelope_prefix: "env".to_string(),
            unavailable: false,
        }
    }
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Signature request payload attributes.
///
/// # Invariants
/// - `document` is an opaque reference to the contract artifact.
#[derive(Debug, Deserialize)]
struct SignaturePayload {
    /// Proposal the envelope belongs to.
    proposal_id: String,
    /// Contract document reference.
    document: String,
    /// Signer address the envelope is routed to.
    signer_email: String,
}

// ============================================================================
// SECTION: Adapter Implementation
// ============================================================================

/// Simulated e-signature provider.
///
/// # Invariants
/// - Serves only [`OperationKind::Signature`] requests.
/// - Envelope identifiers are deterministic for the same payload.
#[derive(Debug, Default)]
pub struct SignatureAdapter {
    /// Envelope prefix and outage switch.
    config: SignatureAdapterConfig,
}

impl SignatureAdapter {
    /// Creates a signature adapter with the given configuration.
    #[must_use]
    pub const fn new(config: SignatureAdapterConfig) -> Self {
        Self {
            config,
        }
    }
}

impl ProviderAdapter for SignatureAdapter {
    fn invoke(&self, request: &AdapterRequest) -> Result<Value, AdapterError> {
        if request.operation != OperationKind::Signature {
            return Err(AdapterError::Provider(format!(
                "unsupported operation: {}",
                request.operation
            )));
        }
        if self.config.unavailable {
            return Err(AdapterError::Timeout("signature backend unavailable".to_string()));
        }
        let payload: SignaturePayload = serde_json::from_value(request.payload.clone())
            .map_err(|error| {
                AdapterError::Provider(format!("invalid signature payload: {error}"))
            })?;
        if payload.document.is_empty() {
            return Err(AdapterError::Provider("document reference is empty".to_string()));
        }
        if payload.signer_email.is_empty() {
            return Err(AdapterError::Provider("signer email is empty".to_string()));
        }
        Ok(json!({
            "envelope_id": format!("{}-{}", self.config.envelope_prefix, payload.proposal_id),
            "proposal_id": payload.proposal_id,
            "status": "sent",
        }))
    }
}
