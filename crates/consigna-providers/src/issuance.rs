// crates/consigna-providers/src/issuance.rs
// ============================================================================
// Module: Credit Issuance Adapter
// Description: Simulated credit-issuance provider minting contract numbers.
// Purpose: Exercise the issuance orchestration contract without network I/O.
// Dependencies: consigna-core, serde, serde_json, bigdecimal
// ============================================================================

//! ## Overview
//! The issuance adapter simulates the lending backend that opens the credit
//! line. It validates the financed amount and mints a deterministic
//! contract number from the configured prefix and the proposal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
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

/// Configuration for the simulated issuance adapter.
///
/// # Invariants
/// - `contract_prefix` is embedded in every minted contract number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuanceAdapterConfig {
    /// Prefix for minted contract numbers.
    pub contract_prefix: String,
    /// Simulates a backend outage when true.
    pub unavailable: bool,
}

impl Default for IssuanceAdapterConfig {
    fn default() -> Self {
        Self {
            contract_prefix: "ctr".to_string(),
            unavailable: false,
        }
    }
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Issuance request payload attributes.
///
/// # Invariants
/// - `amount` is the financed amount as a decimal string or number.
#[derive(Debug, Deserialize)]
struct IssuancePayload {
    /// Proposal the contract belongs to.
    proposal_id: String,
    /// Financed amount.
    amount: BigDecimal,
}

// ============================================================================
// SECTION: Adapter Implementation
// ============================================================================

/// Simulated credit-issuance provider.
///
/// # Invariants
/// - Serves only [`OperationKind::CreditIssuance`] requests.
/// - Contract numbers are deterministic for the same payload.
#[derive(Debug, Default)]
pub struct IssuanceAdapter {
    /// Contract prefix and outage switch.
    config: IssuanceAdapterConfig,
}

impl IssuanceAdapter {
    /// Creates an issuance adapter with the given configuration.
    #[must_use]
    pub const fn new(config: IssuanceAdapterConfig) -> Self {
        Self {
            config,
        }
    }
}

impl ProviderAdapter for IssuanceAdapter {
    fn invoke(&self, request: &AdapterRequest) -> Result<Value, AdapterError> {
        if request.operation != OperationKind::CreditIssuance {
            return Err(AdapterError::Provider(format!(
                "unsupported operation: {}",
                request.operation
            )));
        }
        if self.config.unavailable {
            return Err(AdapterError::Timeout("issuance backend unavailable".to_string()));
        }
        let payload: IssuancePayload = serde_json::from_value(request.payload.clone())
            .map_err(|error| AdapterError::Provider(format!("invalid issuance payload: {error}")))?;
        if payload.amount <= BigDecimal::from(0) {
            return Err(AdapterError::Provider("financed amount must be positive".to_string()));
        }
        Ok(json!({
            "contract_number": format!("{}-{}", self.config.contract_prefix, payload.proposal_id),
            "proposal_id": payload.proposal_id,
            "amount": payload.amount.to_string(),
            "status": "issued",
        }))
    }
}
