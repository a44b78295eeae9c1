// crates/consigna-providers/src/lib.rs
// ============================================================================
// Module: Consigna Providers
// Description: Simulated provider adapters and registry utilities.
// Purpose: Provide deterministic adapters exercising the orchestration contract.
// Dependencies: consigna-core, serde, serde_json, bigdecimal
// ============================================================================

//! ## Overview
//! This crate ships simulated provider adapters (margin query, e-signature,
//! credit issuance) and a registry that resolves adapters by provider name.
//! The adapters define the contract real integrations must satisfy: they
//! validate their payloads, fail closed on anything malformed, and surface
//! every failure as an ordinary per-attempt [`consigna_core::AdapterError`]
//! so the orchestrator can fall back.
//! Invariants:
//! - Adapters are deterministic with respect to their configuration and
//!   payload; there is no hidden randomness or wall-clock dependence.
//! - No adapter performs real network I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod issuance;
pub mod margin;
pub mod registry;
pub mod scripted;
pub mod signature;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use issuance::IssuanceAdapter;
pub use issuance::IssuanceAdapterConfig;
pub use margin::MarginAdapter;
pub use margin::MarginAdapterConfig;
pub use registry::AdapterRegistry;
pub use scripted::ScriptedAdapter;
pub use signature::SignatureAdapter;
pub use signature::SignatureAdapterConfig;
