// crates/consigna-providers/src/registry.rs
// ============================================================================
// Module: Adapter Registry
// Description: Registry resolving provider names to adapters.
// Purpose: Route orchestrated operations to the adapter behind each provider.
// Dependencies: consigna-core
// ============================================================================

//! ## Overview
//! The adapter registry maps provider names to boxed adapters and
//! implements the core [`AdapterResolver`] interface consumed by the
//! lending engine. Resolution misses are not registry errors: the
//! orchestrator records them as per-attempt failures and falls back.
//! Invariants:
//! - Provider names are unique within the registry.
//! - Registered adapters are `Send + Sync` and stored behind trait objects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use consigna_core::AdapterError;
use consigna_core::AdapterResolver;
use consigna_core::ProviderAdapter;
use consigna_core::ProviderName;

// ============================================================================
// SECTION: Adapter Registry
// ============================================================================

/// Registry of provider adapters keyed by provider name.
///
/// # Invariants
/// - Duplicate registration is rejected; the first adapter wins.
#[derive(Default)]
pub struct AdapterRegistry {
    /// Adapters keyed by provider name.
    adapters: BTreeMap<ProviderName, Box<dyn ProviderAdapter + Send + Sync>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under the given provider name.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the name is already registered.
    pub fn register(
        &mut self,
        name: ProviderName,
        adapter: impl ProviderAdapter + Send + Sync + 'static,
    ) -> Result<(), AdapterError> {
        if self.adapters.contains_key(&name) {
            return Err(AdapterError::Provider(format!("adapter already registered: {name}")));
        }
        self.adapters.insert(name, Box::new(adapter));
        Ok(())
    }

    /// Returns the registered provider names in order.
    #[must_use]
    pub fn names(&self) -> Vec<ProviderName> {
        self.adapters.keys().cloned().collect()
    }
}

impl AdapterResolver for AdapterRegistry {
    fn resolve(&self, name: &ProviderName) -> Option<&dyn ProviderAdapter> {
        self.adapters.get(name).map(|adapter| -> &dyn ProviderAdapter { adapter.as_ref() })
    }
}
