// crates/consigna-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Store
// Description: Mutex-guarded reference store for tests and embedding.
// Purpose: Provide Store semantics, including key uniqueness, without a backend.
// Dependencies: crate::core, crate::interfaces, std
// ============================================================================

//! ## Overview
//! The in-memory store implements the full [`Store`] surface behind
//! mutexes, including the uniqueness constraint on collection-action keys.
//! It exists for tests and single-process embedding; production deployments
//! supply a database-backed store with the same contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::ActionKey;
use crate::core::ActionStatus;
use crate::core::CollectionAction;
use crate::core::CommissionResult;
use crate::core::PricingQuote;
use crate::interfaces::OperationRecord;
use crate::interfaces::ScoreRecord;
use crate::interfaces::Store;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutex-guarded in-memory store.
///
/// # Invariants
/// - Collection-action keys are unique; duplicate creation fails with
///   [`StoreError::Duplicate`].
/// - Poisoned locks are recovered; the store never panics.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Persisted scores in insertion order.
    scores: Mutex<Vec<ScoreRecord>>,
    /// Persisted quotes in insertion order.
    quotes: Mutex<Vec<PricingQuote>>,
    /// Persisted commissions in insertion order.
    commissions: Mutex<Vec<CommissionResult>>,
    /// Persisted orchestration audit records in insertion order.
    operations: Mutex<Vec<OperationRecord>>,
    /// Collection actions keyed by idempotency key.
    actions: Mutex<BTreeMap<ActionKey, CollectionAction>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of persisted scores.
    #[must_use]
    pub fn scores(&self) -> Vec<ScoreRecord> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns a snapshot of persisted quotes.
    #[must_use]
    pub fn quotes(&self) -> Vec<PricingQuote> {
        self.quotes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns a snapshot of persisted commissions.
    #[must_use]
    pub fn commissions(&self) -> Vec<CommissionResult> {
        self.commissions.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns a snapshot of persisted orchestration audit records.
    #[must_use]
    pub fn operations(&self) -> Vec<OperationRecord> {
        self.operations.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns a snapshot of collection actions in key order.
    #[must_use]
    pub fn actions(&self) -> Vec<CollectionAction> {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner).values().cloned().collect()
    }
}

impl Store for InMemoryStore {
    fn save_score(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
        Ok(())
    }

    fn save_quote(&self, quote: &PricingQuote) -> Result<(), StoreError> {
        self.quotes.lock().unwrap_or_else(PoisonError::into_inner).push(quote.clone());
        Ok(())
    }

    fn save_commission(&self, commission: &CommissionResult) -> Result<(), StoreError> {
        self.commissions.lock().unwrap_or_else(PoisonError::into_inner).push(commission.clone());
        Ok(())
    }

    fn save_operation(&self, record: &OperationRecord) -> Result<(), StoreError> {
        self.operations.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
        Ok(())
    }

    fn collection_action_exists(&self, key: &ActionKey) -> Result<bool, StoreError> {
        Ok(self.actions.lock().unwrap_or_else(PoisonError::into_inner).contains_key(key))
    }

    fn create_collection_action(&self, action: &CollectionAction) -> Result<(), StoreError> {
        let mut actions = self.actions.lock().unwrap_or_else(PoisonError::into_inner);
        if actions.contains_key(&action.key) {
            return Err(StoreError::Duplicate(format!(
                "collection action exists: {} day {}",
                action.key.installment_id, action.key.days_overdue
            )));
        }
        actions.insert(action.key.clone(), action.clone());
        Ok(())
    }

    fn update_collection_action(
        &self,
        key: &ActionKey,
        status: ActionStatus,
    ) -> Result<(), StoreError> {
        let mut actions = self.actions.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(action) = actions.get_mut(key) else {
            return Err(StoreError::Store(format!(
                "collection action missing: {} day {}",
                key.installment_id, key.days_overdue
            )));
        };
        action.status = status;
        Ok(())
    }
}
