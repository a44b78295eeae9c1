// crates/consigna-config/src/lib.rs
// ============================================================================
// Module: Consigna Config
// Description: File-based configuration loading and validation.
// Purpose: Turn YAML documents into validated rule books and provider rosters.
// Dependencies: consigna-core, serde, serde_yaml, thiserror, bigdecimal
// ============================================================================

//! ## Overview
//! Configuration owns the rule books and provider rosters the engine reads.
//! This crate loads them from YAML documents and validates every structural
//! invariant the engine assumes: unique identifiers, ordered range bounds,
//! non-overlapping tiers, non-negative rates and fees, and positive action
//! day offsets. Validation failures carry the offending rule or provider so
//! operators can fix the document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::Path;

use bigdecimal::BigDecimal;
use consigna_core::AmountRange;
use consigna_core::CollectionRule;
use consigna_core::CommissionRule;
use consigna_core::DayRange;
use consigna_core::PricingRule;
use consigna_core::ProviderDescriptor;
use consigna_core::RuleBook;
use consigna_core::RuleId;
use consigna_core::Tier;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the document failed.
    #[error("config io error: {0}")]
    Io(String),
    /// Parsing the document failed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The document violates a structural invariant.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Top-level engine configuration document.
///
/// # Invariants
/// - `validate` must pass before the parts are handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfigDoc {
    /// Rule book: pricing, commission, and collection rules.
    #[serde(default)]
    pub rules: RuleBook,
    /// Provider roster for orchestrated operations.
    #[serde(default)]
    pub providers: Vec<ProviderDescriptor>,
}

impl EngineConfigDoc {
    /// Parses a document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|error| ConfigError::Parse(error.to_string()))
    }

    /// Reads and parses a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when reading fails and
    /// [`ConfigError::Parse`] when the document is malformed.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|error| ConfigError::Io(error.to_string()))?;
        Self::from_yaml(&text)
    }

    /// Validates every structural invariant the engine assumes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending rule or
    /// provider.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = BTreeSet::new();
        for rule in &self.rules.pricing {
            validate_pricing_rule(rule)?;
            require_unique_id(&mut ids, &rule.id, "pricing")?;
        }
        let mut ids = BTreeSet::new();
        for rule in &self.rules.commission {
            validate_commission_rule(rule)?;
            require_unique_id(&mut ids, &rule.id, "commission")?;
        }
        let mut ids = BTreeSet::new();
        for rule in &self.rules.collection {
            validate_collection_rule(rule)?;
            require_unique_id(&mut ids, &rule.id, "collection")?;
        }
        let mut names = BTreeSet::new();
        for provider in &self.providers {
            if !names.insert(provider.name.clone()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate provider name: {}",
                    provider.name
                )));
            }
        }
        Ok(())
    }

    /// Splits a validated document into the engine's inputs.
    #[must_use]
    pub fn into_parts(self) -> (RuleBook, Vec<ProviderDescriptor>) {
        (self.rules, self.providers)
    }
}

/// Loads, parses, and validates a document in one step.
///
/// # Errors
///
/// Returns [`ConfigError`] on read, parse, or validation failure.
pub fn load(path: &Path) -> Result<EngineConfigDoc, ConfigError> {
    let doc = EngineConfigDoc::load_path(path)?;
    doc.validate()?;
    Ok(doc)
}

// ============================================================================
// SECTION: Rule Validation
// ============================================================================

/// Rejects duplicate rule identifiers within one family.
fn require_unique_id(
    seen: &mut BTreeSet<RuleId>,
    id: &RuleId,
    family: &str,
) -> Result<(), ConfigError> {
    if !seen.insert(id.clone()) {
        return Err(ConfigError::Invalid(format!("duplicate {family} rule id: {id}")));
    }
    Ok(())
}

/// Validates a pricing rule's rates, bounds, tiers, and fees.
fn validate_pricing_rule(rule: &PricingRule) -> Result<(), ConfigError> {
    require_non_negative(&rule.base_rate, &rule.id, "base_rate")?;
    if let (Some(min), Some(max)) = (&rule.minimum_rate, &rule.maximum_rate)
        && min > max
    {
        return Err(ConfigError::Invalid(format!(
            "rule {}: minimum_rate exceeds maximum_rate",
            rule.id
        )));
    }
    validate_amount_range(&rule.predicates.amount, &rule.id)?;
    validate_tiers(&rule.tiers, &rule.id)?;
    require_non_negative(&rule.fees.origination_rate, &rule.id, "origination_rate")?;
    require_non_negative(&rule.fees.origination_fixed, &rule.id, "origination_fixed")?;
    require_non_negative(&rule.fees.insurance_rate, &rule.id, "insurance_rate")?;
    require_non_negative(&rule.fees.averbation_fixed, &rule.id, "averbation_fixed")?;
    Ok(())
}

/// Validates a commission rule's rates and tiers.
fn validate_commission_rule(rule: &CommissionRule) -> Result<(), ConfigError> {
    require_non_negative(&rule.base_rate, &rule.id, "base_rate")?;
    if let Some(fixed) = &rule.fixed_amount {
        require_non_negative(fixed, &rule.id, "fixed_amount")?;
    }
    validate_amount_range(&rule.predicates.amount, &rule.id)?;
    validate_tiers(&rule.tiers, &rule.id)?;
    Ok(())
}

/// Validates a collection rule's windows and action specs.
fn validate_collection_rule(rule: &CollectionRule) -> Result<(), ConfigError> {
    validate_amount_range(&rule.amount, &rule.id)?;
    validate_day_range(rule.days_overdue, &rule.id)?;
    let mut seen = BTreeSet::new();
    for spec in &rule.actions {
        if spec.day == 0 {
            return Err(ConfigError::Invalid(format!(
                "rule {}: action day must be at least 1",
                rule.id
            )));
        }
        if !seen.insert((spec.day, spec.action)) {
            return Err(ConfigError::Invalid(format!(
                "rule {}: duplicate action at day {}",
                rule.id, spec.day
            )));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Range Validation
// ============================================================================

/// Rejects negative decimal fields.
fn require_non_negative(
    value: &BigDecimal,
    rule: &RuleId,
    field: &str,
) -> Result<(), ConfigError> {
    if value < &BigDecimal::from(0) {
        return Err(ConfigError::Invalid(format!("rule {rule}: {field} must not be negative")));
    }
    Ok(())
}

/// Rejects empty or inverted amount ranges.
fn validate_amount_range(range: &AmountRange, rule: &RuleId) -> Result<(), ConfigError> {
    if let (Some(min), Some(max)) = (&range.min, &range.max)
        && min >= max
    {
        return Err(ConfigError::Invalid(format!("rule {rule}: empty amount range")));
    }
    Ok(())
}

/// Rejects empty or inverted day ranges.
fn validate_day_range(range: DayRange, rule: &RuleId) -> Result<(), ConfigError> {
    if let (Some(min), Some(max)) = (range.min, range.max)
        && min >= max
    {
        return Err(ConfigError::Invalid(format!("rule {rule}: empty days_overdue range")));
    }
    Ok(())
}

/// Rejects malformed or ambiguously overlapping tier tables.
fn validate_tiers(tiers: &[Tier], rule: &RuleId) -> Result<(), ConfigError> {
    for tier in tiers {
        if let Some(max) = &tier.max_amount
            && &tier.min_amount >= max
        {
            return Err(ConfigError::Invalid(format!("rule {rule}: empty tier range")));
        }
        require_non_negative(&tier.rate, rule, "tier rate")?;
    }
    for (index, left) in tiers.iter().enumerate() {
        for right in &tiers[index + 1..] {
            if tiers_overlap(left, right) {
                return Err(ConfigError::Invalid(format!("rule {rule}: overlapping tiers")));
            }
        }
    }
    Ok(())
}

/// Returns true when two half-open tier ranges intersect.
fn tiers_overlap(left: &Tier, right: &Tier) -> bool {
    let left_below_right = match &left.max_amount {
        Some(max) => max <= &right.min_amount,
        None => false,
    };
    let right_below_left = match &right.max_amount {
        Some(max) => max <= &left.min_amount,
        None => false,
    };
    !(left_below_right || right_below_left)
}
