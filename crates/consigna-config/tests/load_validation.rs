// crates/consigna-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load and Validation Tests
// Description: YAML parsing, structural validation, and error taxonomy.
// Purpose: Ensure malformed or inconsistent documents never reach the engine.
// ============================================================================

//! Configuration tests for document loading and validation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::path::Path;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use consigna_config::ConfigError;
use consigna_config::EngineConfigDoc;
use consigna_config::load;
use consigna_core::ActionSpec;
use consigna_core::ActionType;
use consigna_core::AmountRange;
use consigna_core::CollectionRule;
use consigna_core::DayRange;
use consigna_core::FeeSchedule;
use consigna_core::OperationKind;
use consigna_core::PricingRule;
use consigna_core::ProviderDescriptor;
use consigna_core::ProviderName;
use consigna_core::ProviderScope;
use consigna_core::RuleBook;
use consigna_core::RuleId;
use consigna_core::RulePredicates;
use consigna_core::Tier;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

const SAMPLE_DOCUMENT: &str = r#"
rules:
  pricing:
    - id: price-default
      priority: 10
      active: true
      predicates:
        product: new_loan
        convenio: null
        role: null
        amount:
          min: null
          max: null
      base_rate: "0.025"
      tiers:
        - min_amount: "0"
          max_amount: "5000"
          rate: "0.030"
        - min_amount: "5000"
          max_amount: null
          rate: "0.022"
      minimum_rate: "0.01"
      maximum_rate: "0.05"
      fees:
        origination_rate: "0.01"
        origination_fixed: "50"
        insurance_rate: "0.005"
        averbation_fixed: "25"
  commission: []
  collection:
    - id: coll-default
      priority: 10
      active: true
      amount:
        min: null
        max: null
      days_overdue:
        min: 1
        max: 60
      actions:
        - day: 5
          action: email_reminder
        - day: 15
          action: phone_call
providers:
  - name: margem-alpha
    operation: margin_query
    priority: 1
    active: true
    scope:
      products: []
      convenios: []
  - name: margem-beta
    operation: margin_query
    priority: 2
    active: true
    scope:
      products: []
      convenios: []
"#;

fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).unwrap()
}

fn pricing_rule(id: &str) -> PricingRule {
    PricingRule {
        id: RuleId::new(id),
        priority: 10,
        active: true,
        predicates: RulePredicates::any(),
        base_rate: dec("0.025"),
        tiers: Vec::new(),
        minimum_rate: None,
        maximum_rate: None,
        fees: FeeSchedule::free(),
    }
}

fn collection_rule(id: &str) -> CollectionRule {
    CollectionRule {
        id: RuleId::new(id),
        priority: 10,
        active: true,
        amount: AmountRange::any(),
        days_overdue: DayRange::any(),
        actions: vec![ActionSpec {
            day: 5,
            action: ActionType::EmailReminder,
        }],
    }
}

fn provider(name: &str) -> ProviderDescriptor {
    ProviderDescriptor {
        name: ProviderName::new(name),
        operation: OperationKind::MarginQuery,
        priority: 1,
        active: true,
        scope: ProviderScope::default(),
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn sample_document_parses_and_validates() {
    let doc = EngineConfigDoc::from_yaml(SAMPLE_DOCUMENT).unwrap();
    doc.validate().unwrap();

    let (rules, providers) = doc.into_parts();
    assert_eq!(rules.pricing.len(), 1);
    assert_eq!(rules.pricing[0].tiers.len(), 2);
    assert_eq!(rules.collection[0].actions.len(), 2);
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0].name, ProviderName::new("margem-alpha"));
}

#[test]
fn empty_document_defaults_to_no_rules() {
    let doc = EngineConfigDoc::from_yaml("{}").unwrap();
    doc.validate().unwrap();
    assert!(doc.rules.pricing.is_empty());
    assert!(doc.providers.is_empty());
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let result = EngineConfigDoc::from_yaml("rules: [not: a: rulebook");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = EngineConfigDoc::load_path(Path::new("/nonexistent/consigna.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn load_reads_and_validates_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consigna.yaml");
    std::fs::write(&path, SAMPLE_DOCUMENT).unwrap();

    let doc = load(&path).unwrap();
    assert_eq!(doc.providers.len(), 2);
}

// ============================================================================
// SECTION: Rule Validation
// ============================================================================

#[test]
fn duplicate_rule_ids_within_a_family_are_rejected() {
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![pricing_rule("dup"), pricing_rule("dup")],
            commission: Vec::new(),
            collection: Vec::new(),
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn same_id_across_families_is_allowed() {
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![pricing_rule("shared")],
            commission: Vec::new(),
            collection: vec![collection_rule("shared")],
        },
        providers: Vec::new(),
    };
    doc.validate().unwrap();
}

#[test]
fn inverted_rate_bounds_are_rejected() {
    let mut rule = pricing_rule("bad-bounds");
    rule.minimum_rate = Some(dec("0.05"));
    rule.maximum_rate = Some(dec("0.01"));
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![rule],
            commission: Vec::new(),
            collection: Vec::new(),
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn negative_rates_are_rejected() {
    let mut rule = pricing_rule("negative");
    rule.base_rate = dec("-0.01");
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![rule],
            commission: Vec::new(),
            collection: Vec::new(),
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn overlapping_tiers_are_rejected() {
    let mut rule = pricing_rule("overlap");
    rule.tiers = vec![
        Tier {
            min_amount: dec("0"),
            max_amount: Some(dec("6000")),
            rate: dec("0.03"),
        },
        Tier {
            min_amount: dec("5000"),
            max_amount: None,
            rate: dec("0.02"),
        },
    ];
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![rule],
            commission: Vec::new(),
            collection: Vec::new(),
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn adjacent_half_open_tiers_are_allowed() {
    let mut rule = pricing_rule("adjacent");
    rule.tiers = vec![
        Tier {
            min_amount: dec("0"),
            max_amount: Some(dec("5000")),
            rate: dec("0.03"),
        },
        Tier {
            min_amount: dec("5000"),
            max_amount: None,
            rate: dec("0.02"),
        },
    ];
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![rule],
            commission: Vec::new(),
            collection: Vec::new(),
        },
        providers: Vec::new(),
    };
    doc.validate().unwrap();
}

#[test]
fn empty_tier_ranges_are_rejected() {
    let mut rule = pricing_rule("empty-tier");
    rule.tiers = vec![Tier {
        min_amount: dec("5000"),
        max_amount: Some(dec("5000")),
        rate: dec("0.02"),
    }];
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: vec![rule],
            commission: Vec::new(),
            collection: Vec::new(),
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn collection_actions_require_a_positive_day() {
    let mut rule = collection_rule("day-zero");
    rule.actions = vec![ActionSpec {
        day: 0,
        action: ActionType::EmailReminder,
    }];
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: Vec::new(),
            commission: Vec::new(),
            collection: vec![rule],
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn duplicate_day_action_pairs_are_rejected() {
    let mut rule = collection_rule("dup-action");
    rule.actions = vec![
        ActionSpec {
            day: 5,
            action: ActionType::EmailReminder,
        },
        ActionSpec {
            day: 5,
            action: ActionType::EmailReminder,
        },
    ];
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: Vec::new(),
            commission: Vec::new(),
            collection: vec![rule],
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn same_day_different_actions_are_allowed() {
    let mut rule = collection_rule("two-channels");
    rule.actions = vec![
        ActionSpec {
            day: 5,
            action: ActionType::EmailReminder,
        },
        ActionSpec {
            day: 5,
            action: ActionType::SmsReminder,
        },
    ];
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: Vec::new(),
            commission: Vec::new(),
            collection: vec![rule],
        },
        providers: Vec::new(),
    };
    doc.validate().unwrap();
}

#[test]
fn inverted_day_windows_are_rejected() {
    let mut rule = collection_rule("bad-window");
    rule.days_overdue = DayRange {
        min: Some(30),
        max: Some(10),
    };
    let doc = EngineConfigDoc {
        rules: RuleBook {
            pricing: Vec::new(),
            commission: Vec::new(),
            collection: vec![rule],
        },
        providers: Vec::new(),
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

// ============================================================================
// SECTION: Provider Validation
// ============================================================================

#[test]
fn duplicate_provider_names_are_rejected() {
    let doc = EngineConfigDoc {
        rules: RuleBook::default(),
        providers: vec![provider("alpha"), provider("alpha")],
    };
    assert!(matches!(doc.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn distinct_provider_names_validate() {
    let doc = EngineConfigDoc {
        rules: RuleBook::default(),
        providers: vec![provider("alpha"), provider("beta")],
    };
    doc.validate().unwrap();
}
