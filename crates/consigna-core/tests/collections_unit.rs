// crates/consigna-core/tests/collections_unit.rs
// ============================================================================
// Module: Collection Scheduler Unit Tests
// Description: Sweep idempotency, rule selection, and immediate dispatch.
// Purpose: Ensure at most one action exists per key and sweeps are repeatable.
// ============================================================================

//! Collection scheduler tests for idempotent sweeps and dispatch.

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

use std::str::FromStr;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use consigna_core::ActionKey;
use consigna_core::ActionSpec;
use consigna_core::ActionStatus;
use consigna_core::ActionType;
use consigna_core::AmountRange;
use consigna_core::ClientId;
use consigna_core::CollectionAction;
use consigna_core::CollectionRule;
use consigna_core::DayRange;
use consigna_core::Installment;
use consigna_core::InstallmentId;
use consigna_core::InstallmentStatus;
use consigna_core::Notification;
use consigna_core::NotificationChannel;
use consigna_core::Notifier;
use consigna_core::NotifyError;
use consigna_core::RuleId;
use consigna_core::Store;
use consigna_core::runtime::InMemoryStore;
use consigna_core::runtime::sweep;
use time::Date;
use time::macros::date;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
        Err(NotifyError::DeliveryFailed("smtp down".to_string()))
    }
}

fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).unwrap()
}

fn installment(id: &str, due_date: Date, amount: &str, status: InstallmentStatus) -> Installment {
    Installment {
        id: InstallmentId::new(id),
        client_id: ClientId::from_raw(1).unwrap(),
        due_date,
        expected_amount: dec(amount),
        status,
    }
}

fn rule(id: &str, priority: u32, actions: Vec<ActionSpec>) -> CollectionRule {
    CollectionRule {
        id: RuleId::new(id),
        priority,
        active: true,
        amount: AmountRange::any(),
        days_overdue: DayRange::any(),
        actions,
    }
}

fn email_at(day: u32) -> ActionSpec {
    ActionSpec {
        day,
        action: ActionType::EmailReminder,
    }
}

// ============================================================================
// SECTION: Scheduling and Idempotency
// ============================================================================

#[test]
fn sweep_schedules_the_action_due_today() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule("soft", 1, vec![email_at(5), email_at(15)])];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].key.days_overdue, 5);
    assert_eq!(created[0].key.action, ActionType::EmailReminder);
    assert_eq!(created[0].status, ActionStatus::Sent);
    assert_eq!(store.actions().len(), 1);
}

#[test]
fn second_sweep_on_the_same_day_creates_nothing() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule("soft", 1, vec![email_at(5)])];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    let first = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    let second = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(store.actions().len(), 1);
    assert_eq!(notifier.sent().len(), 1);
}

#[test]
fn pre_existing_action_is_skipped() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule("soft", 1, vec![email_at(5)])];
    let store = InMemoryStore::new();
    store
        .create_collection_action(&CollectionAction {
            key: ActionKey {
                installment_id: InstallmentId::new("inst-1"),
                action: ActionType::EmailReminder,
                days_overdue: 5,
            },
            client_id: ClientId::from_raw(1).unwrap(),
            amount: dec("350"),
            status: ActionStatus::Sent,
        })
        .unwrap();
    let notifier = RecordingNotifier::default();

    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert!(created.is_empty());
    assert!(notifier.sent().is_empty());
}

#[test]
fn a_later_day_offset_creates_a_distinct_action() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule("soft", 1, vec![email_at(5), email_at(15)])];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    let later = sweep(&installments, &rules, date!(2026 - 03 - 16), &store, &notifier).unwrap();
    assert_eq!(later.len(), 1);
    assert_eq!(later[0].key.days_overdue, 15);
    assert_eq!(store.actions().len(), 2);
}

// ============================================================================
// SECTION: Immediate Dispatch
// ============================================================================

#[test]
fn message_channels_are_dispatched_within_the_sweep() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule(
        "soft",
        1,
        vec![ActionSpec {
            day: 5,
            action: ActionType::SmsReminder,
        }],
    )];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, NotificationChannel::Sms);
    assert!(sent[0].body.contains("inst-1"));
    assert_eq!(store.actions()[0].status, ActionStatus::Sent);
}

#[test]
fn operator_actions_remain_scheduled_without_messages() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule(
        "hard",
        1,
        vec![ActionSpec {
            day: 5,
            action: ActionType::PhoneCall,
        }],
    )];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert_eq!(created[0].status, ActionStatus::Scheduled);
    assert!(notifier.sent().is_empty());
}

#[test]
fn delivery_failure_still_marks_the_action_sent() {
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let rules = vec![rule("soft", 1, vec![email_at(5)])];
    let store = InMemoryStore::new();

    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &FailingNotifier).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].status, ActionStatus::Sent);
    assert_eq!(store.actions()[0].status, ActionStatus::Sent);
}

// ============================================================================
// SECTION: Eligibility and Rule Selection
// ============================================================================

#[test]
fn settled_and_future_installments_are_skipped() {
    let installments = vec![
        installment("paid", date!(2026 - 03 - 01), "350", InstallmentStatus::Paid),
        installment("defaulted", date!(2026 - 03 - 01), "350", InstallmentStatus::Defaulted),
        installment("future", date!(2026 - 03 - 20), "350", InstallmentStatus::Pending),
        installment("due-today", date!(2026 - 03 - 06), "350", InstallmentStatus::Pending),
    ];
    let rules = vec![rule("soft", 1, vec![email_at(5)])];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert!(created.is_empty());
}

#[test]
fn rule_selection_requires_both_windows() {
    let mut windowed = rule("late-window", 1, vec![email_at(5)]);
    windowed.days_overdue = DayRange {
        min: Some(30),
        max: None,
    };
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    // Five days overdue falls outside the rule's day window.
    let rules = vec![windowed];
    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert!(created.is_empty());
}

#[test]
fn lowest_priority_matching_rule_wins() {
    let mut small_amounts = rule(
        "small",
        1,
        vec![ActionSpec {
            day: 5,
            action: ActionType::SmsReminder,
        }],
    );
    small_amounts.amount = AmountRange {
        min: None,
        max: Some(dec("1000")),
    };
    let general = rule("general", 10, vec![email_at(5)]);
    let rules = vec![general, small_amounts];

    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].key.action, ActionType::SmsReminder);
}

#[test]
fn inactive_rules_are_ignored() {
    let mut disabled = rule("disabled", 1, vec![email_at(5)]);
    disabled.active = false;
    let installments = vec![installment(
        "inst-1",
        date!(2026 - 03 - 01),
        "350",
        InstallmentStatus::Overdue,
    )];
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::default();

    let rules = vec![disabled];
    let created = sweep(&installments, &rules, date!(2026 - 03 - 06), &store, &notifier).unwrap();
    assert!(created.is_empty());
}
