// crates/consigna-core/src/runtime/collections.rs
// ============================================================================
// Module: Collection Scheduler
// Description: Overdue sweep emitting idempotent, dated collection actions.
// Purpose: Schedule at most one action per (installment, action, days-overdue).
// Dependencies: crate::core, crate::interfaces, time
// ============================================================================

//! ## Overview
//! The scheduler sweeps overdue installments against collection rules and
//! emits at most one action per `(installment, action type, days overdue)`
//! tuple. The idempotency check is check-then-create and is not atomic;
//! stores backing concurrent sweeps must enforce a uniqueness constraint on
//! the key, and a duplicate from the store is silently treated as "already
//! scheduled". Message-channel actions are dispatched fire-and-forget and
//! transition to `Sent` within the same sweep.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;

use crate::core::ActionKey;
use crate::core::ActionStatus;
use crate::core::ActionType;
use crate::core::CollectionAction;
use crate::core::CollectionRule;
use crate::core::Installment;
use crate::core::InstallmentStatus;
use crate::interfaces::Notification;
use crate::interfaces::NotificationChannel;
use crate::interfaces::Notifier;
use crate::interfaces::Store;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Sweep
// ============================================================================

/// Sweeps overdue installments and schedules the actions due today.
///
/// Returns the actions created by this sweep, in installment order.
/// Sweeping the same overdue set twice on the same day creates nothing the
/// second time.
///
/// # Errors
///
/// Returns [`StoreError`] when a lookup or write fails for a reason other
/// than an idempotency-key collision; collisions are skipped silently.
pub fn sweep<S, N>(
    installments: &[Installment],
    rules: &[CollectionRule],
    today: Date,
    store: &S,
    notifier: &N,
) -> Result<Vec<CollectionAction>, StoreError>
where
    S: Store + ?Sized,
    N: Notifier + ?Sized,
{
    let mut created = Vec::new();
    for installment in installments {
        let Some(days_overdue) = days_overdue(installment, today) else {
            continue;
        };
        let Some(rule) = select_rule(rules, installment, days_overdue) else {
            continue;
        };
        for spec in &rule.actions {
            if spec.day != days_overdue {
                continue;
            }
            let key = ActionKey {
                installment_id: installment.id.clone(),
                action: spec.action,
                days_overdue,
            };
            if store.collection_action_exists(&key)? {
                continue;
            }
            let mut action = CollectionAction {
                key: key.clone(),
                client_id: installment.client_id,
                amount: installment.expected_amount.clone(),
                status: ActionStatus::Scheduled,
            };
            match store.create_collection_action(&action) {
                Ok(()) => {}
                // Lost the check-then-create race: already scheduled.
                Err(StoreError::Duplicate(_)) => continue,
                Err(error) => return Err(error),
            }
            if let Some(channel) = immediate_channel(spec.action) {
                // Fire-and-forget: delivery failures never roll back the
                // scheduled action.
                let _ = notifier.notify(&Notification {
                    client_id: installment.client_id,
                    channel,
                    body: overdue_message(installment, days_overdue),
                });
                store.update_collection_action(&key, ActionStatus::Sent)?;
                action.status = ActionStatus::Sent;
            }
            created.push(action);
        }
    }
    Ok(created)
}

// ============================================================================
// SECTION: Selection Helpers
// ============================================================================

/// Returns the days-overdue count, or `None` when the installment is not
/// eligible for collection.
fn days_overdue(installment: &Installment, today: Date) -> Option<u32> {
    if !matches!(installment.status, InstallmentStatus::Pending | InstallmentStatus::Overdue) {
        return None;
    }
    let days = (today - installment.due_date).whole_days();
    if days <= 0 {
        return None;
    }
    u32::try_from(days).ok()
}

/// Selects the first active rule, in ascending priority, whose amount and
/// day windows both contain the installment's values.
fn select_rule<'a>(
    rules: &'a [CollectionRule],
    installment: &Installment,
    days: u32,
) -> Option<&'a CollectionRule> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&index| rules[index].priority);
    order.into_iter().map(|index| &rules[index]).find(|rule| {
        rule.active
            && rule.amount.contains(&installment.expected_amount)
            && rule.days_overdue.contains(days)
    })
}

/// Maps message-channel actions to their delivery channel.
const fn immediate_channel(action: ActionType) -> Option<NotificationChannel> {
    match action {
        ActionType::EmailReminder => Some(NotificationChannel::Email),
        ActionType::SmsReminder => Some(NotificationChannel::Sms),
        ActionType::WhatsappMessage => Some(NotificationChannel::Whatsapp),
        ActionType::PhoneCall | ActionType::FormalNotice => None,
    }
}

/// Renders the overdue reminder body.
fn overdue_message(installment: &Installment, days: u32) -> String {
    format!(
        "installment {} is {days} days overdue; outstanding amount {}",
        installment.id, installment.expected_amount
    )
}
