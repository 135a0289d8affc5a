//! Notification service
//!
//! Derives budget and reminder notifications from the current expenses and
//! budgets, then merges them into the stored list. Ids are deterministic, so
//! a condition that persists maps onto the notification already stored and
//! keeps its read flag and timestamp.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info};

use crate::error::SpendlogResult;
use crate::models::notification::critical_key_for_warning;
use crate::models::{Budgets, Expense, Notification, NotificationKind};
use crate::services::budget::spending_in_month;
use crate::storage::Storage;

/// Time since the latest expense date before the activity reminder appears
const REMINDER_AFTER_DAYS: i64 = 3;

/// Percentage of a budget at which a warning is raised
const WARNING_PERCENT: i64 = 85;

/// The notifications that apply right now
///
/// Budget alerts cover the calendar month containing `today`: at or above
/// 100% of a category's limit is critical, at or above 85% is a warning.
/// Exactly one reminder is produced when there are no expenses at all
/// (welcome) or more than three days have passed since midnight UTC of the
/// latest expense date (activity).
pub fn generate_notifications(
    expenses: &[Expense],
    budgets: &Budgets,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut fresh = Vec::new();
    let spent = spending_in_month(expenses, today);

    for (category, limit) in budgets.active() {
        let spent = spent.get(category).copied().unwrap_or_default();
        let spent_scaled = spent.cents() as i128 * 100;
        let limit_cents = limit.cents() as i128;

        if spent_scaled >= limit_cents * 100 {
            fresh.push(Notification::budget_critical(category, today, now));
        } else if spent_scaled >= limit_cents * WARNING_PERCENT as i128 {
            fresh.push(Notification::budget_warning(category, today, now));
        }
    }

    match expenses.iter().map(|e| e.date).max() {
        Some(latest) => {
            let latest_start = latest.and_time(NaiveTime::MIN).and_utc();
            if now - latest_start > Duration::days(REMINDER_AFTER_DAYS) {
                fresh.push(Notification::activity_reminder(now));
            }
        }
        None => fresh.push(Notification::welcome_reminder(now)),
    }

    fresh
}

/// Merge freshly generated notifications into the stored ones
///
/// Stored entries keep their read flag and timestamp; unseen ids are
/// appended unread. A stored warning is dropped when a critical alert for the
/// same category and month was just generated, and a stored reminder is
/// dropped when it was not regenerated. The result is newest first.
pub fn merge_notifications(
    existing: &[Notification],
    fresh: &[Notification],
) -> Vec<Notification> {
    let existing_ids: HashSet<&str> = existing.iter().map(|n| n.id.as_str()).collect();
    let fresh_ids: HashSet<&str> = fresh.iter().map(|n| n.id.as_str()).collect();

    let mut merged: Vec<Notification> = existing
        .iter()
        .chain(fresh.iter().filter(|n| !existing_ids.contains(n.id.as_str())))
        .filter(|n| match n.kind {
            NotificationKind::BudgetWarning => critical_key_for_warning(&n.id)
                .map_or(true, |critical| !fresh_ids.contains(critical.as_str())),
            NotificationKind::Reminder => fresh_ids.contains(n.id.as_str()),
            NotificationKind::BudgetCritical => true,
        })
        .cloned()
        .collect();

    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

/// Service for the notification list
pub struct NotificationService<'a> {
    storage: &'a Storage,
}

impl<'a> NotificationService<'a> {
    /// Create a new notification service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Regenerate notifications from current data and persist the merge
    pub fn refresh(&self, today: NaiveDate, now: DateTime<Utc>) -> SpendlogResult<Vec<Notification>> {
        let fresh = generate_notifications(
            &self.storage.expenses()?,
            &self.storage.budgets()?,
            today,
            now,
        );
        let existing = self.storage.notifications()?;
        let merged = merge_notifications(&existing, &fresh);

        if merged != existing {
            self.storage.save_notifications(&merged)?;
        }
        debug!(
            fresh = fresh.len(),
            stored = merged.len(),
            "Refreshed notifications"
        );
        Ok(merged)
    }

    /// Stored notifications, newest first
    pub fn list(&self) -> SpendlogResult<Vec<Notification>> {
        self.storage.notifications()
    }

    pub fn unread_count(&self) -> SpendlogResult<usize> {
        Ok(self.storage.notifications()?.iter().filter(|n| !n.read).count())
    }

    /// Mark everything read; returns how many changed
    pub fn mark_all_read(&self) -> SpendlogResult<usize> {
        let mut notifications = self.storage.notifications()?;
        let mut changed = 0;
        for notification in notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.storage.save_notifications(&notifications)?;
        }
        info!(changed, "Marked notifications read");
        Ok(changed)
    }

    /// Delete all notifications; returns how many were removed
    pub fn clear_all(&self) -> SpendlogResult<usize> {
        let count = self.storage.notifications()?.len();
        self.storage.save_notifications(&[])?;
        info!(count, "Cleared notifications");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpense};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn expense(category: &str, cents: i64, on: NaiveDate) -> Expense {
        Expense::from_new(NewExpense::new("x", category, Money::from_cents(cents), on))
    }

    fn food_budget(cents: i64) -> Budgets {
        let mut budgets = Budgets::new();
        budgets.set("Food", Money::from_cents(cents));
        budgets
    }

    fn ids(notifications: &[Notification]) -> Vec<&str> {
        notifications.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_exactly_85_percent_is_warning() {
        let today = date(2024, 3, 10);
        let fresh = generate_notifications(
            &[expense("Food", 8_500, today)],
            &food_budget(10_000),
            today,
            at(10, 9),
        );
        assert_eq!(ids(&fresh), vec!["budget-warning-Food-2024-03"]);
        assert_eq!(fresh[0].kind, NotificationKind::BudgetWarning);
    }

    #[test]
    fn test_exactly_100_percent_is_critical_only() {
        let today = date(2024, 3, 10);
        let fresh = generate_notifications(
            &[expense("Food", 10_000, today)],
            &food_budget(10_000),
            today,
            at(10, 9),
        );
        assert_eq!(ids(&fresh), vec!["budget-critical-Food-2024-03"]);
    }

    #[test]
    fn test_below_threshold_and_other_months_ignored() {
        let today = date(2024, 3, 10);
        let fresh = generate_notifications(
            &[
                expense("Food", 8_499, today),
                expense("Food", 50_000, date(2024, 2, 28)),
            ],
            &food_budget(10_000),
            today,
            at(10, 9),
        );
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_zero_budget_never_alerts() {
        let today = date(2024, 3, 10);
        let fresh = generate_notifications(
            &[expense("Food", 100, today)],
            &food_budget(0),
            today,
            at(10, 9),
        );
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_reminders() {
        let welcome = generate_notifications(&[], &Budgets::new(), date(2024, 3, 10), at(10, 9));
        assert_eq!(ids(&welcome), vec!["reminder-welcome"]);

        let exactly_three_days = generate_notifications(
            &[expense("Food", 100, date(2024, 3, 7))],
            &Budgets::new(),
            date(2024, 3, 10),
            at(10, 0),
        );
        assert!(exactly_three_days.is_empty());

        let later_that_day = generate_notifications(
            &[expense("Food", 100, date(2024, 3, 7))],
            &Budgets::new(),
            date(2024, 3, 10),
            at(10, 9),
        );
        assert_eq!(ids(&later_that_day), vec!["reminder-activity"]);

        let recent = generate_notifications(
            &[expense("Food", 100, date(2024, 3, 8))],
            &Budgets::new(),
            date(2024, 3, 10),
            at(10, 23),
        );
        assert!(recent.is_empty());
    }

    #[test]
    fn test_merge_keeps_read_state_and_is_idempotent() {
        let mut stored = Notification::budget_warning("Food", date(2024, 3, 1), at(5, 9));
        stored.read = true;

        let fresh = vec![Notification::budget_warning("Food", date(2024, 3, 1), at(10, 9))];
        let merged = merge_notifications(&[stored.clone()], &fresh);
        assert_eq!(merged, vec![stored.clone()]);

        let again = merge_notifications(&merged, &fresh);
        assert_eq!(again, merged);
    }

    #[test]
    fn test_critical_supersedes_warning_for_same_month_only() {
        let march = date(2024, 3, 1);
        let existing = vec![
            Notification::budget_warning("Food", march, at(2, 9)),
            Notification::budget_warning("Shopping", march, at(3, 9)),
        ];
        let fresh = vec![
            Notification::budget_critical("Food", march, at(10, 9)),
            Notification::budget_warning("Shopping", march, at(10, 9)),
        ];

        let merged = merge_notifications(&existing, &fresh);
        assert_eq!(
            ids(&merged),
            vec!["budget-critical-Food-2024-03", "budget-warning-Shopping-2024-03"]
        );
    }

    #[test]
    fn test_stale_reminders_are_dropped() {
        let existing = vec![Notification::welcome_reminder(at(1, 9))];
        let fresh = vec![Notification::activity_reminder(at(10, 9))];

        let merged = merge_notifications(&existing, &fresh);
        assert_eq!(ids(&merged), vec!["reminder-activity"]);

        let merged = merge_notifications(&merged, &[]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_sorts_newest_first() {
        let existing = vec![
            Notification::budget_critical("Food", date(2024, 2, 1), at(1, 9)),
            Notification::budget_critical("Health", date(2024, 3, 1), at(4, 9)),
        ];
        let fresh = vec![Notification::budget_critical("Transport", date(2024, 3, 1), at(2, 9))];

        let merged = merge_notifications(&existing, &fresh);
        assert_eq!(
            ids(&merged),
            vec![
                "budget-critical-Health-2024-03",
                "budget-critical-Transport-2024-03",
                "budget-critical-Food-2024-02"
            ]
        );
    }

    #[test]
    fn test_service_refresh_read_and_clear() {
        let storage = Storage::in_memory();
        let service = NotificationService::new(&storage);

        let list = service.refresh(date(2024, 3, 10), at(10, 9)).unwrap();
        assert_eq!(ids(&list), vec!["reminder-welcome"]);
        assert_eq!(service.unread_count().unwrap(), 1);

        assert_eq!(service.mark_all_read().unwrap(), 1);
        let again = service.refresh(date(2024, 3, 10), at(10, 12)).unwrap();
        assert!(again[0].read);
        assert_eq!(again[0].timestamp, at(10, 9));
        assert_eq!(service.unread_count().unwrap(), 0);

        assert_eq!(service.clear_all().unwrap(), 1);
        assert!(service.list().unwrap().is_empty());
    }
}
