//! Notification model
//!
//! Notification ids are derived from what they report on (category and month
//! for budget alerts, a fixed key for reminders), so regenerating the same
//! condition yields the same id.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the "log your recent expenses" reminder
pub const ACTIVITY_REMINDER_KEY: &str = "reminder-activity";

/// Key of the first-run reminder shown while there are no expenses
pub const WELCOME_REMINDER_KEY: &str = "reminder-welcome";

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BudgetWarning,
    BudgetCritical,
    Reminder,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetWarning => write!(f, "Warning"),
            Self::BudgetCritical => write!(f, "Critical"),
            Self::Reminder => write!(f, "Reminder"),
        }
    }
}

/// A stored notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Deterministic key
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    /// Create an unread notification
    pub fn new(
        id: impl Into<String>,
        kind: NotificationKind,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            kind,
            timestamp,
            read: false,
        }
    }

    pub fn budget_warning(category: &str, month: NaiveDate, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            budget_warning_key(category, month),
            NotificationKind::BudgetWarning,
            format!("You've used over 85% of your {} budget.", category),
            timestamp,
        )
    }

    pub fn budget_critical(category: &str, month: NaiveDate, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            budget_critical_key(category, month),
            NotificationKind::BudgetCritical,
            format!("You've gone over your budget for {} this month.", category),
            timestamp,
        )
    }

    pub fn activity_reminder(timestamp: DateTime<Utc>) -> Self {
        Self::new(
            ACTIVITY_REMINDER_KEY,
            NotificationKind::Reminder,
            "It's been a few days. Don't forget to log your recent expenses!",
            timestamp,
        )
    }

    pub fn welcome_reminder(timestamp: DateTime<Utc>) -> Self {
        Self::new(
            WELCOME_REMINDER_KEY,
            NotificationKind::Reminder,
            "Welcome! Upload a receipt or add an expense to get started.",
            timestamp,
        )
    }
}

fn month_tag(month: NaiveDate) -> String {
    format!("{:04}-{:02}", month.year(), month.month())
}

/// Key for a budget warning on `category` in the month containing `month`
pub fn budget_warning_key(category: &str, month: NaiveDate) -> String {
    format!("budget-warning-{}-{}", category, month_tag(month))
}

/// Key for a budget overrun on `category` in the month containing `month`
pub fn budget_critical_key(category: &str, month: NaiveDate) -> String {
    format!("budget-critical-{}-{}", category, month_tag(month))
}

/// Map a warning key to the critical key for the same category and month
pub fn critical_key_for_warning(warning_key: &str) -> Option<String> {
    warning_key
        .strip_prefix("budget-warning-")
        .map(|rest| format!("budget-critical-{}", rest))
}
