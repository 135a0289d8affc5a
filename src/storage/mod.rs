//! Storage layer for Spendlog
//!
//! Persistence is a key-value store of JSON values. [`Storage`] adds typing on
//! top: a missing key reads as the collection's default, a present value that
//! doesn't match the expected shape is an error rather than silently replaced.
//!
//! There is exactly one writer. Two processes writing the same data directory
//! at once can lose updates.

pub mod file_io;
pub mod file_store;
pub mod kv;
pub mod memory;

pub use file_store::JsonFileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::paths::SpendlogPaths;
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{
    default_categories, Accent, Budgets, Expense, Notification, RecurringExpense, SavingsGoal,
    Theme, WidgetVisibility,
};

/// Stable store keys
pub mod keys {
    pub const EXPENSES: &str = "expenses";
    pub const BUDGETS: &str = "expense_budgets";
    pub const CATEGORIES: &str = "expense_categories";
    pub const RECURRING: &str = "recurring_expenses";
    pub const GOALS: &str = "savings_goals";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const THEME: &str = "theme";
    pub const ACCENT: &str = "accent";
    pub const DASHBOARD_WIDGETS: &str = "dashboard_widgets";
    pub const ONBOARDING_COMPLETE: &str = "onboardingComplete";
    pub const LAST_RECURRING_CHECK: &str = "lastRecurringCheck";

    /// Every key the application uses
    pub const ALL: &[&str] = &[
        EXPENSES,
        BUDGETS,
        CATEGORIES,
        RECURRING,
        GOALS,
        NOTIFICATIONS,
        THEME,
        ACCENT,
        DASHBOARD_WIDGETS,
        ONBOARDING_COMPLETE,
        LAST_RECURRING_CHECK,
    ];
}

/// Typed access to the key-value store
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Wrap any key-value store
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Open the file-backed store under the given paths
    pub fn open(paths: SpendlogPaths) -> SpendlogResult<Self> {
        Ok(Self::new(Box::new(JsonFileStore::open(paths)?)))
    }

    /// A store that keeps everything in memory
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Load the value under `key`, or `default()` when the key is absent
    pub fn load_or_else<T, F>(&self, key: &str, default: F) -> SpendlogResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.store.get_value(key)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                SpendlogError::Storage(format!("Stored value for '{}' is malformed: {}", key, e))
            }),
            None => Ok(default()),
        }
    }

    /// Load the value under `key`, or `T::default()` when the key is absent
    pub fn load<T>(&self, key: &str) -> SpendlogResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.load_or_else(key, T::default)
    }

    /// Replace the value under `key`
    pub fn save<T>(&self, key: &str, value: &T) -> SpendlogResult<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.store.set_value(key, value)
    }

    /// Delete the value under `key`
    pub fn remove(&self, key: &str) -> SpendlogResult<()> {
        self.store.remove(key)
    }

    pub fn expenses(&self) -> SpendlogResult<Vec<Expense>> {
        self.load(keys::EXPENSES)
    }

    pub fn save_expenses(&self, expenses: &[Expense]) -> SpendlogResult<()> {
        self.save(keys::EXPENSES, expenses)
    }

    pub fn budgets(&self) -> SpendlogResult<Budgets> {
        self.load(keys::BUDGETS)
    }

    pub fn save_budgets(&self, budgets: &Budgets) -> SpendlogResult<()> {
        self.save(keys::BUDGETS, budgets)
    }

    /// The category vocabulary, seeded with the defaults
    pub fn categories(&self) -> SpendlogResult<Vec<String>> {
        self.load_or_else(keys::CATEGORIES, default_categories)
    }

    pub fn save_categories(&self, categories: &[String]) -> SpendlogResult<()> {
        self.save(keys::CATEGORIES, categories)
    }

    pub fn recurring(&self) -> SpendlogResult<Vec<RecurringExpense>> {
        self.load(keys::RECURRING)
    }

    pub fn save_recurring(&self, recurring: &[RecurringExpense]) -> SpendlogResult<()> {
        self.save(keys::RECURRING, recurring)
    }

    pub fn goals(&self) -> SpendlogResult<Vec<SavingsGoal>> {
        self.load(keys::GOALS)
    }

    pub fn save_goals(&self, goals: &[SavingsGoal]) -> SpendlogResult<()> {
        self.save(keys::GOALS, goals)
    }

    pub fn notifications(&self) -> SpendlogResult<Vec<Notification>> {
        self.load(keys::NOTIFICATIONS)
    }

    pub fn save_notifications(&self, notifications: &[Notification]) -> SpendlogResult<()> {
        self.save(keys::NOTIFICATIONS, notifications)
    }

    pub fn theme(&self) -> SpendlogResult<Theme> {
        self.load(keys::THEME)
    }

    pub fn save_theme(&self, theme: Theme) -> SpendlogResult<()> {
        self.save(keys::THEME, &theme)
    }

    pub fn accent(&self) -> SpendlogResult<Accent> {
        self.load(keys::ACCENT)
    }

    pub fn save_accent(&self, accent: Accent) -> SpendlogResult<()> {
        self.save(keys::ACCENT, &accent)
    }

    pub fn widget_visibility(&self) -> SpendlogResult<WidgetVisibility> {
        self.load(keys::DASHBOARD_WIDGETS)
    }

    pub fn save_widget_visibility(&self, widgets: &WidgetVisibility) -> SpendlogResult<()> {
        self.save(keys::DASHBOARD_WIDGETS, widgets)
    }

    pub fn onboarding_complete(&self) -> SpendlogResult<bool> {
        self.load(keys::ONBOARDING_COMPLETE)
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> SpendlogResult<()> {
        self.save(keys::ONBOARDING_COMPLETE, &complete)
    }

    /// When the daily recurring check last ran (the epoch if never)
    pub fn last_recurring_check(&self) -> SpendlogResult<DateTime<Utc>> {
        self.load_or_else(keys::LAST_RECURRING_CHECK, || DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn set_last_recurring_check(&self, at: DateTime<Utc>) -> SpendlogResult<()> {
        self.save(keys::LAST_RECURRING_CHECK, &at)
    }
}
