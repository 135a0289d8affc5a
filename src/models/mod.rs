//! Core data models for Spendlog
//!
//! This module contains the data structures of the expense-tracking domain:
//! expenses, recurring definitions, budgets, savings goals, notifications and
//! display preferences.

pub mod budget;
pub mod category;
pub mod currency;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod money;
pub mod notification;
pub mod preferences;
pub mod recurring;

pub use budget::Budgets;
pub use category::{coerce_category, default_categories, DEFAULT_CATEGORIES, FALLBACK_CATEGORY};
pub use currency::Currency;
pub use expense::{Expense, ExpenseValidationError, NewExpense, SplitPart};
pub use goal::{GoalValidationError, SavingsGoal};
pub use ids::{ExpenseId, GoalId, RecurringExpenseId, SplitGroupId};
pub use money::Money;
pub use notification::{Notification, NotificationKind};
pub use preferences::{Accent, Theme, Widget, WidgetVisibility};
pub use recurring::{Frequency, RecurringExpense};
