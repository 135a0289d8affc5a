//! Service layer for spendlog
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and cross-entity operations.

pub mod budget;
pub mod category;
pub mod expense;
pub mod filter;
pub mod goal;
pub mod notification;
pub mod preferences;
pub mod recurring;
pub mod report;

pub use budget::{BudgetLevel, BudgetService, BudgetStatus};
pub use category::CategoryService;
pub use expense::{ExpenseService, ExpenseUpdate};
pub use filter::{ExpenseFilter, TimePeriod};
pub use goal::{GoalService, GoalUpdate};
pub use notification::NotificationService;
pub use preferences::PreferencesService;
pub use recurring::{RecurringService, RecurringUpdate};
pub use report::ReportService;
