//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.
//! Lists are rendered as tables; single records as labelled detail blocks.

pub mod budget;
pub mod expense;
pub mod goal;
pub mod notification;
pub mod recurring;
pub mod report;

pub use budget::format_budget_status;
pub use expense::{format_expense_details, format_expense_list, format_receipt_items};
pub use goal::{format_goal_details, format_goal_list};
pub use notification::format_notification_list;
pub use recurring::format_recurring_list;
pub use report::{format_bar, format_percentage, truncate};
