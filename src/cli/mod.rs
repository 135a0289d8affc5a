//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod goal;
pub mod notification;
pub mod recurring;
pub mod report;
pub mod settings;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use notification::{handle_notification_command, NotificationCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};

use chrono::{NaiveDate, Utc};
use clap::Args;

use crate::ai::GeminiClient;
use crate::config::settings::Settings;
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::Money;
use crate::services::{ExpenseFilter, TimePeriod};

/// Expense filter options shared by listing, reports and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Time period: 7d, 30d, 90d or all
    #[arg(short, long, default_value = "all")]
    pub period: TimePeriod,

    /// Case-insensitive name search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only these categories (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ExpenseFilter {
        let filter = ExpenseFilter::new()
            .with_period(self.period)
            .with_categories(self.categories.clone());
        match &self.search {
            Some(search) => filter.with_search(search.clone()),
            None => filter,
        }
    }
}

/// The current day; all day boundaries are UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a YYYY-MM-DD argument
pub(crate) fn parse_date(value: &str) -> SpendlogResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SpendlogError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", value))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn parse_date_or_today(value: Option<&str>) -> SpendlogResult<NaiveDate> {
    value.map_or_else(|| Ok(today()), parse_date)
}

/// Parse an amount argument such as "12.50" or "$12.50"
pub(crate) fn parse_money(value: &str) -> SpendlogResult<Money> {
    Money::parse(value).map_err(|e| {
        SpendlogError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '12.50' or '40'. Error: {}",
            value, e
        ))
    })
}

/// The AI client configured in settings
pub(crate) fn ai_client(settings: &Settings) -> SpendlogResult<GeminiClient> {
    GeminiClient::from_settings(&settings.ai)
}
