//! Expense filtering
//!
//! Narrows the expense list by time period, name search and category set.

use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::models::Expense;

/// How far back to look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePeriod {
    Last7Days,
    Last30Days,
    Last90Days,
    #[default]
    All,
}

impl TimePeriod {
    /// Earliest date included, or `None` for no limit
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
            Self::All => return None,
        };
        today.checked_sub_signed(Duration::days(days))
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Last7Days => write!(f, "7d"),
            Self::Last30Days => write!(f, "30d"),
            Self::Last90Days => write!(f, "90d"),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" | "7" | "week" => Ok(Self::Last7Days),
            "30d" | "30" | "month" => Ok(Self::Last30Days),
            "90d" | "90" | "quarter" => Ok(Self::Last90Days),
            "all" => Ok(Self::All),
            other => Err(format!(
                "Unknown period '{}', expected 7d, 30d, 90d or all",
                other
            )),
        }
    }
}

/// Criteria for narrowing the expense list
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub period: TimePeriod,

    /// Case-insensitive substring of the expense name
    pub search: Option<String>,

    /// Only these categories; empty means all
    pub categories: Vec<String>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, period: TimePeriod) -> Self {
        self.period = period;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Whether search or category filters narrow the list
    pub fn is_narrowed(&self) -> bool {
        self.search.is_some() || !self.categories.is_empty()
    }

    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        if let Some(cutoff) = self.period.cutoff(today) {
            if expense.date < cutoff {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !expense
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }

        self.categories.is_empty() || self.categories.contains(&expense.category)
    }

    /// Matching expenses, most recent first
    pub fn apply(&self, expenses: &[Expense], today: NaiveDate) -> Vec<Expense> {
        let mut matching: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.matches(e, today))
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        matching
    }
}

/// Sort expenses by date, most recent first (stable for equal dates)
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}
