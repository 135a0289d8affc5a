//! Recurring expense model
//!
//! A recurring expense is a template that materializes into concrete expenses
//! once per period. `last_added_date` is the watermark through which instances
//! have already been generated.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::expense::{validate_fields, ExpenseValidationError, NewExpense};
use super::ids::RecurringExpenseId;
use super::money::Money;

/// How often a recurring expense falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Advance a date by one period
    ///
    /// Months and years use calendar addition, clamping to the last day of a
    /// shorter month (Jan 31 + 1 month = Feb 28/29). Returns `None` only when
    /// the result is outside chrono's representable range.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Weekly => date.checked_add_signed(Duration::days(7)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    pub fn all() -> &'static [Frequency] {
        &[Self::Weekly, Self::Monthly, Self::Yearly]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Ok(Self::Yearly),
            other => Err(format!(
                "Unknown frequency '{}', expected weekly, monthly or yearly",
                other
            )),
        }
    }
}

/// A recurring expense definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: RecurringExpenseId,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub frequency: Frequency,

    /// First due date
    pub start_date: NaiveDate,

    /// Watermark: the date through which instances have been materialized
    pub last_added_date: NaiveDate,
}

impl RecurringExpense {
    /// Create a definition whose first occurrence is its start date
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: RecurringExpenseId::new(),
            name: name.into(),
            category: category.into(),
            price,
            frequency,
            start_date,
            last_added_date: Self::initial_watermark(start_date),
        }
    }

    /// The watermark for a definition that has never materialized anything
    pub fn initial_watermark(start_date: NaiveDate) -> NaiveDate {
        start_date.pred_opt().unwrap_or(start_date)
    }

    /// The concrete expense for one occurrence
    pub fn instance_on(&self, date: NaiveDate) -> NewExpense {
        NewExpense::new(self.name.clone(), self.category.clone(), self.price, date)
    }

    /// The next date this definition falls due, relative to its watermark
    pub fn next_due(&self) -> Option<NaiveDate> {
        if self.last_added_date < self.start_date {
            Some(self.start_date)
        } else {
            self.frequency.advance(self.last_added_date)
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.name, &self.category, self.price)
    }
}

impl fmt::Display for RecurringExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.frequency, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_sets_watermark_before_start() {
        let rec = RecurringExpense::new(
            "Netflix",
            "Entertainment",
            Money::from_cents(1500),
            Frequency::Monthly,
            date(2024, 1, 15),
        );
        assert_eq!(rec.last_added_date, date(2024, 1, 14));
        assert_eq!(rec.next_due(), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_advance() {
        assert_eq!(Frequency::Weekly.advance(date(2024, 1, 29)), Some(date(2024, 2, 5)));
        assert_eq!(Frequency::Monthly.advance(date(2024, 1, 15)), Some(date(2024, 2, 15)));
        assert_eq!(Frequency::Monthly.advance(date(2024, 1, 31)), Some(date(2024, 2, 29)));
        assert_eq!(Frequency::Yearly.advance(date(2024, 2, 29)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn test_frequency_serde_and_parse() {
        assert_eq!(serde_json::to_string(&Frequency::Weekly).unwrap(), "\"weekly\"");
        assert_eq!("Monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("daily".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let rec = RecurringExpense::new(
            "Gym",
            "Health",
            Money::from_cents(4000),
            Frequency::Monthly,
            date(2024, 5, 1),
        );
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["startDate"], "2024-05-01");
        assert_eq!(value["lastAddedDate"], "2024-04-30");
        assert_eq!(value["frequency"], "monthly");
    }
}
