//! Expense model
//!
//! An expense is a single dated purchase in a category. Expenses produced by
//! splitting one original purchase share a split group id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, SplitGroupId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What was bought
    pub name: String,

    /// Category name (open vocabulary)
    pub category: String,

    /// Price, always positive
    pub price: Money,

    /// Day of the purchase
    pub date: NaiveDate,

    /// Links the parts of a split expense
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_group_id: Option<SplitGroupId>,
}

impl Expense {
    /// Give a new expense an identifier
    pub fn from_new(new: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            name: new.name,
            category: new.category,
            price: new.price,
            date: new.date,
            split_group_id: None,
        }
    }

    /// Check whether this expense is part of a split
    pub fn is_split(&self) -> bool {
        self.split_group_id.is_some()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({}) {}", self.date, self.name, self.category, self.price)
    }
}

/// An expense that has not been stored yet
///
/// Produced by manual entry, receipt extraction and the recurring projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            date,
        }
    }

    /// Validate user-entered fields
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.name, &self.category, self.price)
    }
}

/// Validate the editable fields shared by new and stored expenses
pub fn validate_fields(
    name: &str,
    category: &str,
    price: Money,
) -> Result<(), ExpenseValidationError> {
    if name.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyName);
    }
    if category.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyCategory);
    }
    if !price.is_positive() {
        return Err(ExpenseValidationError::NonPositivePrice(price));
    }
    Ok(())
}

/// One part of a split request
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPart {
    pub name: String,
    pub category: String,
    pub price: Money,
}

impl SplitPart {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    EmptyCategory,
    NonPositivePrice(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
            Self::NonPositivePrice(price) => {
                write!(f, "Price must be greater than zero (got {})", price)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_serialized_field_names() {
        let expense = Expense::from_new(NewExpense::new(
            "Coffee",
            "Food",
            Money::from_cents(350),
            date(2024, 3, 1),
        ));
        let value = serde_json::to_value(&expense).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "name", "category", "price", "date"]);
        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["price"], 3.5);
    }

    #[test]
    fn test_split_group_round_trip() {
        let mut expense = Expense::from_new(NewExpense::new(
            "Dinner",
            "Food",
            Money::from_cents(2000),
            date(2024, 3, 1),
        ));
        expense.split_group_id = Some(SplitGroupId::new());

        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("splitGroupId"));
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
        assert!(back.is_split());
    }

    #[test]
    fn test_validation() {
        let d = date(2024, 3, 1);
        assert!(NewExpense::new("Tea", "Food", Money::from_cents(1), d).validate().is_ok());
        assert_eq!(
            NewExpense::new("  ", "Food", Money::from_cents(1), d).validate(),
            Err(ExpenseValidationError::EmptyName)
        );
        assert_eq!(
            NewExpense::new("Tea", "", Money::from_cents(1), d).validate(),
            Err(ExpenseValidationError::EmptyCategory)
        );
        assert!(matches!(
            NewExpense::new("Tea", "Food", Money::zero(), d).validate(),
            Err(ExpenseValidationError::NonPositivePrice(_))
        ));
    }
}
