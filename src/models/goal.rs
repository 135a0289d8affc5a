//! Savings goal model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings target with a deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    pub saved_amount: Money,
    pub deadline: NaiveDate,
}

impl SavingsGoal {
    pub fn new(
        name: impl Into<String>,
        target_amount: Money,
        saved_amount: Money,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            saved_amount,
            deadline,
        }
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        self.saved_amount.percent_of(self.target_amount).min(100.0)
    }

    /// Amount still to save (never negative)
    pub fn remaining(&self) -> Money {
        if self.saved_amount >= self.target_amount {
            Money::zero()
        } else {
            self.target_amount - self.saved_amount
        }
    }

    pub fn is_reached(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    /// Days until the deadline, negative once it has passed
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.saved_amount.is_negative() {
            return Err(GoalValidationError::NegativeSaved);
        }
        Ok(())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {} by {})",
            self.name, self.saved_amount, self.target_amount, self.deadline
        )
    }
}

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NegativeSaved,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Target amount must be greater than zero"),
            Self::NegativeSaved => write!(f, "Saved amount cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64, saved: i64) -> SavingsGoal {
        SavingsGoal::new(
            "Vacation",
            Money::from_cents(target),
            Money::from_cents(saved),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_progress_and_remaining() {
        let g = goal(100_000, 25_000);
        assert_eq!(g.progress_percent(), 25.0);
        assert_eq!(g.remaining().cents(), 75_000);
        assert!(!g.is_reached());

        let done = goal(100_000, 120_000);
        assert_eq!(done.progress_percent(), 100.0);
        assert!(done.remaining().is_zero());
    }

    #[test]
    fn test_validation() {
        assert!(goal(100, 0).validate().is_ok());
        assert_eq!(goal(0, 0).validate(), Err(GoalValidationError::NonPositiveTarget));
        assert_eq!(goal(100, -1).validate(), Err(GoalValidationError::NegativeSaved));
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(goal(50_000, 1_000)).unwrap();
        assert_eq!(value["targetAmount"], 500.0);
        assert_eq!(value["savedAmount"], 10.0);
        assert_eq!(value["deadline"], "2025-06-01");
    }
}
