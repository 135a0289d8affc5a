//! Budget service
//!
//! Provides business logic for monthly category budgets: setting limits,
//! month-to-date spending against them and AI-suggested limits.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::info;

use crate::ai::{suggest_budgets, GenerativeModel, MIN_EXPENSES_FOR_SUGGESTIONS};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Budgets, Currency, Expense, Money};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Days of history a budget suggestion is based on
const SUGGESTION_WINDOW_DAYS: i64 = 90;

/// Spending per category in the calendar month containing `month`
pub fn spending_in_month(expenses: &[Expense], month: NaiveDate) -> BTreeMap<String, Money> {
    let mut spent: BTreeMap<String, Money> = BTreeMap::new();
    for expense in expenses
        .iter()
        .filter(|e| e.date.year() == month.year() && e.date.month() == month.month())
    {
        *spent.entry(expense.category.clone()).or_default() += expense.price;
    }
    spent
}

/// How close a category is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    /// No limit set
    Unbudgeted,
    OnTrack,
    /// Above 85% of the limit
    Nearing,
    /// Above the limit
    Over,
}

/// A category's month-to-date spending against its limit
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
}

impl BudgetStatus {
    /// What is left of the limit (negative when over)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    /// Spent as a percentage of the limit (0 when no limit)
    pub fn percent(&self) -> f64 {
        self.spent.percent_of(self.limit)
    }

    pub fn level(&self) -> BudgetLevel {
        if !self.limit.is_positive() {
            return BudgetLevel::Unbudgeted;
        }
        // Integer comparisons keep the thresholds exact
        let spent = self.spent.cents() as i128 * 100;
        let limit = self.limit.cents() as i128;
        if spent > limit * 100 {
            BudgetLevel::Over
        } else if spent > limit * 85 {
            BudgetLevel::Nearing
        } else {
            BudgetLevel::OnTrack
        }
    }
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All stored limits
    pub fn get_all(&self) -> SpendlogResult<Budgets> {
        self.storage.budgets()
    }

    /// Set one category's monthly limit; zero clears it
    pub fn set(&self, category: &str, limit: Money) -> SpendlogResult<Budgets> {
        let category = category.trim();
        if limit.is_negative() {
            return Err(SpendlogError::Validation(
                "Budget amount cannot be negative".into(),
            ));
        }
        CategoryService::new(self.storage).ensure_known(category)?;

        let mut budgets = self.storage.budgets()?;
        budgets.set(category, limit);
        self.storage.save_budgets(&budgets)?;

        info!(category, limit = %limit, "Set budget");
        Ok(budgets)
    }

    /// Merge several limits into the stored ones
    pub fn set_all(&self, limits: Budgets) -> SpendlogResult<Budgets> {
        if let Some((category, _)) = limits.iter().find(|(_, m)| m.is_negative()) {
            return Err(SpendlogError::Validation(format!(
                "Budget amount for {} cannot be negative",
                category
            )));
        }

        let mut budgets = self.storage.budgets()?;
        budgets.merge(limits);
        self.storage.save_budgets(&budgets)?;
        Ok(budgets)
    }

    /// Month-to-date status for every known category
    pub fn status(&self, today: NaiveDate) -> SpendlogResult<Vec<BudgetStatus>> {
        let budgets = self.storage.budgets()?;
        let spent = spending_in_month(&self.storage.expenses()?, today);

        Ok(self
            .storage
            .categories()?
            .into_iter()
            .map(|category| BudgetStatus {
                limit: budgets.limit_for(&category).unwrap_or_default(),
                spent: spent.get(&category).copied().unwrap_or_default(),
                category,
            })
            .collect())
    }

    /// Ask the model for limits based on the last 90 days and store them
    ///
    /// Returns only the suggested limits; other stored limits are untouched.
    pub async fn suggest(
        &self,
        model: &dyn GenerativeModel,
        today: NaiveDate,
        currency: &Currency,
    ) -> SpendlogResult<Budgets> {
        let cutoff = today - Duration::days(SUGGESTION_WINDOW_DAYS);
        let recent: Vec<Expense> = self
            .storage
            .expenses()?
            .into_iter()
            .filter(|e| e.date >= cutoff)
            .collect();

        if recent.len() < MIN_EXPENSES_FOR_SUGGESTIONS {
            return Err(SpendlogError::InsufficientData(format!(
                "You need at least {} expenses in the last {} days for an accurate suggestion.",
                MIN_EXPENSES_FOR_SUGGESTIONS, SUGGESTION_WINDOW_DAYS
            )));
        }

        let categories = self.storage.categories()?;
        let suggestions = suggest_budgets(model, &recent, &categories, currency).await?;
        self.set_all(suggestions.clone())?;

        info!(count = suggestions.len(), "Applied suggested budgets");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedModel;
    use crate::models::NewExpense;
    use crate::services::ExpenseService;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spend(storage: &Storage, category: &str, cents: i64, on: NaiveDate) {
        ExpenseService::new(storage)
            .add(NewExpense::new("x", category, Money::from_cents(cents), on))
            .unwrap();
    }

    #[test]
    fn test_spending_in_month_uses_calendar_month() {
        let storage = Storage::in_memory();
        spend(&storage, "Food", 1000, date(2024, 3, 1));
        spend(&storage, "Food", 500, date(2024, 3, 31));
        spend(&storage, "Food", 9900, date(2024, 2, 29));
        spend(&storage, "Health", 300, date(2024, 3, 15));

        let spent = spending_in_month(&storage.expenses().unwrap(), date(2024, 3, 20));
        assert_eq!(spent.get("Food"), Some(&Money::from_cents(1500)));
        assert_eq!(spent.get("Health"), Some(&Money::from_cents(300)));
    }

    #[test]
    fn test_set_and_clear_budget() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);

        service.set("Food", Money::from_cents(40_000)).unwrap();
        assert_eq!(
            service.get_all().unwrap().limit_for("Food"),
            Some(Money::from_cents(40_000))
        );

        service.set("Food", Money::zero()).unwrap();
        assert_eq!(service.get_all().unwrap().limit_for("Food"), None);

        assert!(service
            .set("Food", Money::from_cents(-1))
            .unwrap_err()
            .is_validation());
        assert!(service
            .set("Rockets", Money::from_cents(1))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_status_levels() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        service.set("Food", Money::from_cents(10_000)).unwrap();
        service.set("Transport", Money::from_cents(10_000)).unwrap();
        service.set("Shopping", Money::from_cents(10_000)).unwrap();
        spend(&storage, "Food", 8_500, date(2024, 3, 2));
        spend(&storage, "Transport", 8_501, date(2024, 3, 2));
        spend(&storage, "Shopping", 10_001, date(2024, 3, 2));

        let status = service.status(date(2024, 3, 10)).unwrap();
        let level = |c: &str| status.iter().find(|s| s.category == c).unwrap().level();

        assert_eq!(level("Food"), BudgetLevel::OnTrack);
        assert_eq!(level("Transport"), BudgetLevel::Nearing);
        assert_eq!(level("Shopping"), BudgetLevel::Over);
        assert_eq!(level("Health"), BudgetLevel::Unbudgeted);
        assert_eq!(status.len(), 8);
    }

    #[tokio::test]
    async fn test_suggest_needs_recent_expenses() {
        let storage = Storage::in_memory();
        let today = date(2024, 6, 30);
        for day in 1..=4 {
            spend(&storage, "Food", 1000, date(2024, 6, day));
        }
        // Older than 90 days
        spend(&storage, "Food", 1000, date(2024, 3, 1));

        let model = ScriptedModel::replying(r#"[{"category":"Food","budget":300}]"#);
        let err = BudgetService::new(&storage)
            .suggest(&model, today, &Currency::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not enough data: You need at least 5 expenses in the last 90 days for an accurate suggestion."
        );
        assert_eq!(model.request_count(), 0);
    }

    #[tokio::test]
    async fn test_suggest_merges_into_budgets() {
        let storage = Storage::in_memory();
        let service = BudgetService::new(&storage);
        service.set("Health", Money::from_cents(5_000)).unwrap();
        for day in 1..=5 {
            spend(&storage, "Food", 1000, date(2024, 6, day));
        }

        let model = ScriptedModel::replying(r#"[{"category":"Food","budget":299.5}]"#);
        let suggested = service
            .suggest(&model, date(2024, 6, 30), &Currency::default())
            .await
            .unwrap();

        assert_eq!(suggested.limit_for("Food"), Some(Money::from_cents(30_000)));
        let all = service.get_all().unwrap();
        assert_eq!(all.limit_for("Food"), Some(Money::from_cents(30_000)));
        assert_eq!(all.limit_for("Health"), Some(Money::from_cents(5_000)));
    }
}
