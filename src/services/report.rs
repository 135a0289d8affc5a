//! Report service
//!
//! Read-only entry point to the reports. Summary, trends and insights run
//! over the filtered expense list; comparisons always use every expense
//! because they pick their own windows.

use chrono::NaiveDate;

use crate::ai::{generate_insights, GenerativeModel};
use crate::error::SpendlogResult;
use crate::models::Currency;
use crate::reports::{ComparisonPeriod, PeriodComparison, SpendingSummary, SpendingTrends};
use crate::services::filter::ExpenseFilter;
use crate::storage::Storage;

/// Service for spending reports
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    /// Create a new report service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn summary(&self, filter: &ExpenseFilter, today: NaiveDate) -> SpendlogResult<SpendingSummary> {
        let expenses = filter.apply(&self.storage.expenses()?, today);
        Ok(SpendingSummary::generate(&expenses))
    }

    pub fn trends(&self, filter: &ExpenseFilter, today: NaiveDate) -> SpendlogResult<SpendingTrends> {
        let expenses = filter.apply(&self.storage.expenses()?, today);
        Ok(SpendingTrends::generate(&expenses))
    }

    pub fn compare(
        &self,
        period: ComparisonPeriod,
        today: NaiveDate,
    ) -> SpendlogResult<PeriodComparison> {
        Ok(PeriodComparison::generate(
            &self.storage.expenses()?,
            period,
            today,
        ))
    }

    /// Ask the model for a written analysis of the filtered expenses
    pub async fn insights(
        &self,
        model: &dyn GenerativeModel,
        filter: &ExpenseFilter,
        today: NaiveDate,
        currency: &Currency,
    ) -> SpendlogResult<String> {
        let expenses = filter.apply(&self.storage.expenses()?, today);
        generate_insights(model, &expenses, currency).await
    }
}
