//! Reports module for spendlog
//!
//! Read-only aggregations over expenses: category totals, daily trends and
//! period-over-period comparisons.

pub mod comparison;
pub mod spending;
pub mod trends;

pub use comparison::{CategoryComparison, ComparisonPeriod, PeriodComparison, ReportWindow};
pub use spending::{CategoryTotal, SpendingSummary};
pub use trends::{DailyTotal, SpendingTrends};
