//! Period Comparison
//!
//! Compares spending in a current window against the window just before it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::{Currency, Expense, Money};

/// Which windows to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonPeriod {
    /// Month to date against the whole previous calendar month
    #[default]
    LastMonth,
    /// The last 7 days (today included) against the 7 before them
    Last7Days,
    /// The last 30 days (today included) against the 30 before them
    Last30Days,
}

impl ComparisonPeriod {
    pub fn all() -> [ComparisonPeriod; 3] {
        [Self::LastMonth, Self::Last7Days, Self::Last30Days]
    }

    /// The current and previous windows as of `today`
    pub fn windows(&self, today: NaiveDate) -> (ReportWindow, ReportWindow) {
        match self {
            Self::LastMonth => {
                let month_start = today.with_day(1).unwrap_or(today);
                let previous_start = month_start
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(month_start);
                (
                    ReportWindow::new(month_start, today),
                    ReportWindow::new(previous_start, month_start - Duration::days(1)),
                )
            }
            Self::Last7Days => Self::rolling(today, 7),
            Self::Last30Days => Self::rolling(today, 30),
        }
    }

    fn rolling(today: NaiveDate, days: i64) -> (ReportWindow, ReportWindow) {
        let current_start = today - Duration::days(days - 1);
        let previous_end = current_start - Duration::days(1);
        (
            ReportWindow::new(current_start, today),
            ReportWindow::new(previous_end - Duration::days(days - 1), previous_end),
        )
    }

    /// Labels for the two windows
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::LastMonth => ("This Month", "Last Month"),
            Self::Last7Days => ("Last 7 Days", "Previous 7 Days"),
            Self::Last30Days => ("Last 30 Days", "Previous 30 Days"),
        }
    }
}

impl fmt::Display for ComparisonPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastMonth => write!(f, "last-month"),
            Self::Last7Days => write!(f, "last-7-days"),
            Self::Last30Days => write!(f, "last-30-days"),
        }
    }
}

impl FromStr for ComparisonPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "last-month" | "month" => Ok(Self::LastMonth),
            "last-7-days" | "7d" => Ok(Self::Last7Days),
            "last-30-days" | "30d" => Ok(Self::Last30Days),
            other => Err(format!(
                "Unknown comparison period '{}'. Use last-month, last-7-days or last-30-days",
                other
            )),
        }
    }
}

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// One category's spending in both windows
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparison {
    pub category: String,
    pub current: Money,
    pub previous: Money,
}

impl CategoryComparison {
    pub fn difference(&self) -> Money {
        self.current - self.previous
    }
}

/// Period Comparison
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub period: ComparisonPeriod,
    pub current_window: ReportWindow,
    pub previous_window: ReportWindow,
    pub current_total: Money,
    pub previous_total: Money,
    /// Sorted by combined spending, largest first
    pub categories: Vec<CategoryComparison>,
}

impl PeriodComparison {
    pub fn generate(expenses: &[Expense], period: ComparisonPeriod, today: NaiveDate) -> Self {
        let (current_window, previous_window) = period.windows(today);
        let mut by_category: BTreeMap<&str, (Money, Money)> = BTreeMap::new();
        let mut current_total = Money::zero();
        let mut previous_total = Money::zero();

        for expense in expenses {
            if current_window.contains(expense.date) {
                by_category.entry(expense.category.as_str()).or_default().0 += expense.price;
                current_total += expense.price;
            } else if previous_window.contains(expense.date) {
                by_category.entry(expense.category.as_str()).or_default().1 += expense.price;
                previous_total += expense.price;
            }
        }

        let mut categories: Vec<CategoryComparison> = by_category
            .into_iter()
            .map(|(category, (current, previous))| CategoryComparison {
                category: category.to_string(),
                current,
                previous,
            })
            .collect();
        // Stable sort keeps equal totals in name order
        categories.sort_by(|a, b| (b.current + b.previous).cmp(&(a.current + a.previous)));

        Self {
            period,
            current_window,
            previous_window,
            current_total,
            previous_total,
            categories,
        }
    }

    pub fn difference(&self) -> Money {
        self.current_total - self.previous_total
    }

    /// Change relative to the previous window
    ///
    /// With nothing spent previously this is 100 if anything was spent now,
    /// otherwise 0.
    pub fn percentage_change(&self) -> f64 {
        if self.previous_total.is_positive() {
            self.difference().percent_of(self.previous_total)
        } else if self.current_total.is_positive() {
            100.0
        } else {
            0.0
        }
    }

    /// Format the comparison for terminal display
    pub fn format_terminal(&self, currency: &Currency) -> String {
        let (current_label, previous_label) = self.period.labels();
        let mut output = String::new();

        output.push_str(&format!("{} vs {}\n", current_label, previous_label));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>14}  ({})\n",
            current_label,
            currency.format_amount(self.current_total),
            self.current_window
        ));
        output.push_str(&format!(
            "{:<18} {:>14}  ({})\n",
            previous_label,
            currency.format_amount(self.previous_total),
            self.previous_window
        ));
        output.push_str(&format!(
            "{:<18} {:>14}  ({:+.1}%)\n\n",
            "Difference",
            currency.format_amount(self.difference()),
            self.percentage_change()
        ));

        output.push_str(&format!(
            "{:<20} {:>14} {:>14} {:>12}\n",
            "Category", current_label, previous_label, "Change"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');
        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>14} {:>14} {:>12}\n",
                row.category,
                currency.format_amount(row.current),
                currency.format_amount(row.previous),
                currency.format_amount(row.difference())
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: &str, cents: i64, on: NaiveDate) -> Expense {
        Expense::from_new(NewExpense::new("x", category, Money::from_cents(cents), on))
    }

    #[test]
    fn test_windows() {
        let today = date(2024, 3, 15);

        let (current, previous) = ComparisonPeriod::LastMonth.windows(today);
        assert_eq!(current, ReportWindow::new(date(2024, 3, 1), today));
        assert_eq!(previous, ReportWindow::new(date(2024, 2, 1), date(2024, 2, 29)));

        let (current, previous) = ComparisonPeriod::Last7Days.windows(today);
        assert_eq!(current, ReportWindow::new(date(2024, 3, 9), today));
        assert_eq!(previous, ReportWindow::new(date(2024, 3, 2), date(2024, 3, 8)));

        let (current, previous) = ComparisonPeriod::Last30Days.windows(today);
        assert_eq!(current, ReportWindow::new(date(2024, 2, 15), today));
        assert_eq!(previous, ReportWindow::new(date(2024, 1, 16), date(2024, 2, 14)));
    }

    #[test]
    fn test_january_compares_with_december() {
        let (_, previous) = ComparisonPeriod::LastMonth.windows(date(2024, 1, 3));
        assert_eq!(previous, ReportWindow::new(date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_totals_and_categories() {
        let today = date(2024, 3, 15);
        let report = PeriodComparison::generate(
            &[
                expense("Food", 3_000, date(2024, 3, 2)),
                expense("Food", 2_000, date(2024, 2, 10)),
                expense("Transport", 9_000, date(2024, 2, 20)),
                expense("Health", 1_000, date(2024, 3, 14)),
                expense("Food", 99_999, date(2024, 1, 31)),
            ],
            ComparisonPeriod::LastMonth,
            today,
        );

        assert_eq!(report.current_total, Money::from_cents(4_000));
        assert_eq!(report.previous_total, Money::from_cents(11_000));
        assert_eq!(report.difference(), Money::from_cents(-7_000));
        let order: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Transport", "Food", "Health"]);
        assert_eq!(report.categories[1].difference(), Money::from_cents(1_000));
    }

    #[test]
    fn test_percentage_change() {
        let today = date(2024, 3, 15);
        let report = |expenses: &[Expense]| {
            PeriodComparison::generate(expenses, ComparisonPeriod::Last7Days, today)
                .percentage_change()
        };

        assert_eq!(
            report(&[
                expense("Food", 1_500, date(2024, 3, 10)),
                expense("Food", 1_000, date(2024, 3, 5)),
            ]),
            50.0
        );
        assert_eq!(report(&[expense("Food", 1_500, date(2024, 3, 10))]), 100.0);
        assert_eq!(report(&[]), 0.0);
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(
            "last-7-days".parse::<ComparisonPeriod>().unwrap(),
            ComparisonPeriod::Last7Days
        );
        assert_eq!(
            "LAST_MONTH".parse::<ComparisonPeriod>().unwrap(),
            ComparisonPeriod::LastMonth
        );
        assert!("yesterday".parse::<ComparisonPeriod>().is_err());
    }
}
