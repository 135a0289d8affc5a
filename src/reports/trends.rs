//! Spending Trends
//!
//! Daily spending totals and the averages derived from them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::models::{Currency, Expense, Money};

/// Total spent on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Money,
}

/// Spending Trends
///
/// Averages are taken over days and months that have at least one expense,
/// not over calendar spans.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingTrends {
    /// One entry per day with spending, oldest first
    pub daily: Vec<DailyTotal>,
    pub total: Money,
    pub average_per_day: Money,
    pub average_per_month: Money,
    pub highest_day: Option<DailyTotal>,
}

impl SpendingTrends {
    pub fn generate(expenses: &[Expense]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        let mut months: BTreeSet<(i32, u32)> = BTreeSet::new();

        for expense in expenses {
            *by_day.entry(expense.date).or_default() += expense.price;
            months.insert((expense.date.year(), expense.date.month()));
        }

        let daily: Vec<DailyTotal> = by_day
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect();
        let total: Money = daily.iter().map(|d| d.total).sum();

        // First day wins on ties
        let highest_day = daily
            .iter()
            .copied()
            .fold(None, |best: Option<DailyTotal>, day| match best {
                Some(b) if b.total >= day.total => Some(b),
                _ => Some(day),
            });

        Self {
            average_per_day: average(total, daily.len()),
            average_per_month: average(total, months.len()),
            daily,
            total,
            highest_day,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    /// Format the trends for terminal display, with a bar per day
    pub fn format_terminal(&self, currency: &Currency) -> String {
        const BAR_WIDTH: usize = 30;
        let mut output = String::new();

        output.push_str("Spending Trends\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Average Daily:   {}\n",
            currency.format_amount(self.average_per_day)
        ));
        output.push_str(&format!(
            "Average Monthly: {}\n",
            currency.format_amount(self.average_per_month)
        ));
        match self.highest_day {
            Some(day) => output.push_str(&format!(
                "Highest Day:     {} on {}\n\n",
                currency.format_amount(day.total),
                day.date
            )),
            None => output.push_str("Highest Day:     -\n\n"),
        }

        let peak = self.highest_day.map(|d| d.total).unwrap_or_default();
        for day in &self.daily {
            let width = if peak.is_positive() {
                (day.total.percent_of(peak) / 100.0 * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            output.push_str(&format!(
                "{}  {:>12}  {}\n",
                day.date,
                currency.format_amount(day.total),
                "#".repeat(width.max(1))
            ));
        }

        output
    }
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        Money::zero()
    } else {
        Money::from_decimal(total.as_decimal() / count as f64)
    }
}
