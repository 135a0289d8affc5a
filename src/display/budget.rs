//! Budget display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::display::{format_bar, format_percentage};
use crate::models::{Currency, Money};
use crate::services::{BudgetLevel, BudgetStatus};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Budget")]
    limit: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn level_label(level: BudgetLevel) -> &'static str {
    match level {
        BudgetLevel::Unbudgeted => "",
        BudgetLevel::OnTrack => "On track",
        BudgetLevel::Nearing => "Nearing limit",
        BudgetLevel::Over => "Over budget",
    }
}

/// Format month-to-date spending against budgets
pub fn format_budget_status(statuses: &[BudgetStatus], currency: &Currency) -> String {
    if statuses.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = statuses.iter().map(|s| {
        let budgeted = s.limit.is_positive();
        BudgetRow {
            category: s.category.clone(),
            spent: currency.format_amount(s.spent),
            limit: if budgeted {
                currency.format_amount(s.limit)
            } else {
                "-".to_string()
            },
            remaining: if budgeted {
                currency.format_amount(s.remaining())
            } else {
                "-".to_string()
            },
            progress: if budgeted {
                format!(
                    "{} {:>5}",
                    format_bar(s.percent(), 100.0, 12),
                    format_percentage(s.percent())
                )
            } else {
                String::new()
            },
            status: level_label(s.level()).to_string(),
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));

    let spent: Money = statuses.iter().map(|s| s.spent).sum();
    let budgeted: Money = statuses.iter().map(|s| s.limit).sum();
    format!(
        "{}\n\nSpent this month: {} of {} budgeted\n",
        table,
        currency.format_amount(spent),
        currency.format_amount(budgeted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_status_table() {
        let statuses = vec![
            BudgetStatus {
                category: "Food".into(),
                limit: Money::from_cents(10_000),
                spent: Money::from_cents(11_000),
            },
            BudgetStatus {
                category: "Health".into(),
                limit: Money::zero(),
                spent: Money::from_cents(500),
            },
        ];

        let output = format_budget_status(&statuses, &Currency::default());
        assert!(output.contains("Over budget"));
        assert!(output.contains("-$10.00"));
        assert!(output.contains("Spent this month: $115.00 of $100.00 budgeted"));
    }
}
