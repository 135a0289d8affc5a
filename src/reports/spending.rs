//! Spending Summary
//!
//! Total spending and a per-category breakdown for a set of expenses.

use std::collections::HashMap;

use crate::models::{Currency, Expense, Money};

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of total spending
    pub percentage: f64,
}

/// Spending Summary
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub total: Money,
    pub expense_count: usize,
    /// Largest category first
    pub categories: Vec<CategoryTotal>,
}

impl SpendingSummary {
    /// Summarize a set of expenses
    pub fn generate(expenses: &[Expense]) -> Self {
        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut total = Money::zero();

        for expense in expenses {
            let entry = by_category
                .entry(expense.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += expense.price;
            entry.1 += 1;
            total += expense.price;
        }

        let mut categories: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, (amount, count))| CategoryTotal {
                category: category.to_string(),
                total: amount,
                count,
                percentage: amount.percent_of(total),
            })
            .collect();

        // Largest first, ties by name so output is stable
        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self {
            total,
            expense_count: expenses.len(),
            categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &Currency) -> String {
        let mut output = String::new();

        output.push_str("Spending Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent: {}\n",
            currency.format_amount(self.total)
        ));
        output.push_str(&format!("Expenses: {}\n\n", self.expense_count));

        output.push_str(&format!(
            "{:<28} {:>14} {:>7} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>14} {:>7} {:>6.1}%\n",
                row.category,
                currency.format_amount(row.total),
                row.count,
                row.percentage
            ));
        }

        output
    }
}
