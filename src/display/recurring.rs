//! Recurring expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Currency, RecurringExpense};

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "Started")]
    start_date: String,
    #[tabled(rename = "Next Due")]
    next_due: String,
}

/// Format recurring definitions as a table
pub fn format_recurring_list(items: &[RecurringExpense], currency: &Currency) -> String {
    if items.is_empty() {
        return "No recurring expenses.\n".to_string();
    }

    let rows = items.iter().map(|r| RecurringRow {
        id: r.id.to_string(),
        name: r.name.clone(),
        category: r.category.clone(),
        price: currency.format_amount(r.price),
        frequency: r.frequency.to_string(),
        start_date: r.start_date.to_string(),
        next_due: r
            .next_due()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_recurring_list_shows_next_due() {
        let netflix = RecurringExpense::new(
            "Netflix",
            "Entertainment",
            Money::from_cents(1_599),
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );

        let output = format_recurring_list(&[netflix], &Currency::default());
        assert!(output.contains("Netflix"));
        assert!(output.contains("$15.99"));
        assert!(output.contains("2024-01-15"));
    }
}
