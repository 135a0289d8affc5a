//! Expense display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::ai::ExtractedItem;
use crate::display::truncate;
use crate::models::{Currency, Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Format expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], currency: &Currency) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format("%Y-%m-%d").to_string(),
        name: if e.is_split() {
            format!("{} [split]", truncate(&e.name, 28))
        } else {
            truncate(&e.name, 36)
        },
        category: e.category.clone(),
        price: currency.format_amount(e.price),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    let total: Money = expenses.iter().map(|e| e.price).sum();
    format!(
        "{}\n\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        currency.format_amount(total)
    )
}

#[derive(Tabled)]
struct ReceiptItemRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Format receipt line items numbered from 1, for review before saving
pub fn format_receipt_items(items: &[ExtractedItem], currency: &Currency) -> String {
    let rows = items.iter().enumerate().map(|(i, item)| ReceiptItemRow {
        number: i + 1,
        name: truncate(&item.name, 36),
        category: item.category.clone(),
        price: currency.format_amount(item.price),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    let total: Money = items.iter().map(|item| item.price).sum();
    format!(
        "{}\n\n{} item(s), total {}\n",
        table,
        items.len(),
        currency.format_amount(total)
    )
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, currency: &Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Category:  {}\n", expense.category));
    output.push_str(&format!(
        "  Price:     {}\n",
        currency.format_amount(expense.price)
    ));
    output.push_str(&format!("  Date:      {}\n", expense.date));
    if let Some(group) = expense.split_group_id {
        output.push_str(&format!("  Split:     {}\n", group));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::NaiveDate;

    #[test]
    fn test_expense_list() {
        let expense = Expense::from_new(NewExpense::new(
            "Coffee",
            "Food",
            Money::from_cents(350),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ));

        let output = format_expense_list(&[expense.clone()], &Currency::default());
        assert!(output.contains("Coffee"));
        assert!(output.contains("$3.50"));
        assert!(output.contains(&expense.id.to_string()));
        assert!(output.contains("1 expense(s), total $3.50"));
    }

    #[test]
    fn test_receipt_items_are_numbered() {
        let items = vec![
            ExtractedItem {
                name: "Milk".into(),
                category: "Groceries".into(),
                price: Money::from_cents(249),
            },
            ExtractedItem {
                name: "Aspirin".into(),
                category: "Health".into(),
                price: Money::from_cents(400),
            },
        ];

        let output = format_receipt_items(&items, &Currency::default());
        assert!(output.contains("Aspirin"));
        assert!(output.contains("$2.49"));
        assert!(output.contains("2 item(s), total $6.49"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_expense_list(&[], &Currency::default()),
            "No expenses found.\n"
        );
    }
}
