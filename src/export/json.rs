//! JSON Export functionality

use std::io::Write;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::Expense;

/// Export expenses as a pretty-printed JSON array
pub fn export_expenses_json<W: Write>(expenses: &[Expense], writer: &mut W) -> SpendlogResult<()> {
    let json = serde_json::to_string_pretty(expenses)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| SpendlogError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpense};
    use chrono::NaiveDate;

    #[test]
    fn test_pretty_printed_array() {
        let expense = Expense::from_new(NewExpense::new(
            "Bus",
            "Transport",
            Money::from_cents(275),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        ));

        let mut out = Vec::new();
        export_expenses_json(&[expense.clone()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("[\n  {\n    \"id\": "));
        assert!(text.contains("\"price\": 2.75"));

        let parsed: Vec<Expense> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![expense]);
    }
}
