//! CSV Export functionality
//!
//! The header row is the keys of the first record. Every field is written as
//! its JSON encoding, so strings arrive quoted with embedded quotes escaped
//! and numbers stay bare. Keys missing from a later record leave the field
//! empty. Rows are separated by CRLF.

use std::io::Write;

use serde_json::{Map, Value};

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::Expense;

const LINE_ENDING: &str = "\r\n";

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> SpendlogResult<()> {
    let records = expenses
        .iter()
        .map(to_record)
        .collect::<SpendlogResult<Vec<_>>>()?;

    let Some(first) = records.first() else {
        return Ok(());
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));
    for record in &records {
        let fields = headers
            .iter()
            .map(|key| match record.get(key) {
                Some(value) => serde_json::to_string(value),
                None => Ok(String::new()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(fields.join(","));
    }

    writer
        .write_all(lines.join(LINE_ENDING).as_bytes())
        .map_err(|e| SpendlogError::Export(e.to_string()))
}

fn to_record(expense: &Expense) -> SpendlogResult<Map<String, Value>> {
    match serde_json::to_value(expense)? {
        Value::Object(map) => Ok(map),
        _ => Err(SpendlogError::Export(
            "Expense did not serialize to an object".into(),
        )),
    }
}
