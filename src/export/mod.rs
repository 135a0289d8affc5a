//! Export module for spendlog
//!
//! Writes the currently filtered expenses to a file:
//! - CSV: header from the first record's keys, every value JSON-encoded
//! - JSON: pretty-printed array with two-space indentation

pub mod csv;
pub mod json;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::Expense;

pub use csv::export_expenses_csv;
pub use json::export_expenses_json;

/// Shown when the filtered list is empty
pub const NOTHING_TO_EXPORT: &str = "There is no data to export for the selected period.";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File name used when none is given
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Csv => "expenses.csv",
            Self::Json => "expenses.json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown export format '{}', expected csv or json", other)),
        }
    }
}

/// Write `expenses` to `writer` in the given format
pub fn export_expenses<W: Write>(
    expenses: &[Expense],
    format: ExportFormat,
    writer: &mut W,
) -> SpendlogResult<()> {
    if expenses.is_empty() {
        return Err(SpendlogError::Export(NOTHING_TO_EXPORT.into()));
    }
    match format {
        ExportFormat::Csv => export_expenses_csv(expenses, writer),
        ExportFormat::Json => export_expenses_json(expenses, writer),
    }
}

/// Export to a file, replacing it if it exists
///
/// Nothing is created when there is nothing to export.
pub fn export_to_file(
    expenses: &[Expense],
    format: ExportFormat,
    path: &Path,
) -> SpendlogResult<()> {
    if expenses.is_empty() {
        return Err(SpendlogError::Export(NOTHING_TO_EXPORT.into()));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    export_expenses(expenses, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| SpendlogError::Export(e.to_string()))?;

    info!(path = %path.display(), %format, count = expenses.len(), "Exported expenses");
    Ok(())
}
