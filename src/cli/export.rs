//! CLI commands for data export
//!
//! Writes the filtered expense list to a CSV or JSON file.

use std::path::PathBuf;

use clap::Subcommand;

use crate::cli::{today, FilterArgs};
use crate::error::SpendlogResult;
use crate::export::{export_to_file, ExportFormat};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses to CSV
    Csv {
        /// Output file path (default: expenses.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export expenses to pretty-printed JSON
    Json {
        /// Output file path (default: expenses.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> SpendlogResult<()> {
    let (format, output, filter) = match cmd {
        ExportCommands::Csv { output, filter } => (ExportFormat::Csv, output, filter),
        ExportCommands::Json { output, filter } => (ExportFormat::Json, output, filter),
    };
    let output = output.unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let expenses = ExpenseService::new(storage).list(&filter.to_filter(), today())?;
    export_to_file(&expenses, format, &output)?;

    println!(
        "Exported {} expense(s) to {}",
        expenses.len(),
        output.display()
    );
    Ok(())
}
