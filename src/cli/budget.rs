//! Budget CLI commands
//!
//! Implements CLI commands for monthly category budgets, including
//! AI-suggested limits.

use clap::Subcommand;

use crate::cli::{ai_client, parse_money, today};
use crate::config::settings::Settings;
use crate::display::format_budget_status;
use crate::error::SpendlogResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show this month's spending against each budget
    #[command(alias = "status")]
    List,

    /// Set a category's monthly budget (0 clears it)
    Set {
        /// Category name
        category: String,
        /// Monthly limit (e.g., "400")
        amount: String,
    },

    /// Ask the AI for budgets based on the last 90 days and apply them
    Suggest,
}

/// Handle a budget command
pub async fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendlogResult<()> {
    let service = BudgetService::new(storage);
    let currency = settings.currency();

    match cmd {
        BudgetCommands::List => {
            let today = today();
            println!("Budgets for {}", today.format("%B %Y"));
            println!();
            print!(
                "{}",
                format_budget_status(&service.status(today)?, &currency)
            );
        }

        BudgetCommands::Set { category, amount } => {
            let amount = parse_money(&amount)?;
            service.set(&category, amount)?;
            if amount.is_zero() {
                println!("Cleared budget for {}", category.trim());
            } else {
                println!(
                    "Set {} budget to {} per month",
                    category.trim(),
                    currency.format_amount(amount)
                );
            }
        }

        BudgetCommands::Suggest => {
            let model = ai_client(settings)?;
            println!("Analyzing your recent spending...");

            let suggested = service.suggest(&model, today(), &currency).await?;
            if suggested.is_empty() {
                println!("The AI did not suggest any budgets for your categories.");
                return Ok(());
            }

            println!("Applied suggested monthly budgets:");
            for (category, limit) in suggested.iter() {
                println!("  {:<20} {:>12}", category, currency.format_amount(limit));
            }
        }
    }

    Ok(())
}
