//! Recurring expense CLI commands

use clap::Subcommand;

use crate::cli::{parse_date, parse_date_or_today, parse_money, today};
use crate::config::settings::Settings;
use crate::display::{format_expense_list, format_recurring_list};
use crate::error::SpendlogResult;
use crate::models::Frequency;
use crate::services::{RecurringService, RecurringUpdate};
use crate::storage::Storage;

/// Recurring expense subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// List recurring expenses
    List,

    /// Add a recurring expense; its first charge is on the start date
    Add {
        /// What is charged
        name: String,
        /// Price per occurrence
        price: String,
        /// How often: weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: Frequency,
        /// Category name
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// First charge date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        start: Option<String>,
    },

    /// Edit a recurring expense
    Edit {
        /// Recurring expense name or ID
        recurring: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        frequency: Option<Frequency>,
        #[arg(short, long)]
        category: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
    },

    /// Delete a recurring expense (already added expenses are kept)
    #[command(alias = "rm")]
    Remove {
        /// Recurring expense name or ID
        recurring: String,
    },

    /// Add every charge that has fallen due, even if checked today
    Run,
}

/// Handle a recurring expense command
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
) -> SpendlogResult<()> {
    let service = RecurringService::new(storage);
    let currency = settings.currency();

    match cmd {
        RecurringCommands::List => {
            print!("{}", format_recurring_list(&service.list()?, &currency));
        }

        RecurringCommands::Add {
            name,
            price,
            frequency,
            category,
            start,
        } => {
            let price = parse_money(&price)?;
            let start = parse_date_or_today(start.as_deref())?;

            let definition = service.add(&name, &category, price, frequency, start)?;
            println!("Created recurring expense: {}", definition);
            println!("  ID:          {}", definition.id);
            println!("  First charge: {}", definition.start_date);
        }

        RecurringCommands::Edit {
            recurring,
            name,
            price,
            frequency,
            category,
            start,
        } => {
            let definition = service.find(&recurring)?;
            let update = RecurringUpdate {
                name,
                category,
                price: price.as_deref().map(parse_money).transpose()?,
                frequency,
                start_date: start.as_deref().map(parse_date).transpose()?,
                last_added_date: None,
            };

            let updated = service.update(definition.id, update)?;
            println!("Updated recurring expense: {}", updated);
        }

        RecurringCommands::Remove { recurring } => {
            let definition = service.find(&recurring)?;
            let removed = service.remove(definition.id)?;
            println!("Deleted recurring expense: {}", removed.name);
        }

        RecurringCommands::Run => {
            let created = service.materialize_due(today())?;
            if created.is_empty() {
                println!("No recurring expenses are due.");
            } else {
                println!("Added {} recurring expense(s):", created.len());
                print!("{}", format_expense_list(&created, &currency));
            }
        }
    }

    Ok(())
}
