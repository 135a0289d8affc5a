//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing, splitting and
//! scanning expenses.

use std::path::PathBuf;

use clap::Subcommand;

use crate::ai::InlineImage;
use crate::cli::{ai_client, parse_date, parse_date_or_today, parse_money, today, FilterArgs};
use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list, format_receipt_items};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{NewExpense, SplitPart};
use crate::services::{ExpenseService, ExpenseUpdate};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What was bought
        name: String,
        /// Price (e.g., "12.50")
        price: String,
        /// Category name
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Purchase date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Create the category first; it must not already exist
        #[arg(long)]
        new_category: bool,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Remove {
        /// Expense ID
        id: String,
    },

    /// Split an expense into parts that add up to its price
    Split {
        /// Expense ID
        id: String,
        /// A part as NAME:CATEGORY:PRICE (repeatable)
        #[arg(short, long = "part", required = true)]
        parts: Vec<String>,
    },

    /// Read line items off a receipt image and add them as expenses
    Scan {
        /// Receipt image (jpg, png, webp, heic, gif)
        image: PathBuf,
        /// Correct an item's category as N=CATEGORY, N counting from 1 (repeatable)
        #[arg(short = 's', long = "set-category")]
        set_category: Vec<String>,
        /// Show the extracted items without saving them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Parse a NAME:CATEGORY:PRICE split part
///
/// The name may itself contain colons; category and price are taken from the
/// right.
fn parse_split_part(part: &str) -> SpendlogResult<SplitPart> {
    let mut fields = part.rsplitn(3, ':');
    let (Some(price), Some(category), Some(name)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(SpendlogError::Validation(format!(
            "Invalid split part '{}'. Use NAME:CATEGORY:PRICE",
            part
        )));
    };
    Ok(SplitPart::new(name.trim(), category.trim(), parse_money(price)?))
}

/// Parse an N=CATEGORY receipt item correction
fn parse_category_override(raw: &str) -> SpendlogResult<(usize, String)> {
    let invalid = || {
        SpendlogError::Validation(format!(
            "Invalid category correction '{}'. Use N=CATEGORY",
            raw
        ))
    };
    let (number, category) = raw.split_once('=').ok_or_else(invalid)?;
    let number = number.trim().parse::<usize>().map_err(|_| invalid())?;
    if category.trim().is_empty() {
        return Err(invalid());
    }
    Ok((number, category.trim().to_string()))
}

/// Handle an expense command
pub async fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SpendlogResult<()> {
    let service = ExpenseService::new(storage);
    let currency = settings.currency();

    match cmd {
        ExpenseCommands::Add {
            name,
            price,
            category,
            date,
            new_category,
        } => {
            let price = parse_money(&price)?;
            let date = parse_date_or_today(date.as_deref())?;

            let new = NewExpense::new(name, category, price, date);
            let expense = if new_category {
                let expense = service.add_in_new_category(new)?;
                println!("Added category '{}'", expense.category);
                expense
            } else {
                service.add(new)?
            };
            println!("Added expense:");
            print!("{}", format_expense_details(&expense, &currency));
        }

        ExpenseCommands::List { filter } => {
            let filter = filter.to_filter();
            let expenses = service.list(&filter, today())?;
            if expenses.is_empty() && filter.is_narrowed() {
                println!("No expenses match the current filters.");
            } else {
                print!("{}", format_expense_list(&expenses, &currency));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&id)?;
            print!("{}", format_expense_details(&expense, &currency));
        }

        ExpenseCommands::Edit {
            id,
            name,
            price,
            category,
            date,
        } => {
            let expense = service.find(&id)?;
            let update = ExpenseUpdate {
                name,
                category,
                price: price.as_deref().map(parse_money).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            let updated = service.update(expense.id, update)?;
            println!("Updated expense:");
            print!("{}", format_expense_details(&updated, &currency));
        }

        ExpenseCommands::Remove { id } => {
            let expense = service.find(&id)?;
            let removed = service.remove(expense.id)?;
            println!(
                "Deleted expense '{}' ({})",
                removed.name,
                currency.format_amount(removed.price)
            );
        }

        ExpenseCommands::Split { id, parts } => {
            let expense = service.find(&id)?;
            let parts = parts
                .iter()
                .map(|p| parse_split_part(p))
                .collect::<SpendlogResult<Vec<_>>>()?;

            let created = service.split(expense.id, parts)?;
            println!(
                "Split '{}' into {} expense(s):",
                expense.name,
                created.len()
            );
            print!("{}", format_expense_list(&created, &currency));
        }

        ExpenseCommands::Scan {
            image,
            set_category,
            dry_run,
        } => {
            let overrides = set_category
                .iter()
                .map(|raw| parse_category_override(raw))
                .collect::<SpendlogResult<Vec<_>>>()?;
            let image = InlineImage::from_path(&image)?;
            let model = ai_client(settings)?;

            println!("Analyzing receipt...");
            let items = service.extract_receipt(&model, image).await?;
            let items = service.review_receipt_items(items, &overrides)?;

            if dry_run {
                println!("Review the extracted items (nothing was saved):");
                print!("{}", format_receipt_items(&items, &currency));
                println!(
                    "Correct a category with --set-category N=CATEGORY, then run again without --dry-run."
                );
                return Ok(());
            }

            let created = service.add_receipt_items(items, today())?;
            println!("Added {} expense(s) from the receipt:", created.len());
            print!("{}", format_expense_list(&created, &currency));
        }
    }

    Ok(())
}
