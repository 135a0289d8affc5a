//! Savings goal CLI commands

use clap::Subcommand;

use crate::cli::{ai_client, parse_date, parse_money, today};
use crate::config::settings::Settings;
use crate::display::{format_goal_details, format_goal_list};
use crate::error::SpendlogResult;
use crate::models::Money;
use crate::services::{GoalService, GoalUpdate};
use crate::storage::Storage;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List savings goals with progress
    List,

    /// Show one goal
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
        /// Amount already saved
        #[arg(short, long)]
        saved: Option<String>,
    },

    /// Edit a savings goal
    Edit {
        /// Goal name or ID
        goal: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long)]
        saved: Option<String>,
        #[arg(short, long)]
        deadline: Option<String>,
    },

    /// Delete a savings goal
    #[command(alias = "rm")]
    Remove {
        /// Goal name or ID
        goal: String,
    },

    /// Get AI coaching toward a goal
    Coach {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a savings goal command
pub async fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> SpendlogResult<()> {
    let service = GoalService::new(storage);
    let currency = settings.currency();

    match cmd {
        GoalCommands::List => {
            print!("{}", format_goal_list(&service.list()?, &currency, today()));
        }

        GoalCommands::Show { goal } => {
            let goal = service.find(&goal)?;
            print!("{}", format_goal_details(&goal, &currency, today()));
        }

        GoalCommands::Add {
            name,
            target,
            deadline,
            saved,
        } => {
            let target = parse_money(&target)?;
            let saved = saved
                .as_deref()
                .map(parse_money)
                .transpose()?
                .unwrap_or_else(Money::zero);
            let deadline = parse_date(&deadline)?;

            let goal = service.add(&name, target, saved, deadline)?;
            println!("Created savings goal:");
            print!("{}", format_goal_details(&goal, &currency, today()));
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            saved,
            deadline,
        } => {
            let goal = service.find(&goal)?;
            let update = GoalUpdate {
                name,
                target_amount: target.as_deref().map(parse_money).transpose()?,
                saved_amount: saved.as_deref().map(parse_money).transpose()?,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
            };

            let updated = service.update(goal.id, update)?;
            println!("Updated savings goal:");
            print!("{}", format_goal_details(&updated, &currency, today()));
        }

        GoalCommands::Remove { goal } => {
            let goal = service.find(&goal)?;
            let removed = service.remove(goal.id)?;
            println!("Deleted savings goal: {}", removed.name);
        }

        GoalCommands::Coach { goal } => {
            let goal = service.find(&goal)?;
            let model = ai_client(settings)?;

            println!("Coaching for '{}':", goal.name);
            println!();
            println!("{}", service.coach(&model, goal.id, &currency).await?);
        }
    }

    Ok(())
}
