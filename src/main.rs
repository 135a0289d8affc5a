use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use spendlog::cli::{
    handle_budget_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_goal_command, handle_notification_command,
    handle_recurring_command, handle_report_command, handle_settings_command,
};
use spendlog::config::{paths::SpendlogPaths, settings::Settings};
use spendlog::services::{NotificationService, PreferencesService, RecurringService};
use spendlog::storage::{keys, Storage};

#[derive(Parser)]
#[command(
    name = "spendlog",
    version,
    about = "Receipt-driven personal expense tracker",
    long_about = "spendlog records expenses by hand or from receipt photos, keeps \
                  recurring charges up to date, watches monthly budgets and tracks \
                  savings goals, with optional AI insights and coaching."
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(spendlog::cli::ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(spendlog::cli::CategoryCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(spendlog::cli::BudgetCommands),

    /// Recurring expense commands
    #[command(subcommand)]
    Recurring(spendlog::cli::RecurringCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(spendlog::cli::GoalCommands),

    /// Budget alerts and reminders
    #[command(subcommand, alias = "notification")]
    Notifications(spendlog::cli::NotificationCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(spendlog::cli::ReportCommands),

    /// Export expenses to a file
    #[command(subcommand)]
    Export(spendlog::cli::ExportCommands),

    /// Currency, theme and dashboard preferences
    #[command(subcommand)]
    Settings(spendlog::cli::SettingsCommands),

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    spendlog::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = SpendlogPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::open(paths.clone())?;

    let inspect_only = matches!(cli.command, Some(Commands::Config));
    let changes_data = matches!(
        cli.command,
        Some(Commands::Expense(_) | Commands::Budget(_) | Commands::Recurring(_))
    );

    // On load: materialize due recurring charges, then refresh alerts
    if !inspect_only {
        let now = Utc::now();
        let added = RecurringService::new(&storage).run_daily_check(now)?;
        if !added.is_empty() {
            println!("Added {} recurring expense(s) that fell due.", added.len());
        }
        refresh_notifications(&storage)?;
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Recurring(cmd)) => {
            handle_recurring_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Notifications(cmd)) => {
            handle_notification_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &paths, &mut settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("spendlog Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:      {}", settings.currency());
            println!("  AI model:      {}", settings.ai.model);
            println!("  AI key var:    {}", settings.ai.api_key_env);
            println!("  AI endpoint:   {}", settings.ai.base_url);
            println!();
            println!("Stored data:");
            for key in keys::ALL {
                let file = paths.key_file(key);
                println!(
                    "  {:<20} {}",
                    key,
                    if file.exists() { "present" } else { "-" }
                );
            }
        }
        None => {
            println!("spendlog - Receipt-driven expense tracking");
            println!();
            let unread = NotificationService::new(&storage).unread_count()?;
            if unread > 0 {
                println!(
                    "You have {} unread notification(s). Run 'spendlog notifications list'.",
                    unread
                );
                println!();
            }
            if !PreferencesService::new(&storage).onboarding_complete()? {
                println!("New here? Run 'spendlog settings onboarding' for a quick tour.");
            }
            println!("Run 'spendlog --help' for usage information.");
        }
    }

    if changes_data {
        refresh_notifications(&storage)?;
    }

    Ok(())
}

/// Regenerate budget alerts and reminders from the stored data
fn refresh_notifications(storage: &Storage) -> spendlog::SpendlogResult<()> {
    let now = Utc::now();
    NotificationService::new(storage).refresh(now.date_naive(), now)?;
    Ok(())
}
