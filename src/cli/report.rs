//! CLI commands for reports

use clap::Subcommand;

use crate::cli::{ai_client, today, FilterArgs};
use crate::config::settings::Settings;
use crate::error::SpendlogResult;
use crate::reports::ComparisonPeriod;
use crate::services::ReportService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total spending by category
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Daily spending with averages
    Trends {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Compare a period with the one before it
    Compare {
        /// last-month, last-7-days or last-30-days
        #[arg(default_value = "last-month")]
        period: ComparisonPeriod,
    },

    /// AI summary of spending habits
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle a report command
pub async fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SpendlogResult<()> {
    let service = ReportService::new(storage);
    let currency = settings.currency();

    match cmd {
        ReportCommands::Summary { filter } => {
            let summary = service.summary(&filter.to_filter(), today())?;
            if summary.is_empty() {
                println!("No expenses found.");
            } else {
                print!("{}", summary.format_terminal(&currency));
            }
        }

        ReportCommands::Trends { filter } => {
            let trends = service.trends(&filter.to_filter(), today())?;
            if trends.is_empty() {
                println!("Not enough data to display trends.");
            } else {
                print!("{}", trends.format_terminal(&currency));
            }
        }

        ReportCommands::Compare { period } => {
            let comparison = service.compare(period, today())?;
            print!("{}", comparison.format_terminal(&currency));
        }

        ReportCommands::Insights { filter } => {
            let model = ai_client(settings)?;
            let text = service
                .insights(&model, &filter.to_filter(), today(), &currency)
                .await?;
            println!("{}", text);
        }
    }

    Ok(())
}
