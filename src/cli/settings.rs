//! Settings CLI commands
//!
//! Currency lives in the settings file; theme, accent, widgets and the
//! onboarding flag live in the store.

use clap::Subcommand;

use crate::config::paths::SpendlogPaths;
use crate::config::settings::Settings;
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Accent, Currency, Theme, Widget};
use crate::services::PreferencesService;
use crate::storage::Storage;

/// Getting-started steps shown by `settings onboarding`
const ONBOARDING_STEPS: &[(&str, &str)] = &[
    (
        "Scan Receipts with AI",
        "Run `spendlog expense scan <image>` to extract every line item from a receipt photo.",
    ),
    (
        "Track Your Finances",
        "Use `recurring`, `budget`, `goal` and `report` to manage subscriptions, limits, savings and trends.",
    ),
    (
        "Filter & Search",
        "`spendlog expense list --period 30d --search coffee --category Food` narrows the list.",
    ),
    (
        "Get AI Insights",
        "`spendlog report insights` analyzes the selected period and suggests where to save.",
    ),
    (
        "Customize Your Experience",
        "`spendlog settings` changes the currency, theme, accent colour and dashboard widgets.",
    ),
];

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings and preferences
    Show,

    /// Set the display currency, or list the supported ones
    Currency {
        /// ISO code such as USD or EUR
        code: Option<String>,
    },

    /// Set the colour theme (light or dark)
    Theme { theme: Theme },

    /// Set the accent colour (cyan, indigo or pink)
    Accent { accent: Accent },

    /// Show, hide or toggle a dashboard widget
    Widget {
        /// ai-summary, spending-trends, expense-list, summary, export-data or ai-coach
        widget: Widget,
        /// Make the widget visible
        #[arg(long, conflicts_with = "hide")]
        show: bool,
        /// Hide the widget
        #[arg(long)]
        hide: bool,
    },

    /// Show the getting-started guide and mark it as seen
    Onboarding {
        /// Show the guide again next time
        #[arg(long)]
        reset: bool,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    paths: &SpendlogPaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> SpendlogResult<()> {
    let preferences = PreferencesService::new(storage);

    match cmd {
        SettingsCommands::Show => {
            let currency = settings.currency();
            println!("Settings");
            println!("========");
            println!("  Currency:   {} ({}, {})", currency.code, currency.name, currency.symbol);
            println!("  Theme:      {}", preferences.theme()?);
            println!("  Accent:     {}", preferences.accent()?);
            println!(
                "  Onboarding: {}",
                if preferences.onboarding_complete()? {
                    "complete"
                } else {
                    "not started"
                }
            );
            println!();
            println!("Dashboard widgets:");
            let widgets = preferences.widgets()?;
            for widget in Widget::all() {
                println!(
                    "  {:<16} {}",
                    widget.to_string(),
                    if widgets.is_visible(*widget) {
                        "shown"
                    } else {
                        "hidden"
                    }
                );
            }
        }

        SettingsCommands::Currency { code: None } => {
            let current = settings.currency();
            for currency in Currency::all() {
                let marker = if *currency == current { "*" } else { " " };
                println!(
                    "{} {}  {:<4} {}",
                    marker, currency.code, currency.symbol, currency.name
                );
            }
        }

        SettingsCommands::Currency { code: Some(code) } => {
            let currency = Currency::from_code(&code).ok_or_else(|| {
                SpendlogError::Validation(format!(
                    "Unsupported currency '{}'. Run `spendlog settings currency` to list them",
                    code
                ))
            })?;
            settings.currency_code = currency.code.to_string();
            settings.save(paths)?;
            println!("Currency set to {} ({})", currency.code, currency.name);
        }

        SettingsCommands::Theme { theme } => {
            preferences.set_theme(theme)?;
            println!("Theme set to {}", theme);
        }

        SettingsCommands::Accent { accent } => {
            preferences.set_accent(accent)?;
            println!("Accent colour set to {}", accent);
        }

        SettingsCommands::Widget { widget, show, hide } => {
            let visible = if show || hide {
                preferences.set_widget(widget, show)?;
                show
            } else {
                preferences.toggle_widget(widget)?
            };
            println!(
                "Widget {} is now {}",
                widget,
                if visible { "shown" } else { "hidden" }
            );
        }

        SettingsCommands::Onboarding { reset: true } => {
            preferences.set_onboarding_complete(false)?;
            println!("The getting-started guide will be shown again.");
        }

        SettingsCommands::Onboarding { reset: false } => {
            print!("{}", format_onboarding_guide());
            preferences.set_onboarding_complete(true)?;
        }
    }

    Ok(())
}

/// The getting-started guide as numbered steps
pub fn format_onboarding_guide() -> String {
    let mut output = String::from("Getting started with spendlog\n\n");
    for (index, (title, content)) in ONBOARDING_STEPS.iter().enumerate() {
        output.push_str(&format!("{}. {}\n   {}\n", index + 1, title, content));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_guide_lists_steps() {
        let guide = format_onboarding_guide();
        assert!(guide.starts_with("Getting started with spendlog"));
        assert!(guide.contains("1. Scan Receipts with AI"));
        assert!(guide.contains("5. Customize Your Experience"));
    }
}
