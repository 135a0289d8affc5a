//! Savings goal display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::format_bar;
use crate::models::{Currency, SavingsGoal};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

fn deadline_label(goal: &SavingsGoal, today: NaiveDate) -> String {
    match goal.days_left(today) {
        _ if goal.is_reached() => format!("{} (reached)", goal.deadline),
        days if days < 0 => format!("{} (passed)", goal.deadline),
        0 => format!("{} (today)", goal.deadline),
        days => format!("{} ({} days left)", goal.deadline, days),
    }
}

/// Format goals as a table with progress bars
pub fn format_goal_list(goals: &[SavingsGoal], currency: &Currency, today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No savings goals yet.\n".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow {
        id: g.id.to_string(),
        name: g.name.clone(),
        saved: currency.format_amount(g.saved_amount),
        target: currency.format_amount(g.target_amount),
        progress: format!(
            "{} {:>3.0}%",
            format_bar(g.progress_percent(), 100.0, 12),
            g.progress_percent()
        ),
        deadline: deadline_label(g, today),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format a single goal's details
pub fn format_goal_details(goal: &SavingsGoal, currency: &Currency, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!("  ID:         {}\n", goal.id));
    output.push_str(&format!(
        "  Saved:      {} of {}\n",
        currency.format_amount(goal.saved_amount),
        currency.format_amount(goal.target_amount)
    ));
    output.push_str(&format!(
        "  Remaining:  {}\n",
        currency.format_amount(goal.remaining())
    ));
    output.push_str(&format!(
        "  Progress:   {} {:.1}%\n",
        format_bar(goal.progress_percent(), 100.0, 20),
        goal.progress_percent()
    ));
    output.push_str(&format!("  Deadline:   {}\n", deadline_label(goal, today)));

    output
}
