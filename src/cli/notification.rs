//! Notification CLI commands

use clap::Subcommand;

use crate::display::format_notification_list;
use crate::error::SpendlogResult;
use crate::services::NotificationService;
use crate::storage::Storage;

/// Notification subcommands
#[derive(Subcommand)]
pub enum NotificationCommands {
    /// Show notifications, newest first
    List,

    /// Mark every notification as read
    #[command(name = "read-all")]
    ReadAll,

    /// Delete all notifications
    Clear,
}

/// Handle a notification command
pub fn handle_notification_command(
    storage: &Storage,
    cmd: NotificationCommands,
) -> SpendlogResult<()> {
    let service = NotificationService::new(storage);

    match cmd {
        NotificationCommands::List => {
            print!("{}", format_notification_list(&service.list()?));
        }

        NotificationCommands::ReadAll => {
            let changed = service.mark_all_read()?;
            println!("Marked {} notification(s) as read", changed);
        }

        NotificationCommands::Clear => {
            let removed = service.clear_all()?;
            println!("Cleared {} notification(s)", removed);
        }
    }

    Ok(())
}
