//! Notification display formatting

use crate::models::{Notification, NotificationKind};

/// Format notifications newest first, unread ones marked with a dot
pub fn format_notification_list(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications.\n".to_string();
    }

    let mut output = String::new();
    for notification in notifications {
        let marker = if notification.read { " " } else { "●" };
        let icon = match notification.kind {
            NotificationKind::BudgetCritical => "!!",
            NotificationKind::BudgetWarning => "! ",
            NotificationKind::Reminder => "i ",
        };
        output.push_str(&format!(
            "{} {} {:<9} {}  {}\n",
            marker,
            icon,
            notification.kind.to_string(),
            notification.timestamp.format("%Y-%m-%d %H:%M"),
            notification.message
        ));
    }

    let unread = notifications.iter().filter(|n| !n.read).count();
    output.push_str(&format!("\n{} unread\n", unread));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_notification_list() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();
        let mut read = Notification::welcome_reminder(now);
        read.read = true;
        let critical =
            Notification::budget_critical("Food", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), now);

        let output = format_notification_list(&[critical, read]);
        assert!(output.contains("● !! Critical"));
        assert!(output.contains("2024-03-10 09:30"));
        assert!(output.contains("1 unread"));
    }
}
