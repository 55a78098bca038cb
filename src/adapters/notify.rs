use crate::domain::model::Notification;
use crate::domain::ports::Notifier;

/// Prints notifications for the CLI, failures to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn render(notification: &Notification) -> String {
        let icon = if notification.is_failure() { "❌" } else { "✅" };
        format!(
            "{} {}\n   {}",
            icon, notification.title, notification.description
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        if notification.is_failure() {
            eprintln!("{}", Self::render(notification));
        } else {
            println!("{}", Self::render(notification));
        }
    }
}

/// Sends notifications to the log only; the CLI uses it when logs are JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        if notification.is_failure() {
            tracing::warn!(title = %notification.title, "{}", notification.description);
        } else {
            tracing::info!(title = %notification.title, "{}", notification.description);
        }
    }
}
