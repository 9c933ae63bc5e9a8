use daymark_reminders_domain::{ImportanceLevel, ID};
use std::sync::Mutex;
use tracing::info;

/// Payload handed to the notification renderer when a reminder job fires
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub uuid: ID,
    pub title: String,
    pub body: String,
    pub importance: ImportanceLevel,
}

/// The notification rendering collaborator. Fire and forget, no return
/// value is consumed.
pub trait INotifier: Send + Sync {
    fn show_notification(&self, notification: Notification);
}

/// Notifier that only emits a tracing event. The actual rendering is
/// owned by the desktop shell, not by this daemon.
pub struct LogNotifier {}

impl INotifier for LogNotifier {
    fn show_notification(&self, notification: Notification) {
        info!(
            "Showing notification {} ({:?}): {} - {}",
            notification.uuid, notification.importance, notification.title, notification.body
        );
    }
}

/// Notifier fake that records every payload for test assertions
pub struct InMemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl INotifier for InMemoryNotifier {
    fn show_notification(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
