//! Transient user-facing notifications
//!
//! Store operations publish success and failure toasts on a broadcast
//! channel. Emission is fire-and-forget; messages are dropped when nobody
//! subscribes.

use tokio::sync::broadcast;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 16;

/// Severity of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A single transient notification
#[derive(Clone, Debug)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

/// Broadcast bus for notifications
#[derive(Clone, Debug)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Success, "Success", message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Error, "Error", message.into());
    }

    fn publish(&self, level: NotificationLevel, title: &str, message: String) {
        let _ = self.tx.send(Notification {
            id: Uuid::new_v4(),
            level,
            title: title.to_string(),
            message,
        });
    }
}
