//! Notification port - abstraction over the system notification surface.

use async_trait::async_trait;

/// Answer to a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// A notification to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// The alert shown when a reminder comes due.
    pub fn reminder(title: &str) -> Self {
        Self {
            title: "Reminder!".to_string(),
            body: title.to_string(),
        }
    }
}

/// Notifier trait - console, webhook, or anything that can show an alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Ask for permission to display notifications.
    async fn request_permission(&self) -> Permission;

    /// Display a notification.
    async fn show(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notification errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}
