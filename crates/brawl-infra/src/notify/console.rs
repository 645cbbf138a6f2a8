use async_trait::async_trait;

use brawl_core::ports::{Notification, Notifier, NotifyError, Permission};

/// Console notifier - prints alerts to the terminal (for development and the CLI).
pub struct ConsoleNotifier {
    permission: Permission,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            permission: Permission::Granted,
        }
    }

    /// A console notifier that answers permission requests with `permission`.
    pub fn with_permission(permission: Permission) -> Self {
        Self { permission }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn request_permission(&self) -> Permission {
        self.permission
    }

    async fn show(&self, notification: Notification) -> Result<(), NotifyError> {
        println!("\n🔔 {}\n   {}\n", notification.title, notification.body);
        Ok(())
    }
}
