use async_trait::async_trait;

use brawl_core::ports::{Notification, Notifier, NotifyError, Permission};

/// Webhook notifier - posts alerts to a chat webhook (Slack, Discord, etc.).
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    fn payload(notification: &Notification) -> serde_json::Value {
        serde_json::json!({
            "text": format!("🔔 *{}*\n{}", notification.title, notification.body),
            "title": notification.title,
            "body": notification.body,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    /// A configured webhook is consent enough.
    async fn request_permission(&self) -> Permission {
        if self.url.is_empty() {
            Permission::Denied
        } else {
            Permission::Granted
        }
    }

    async fn show(&self, notification: Notification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&Self::payload(&notification))
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Delivery(format!(
                "webhook answered {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_carries_title_and_body() {
        let payload = WebhookNotifier::payload(&Notification::reminder("Call mom"));

        assert_eq!(payload["title"], "Reminder!");
        assert_eq!(payload["body"], "Call mom");
        assert!(payload["text"].as_str().unwrap().contains("Call mom"));
    }

    #[tokio::test]
    async fn test_empty_url_is_denied() {
        let notifier = WebhookNotifier::new(String::new());

        assert_eq!(notifier.request_permission().await, Permission::Denied);
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_a_delivery_error() {
        let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook".to_string());

        let result = notifier.show(Notification::reminder("Call mom")).await;

        assert!(matches!(result, Err(NotifyError::Delivery(_))));
    }
}
