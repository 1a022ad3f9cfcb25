//! Outbound notifications for public form submissions.
//!
//! Posts a small JSON event to a configured webhook URL. Delivery is best
//! effort: handlers log failures and never block the write on them.

use serde_json::json;

/// Webhook notifier. Cheap to clone; the inner client pools connections.
#[derive(Clone)]
pub struct Notifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Send an event. A missing webhook URL drops the event silently;
    /// that is the default in development.
    pub async fn send(&self, event: &str, payload: serde_json::Value) -> Result<(), reqwest::Error> {
        let Some(url) = &self.webhook_url else {
            tracing::debug!("No webhook configured, dropping '{}' event", event);
            return Ok(());
        };

        let body = json!({
            "event": event,
            "payload": payload,
        });

        self.client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("Delivered '{}' event", event);
        Ok(())
    }
}
