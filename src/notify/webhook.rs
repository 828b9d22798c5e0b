use async_trait::async_trait;
use serde_json::json;

use super::{Notifier, NotifyError};
use crate::models::SecurityAlert;

pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Self {
        WebhookNotifier {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn id(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, alert: &SecurityAlert) -> Result<(), NotifyError> {
        let body = json!({
            "alert_id": alert.id,
            "triggered_at": alert.triggered_at,
            "severity": alert.severity,
            "event_type": alert.threshold.event_type,
            "affected_user": alert.affected_user,
            "event_count": alert.event_count,
            "time_window_minutes": alert.time_window_minutes,
            "description": alert.description,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::from(format!("Webhook request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(NotifyError::from(format!(
                "Webhook returned status {}",
                resp.status()
            )));
        }

        Ok(())
    }
}
