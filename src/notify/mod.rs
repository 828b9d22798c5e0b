pub mod email;
pub mod webhook;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{AlertAction, SecurityAlert};

#[derive(Debug)]
pub struct NotifyError {
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for NotifyError {
    fn from(s: String) -> Self {
        NotifyError { message: s }
    }
}

impl From<&str> for NotifyError {
    fn from(s: &str) -> Self {
        NotifyError {
            message: s.to_string(),
        }
    }
}

/// Delivery channel for a fired alert. Implementations must tolerate
/// repeated delivery of the same alert: the engine performs no dedup.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn id(&self) -> &str;
    async fn notify(&self, alert: &SecurityAlert) -> Result<(), NotifyError>;
}

/// Fallback channel that only writes a tracing line. Not a production
/// notifier; it stands in for channels with no configured backend
/// (including user-block and escalate, which are external collaborators).
pub struct TraceNotifier;

#[async_trait]
impl Notifier for TraceNotifier {
    fn id(&self) -> &str {
        "trace"
    }

    async fn notify(&self, alert: &SecurityAlert) -> Result<(), NotifyError> {
        tracing::warn!(
            alert_id = %alert.id,
            severity = alert.severity.as_str(),
            user = alert.affected_user.as_deref().unwrap_or("-"),
            "SECURITY ALERT: {}",
            alert.description
        );
        Ok(())
    }
}

/// Maps each alert action to its delivery channel. Actions without a
/// registered channel fall back to `TraceNotifier`.
pub struct NotifierRegistry {
    channels: HashMap<AlertAction, Arc<dyn Notifier>>,
    fallback: Arc<dyn Notifier>,
}

impl NotifierRegistry {
    pub fn new() -> Self {
        NotifierRegistry {
            channels: HashMap::new(),
            fallback: Arc::new(TraceNotifier),
        }
    }

    pub fn register(&mut self, action: AlertAction, notifier: Arc<dyn Notifier>) {
        self.channels.insert(action, notifier);
    }

    pub fn get(&self, action: AlertAction) -> &Arc<dyn Notifier> {
        self.channels.get(&action).unwrap_or(&self.fallback)
    }

    /// Deliver an alert through the channel its threshold asks for.
    /// Delivery failure is logged, never propagated: a broken channel must
    /// not fail the `log_event` call that triggered the alert.
    pub async fn dispatch(&self, alert: &SecurityAlert) {
        let notifier = self.get(alert.threshold.action);
        if let Err(e) = notifier.notify(alert).await {
            tracing::error!(
                "Alert notification via {} failed for {}: {e}",
                notifier.id(),
                alert.id
            );
        }
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
