use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit_log::{AuditEventType, Severity};

/// Effect to run when a threshold fires. Block/escalate remain external
/// collaborators; see the notify module for what each dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    Email,
    Webhook,
    BlockUser,
    EscalateToAdmin,
}

/// Declarative rule: `count` or more events of `event_type` for the same
/// actor within `time_window_minutes` fire `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    pub event_type: AuditEventType,
    pub count: u32,
    pub time_window_minutes: i64,
    pub action: AlertAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAlert {
    pub id: Uuid,
    pub triggered_at: DateTime<Utc>,
    pub threshold: AlertThreshold,
    pub event_count: usize,
    pub time_window_minutes: i64,
    pub affected_user: Option<String>,
    pub description: String,
    pub severity: Severity,
    pub acknowledged: bool,
    pub acknowledged_by: Option<String>,
    pub acknowledged_at: Option<DateTime<Utc>>,
}
