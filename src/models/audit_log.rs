use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event categories the engine knows how to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    UserLogin,
    UserLogout,
    DataAccess,
    DataModification,
    DataDeletion,
    SystemConfigChange,
    SecurityEvent,
    ComplianceViolation,
    PermissionChange,
    ApiAccess,
}

impl AuditEventType {
    pub const ALL: [AuditEventType; 10] = [
        AuditEventType::UserLogin,
        AuditEventType::UserLogout,
        AuditEventType::DataAccess,
        AuditEventType::DataModification,
        AuditEventType::DataDeletion,
        AuditEventType::SystemConfigChange,
        AuditEventType::SecurityEvent,
        AuditEventType::ComplianceViolation,
        AuditEventType::PermissionChange,
        AuditEventType::ApiAccess,
    ];

    /// Stable wire name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::UserLogin => "user_login",
            AuditEventType::UserLogout => "user_logout",
            AuditEventType::DataAccess => "data_access",
            AuditEventType::DataModification => "data_modification",
            AuditEventType::DataDeletion => "data_deletion",
            AuditEventType::SystemConfigChange => "system_config_change",
            AuditEventType::SecurityEvent => "security_event",
            AuditEventType::ComplianceViolation => "compliance_violation",
            AuditEventType::PermissionChange => "permission_change",
            AuditEventType::ApiAccess => "api_access",
        }
    }
}

/// Four-level ordinal severity shared by logs and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Classify a log record. Pure function of the event type and outcome;
    /// computed once at creation time and never recomputed.
    pub fn classify(event_type: AuditEventType, success: bool) -> Severity {
        use AuditEventType::*;
        if success {
            match event_type {
                ComplianceViolation => Severity::High,
                SecurityEvent | DataDeletion | SystemConfigChange => Severity::Medium,
                _ => Severity::Low,
            }
        } else {
            match event_type {
                SecurityEvent | ComplianceViolation => Severity::Critical,
                DataDeletion | SystemConfigChange => Severity::High,
                DataModification | DataAccess => Severity::Medium,
                _ => Severity::Low,
            }
        }
    }

    /// Alert severity by how far past the threshold a burst got.
    pub fn for_event_count(count: usize) -> Severity {
        if count > 50 {
            Severity::Critical
        } else if count > 20 {
            Severity::High
        } else if count > 10 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Closed set of metadata value shapes so exports stay well-typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Number(f64),
    Bool(bool),
    Map(BTreeMap<String, MetadataValue>),
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

pub type Metadata = BTreeMap<String, MetadataValue>;

/// An immutable record of one security/compliance-relevant action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub action: String,
    pub resource: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub success: bool,
    pub error_message: Option<String>,
    pub severity: Severity,
    pub metadata: Metadata,
}

/// Incoming event as supplied by the HTTP/collaborator layer, before
/// sanitization and severity classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event_type: AuditEventType,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub resource: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    #[serde(default = "default_success")]
    pub success: bool,
    pub error_message: Option<String>,
    pub metadata: Option<Metadata>,
}

fn default_success() -> bool {
    true
}
