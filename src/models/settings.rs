use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::alert::{AlertAction, AlertThreshold};
use super::audit_log::AuditEventType;
use super::query::ExportFormat;

/// Process-wide audit configuration. Updates replace the whole value; no
/// partial in-place mutation of nested fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    pub enabled_events: HashSet<AuditEventType>,
    /// Days before a record becomes eligible for deletion.
    pub retention_days: u32,
    pub encrypt_logs: bool,
    pub real_time_monitoring: bool,
    pub alerting_enabled: bool,
    pub alert_thresholds: Vec<AlertThreshold>,
    pub export_formats: Vec<ExportFormat>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        AuditSettings {
            enabled_events: AuditEventType::ALL.into_iter().collect(),
            // Seven years, the compliance default of the reviewed system.
            retention_days: 2555,
            encrypt_logs: true,
            real_time_monitoring: true,
            alerting_enabled: true,
            alert_thresholds: vec![
                AlertThreshold {
                    event_type: AuditEventType::UserLogin,
                    count: 5,
                    time_window_minutes: 15,
                    action: AlertAction::Email,
                },
                AlertThreshold {
                    event_type: AuditEventType::SecurityEvent,
                    count: 10,
                    time_window_minutes: 5,
                    action: AlertAction::EscalateToAdmin,
                },
                AlertThreshold {
                    event_type: AuditEventType::ComplianceViolation,
                    count: 3,
                    time_window_minutes: 60,
                    action: AlertAction::EscalateToAdmin,
                },
                AlertThreshold {
                    event_type: AuditEventType::DataAccess,
                    count: 50,
                    time_window_minutes: 5,
                    action: AlertAction::Email,
                },
            ],
            export_formats: vec![
                ExportFormat::Json,
                ExportFormat::Csv,
                ExportFormat::Xml,
                ExportFormat::Pdf,
            ],
        }
    }
}

/// Partial settings update. Absent fields keep their current value; the
/// merged result replaces the settings wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditSettingsUpdate {
    pub enabled_events: Option<HashSet<AuditEventType>>,
    pub retention_days: Option<u32>,
    pub encrypt_logs: Option<bool>,
    pub real_time_monitoring: Option<bool>,
    pub alerting_enabled: Option<bool>,
    pub alert_thresholds: Option<Vec<AlertThreshold>>,
    pub export_formats: Option<Vec<ExportFormat>>,
}

impl AuditSettingsUpdate {
    pub fn apply(self, current: &AuditSettings) -> AuditSettings {
        AuditSettings {
            enabled_events: self.enabled_events.unwrap_or_else(|| current.enabled_events.clone()),
            retention_days: self.retention_days.unwrap_or(current.retention_days),
            encrypt_logs: self.encrypt_logs.unwrap_or(current.encrypt_logs),
            real_time_monitoring: self
                .real_time_monitoring
                .unwrap_or(current.real_time_monitoring),
            alerting_enabled: self.alerting_enabled.unwrap_or(current.alerting_enabled),
            alert_thresholds: self
                .alert_thresholds
                .unwrap_or_else(|| current.alert_thresholds.clone()),
            export_formats: self
                .export_formats
                .unwrap_or_else(|| current.export_formats.clone()),
        }
    }
}
