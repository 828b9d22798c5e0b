use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit_log::{AuditEventType, Severity};

/// Filter set for log queries. All supplied predicates are conjunctive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
    pub event_types: Option<Vec<AuditEventType>>,
    pub user_id: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub success: Option<bool>,
    pub severity: Option<Severity>,
    /// Case-insensitive substring match.
    pub resource: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Xml,
    Pdf,
}

impl ExportFormat {
    /// Parse a caller-supplied format name. Unknown names are surfaced to
    /// the caller verbatim in the error.
    pub fn parse(s: &str) -> Result<ExportFormat, String> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xml => "application/xml",
            ExportFormat::Pdf => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditExportOptions {
    /// Caller-supplied format name; unknown names fail the export with an
    /// error naming them.
    pub format: String,
    #[serde(default)]
    pub query: AuditQuery,
    pub filename: Option<String>,
    #[serde(default)]
    pub include_metadata: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserActivity {
    pub user_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventTypeCount {
    pub event_type: AuditEventType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: usize,
}

/// Aggregate view over a (possibly date-bounded) slice of the log history.
#[derive(Debug, Clone, Serialize)]
pub struct AuditStatistics {
    pub total_logs: usize,
    pub date_range: DateRange,
    pub event_type_stats: Vec<EventTypeCount>,
    pub success_rate: f64,
    pub success_count: usize,
    pub failure_count: usize,
    pub severity_stats: Vec<SeverityCount>,
    /// At most ten users, by descending event count.
    pub top_users: Vec<UserActivity>,
    pub alert_count: usize,
    pub unacknowledged_alerts: usize,
}
