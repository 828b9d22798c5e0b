mod alert;
mod audit_log;
mod query;
mod settings;

pub use alert::{AlertAction, AlertThreshold, SecurityAlert};
pub use audit_log::{AuditEventType, AuditLog, LogEvent, Metadata, MetadataValue, Severity};
pub use query::{
    AuditExportOptions, AuditQuery, AuditStatistics, DateRange, EventTypeCount, ExportFormat,
    SeverityCount, UserActivity,
};
pub use settings::{AuditSettings, AuditSettingsUpdate};
