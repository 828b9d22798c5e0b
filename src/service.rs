use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::alerts::AlertEngine;
use crate::clock::{Clock, SystemClock};
use crate::error::AuditError;
use crate::export;
use crate::models::{
    AuditExportOptions, AuditLog, AuditQuery, AuditSettings, AuditSettingsUpdate, AuditStatistics,
    ExportFormat, LogEvent, MetadataValue, SecurityAlert, Severity,
};
use crate::notify::NotifierRegistry;
use crate::query;
use crate::redact::{MarkerGuard, ValueGuard};
use crate::stats;
use crate::store::{AuditStore, MemoryStore};

const METADATA_SOURCE: &str = "auditguard";
const METADATA_SCHEMA_VERSION: &str = "1.0";

/// The audit engine. Constructed once at process start and handed to
/// callers by reference; every operation is safe under concurrent use.
pub struct AuditService {
    store: Arc<dyn AuditStore>,
    clock: Arc<dyn Clock>,
    /// Replaced wholesale on update so concurrent readers always see a
    /// complete settings value.
    settings: RwLock<Arc<AuditSettings>>,
    alerts: AlertEngine,
    guard: Arc<dyn ValueGuard>,
}

impl AuditService {
    pub fn new(
        settings: AuditSettings,
        store: Arc<dyn AuditStore>,
        clock: Arc<dyn Clock>,
        notifiers: NotifierRegistry,
        guard: Arc<dyn ValueGuard>,
    ) -> Self {
        AuditService {
            store,
            clock: clock.clone(),
            settings: RwLock::new(Arc::new(settings)),
            alerts: AlertEngine::new(notifiers, clock),
            guard,
        }
    }

    /// In-memory service with the system clock, trace-only notifiers, and
    /// marker redaction. The shape used by tests and the default binary.
    pub fn in_memory(settings: AuditSettings) -> Self {
        Self::new(
            settings,
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
            NotifierRegistry::new(),
            Arc::new(MarkerGuard),
        )
    }

    /// Record one event. Returns `None` when the event type is disabled:
    /// a silent drop, not an error, and distinct from a stored low-severity
    /// record. Persistence happens before threshold evaluation, and both
    /// complete before this returns.
    pub async fn log_event(
        &self,
        event: LogEvent,
        ip_address: &str,
        user_agent: &str,
    ) -> Option<AuditLog> {
        let settings = self.settings_snapshot();

        if !settings.enabled_events.contains(&event.event_type) {
            tracing::debug!(
                event_type = event.event_type.as_str(),
                "Event type disabled, dropping"
            );
            return None;
        }

        let mut metadata = event.metadata.unwrap_or_default();
        metadata.insert("source".to_string(), MetadataValue::from(METADATA_SOURCE));
        metadata.insert(
            "schema_version".to_string(),
            MetadataValue::from(METADATA_SCHEMA_VERSION),
        );

        let seal = |value: Option<serde_json::Value>| {
            value.map(|v| {
                if settings.encrypt_logs && !v.is_null() {
                    self.guard.seal(&v)
                } else {
                    v
                }
            })
        };
        let old_value = seal(event.old_value);
        let new_value = seal(event.new_value);

        let log = AuditLog {
            id: self.clock.next_id(),
            timestamp: self.clock.now(),
            event_type: event.event_type,
            user_id: event.user_id,
            session_id: event.session_id,
            ip_address: crate::sanitize::ip_address(ip_address),
            user_agent: crate::sanitize::user_agent(user_agent),
            action: event.action,
            resource: event.resource,
            old_value,
            new_value,
            success: event.success,
            error_message: event.error_message,
            severity: Severity::classify(event.event_type, event.success),
            metadata,
        };

        self.store.append(log.clone()).await;

        // Index every persisted log; only the threshold checks are gated.
        // Events logged while monitoring is off still count toward windows
        // once it is switched back on.
        self.alerts.record(&log, &settings);
        if settings.real_time_monitoring && settings.alerting_enabled {
            self.alerts.evaluate(&log, &settings).await;
        }

        Some(log)
    }

    /// Filtered, newest-first slice of the log history.
    pub async fn query_logs(&self, query: &AuditQuery) -> Vec<AuditLog> {
        query::run(self.store.scan().await, query)
    }

    /// Serialize a filtered log set. The only hard failure is an unknown
    /// format name, which is reported verbatim.
    pub async fn export_logs(&self, options: &AuditExportOptions) -> Result<String, AuditError> {
        let format = ExportFormat::parse(&options.format)
            .map_err(AuditError::UnsupportedFormat)?;
        let logs = self.query_logs(&options.query).await;
        tracing::info!(
            format = format.as_str(),
            records = logs.len(),
            "Exporting audit logs"
        );
        Ok(export::render(&logs, format, options.include_metadata))
    }

    pub async fn get_security_alerts(&self, acknowledged: Option<bool>) -> Vec<SecurityAlert> {
        self.alerts.list(acknowledged).await
    }

    pub async fn acknowledge_alert(&self, id: Uuid, by: &str) -> bool {
        self.alerts.acknowledge(id, by).await
    }

    pub async fn get_statistics(
        &self,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> AuditStatistics {
        let logs = self.store.scan().await;
        let (alert_count, unacknowledged_alerts) = self.alerts.counts().await;
        stats::compute(&logs, date_from, date_to, alert_count, unacknowledged_alerts)
    }

    /// Merge a partial update into the current settings and swap the whole
    /// value. Readers keep whatever snapshot they already hold. If the
    /// update widens the alert windows past what the index retained, the
    /// index is rebuilt from the store so older events count again.
    pub async fn update_settings(&self, update: AuditSettingsUpdate) {
        let widened = {
            let mut slot = self.settings.write().expect("settings lock poisoned");
            let old_window = AlertEngine::widest_window(&slot);
            let merged = update.apply(&slot);
            let new_window = AlertEngine::widest_window(&merged);
            *slot = Arc::new(merged);
            new_window > old_window
        };
        if widened {
            let logs = self.store.scan().await;
            let settings = self.settings_snapshot();
            self.alerts.rebuild(&logs, &settings);
        }
    }

    /// Defensive copy of the current settings, never a live reference.
    pub fn get_settings(&self) -> AuditSettings {
        (*self.settings_snapshot()).clone()
    }

    /// Delete records older than the retention period. Called by the
    /// retention sweeper; exposed for tests and manual sweeps.
    pub async fn sweep_expired(&self) -> usize {
        let retention_days = self.settings_snapshot().retention_days;
        let cutoff = self.clock.now() - Duration::days(i64::from(retention_days));
        let removed = self.store.delete_older_than(cutoff).await;
        if removed > 0 {
            tracing::info!(removed, "Retention sweep removed expired audit logs");
        }
        removed
    }

    fn settings_snapshot(&self) -> Arc<AuditSettings> {
        self.settings.read().expect("settings lock poisoned").clone()
    }
}
