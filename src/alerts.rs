use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::Clock;
use crate::models::{AlertThreshold, AuditEventType, AuditLog, AuditSettings, SecurityAlert, Severity};
use crate::notify::NotifierRegistry;

/// Sliding-window threshold evaluation and alert lifecycle.
///
/// Instead of re-scanning the whole log history on every ingested event,
/// the engine keeps a per-(event type, actor) time-ordered index of recent
/// timestamps and counts inside it. Every persisted log is recorded,
/// whether or not monitoring is currently on, so the index always mirrors
/// the stored window. Entries older than the widest configured window are
/// pruned on each touch; widening the windows requires a rebuild from the
/// store (see `rebuild`).
pub struct AlertEngine {
    alerts: RwLock<Vec<SecurityAlert>>,
    /// (event_type, user_id) -> timestamps of recent matching events.
    windows: DashMap<(AuditEventType, Option<String>), Vec<DateTime<Utc>>>,
    notifiers: NotifierRegistry,
    clock: Arc<dyn Clock>,
}

impl AlertEngine {
    pub fn new(notifiers: NotifierRegistry, clock: Arc<dyn Clock>) -> Self {
        AlertEngine {
            alerts: RwLock::new(Vec::new()),
            windows: DashMap::new(),
            notifiers,
            clock,
        }
    }

    /// Record a persisted log into the window index. Called for every
    /// appended log regardless of the monitoring flags, so that events
    /// stored while alerting was off still count once it comes back on.
    pub fn record(&self, log: &AuditLog, settings: &AuditSettings) {
        let key = (log.event_type, log.user_id.clone());
        let mut entry = self.windows.entry(key).or_default();
        let series = entry.value_mut();
        let horizon = log.timestamp - Self::widest_window(settings);
        series.retain(|t| *t >= horizon);
        series.push(log.timestamp);
    }

    /// Rebuild the window index from stored logs. Needed after a settings
    /// update widens a threshold window beyond what the index retained.
    pub fn rebuild(&self, logs: &[AuditLog], settings: &AuditSettings) {
        let horizon = self.clock.now() - Self::widest_window(settings);
        self.windows.clear();
        for log in logs {
            if log.timestamp < horizon {
                continue;
            }
            self.windows
                .entry((log.event_type, log.user_id.clone()))
                .or_default()
                .push(log.timestamp);
        }
        for mut entry in self.windows.iter_mut() {
            entry.value_mut().sort_unstable();
        }
    }

    /// Evaluate every matching threshold against the just-recorded log.
    /// A burst that keeps crossing a threshold produces one alert per
    /// qualifying log; callers needing debouncing must post-filter.
    pub async fn evaluate(&self, log: &AuditLog, settings: &AuditSettings) -> Vec<SecurityAlert> {
        let key = (log.event_type, log.user_id.clone());

        let count_in = |timestamps: &[DateTime<Utc>], window_start: DateTime<Utc>| {
            timestamps.iter().filter(|t| **t >= window_start).count()
        };

        let timestamps: Vec<DateTime<Utc>> = self
            .windows
            .get(&key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        let mut fired = Vec::new();
        for threshold in &settings.alert_thresholds {
            if threshold.event_type != log.event_type {
                continue;
            }
            let window_start = log.timestamp - Duration::minutes(threshold.time_window_minutes);
            let count = count_in(&timestamps, window_start);
            if count >= threshold.count as usize {
                let alert = self.trigger(log, threshold.clone(), count).await;
                fired.push(alert);
            }
        }
        fired
    }

    async fn trigger(&self, log: &AuditLog, threshold: AlertThreshold, count: usize) -> SecurityAlert {
        let alert = SecurityAlert {
            id: self.clock.next_id(),
            triggered_at: self.clock.now(),
            event_count: count,
            time_window_minutes: threshold.time_window_minutes,
            affected_user: log.user_id.clone(),
            description: format!(
                "{} events of type {} within {} minutes for user {}",
                count,
                threshold.event_type.as_str(),
                threshold.time_window_minutes,
                log.user_id.as_deref().unwrap_or("unknown"),
            ),
            severity: Severity::for_event_count(count),
            threshold,
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
        };

        tracing::warn!(
            alert_id = %alert.id,
            event_type = alert.threshold.event_type.as_str(),
            count = alert.event_count,
            "Alert threshold crossed"
        );

        self.alerts.write().await.push(alert.clone());
        self.notifiers.dispatch(&alert).await;
        alert
    }

    /// Alerts newest-first, optionally filtered by acknowledgment state.
    pub async fn list(&self, acknowledged: Option<bool>) -> Vec<SecurityAlert> {
        let mut alerts: Vec<SecurityAlert> = self
            .alerts
            .read()
            .await
            .iter()
            .filter(|a| acknowledged.is_none_or(|want| a.acknowledged == want))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at));
        alerts
    }

    /// Mark an alert acknowledged. Unknown ids return `false`; a repeat
    /// acknowledge simply overwrites who/when.
    pub async fn acknowledge(&self, id: Uuid, by: &str) -> bool {
        let mut alerts = self.alerts.write().await;
        match alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                alert.acknowledged_by = Some(by.to_string());
                alert.acknowledged_at = Some(self.clock.now());
                true
            }
            None => false,
        }
    }

    pub async fn counts(&self) -> (usize, usize) {
        let alerts = self.alerts.read().await;
        let total = alerts.len();
        let unacknowledged = alerts.iter().filter(|a| !a.acknowledged).count();
        (total, unacknowledged)
    }

    pub(crate) fn widest_window(settings: &AuditSettings) -> Duration {
        let max_minutes = settings
            .alert_thresholds
            .iter()
            .map(|t| t.time_window_minutes)
            .max()
            .unwrap_or(0)
            .max(60);
        Duration::minutes(max_minutes)
    }
}
