use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{
    AuditLog, AuditStatistics, DateRange, EventTypeCount, SeverityCount, UserActivity,
};

const TOP_USERS: usize = 10;

/// Aggregate a (possibly date-bounded) slice of the log history.
pub fn compute(
    logs: &[AuditLog],
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    alert_count: usize,
    unacknowledged_alerts: usize,
) -> AuditStatistics {
    let in_range: Vec<&AuditLog> = logs
        .iter()
        .filter(|log| date_from.is_none_or(|from| log.timestamp >= from))
        .filter(|log| date_to.is_none_or(|to| log.timestamp <= to))
        .collect();

    let total_logs = in_range.len();
    let success_count = in_range.iter().filter(|l| l.success).count();
    let failure_count = total_logs - success_count;
    let success_rate = if total_logs == 0 {
        0.0
    } else {
        success_count as f64 / total_logs as f64
    };

    let mut by_event: HashMap<_, usize> = HashMap::new();
    let mut by_severity: HashMap<_, usize> = HashMap::new();
    let mut by_user: HashMap<&str, usize> = HashMap::new();
    for log in &in_range {
        *by_event.entry(log.event_type).or_default() += 1;
        *by_severity.entry(log.severity).or_default() += 1;
        if let Some(user_id) = log.user_id.as_deref() {
            *by_user.entry(user_id).or_default() += 1;
        }
    }

    let mut event_type_stats: Vec<EventTypeCount> = by_event
        .into_iter()
        .map(|(event_type, count)| EventTypeCount { event_type, count })
        .collect();
    event_type_stats.sort_by(|a, b| b.count.cmp(&a.count));

    let mut severity_stats: Vec<SeverityCount> = by_severity
        .into_iter()
        .map(|(severity, count)| SeverityCount { severity, count })
        .collect();
    severity_stats.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut top_users: Vec<UserActivity> = by_user
        .into_iter()
        .map(|(user_id, count)| UserActivity {
            user_id: user_id.to_string(),
            count,
        })
        .collect();
    top_users.sort_by(|a, b| b.count.cmp(&a.count).then(a.user_id.cmp(&b.user_id)));
    top_users.truncate(TOP_USERS);

    AuditStatistics {
        total_logs,
        date_range: DateRange {
            from: date_from,
            to: date_to,
        },
        event_type_stats,
        success_rate,
        success_count,
        failure_count,
        severity_stats,
        top_users,
        alert_count,
        unacknowledged_alerts,
    }
}
