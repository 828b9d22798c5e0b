use crate::models::{AuditLog, AuditQuery};

const DEFAULT_LIMIT: usize = 100;

/// Filter, sort, and paginate a store snapshot. All supplied filters are
/// conjunctive; results are ordered newest-first (a hard contract, not
/// incidental); offset/limit use standard slice semantics, so an offset
/// past the end yields an empty result rather than an error.
pub fn run(logs: Vec<AuditLog>, query: &AuditQuery) -> Vec<AuditLog> {
    let mut matched: Vec<AuditLog> = logs
        .into_iter()
        .filter(|log| matches(log, query))
        .collect();

    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    matched.into_iter().skip(offset).take(limit).collect()
}

fn matches(log: &AuditLog, query: &AuditQuery) -> bool {
    if let Some(ref types) = query.event_types {
        if !types.contains(&log.event_type) {
            return false;
        }
    }
    if let Some(ref user_id) = query.user_id {
        if log.user_id.as_deref() != Some(user_id.as_str()) {
            return false;
        }
    }
    if let Some(from) = query.date_from {
        if log.timestamp < from {
            return false;
        }
    }
    if let Some(to) = query.date_to {
        if log.timestamp > to {
            return false;
        }
    }
    if let Some(success) = query.success {
        if log.success != success {
            return false;
        }
    }
    if let Some(severity) = query.severity {
        if log.severity != severity {
            return false;
        }
    }
    if let Some(ref resource) = query.resource {
        if !log
            .resource
            .to_lowercase()
            .contains(&resource.to_lowercase())
        {
            return false;
        }
    }
    true
}
