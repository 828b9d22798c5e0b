use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use ipnet::IpNet;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::{
    AuditEventType, AuditExportOptions, AuditQuery, ExportFormat, LogEvent, Severity,
};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    /// Comma-separated event type names.
    pub event_types: Option<String>,
    pub user_id: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub success: Option<bool>,
    pub severity: Option<String>,
    pub resource: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl ListParams {
    fn into_query(self) -> Result<AuditQuery, AppError> {
        let event_types = match self.event_types {
            Some(csv) => {
                let mut types = Vec::new();
                for name in csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    types.push(parse_event_type(name)?);
                }
                Some(types)
            }
            None => None,
        };

        let severity = self.severity.as_deref().map(parse_severity).transpose()?;

        Ok(AuditQuery {
            event_types,
            user_id: self.user_id,
            date_from: self.date_from,
            date_to: self.date_to,
            success: self.success,
            severity,
            resource: self.resource,
            offset: self.offset,
            limit: self.limit,
        })
    }
}

#[derive(Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
    pub filename: Option<String>,
    pub include_metadata: Option<bool>,
}

#[derive(Deserialize)]
pub struct StatsParams {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

pub async fn create(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(event): Json<LogEvent>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ip = client_ip(&headers, Some(peer.ip()), &state.config.trusted_proxies);
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match state.service.log_event(event, &ip, user_agent).await {
        Some(log) => Ok(Json(json!(log))),
        None => Ok(Json(json!({ "dropped": true }))),
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = params.into_query()?;
    let logs = state.service.query_logs(&query).await;
    let count = logs.len();
    Ok(Json(json!({ "logs": logs, "count": count })))
}

pub async fn export(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
    Query(export): Query<ExportParams>,
) -> Result<impl IntoResponse, AppError> {
    let format_name = export.format.unwrap_or_else(|| "json".to_string());
    let options = AuditExportOptions {
        format: format_name.clone(),
        query: params.into_query()?,
        filename: export.filename,
        include_metadata: export.include_metadata.unwrap_or(false),
    };

    let payload = state.service.export_logs(&options).await?;

    // The service already rejected unknown formats.
    let format = ExportFormat::parse(&format_name)
        .map_err(|f| AppError::Internal(format!("format {f} passed validation but failed parse")))?;
    let filename = options
        .filename
        .unwrap_or_else(|| format!("audit-logs.{}", format.as_str()));

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        payload,
    )
        .into_response())
}

pub async fn statistics(
    State(state): State<SharedState>,
    Query(params): Query<StatsParams>,
) -> Json<serde_json::Value> {
    let stats = state
        .service
        .get_statistics(params.date_from, params.date_to)
        .await;
    Json(json!(stats))
}

fn parse_event_type(name: &str) -> Result<AuditEventType, AppError> {
    serde_json::from_value(json!(name))
        .map_err(|_| AppError::BadRequest(format!("Unknown event type: {name}")))
}

fn parse_severity(name: &str) -> Result<Severity, AppError> {
    serde_json::from_value(json!(name))
        .map_err(|_| AppError::BadRequest(format!("Unknown severity: {name}")))
}

/// Resolve the client address, honoring X-Forwarded-For only when the
/// direct peer is a trusted proxy.
fn client_ip(headers: &HeaderMap, peer_addr: Option<IpAddr>, trusted_proxies: &[IpNet]) -> String {
    let peer = peer_addr.unwrap_or(IpAddr::from([127, 0, 0, 1]));

    if !trusted_proxies.is_empty() && trusted_proxies.iter().any(|net| net.contains(&peer)) {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            // Take the first (leftmost) IP that isn't a trusted proxy
            for ip_str in xff.split(',').map(|s| s.trim()) {
                if let Ok(ip) = ip_str.parse::<IpAddr>() {
                    if !trusted_proxies.iter().any(|net| net.contains(&ip)) {
                        return ip.to_string();
                    }
                }
            }
        }
    }

    peer.to_string()
}
