use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub acknowledged: Option<bool>,
}

#[derive(Deserialize)]
pub struct AcknowledgeBody {
    pub by: String,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Json<serde_json::Value> {
    let alerts = state.service.get_security_alerts(params.acknowledged).await;
    let count = alerts.len();
    Json(json!({ "alerts": alerts, "count": count }))
}

/// Unknown ids are not an error: the response just carries `false`.
pub async fn acknowledge(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AcknowledgeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.by.trim().is_empty() {
        return Err(AppError::BadRequest("by must not be empty".to_string()));
    }
    let acknowledged = state.service.acknowledge_alert(id, &body.by).await;
    Ok(Json(json!({ "acknowledged": acknowledged })))
}
