use axum::extract::State;
use axum::Json;

use crate::models::{AuditSettings, AuditSettingsUpdate};
use crate::state::SharedState;

pub async fn get_settings(State(state): State<SharedState>) -> Json<AuditSettings> {
    Json(state.service.get_settings())
}

pub async fn update_settings(
    State(state): State<SharedState>,
    Json(update): Json<AuditSettingsUpdate>,
) -> Json<AuditSettings> {
    state.service.update_settings(update).await;
    Json(state.service.get_settings())
}
