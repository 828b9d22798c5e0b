pub mod alerts;
pub mod logs;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Logs
        .route("/api/v1/logs", post(logs::create).get(logs::list))
        .route("/api/v1/logs/export", get(logs::export))
        .route("/api/v1/logs/statistics", get(logs::statistics))
        // Alerts
        .route("/api/v1/alerts", get(alerts::list))
        .route("/api/v1/alerts/{id}/acknowledge", post(alerts::acknowledge))
        // Settings
        .route(
            "/api/v1/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
}
