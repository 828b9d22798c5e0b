pub mod alerts;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod query;
pub mod redact;
pub mod retention;
pub mod routes;
pub mod sanitize;
pub mod service;
pub mod state;
pub mod stats;
pub mod store;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::models::{AlertAction, AuditSettings};
use crate::notify::email::EmailNotifier;
use crate::notify::webhook::WebhookNotifier;
use crate::notify::NotifierRegistry;
use crate::redact::{AesGcmGuard, MarkerGuard, ValueGuard};
use crate::service::AuditService;
use crate::state::{AppState, SharedState};

/// Wire an `AuditService` from configuration: notifier channels for
/// whatever backends are configured, and the AES guard when an encryption
/// key is present (marker redaction otherwise).
pub fn build_service(config: &Config) -> Arc<AuditService> {
    let mut notifiers = NotifierRegistry::new();

    if let Some(smtp) = config.smtp.as_ref() {
        match EmailNotifier::new(smtp, &smtp.alert_to) {
            Ok(notifier) => {
                tracing::info!("Email alert channel configured");
                notifiers.register(AlertAction::Email, Arc::new(notifier));
            }
            Err(e) => {
                tracing::warn!("Email alert channel not available: {e}");
            }
        }
    }

    if let Some(url) = config.alert_webhook_url.as_ref() {
        tracing::info!("Webhook alert channel configured");
        notifiers.register(AlertAction::Webhook, Arc::new(WebhookNotifier::new(url)));
    }

    let guard: Arc<dyn ValueGuard> = match config.encryption_key.as_ref() {
        Some(key) => Arc::new(AesGcmGuard::new(key)),
        None => Arc::new(MarkerGuard),
    };

    Arc::new(AuditService::new(
        AuditSettings::default(),
        Arc::new(store::MemoryStore::new()),
        Arc::new(clock::SystemClock),
        notifiers,
        guard,
    ))
}

pub fn build_app(service: Arc<AuditService>, config: Config) -> Router {
    let state: SharedState = Arc::new(AppState { service, config });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
