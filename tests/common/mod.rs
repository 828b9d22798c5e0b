#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use auditguard::clock::ManualClock;
use auditguard::config::Config;
use auditguard::models::{AuditEventType, AuditSettings, LogEvent};
use auditguard::notify::NotifierRegistry;
use auditguard::redact::MarkerGuard;
use auditguard::service::AuditService;
use auditguard::store::MemoryStore;

/// Fixed, readable start instant for the manual clock.
pub fn start_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Service wired with a manual clock, in-memory store, trace notifiers,
/// and marker redaction.
pub fn test_service(settings: AuditSettings) -> (Arc<AuditService>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = Arc::new(AuditService::new(
        settings,
        Arc::new(MemoryStore::new()),
        clock.clone(),
        NotifierRegistry::new(),
        Arc::new(MarkerGuard),
    ));
    (service, clock)
}

/// Minimal successful event of the given type.
pub fn event(event_type: AuditEventType) -> LogEvent {
    LogEvent {
        event_type,
        user_id: Some("user-1".to_string()),
        session_id: Some("session-1".to_string()),
        action: "test action".to_string(),
        resource: "test resource".to_string(),
        old_value: None,
        new_value: None,
        success: true,
        error_message: None,
        metadata: None,
    }
}

pub fn failed_event(event_type: AuditEventType) -> LogEvent {
    LogEvent {
        success: false,
        error_message: Some("boom".to_string()),
        ..event(event_type)
    }
}

/// A running test server instance backed by an in-memory service.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub service: Arc<AuditService>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST an event, return the response body + status.
    pub async fn log_event(&self, body: Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/logs"))
            .json(&body)
            .send()
            .await
            .expect("log request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(AuditSettings::default()).await
}

pub async fn spawn_app_with(settings: AuditSettings) -> TestApp {
    spawn_app_with_config(settings, Config::default()).await
}

pub async fn spawn_app_with_config(settings: AuditSettings, config: Config) -> TestApp {
    let (service, clock) = test_service(settings);
    let app = auditguard::build_app(service.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("test server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        service,
        clock,
    }
}
