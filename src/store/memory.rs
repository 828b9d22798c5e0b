use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AuditStore;
use crate::models::AuditLog;

/// Default in-memory backend. A reader-writer lock keeps concurrent
/// appends from losing records and gives scans a consistent snapshot.
pub struct MemoryStore {
    logs: RwLock<Vec<AuditLog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            logs: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn append(&self, log: AuditLog) -> Uuid {
        let id = log.id;
        self.logs.write().await.push(log);
        id
    }

    async fn get(&self, id: Uuid) -> Option<AuditLog> {
        self.logs.read().await.iter().find(|l| l.id == id).cloned()
    }

    async fn scan(&self) -> Vec<AuditLog> {
        self.logs.read().await.clone()
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut logs = self.logs.write().await;
        let before = logs.len();
        logs.retain(|l| l.timestamp >= cutoff);
        before - logs.len()
    }
}
