mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::AuditLog;

/// Storage interface for audit records. Append-mostly: records are never
/// mutated after append, and only `delete_older_than` removes them. The
/// default backend is in memory; a durable store can be substituted
/// without touching the alert/query/export logic.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, log: AuditLog) -> Uuid;

    async fn get(&self, id: Uuid) -> Option<AuditLog>;

    /// Consistent snapshot of every stored record. A record is either
    /// fully visible or not visible at all.
    async fn scan(&self) -> Vec<AuditLog>;

    /// Remove records with `timestamp < cutoff`, returning how many.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> usize;
}
