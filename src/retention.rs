use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::service::AuditService;

/// Spawn the retention sweeper: a long-lived task that deletes expired
/// records once per period. Signal the watch channel to stop it; an
/// in-flight sweep runs to completion before the task exits.
pub fn spawn(
    service: Arc<AuditService>,
    period: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run(service, period, shutdown))
}

async fn run(service: Arc<AuditService>, period: Duration, mut shutdown: watch::Receiver<bool>) {
    tracing::info!("Retention sweeper started (period {}s)", period.as_secs());

    loop {
        if *shutdown.borrow() {
            break;
        }

        service.sweep_expired().await;

        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::info!("Retention sweeper stopped");
}
