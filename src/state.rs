use std::sync::Arc;

use crate::config::Config;
use crate::service::AuditService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub service: Arc<AuditService>,
    pub config: Config,
}
