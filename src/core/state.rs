// Application state (AppState)

use crate::core::config::Config;
use crate::render::DashboardSnapshot;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state
///
/// The refresh task is the only writer of `snapshot`; request handlers read it.
#[derive(Clone)]
pub struct AppState {
    /// Output of the most recent tick
    pub snapshot: Arc<RwLock<DashboardSnapshot>>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::default())),
            config: Arc::new(config),
        }
    }

    /// Replace the published snapshot with the result of a new tick
    pub async fn publish(&self, snapshot: DashboardSnapshot) {
        *self.snapshot.write().await = snapshot;
    }
}
