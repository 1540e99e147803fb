use std::sync::Arc;

use hostwatch_core::plugins::PluginRegistry;
use hostwatch_events::{Dispatcher, EventBus};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hostwatch_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Bus carrying freshly reported events to background services.
    pub event_bus: Arc<EventBus>,
    /// Compiled-in dashboard plugins.
    pub plugins: Arc<PluginRegistry>,
    /// Sends queued notifications on demand.
    pub dispatcher: Dispatcher,
}
