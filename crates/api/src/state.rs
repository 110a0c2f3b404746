use std::sync::Arc;
use std::time::Instant;

use tomato_core::service::TomatoService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Record service over the configured store.
    pub tomatoes: TomatoService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Process start, reported as uptime by `/health`.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(tomatoes: TomatoService, config: ServerConfig) -> Self {
        Self {
            tomatoes,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
