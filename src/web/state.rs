//! Application State
//!
//! Shared state accessible by all page handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::backend::BackendClient;
use crate::config::Config;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the external analytics backend
    pub backend: Arc<BackendClient>,
    /// Full configuration, validated at startup
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(backend: Arc<BackendClient>, config: Config) -> Self {
        Self {
            backend,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
