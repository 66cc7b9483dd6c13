//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{ApiConfig, ScanConfig};
use crate::storage::{EventStore, StoreHandle};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Current event store
    pub store: StoreHandle,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Roots and policy used for rescans
    pub scan: Arc<ScanConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState around an already-built store
    pub fn new(store: EventStore, scan: ScanConfig, config: ApiConfig) -> Self {
        Self {
            store: StoreHandle::new(store),
            config: Arc::new(config),
            scan: Arc::new(scan),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
