//! Application state for the gateway.

use muster_coordinator::Dispatcher;
use std::sync::Arc;
use std::time::Instant;

/// Shared state behind every route.
pub struct AppState {
    /// The dispatcher that handles all chat events
    pub dispatcher: Arc<Dispatcher>,

    /// Server start time (for health checks)
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
