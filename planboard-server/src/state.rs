//! Application state

use planboard_core::{PlaceholderRegistry, PlanRegistry};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Backing registry for partners, data partners and plans
    pub registry: Arc<dyn PlanRegistry>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(registry: Arc<dyn PlanRegistry>) -> Self {
        Self {
            registry,
            start_time: Instant::now(),
        }
    }

    /// State backed by the placeholder registry
    pub fn placeholder() -> Self {
        Self::new(Arc::new(PlaceholderRegistry::new()))
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
