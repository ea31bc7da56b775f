//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server.

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::provider::ProviderRegistry;

/// Shared state for the HTTP server
///
/// Read-only after construction; requests never mutate it.
pub struct AppState {
    aggregator: Aggregator,
    config: Config,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, registry: ProviderRegistry) -> Self {
        Self {
            aggregator: Aggregator::new(registry),
            config,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
