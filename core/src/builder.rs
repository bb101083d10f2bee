//! Builder API for adapter configuration

use crate::{
    adapter::{Config, KvAdapter},
    store::DocumentStore,
};
use std::sync::Arc;

/// Builder for creating adapters with fluent API
pub struct AdapterBuilder {
    store: Arc<dyn DocumentStore>,
    config: Config,
}

impl AdapterBuilder {
    /// Create a new builder writing through to the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// Set the tumbling time window in seconds
    /// Documents expire after two windows
    pub fn time_window_secs(mut self, seconds: u64) -> Self {
        self.config.time_window_secs = Some(seconds);
        self
    }

    /// Disable document expiry
    pub fn no_time_window(mut self) -> Self {
        self.config.time_window_secs = None;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the adapter
    pub fn build(self) -> KvAdapter {
        KvAdapter::with_config(self.store, self.config)
    }
}

impl std::fmt::Debug for AdapterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterBuilder")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}
