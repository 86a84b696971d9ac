use std::sync::Arc;

use anyhow::Result;
use libcal_hours_core::config::HoursConfig;
use libcal_hours_core::{Catalog, HoursRenderer};
use libcal_hours_provider::LibCalClient;

/// Shared application state
pub struct AppState<S> {
    renderer: Arc<HoursRenderer<S, Catalog>>,
}

// Manual impl so `S` itself need not be `Clone`
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(renderer: HoursRenderer<S, Catalog>) -> Self {
        AppState {
            renderer: Arc::new(renderer),
        }
    }

    pub fn renderer(&self) -> &HoursRenderer<S, Catalog> {
        &self.renderer
    }
}

impl AppState<LibCalClient> {
    /// Build the live state from the config file and environment.
    pub fn from_config() -> Result<Self> {
        let config = HoursConfig::load()?;
        let client = LibCalClient::from_config(&config)?;

        let renderer = HoursRenderer::new(client, config.catalog(), config.timezone()?)
            .ignore_cache(config.ignore_cache)
            .fetch_timeout(config.fetch_timeout());

        Ok(AppState::new(renderer))
    }
}
