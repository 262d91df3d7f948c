pub mod api;
pub mod cli;
pub mod config;
pub mod db;

use config::Config;

use crate::db::{DocumentStore, StoreError, StoreHandle};

pub struct AppState {
    pub config: Config,
    pub store: Option<StoreHandle>,
}

impl AppState {
    pub fn new(config: Config, store: Option<StoreHandle>) -> Self {
        Self { config, store }
    }

    /// The attached store, or `NotConfigured` when the server runs without one
    pub fn store(&self) -> Result<&dyn DocumentStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::NotConfigured)
    }
}
