pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::benford::BenfordAnalyzer;
use services::session::SessionStore;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub store: SessionStore,
    pub analyzer: BenfordAnalyzer,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            store: SessionStore::new(),
            analyzer: BenfordAnalyzer::new(),
        }
    }
}
