use dashmap::DashMap;
use reqwest::Client;
use serde_json::Value;

use crate::models::standings::DetailKind;
use crate::utils::config::Config;

/// Per-invocation state shared by a view: configuration, the HTTP client,
/// and the detail-lookup memo. The memo is unbounded; a season has at most
/// tens of drivers and constructors.
pub struct AppState {
    pub config: Config,
    pub http_client: Client,
    pub detail_cache: DashMap<(DetailKind, String), Value>,
}

impl AppState {
    pub fn init() -> Self {
        AppState {
            config: Config::init(),
            http_client: Client::new(),
            detail_cache: DashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Self {
        let mut state = AppState::init();
        state.config.api_base_url = base_url.to_string();
        state
    }
}
