use chrono::{Datelike, Utc};

pub const DEFAULT_API_BASE: &str = "https://f1api.dev/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Current calendar year, computed once at startup.
    pub season_year: i32,
}

impl Config {
    pub fn init() -> Self {
        Config {
            api_base_url: std::env::var("F1_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            season_year: Utc::now().year(),
        }
    }
}
