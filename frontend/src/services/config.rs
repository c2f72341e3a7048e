use log::LevelFilter;
use shared::week::HourRange;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Start-up configuration, handed to the component tree through context
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_storage_key: String,
    pub refresh_token_storage_key: String,
    pub log_level: LevelFilter,
    pub visible_hours: HourRange,
    pub toast_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: "auth_token".to_string(),
            refresh_token_storage_key: "refresh_token".to_string(),
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            visible_hours: HourRange::default(),
            toast_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `API_BASE_URL` at build time
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("API_BASE_URL"))
    }

    fn with_base_url(base_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.api_base_url = url.to_string();
        }
        config
    }
}
