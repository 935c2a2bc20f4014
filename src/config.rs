use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL_DEVELOPMENT: &str = "http://localhost:5000";
pub const DEFAULT_BACKEND_URL_PRODUCTION: &str = "https://hrbackend-6tqe.onrender.com";
pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;
pub const DEFAULT_SESSION_STORAGE_KEY: &str = "dummyUser";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub toast_duration_ms: u32,
    pub session_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_URL_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_URL_PRODUCTION.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            session_storage_key: DEFAULT_SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.toast_duration_ms),
            session_storage_key: option_env!("SESSION_STORAGE_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.session_storage_key),
        }
    }

    /// Backend base URL for the active environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "development" => &self.backend_url_development,
            _ => &self.backend_url_production,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    pub fn log_level(&self) -> log::Level {
        // wasm-logger has no "off" level; the entry point skips init instead
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Error
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
