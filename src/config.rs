use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote signal store, without a trailing slash.
    pub api_base_url: String,

    // Export
    pub export_dir: String,

    // HTTP
    pub http_timeout_secs: u64,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            api_base_url: env("SIGNAL_API_URL", "http://localhost:8001")
                .trim_end_matches('/')
                .to_string(),
            export_dir: env("EXPORT_DIR", "exports"),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            log_level: env("LOG_LEVEL", "info"),
        }
    }
}
