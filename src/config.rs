//! Application configuration loaded from environment variables.
//!
//! Read once at startup. A `.env` file is honoured for local development.

use std::env;

/// Which [`Store`](crate::db::Store) implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// GCP project ID
    pub gcp_project_id: String,
    /// Storage backend
    pub store_backend: StoreBackend,
    /// Telegram user IDs that start as Admin on first `/start`
    pub admin_ids: Vec<i64>,
    /// Cap on alerts a single user may create
    pub max_alerts_per_user: usize,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Telegram Bot API token
    pub telegram_bot_token: String,
    /// Value Telegram sends in `X-Telegram-Bot-Api-Secret-Token`
    pub telegram_webhook_secret: String,
    /// OpenWeather API key
    pub openweather_api_key: String,
    /// Shared token the scheduler presents on `/tasks/tick`
    pub scheduler_token: String,
}

/// Default cap on alerts per user.
pub const DEFAULT_MAX_ALERTS_PER_USER: usize = 10;

/// Header carrying the scheduler token.
pub const SCHEDULER_TOKEN_HEADER: &str = "x-scheduler-token";

/// Header carrying the Telegram webhook secret.
pub const TELEGRAM_SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            store_backend: StoreBackend::Memory,
            admin_ids: vec![1],
            max_alerts_per_user: DEFAULT_MAX_ALERTS_PER_USER,
            port: 8080,
            telegram_bot_token: "test_bot_token".to_string(),
            telegram_webhook_secret: "test_webhook_secret".to_string(),
            openweather_api_key: "test_weather_key".to_string(),
            scheduler_token: "test_scheduler_token".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("firestore") | Err(_) => StoreBackend::Firestore,
            Ok(_) => return Err(ConfigError::Invalid("STORE_BACKEND")),
        };

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            store_backend,
            admin_ids: parse_admin_ids(&env::var("ADMIN_IDS").unwrap_or_default())
                .ok_or(ConfigError::Invalid("ADMIN_IDS"))?,
            max_alerts_per_user: env::var("MAX_ALERTS_PER_USER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ALERTS_PER_USER),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            telegram_webhook_secret: required("TELEGRAM_WEBHOOK_SECRET")?,
            openweather_api_key: required("OPENWEATHER_API_KEY")?,
            scheduler_token: required("SCHEDULER_TOKEN")?,
        })
    }

    /// Whether `user_id` is a bootstrap admin.
    pub fn is_bootstrap_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Parse a comma-separated id list. Blank input yields an empty list.
fn parse_admin_ids(raw: &str) -> Option<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("TELEGRAM_BOT_TOKEN", "bot");
        env::set_var("TELEGRAM_WEBHOOK_SECRET", "secret");
        env::set_var("OPENWEATHER_API_KEY", "weather");
        env::set_var("SCHEDULER_TOKEN", "tick");
        env::set_var("ADMIN_IDS", "10, 20");
        env::set_var("STORE_BACKEND", "memory");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.telegram_bot_token, "bot");
        assert_eq!(config.admin_ids, vec![10, 20]);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.port, 8080);
        assert!(config.is_bootstrap_admin(20));
        assert!(!config.is_bootstrap_admin(30));
    }

    #[test]
    fn test_parse_admin_ids() {
        assert_eq!(parse_admin_ids(""), Some(vec![]));
        assert_eq!(parse_admin_ids("1,2,,3"), Some(vec![1, 2, 3]));
        assert_eq!(parse_admin_ids("1,abc"), None);
    }
}
