//! Credentials and poller settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the homework API OAuth token.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the target chat identifier.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Tokens required to talk to both services.
///
/// Loaded once at startup and never changed afterwards.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth token for the homework status API.
    pub practicum_token: String,

    /// Telegram bot token.
    pub telegram_token: String,

    /// Chat that receives status notifications.
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    #[must_use]
    pub const fn new(
        practicum_token: String,
        telegram_token: String,
        telegram_chat_id: String,
    ) -> Self {
        Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        }
    }

    /// Creates credentials from environment variables.
    ///
    /// Expects `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` to be set.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable that is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates credentials using an arbitrary key lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnvVar(key))
        };

        Ok(Self {
            practicum_token: require(PRACTICUM_TOKEN_VAR)?,
            telegram_token: require(TELEGRAM_TOKEN_VAR)?,
            telegram_chat_id: require(TELEGRAM_CHAT_ID_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Poller settings with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerSettings {
    /// Pause between two polls in seconds.
    #[serde(default = "default_retry_period")]
    pub retry_period_secs: u64,

    /// Homework status endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL of the Telegram Bot API.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
}

fn default_retry_period() -> u64 {
    600 // 10 minutes between polls
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_owned()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_owned()
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            retry_period_secs: default_retry_period(),
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
        }
    }
}

impl PollerSettings {
    /// Creates poller settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup_with_defaults(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env_with_defaults`] but reads from `lookup`.
    #[must_use]
    pub fn from_lookup_with_defaults<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            retry_period_secs: lookup("RETRY_PERIOD")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or_else(default_retry_period),
            endpoint: lookup("PRACTICUM_ENDPOINT").unwrap_or_else(default_endpoint),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(default_telegram_api_url),
        }
    }

    /// Pause between two polls.
    #[must_use]
    pub const fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}
