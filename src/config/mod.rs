//! Configuration module for the homework bot.
//!
//! Handles loading of the service credentials and the poller timing
//! from the environment.

mod settings;

pub use settings::{
    ConfigError, Credentials, PRACTICUM_TOKEN_VAR, PollerSettings, TELEGRAM_CHAT_ID_VAR,
    TELEGRAM_TOKEN_VAR,
};
