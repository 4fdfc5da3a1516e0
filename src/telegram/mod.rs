//! Telegram notification module.
//!
//! Delivers status messages to a single chat through the Bot API.

mod client;

pub use client::{Notifier, TelegramError, TelegramNotifier};
