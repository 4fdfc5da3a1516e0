//! Telegram Bot API client used for notifications.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Credentials, PollerSettings};

/// Errors that can occur while delivering a chat message.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Telegram returned HTTP {status}: {description}")]
    Http { status: u16, description: String },

    #[error("Telegram rejected the message: {0}")]
    Rejected(String),
}

/// Anything able to deliver a text message to the configured chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` to the chat.
    async fn send_message(&self, text: &str) -> Result<(), TelegramError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Bot API client bound to a single chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    send_message_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier posting to `chat_id` through `api_url`.
    #[must_use]
    pub fn new(api_url: &str, token: &str, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            send_message_url: format!("{}/bot{token}/sendMessage", api_url.trim_end_matches('/')),
            chat_id: chat_id.into(),
        }
    }

    /// Creates a notifier from loaded configuration.
    #[must_use]
    pub fn from_config(credentials: &Credentials, settings: &PollerSettings) -> Self {
        Self::new(
            &settings.telegram_api_url,
            &credentials.telegram_token,
            credentials.telegram_chat_id.clone(),
        )
    }

    /// Chat receiving the notifications.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        debug!("Sending message to chat {}: \"{}\"", self.chat_id, truncate_for_log(text, 40));

        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&self.send_message_url)
            .json(&payload)
            .send()
            .await
            // reqwest errors embed the URL, which carries the bot token
            .map_err(|e| TelegramError::Connection(e.without_url().to_string()))?;

        let status = response.status();
        let reply: Option<ApiReply> = response.json().await.ok();

        if !status.is_success() {
            return Err(TelegramError::Http {
                status: status.as_u16(),
                description: reply
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| "no description".to_owned()),
            });
        }

        match reply {
            Some(ApiReply { ok: true, .. }) => {
                info!("Message delivered to chat {}", self.chat_id);
                Ok(())
            }
            Some(ApiReply { description, .. }) => Err(TelegramError::Rejected(
                description.unwrap_or_else(|| "ok=false".to_owned()),
            )),
            None => Err(TelegramError::Rejected("unreadable reply".to_owned())),
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

/// Truncates a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[test]
    fn test_send_message_url() {
        let notifier = TelegramNotifier::new("https://api.telegram.org/", "123:abc", "42");
        assert_eq!(
            notifier.send_message_url,
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        assert_eq!(notifier.chat_id(), "42");
    }

    #[test]
    fn test_debug_hides_token() {
        let notifier = TelegramNotifier::new("https://api.telegram.org", "123:abc", "42");
        assert!(!format!("{notifier:?}").contains("123:abc"));
    }

    #[test]
    fn test_payload_shape() {
        let payload = SendMessageRequest {
            chat_id: "42",
            text: "hello",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"chat_id": "42", "text": "hello"})
        );
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("Hello", 10), "Hello");
        assert_eq!(truncate_for_log("Привет, мир!", 6), "Привет...");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_connection_error() {
        let notifier = TelegramNotifier::new("http://127.0.0.1:9", "123:abc", "42");
        let result = notifier.send_message("hi").await;
        match result {
            Err(TelegramError::Connection(message)) => assert!(!message.contains("123:abc")),
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delivered_message_request() {
        let (base_url, server) = serve_once("200 OK", r#"{"ok":true,"result":{}}"#).await;
        let notifier = TelegramNotifier::new(&base_url, "123:abc", "42");

        notifier.send_message("hello").await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /bot123:abc/sendMessage "), "{request}");
        assert!(request.contains(r#""chat_id":"42""#), "{request}");
        assert!(request.contains(r#""text":"hello""#), "{request}");
    }

    #[tokio::test]
    async fn test_ok_false_is_rejected() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"ok":false,"description":"chat not found"}"#).await;
        let notifier = TelegramNotifier::new(&base_url, "123:abc", "42");

        let result = notifier.send_message("hello").await;
        server.await.unwrap();

        match result {
            Err(TelegramError::Rejected(description)) => assert_eq!(description, "chat not found"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let (base_url, server) = serve_once(
            "400 Bad Request",
            r#"{"ok":false,"description":"Bad Request: message text is empty"}"#,
        )
        .await;
        let notifier = TelegramNotifier::new(&base_url, "123:abc", "42");

        let result = notifier.send_message("").await;
        server.await.unwrap();

        match result {
            Err(TelegramError::Http { status, description }) => {
                assert_eq!(status, 400);
                assert!(description.contains("message text is empty"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }
}
