//! Errors raised while polling the homework API.

use thiserror::Error;

/// Errors that can occur while fetching or interpreting homework statuses.
#[derive(Debug, Error)]
pub enum HomeworkError {
    /// Network failure or a non-2xx answer from the endpoint.
    #[error("Homework API unavailable: {0}")]
    ApiUnavailable(String),

    /// The response body is not valid JSON.
    #[error("Failed to decode homework API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response is JSON but does not have the documented shape.
    #[error("Unexpected homework API response: {0}")]
    Schema(String),

    /// A homework carries a status outside the known verdict set.
    #[error("Unknown homework status: {0:?}")]
    UnknownStatus(String),
}

impl HomeworkError {
    pub(crate) fn schema(reason: impl Into<String>) -> Self {
        Self::Schema(reason.into())
    }
}
