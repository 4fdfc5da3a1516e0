//! Homework status poller.
//!
//! Each tick runs one pass of:
//! 1. Fetch statuses updated since the cursor
//! 2. Validate the response shape
//! 3. Take the most recent homework (if any) and extract its verdict
//! 4. If the verdict differs from the last announced one → notify the chat
//! 5. Advance the cursor to the server-provided `current_date`
//!
//! Any error aborts the pass; it is logged, reported to the chat once and
//! the next pass runs after the usual pause.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::PollerState;
use crate::practicum::{HomeworkError, StatusSource, Verdict, extract_verdict, validate_response};
use crate::telegram::Notifier;

/// Prefix of the chat message sent when a poll fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Messages that can be sent to the poller.
#[derive(Debug, Clone)]
pub enum PollerMessage {
    /// Stop the poller once the current pass is done.
    Shutdown,
}

/// Polls the homework API and relays status changes.
pub struct HomeworkPoller<S, N> {
    /// Homework status source.
    source: S,

    /// Chat notifier.
    notifier: N,

    /// Cursor and announced statuses.
    state: PollerState,

    /// Pause between two passes.
    retry_period: Duration,
}

impl<S: StatusSource, N: Notifier> HomeworkPoller<S, N> {
    /// Creates a poller whose cursor starts at the current time.
    #[must_use]
    pub fn new(source: S, notifier: N, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            state: PollerState::starting_now(),
            retry_period,
        }
    }

    /// Replaces the initial state.
    #[must_use]
    pub fn with_state(mut self, state: PollerState) -> Self {
        self.state = state;
        self
    }

    /// Runs the polling loop until a shutdown message arrives.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<PollerMessage>) {
        info!(
            "Homework poller started, polling every {}s",
            self.retry_period.as_secs()
        );

        loop {
            self.tick().await;

            tokio::select! {
                () = tokio::time::sleep(self.retry_period) => {}
                msg = rx.recv() => {
                    match msg {
                        Some(PollerMessage::Shutdown) | None => {
                            info!("Poller shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Single pass; never fails.
    pub async fn tick(&mut self) {
        match self.poll_once().await {
            Ok(_) => self.state.clear_error(),
            Err(e) => {
                error!("Homework poll failed: {}", e);

                let message = format!("{FAILURE_PREFIX}: {e}");
                if self.state.record_error(&message) {
                    self.notify(&message).await;
                } else {
                    debug!("Same failure already reported, not notifying again");
                }
            }
        }
    }

    /// Runs one pass and returns the verdict announced by it, if any.
    ///
    /// # Errors
    ///
    /// Returns the first [`HomeworkError`] hit while fetching, validating
    /// or interpreting the response. The cursor is left untouched then.
    pub async fn poll_once(&mut self) -> Result<Option<Verdict>, HomeworkError> {
        let cursor = self.state.cursor();
        let raw = self.source.fetch_status(cursor).await?;
        let response = validate_response(&raw)?;

        let announced = match response.latest() {
            Some(record) => {
                let verdict = extract_verdict(record)?;

                if self.state.is_changed(&verdict) {
                    info!(
                        "Homework \"{}\" is now {}",
                        verdict.homework_name, verdict.status
                    );
                    self.notify(&verdict.message()).await;
                    self.state.remember(&verdict);
                    Some(verdict)
                } else {
                    debug!(
                        "Homework \"{}\" still {}, nothing to send",
                        verdict.homework_name, verdict.status
                    );
                    None
                }
            }
            None => {
                debug!("No homework updates since {}", cursor);
                None
            }
        };

        self.state.advance_cursor(response.current_date);
        Ok(announced)
    }

    /// Sends a chat message; failures are logged and swallowed.
    async fn notify(&self, message: &str) {
        if let Err(e) = self.notifier.send_message(message).await {
            warn!("Failed to deliver chat message: {}", e);
        }
    }

    /// Gets a reference to the poller state.
    #[must_use]
    pub const fn state(&self) -> &PollerState {
        &self.state
    }

    /// Gets a reference to the status source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Gets a reference to the notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<S, N> std::fmt::Debug for HomeworkPoller<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeworkPoller")
            .field("state", &self.state)
            .field("retry_period", &self.retry_period)
            .finish_non_exhaustive()
    }
}
