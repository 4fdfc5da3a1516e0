//! Poller state management.
//!
//! Everything here lives in memory only and is lost on restart.

use std::collections::HashMap;

use crate::practicum::{HomeworkStatus, Verdict};

/// Gets current Unix timestamp in seconds.
pub(crate) fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// State carried from one poll to the next.
#[derive(Debug, Default)]
pub struct PollerState {
    /// Lower bound (`from_date`) for the next request.
    cursor: i64,

    /// Last status announced for each homework name.
    last_statuses: HashMap<String, HomeworkStatus>,

    /// Text of the last error reported to the chat.
    last_error: Option<String>,
}

impl PollerState {
    /// Creates state starting from the given cursor.
    #[must_use]
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Creates state whose cursor is the current time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(now_unix())
    }

    /// Cursor for the next request.
    #[must_use]
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Moves the cursor to the value returned by the server.
    pub fn advance_cursor(&mut self, current_date: i64) {
        self.cursor = current_date;
    }

    /// Returns true if `verdict` differs from what was last announced.
    #[must_use]
    pub fn is_changed(&self, verdict: &Verdict) -> bool {
        self.last_statuses.get(&verdict.homework_name) != Some(&verdict.status)
    }

    /// Remembers `verdict` as announced.
    pub fn remember(&mut self, verdict: &Verdict) {
        self.last_statuses
            .insert(verdict.homework_name.clone(), verdict.status);
    }

    /// Last announced status for a homework.
    #[must_use]
    pub fn last_status(&self, homework_name: &str) -> Option<HomeworkStatus> {
        self.last_statuses.get(homework_name).copied()
    }

    /// Records an error text, returning true if it differs from the previous one.
    pub fn record_error(&mut self, message: &str) -> bool {
        if self.last_error.as_deref() == Some(message) {
            return false;
        }
        self.last_error = Some(message.to_owned());
        true
    }

    /// Forgets the last reported error after a successful poll.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
