//! Homework polling module.
//!
//! Drives the fetch → validate → diff → notify cycle on a fixed pause.

mod runner;
mod state;

pub use runner::{FAILURE_PREFIX, HomeworkPoller, PollerMessage};
pub use state::PollerState;
