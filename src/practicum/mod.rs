//! Homework review API module.
//!
//! Fetches raw status responses, checks their shape and turns the
//! most recent homework into a [`Verdict`].

mod client;
mod error;
mod response;
mod verdict;

pub use client::{PracticumClient, StatusSource};
pub use error::HomeworkError;
pub use response::{ApiResponse, HomeworkRecord, validate_response};
pub use verdict::{HomeworkStatus, Verdict, extract_verdict};
