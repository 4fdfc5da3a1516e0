//! Homework Bot Library
//!
//! A Telegram bot relaying homework review status changes.
//!
//! This crate provides the core functionality for:
//! - Loading credentials and poller settings from the environment
//! - Polling the homework review API and validating its answers
//! - Detecting status changes of the most recent submission
//! - Announcing changes in a Telegram chat

pub mod config;
pub mod poller;
pub mod practicum;
pub mod telegram;

#[cfg(test)]
mod test_support;
