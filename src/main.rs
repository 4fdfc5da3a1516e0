//! Homework Bot - Main Entry Point
//!
//! Polls the homework review API and relays status changes
//! to a Telegram chat.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use homework_bot::config::{Credentials, PollerSettings};
use homework_bot::poller::{HomeworkPoller, PollerMessage};
use homework_bot::practicum::PracticumClient;
use homework_bot::telegram::TelegramNotifier;

/// Telegram bot relaying homework review status changes.
#[derive(Parser, Debug)]
#[command(name = "homework_bot")]
#[command(about = "Relay homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Credentials first: nothing touches the network without them
    let credentials = Credentials::from_env()
        .context("Failed to load credentials from environment")?;

    let settings = PollerSettings::from_env_with_defaults();

    info!(
        "Polling {} every {}s for chat {}",
        settings.endpoint, settings.retry_period_secs, credentials.telegram_chat_id
    );

    let source = PracticumClient::from_config(&credentials, &settings);
    let notifier = TelegramNotifier::from_config(&credentials, &settings);
    let mut poller = HomeworkPoller::new(source, notifier, settings.retry_period());

    let (poller_tx, poller_rx) = mpsc::channel::<PollerMessage>(1);

    let poller_handle = tokio::spawn(async move {
        poller.run(poller_rx).await;
    });

    info!("Bot is running. Use Ctrl+C to stop.");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    info!("Received Ctrl+C, shutting down...");

    let _ = poller_tx.send(PollerMessage::Shutdown).await;
    poller_handle.await.context("Poller task failed")?;

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
