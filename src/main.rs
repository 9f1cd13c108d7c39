//! Checker Bot - Main Entry Point
//!
//! A Telegram bot that checks TikTok username availability: single checks
//! from plain messages, bulk checks from uploaded `.txt` files.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tiktok_checker_bot::checker::TikTokChecker;
use tiktok_checker_bot::config::{BotConfig, CheckerSettings};
use tiktok_checker_bot::telegram::{self, Command};

/// Telegram bot for TikTok username availability checks.
#[derive(Parser, Debug)]
#[command(name = "checker_bot")]
#[command(about = "Check TikTok username availability via Telegram")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Load configurations
    let bot_config =
        BotConfig::from_env().context("Failed to load bot configuration from environment")?;

    let settings = CheckerSettings::from_env_with_defaults();

    info!(
        "Checker settings: concurrency={}, timeout={}s, retries={}, bulk_delay={}ms, max_bulk={}",
        settings.concurrent_limit,
        settings.request_timeout_secs,
        settings.max_retries,
        settings.bulk_delay_ms,
        settings.max_bulk_count
    );

    // Build the TikTok checker
    let checker = Arc::new(
        TikTokChecker::new(settings.clone()).context("Failed to build the TikTok checker")?,
    );

    // Connect to Telegram
    let bot = Bot::new(bot_config.token);

    let me = bot
        .get_me()
        .await
        .context("Failed to reach the Telegram Bot API")?;
    info!("Bot started: @{} (id: {})", me.username(), me.id);

    bot.set_my_commands(Command::bot_commands())
        .await
        .context("Failed to register bot commands")?;

    // Drop any stale webhook so long polling can take over
    bot.delete_webhook()
        .drop_pending_updates(true)
        .await
        .context("Failed to delete webhook")?;

    info!("Starting long polling. Use Ctrl+C to stop.");

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![Arc::clone(&checker), Arc::new(settings)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
