//! Configuration module for the checker bot.
//!
//! Handles loading of the Telegram bot token and the TikTok checker
//! settings from the environment.

mod settings;

pub use settings::{BotConfig, CheckerSettings, ConfigError};
