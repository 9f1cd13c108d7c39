//! TikTok Username Checker Bot Library
//!
//! A Telegram bot that checks TikTok username availability.
//!
//! This crate provides the core functionality for:
//! - Probing TikTok over HTTPS to classify a handle as available, taken
//!   or unavailable
//! - Normalizing, validating and parsing username lists
//! - Rendering bulk-check summaries and reports
//! - Serving the Telegram bot surface via long polling

pub mod checker;
pub mod config;
pub mod report;
pub mod telegram;
