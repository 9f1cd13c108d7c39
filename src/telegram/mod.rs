//! Telegram bot surface.
//!
//! Provides the dispatcher handler tree, the registered command set and
//! the user-facing message templates.

mod handlers;
mod messages;

pub use handlers::{Command, schema};
