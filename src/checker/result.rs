//! Check verdicts and their presentation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Availability verdict for a TikTok username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsernameStatus {
    /// The username is free to register.
    Available,

    /// The username is already in use.
    Taken,

    /// The username is banned or structurally invalid.
    Unavailable,

    /// The check itself failed (network error, rate limit, ...).
    Error,
}

impl UsernameStatus {
    /// Returns the emoji marker shown next to this status.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Available => "✅",
            Self::Taken => "❌",
            Self::Unavailable => "⚠️",
            Self::Error => "🔴",
        }
    }

    /// Returns the human-readable status label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Taken => "Taken",
            Self::Unavailable => "Unavailable (banned or invalid)",
            Self::Error => "Check failed",
        }
    }
}

impl fmt::Display for UsernameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.label())
    }
}

/// Result of checking a single username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The username that was checked (as submitted, `@` stripped).
    pub username: String,

    /// The verdict.
    pub status: UsernameStatus,

    /// Optional explanation of how the verdict was reached.
    pub detail: Option<String>,
}

impl CheckResult {
    /// Creates a result with no detail text.
    #[must_use]
    pub fn new(username: impl Into<String>, status: UsernameStatus) -> Self {
        Self {
            username: username.into(),
            status,
            detail: None,
        }
    }

    /// Attaches an explanation to the result.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}: {}", self.username, self.status)
    }
}
