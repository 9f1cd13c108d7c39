//! User-facing message templates.
//!
//! All templates are HTML-formatted; user-controlled fragments must go
//! through [`escape`] before interpolation.

use teloxide::utils::html::escape;

use crate::checker::CheckResult;
use crate::report::ReportSummary;

/// Welcome and usage guide, shown for `/start` and `/help`.
pub const START_TEXT: &str = "\
🔍 <b>TikTok Username Checker Bot</b>

Welcome! This bot checks whether TikTok usernames are available.

<b>📝 How to use:</b>

1️⃣ <b>Single check:</b>
   Send a username (with or without @).
   Example: <code>username123</code> or <code>@username123</code>

2️⃣ <b>Bulk check:</b>
   Upload a .txt file with one username per line.
   The bot checks every entry and returns a report.

<b>📊 Statuses:</b>
✅ Available - the username is free
❌ Taken - the username is already in use
⚠️ Unavailable - banned or invalid
🔴 Error - the check failed

<i>Send a username or a file to get started!</i>";

/// Shown when an uploaded file contains no usable usernames.
pub const FILE_EMPTY: &str = "⚠️ The file is empty or contains no valid usernames.";

/// Shown when an upload is not a `.txt` document.
pub const INVALID_FILE_TYPE: &str =
    "⚠️ Only .txt files are supported. Please upload a plain text file.";

/// Shown when an upload cannot be downloaded or decoded.
pub const FILE_READ_ERROR: &str =
    "❌ Could not read the file. Make sure it is a UTF-8 encoded .txt file.";

/// Caption attached to the report document.
pub const REPORT_CAPTION: &str = "📄 Detailed username check report";

/// Placeholder posted while a single check runs.
#[must_use]
pub fn checking(username: &str) -> String {
    format!("⏳ Checking username <code>@{}</code>...", escape(username))
}

/// Placeholder posted while a bulk check runs.
#[must_use]
pub fn bulk_started(count: usize) -> String {
    format!("⏳ Starting bulk check of {count} usernames...\nThis can take a while.")
}

/// Shown when an upload exceeds the bulk limit.
#[must_use]
pub fn file_too_large(max_count: usize) -> String {
    format!("⚠️ The file is too large! At most {max_count} usernames per check.")
}

/// Verdict message for a single check, edited into the placeholder.
#[must_use]
pub fn single_result(result: &CheckResult) -> String {
    let mut text = format!(
        "{} <b>Check result</b>\n\n\
         👤 <b>Username:</b> <code>@{}</code>\n\
         📊 <b>Status:</b> {}",
        result.status.marker(),
        escape(&result.username),
        result.status.label(),
    );

    if let Some(detail) = &result.detail {
        text.push_str(&format!("\n💬 <b>Details:</b> {}", escape(detail)));
    }

    text
}

/// Summary message for a finished bulk check.
#[must_use]
pub fn bulk_complete(summary: &ReportSummary) -> String {
    format!(
        "✅ <b>Bulk check complete!</b>\n\n\
         📊 <b>Results:</b>\n\
         • Total checked: {}\n\
         • Available: {}\n\
         • Taken: {}\n\
         • Unavailable: {}\n\
         • Errors: {}\n\n\
         📄 The detailed report is attached.",
        summary.total, summary.available, summary.taken, summary.unavailable, summary.errors
    )
}
