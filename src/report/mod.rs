//! Result aggregation and report rendering.
//!
//! Bulk checks produce a summary block for the chat reply and a detailed
//! plain-text report that is attached as a document.

use chrono::{DateTime, Utc};

use crate::checker::{CheckResult, UsernameStatus};

const HEAVY_RULE: &str = "════════════════════════════════════════";
const LIGHT_RULE: &str = "────────────────────────────────────────";

/// Per-status counts for a batch of check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Total number of checked usernames.
    pub total: usize,

    /// Usernames free to register.
    pub available: usize,

    /// Usernames already in use.
    pub taken: usize,

    /// Banned or invalid usernames.
    pub unavailable: usize,

    /// Checks that failed.
    pub errors: usize,
}

impl ReportSummary {
    /// Computes the summary of a result slice.
    #[must_use]
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.status {
                UsernameStatus::Available => summary.available += 1,
                UsernameStatus::Taken => summary.taken += 1,
                UsernameStatus::Unavailable => summary.unavailable += 1,
                UsernameStatus::Error => summary.errors += 1,
            }
        }

        summary
    }
}

/// Renders the detailed plain-text report for a batch of results.
///
/// Results are grouped by verdict under ruled section headers, with the
/// summary block at the top.
#[must_use]
pub fn render_report(results: &[CheckResult]) -> String {
    if results.is_empty() {
        return "No results to report.".to_owned();
    }

    let summary = ReportSummary::from_results(results);

    let mut lines = vec![
        HEAVY_RULE.to_owned(),
        "📊 TIKTOK USERNAME CHECK REPORT".to_owned(),
        HEAVY_RULE.to_owned(),
        String::new(),
        format!("📈 Total checked: {}", summary.total),
        format!("✅ Available: {}", summary.available),
        format!("❌ Taken: {}", summary.taken),
        format!("⚠️ Unavailable: {}", summary.unavailable),
        format!("🔴 Errors: {}", summary.errors),
        String::new(),
    ];

    push_section(
        &mut lines,
        "✅ AVAILABLE USERNAMES:",
        results,
        UsernameStatus::Available,
        false,
    );
    push_section(
        &mut lines,
        "❌ TAKEN USERNAMES:",
        results,
        UsernameStatus::Taken,
        false,
    );
    push_section(
        &mut lines,
        "⚠️ UNAVAILABLE USERNAMES:",
        results,
        UsernameStatus::Unavailable,
        true,
    );
    push_section(
        &mut lines,
        "🔴 FAILED CHECKS:",
        results,
        UsernameStatus::Error,
        true,
    );

    lines.push(HEAVY_RULE.to_owned());
    lines.push("End of report".to_owned());
    lines.push(HEAVY_RULE.to_owned());

    lines.join("\n")
}

/// Appends one verdict section, skipping it when empty.
fn push_section(
    lines: &mut Vec<String>,
    header: &str,
    results: &[CheckResult],
    status: UsernameStatus,
    with_detail: bool,
) {
    let matching: Vec<&CheckResult> = results.iter().filter(|r| r.status == status).collect();
    if matching.is_empty() {
        return;
    }

    lines.push(LIGHT_RULE.to_owned());
    lines.push(header.to_owned());
    lines.push(LIGHT_RULE.to_owned());

    for result in matching {
        if with_detail {
            let detail = result.detail.as_deref().unwrap_or("No details");
            lines.push(format!("  • @{} - {detail}", result.username));
        } else {
            lines.push(format!("  • @{}", result.username));
        }
    }

    lines.push(String::new());
}

/// Builds the timestamped report filename.
#[must_use]
pub fn report_filename(timestamp: DateTime<Utc>) -> String {
    format!("tiktok_report_{}.txt", timestamp.format("%Y%m%d_%H%M%S"))
}
