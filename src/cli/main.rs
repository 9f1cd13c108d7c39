//! Standalone batch checker for TikTok usernames.
//!
//! Runs the same availability checks as the bot without Telegram: usernames
//! come from the command line or a text file, results go to stdout and
//! optionally to a report file.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tiktok_checker_bot::checker::{TikTokChecker, username};
use tiktok_checker_bot::config::CheckerSettings;
use tiktok_checker_bot::report::{ReportSummary, render_report};

/// TikTok username availability checker.
#[derive(Parser, Debug)]
#[command(name = "check_usernames")]
#[command(about = "Checks TikTok username availability from the terminal")]
#[command(version)]
struct Args {
    /// Usernames to check (with or without @).
    usernames: Vec<String>,

    /// Read additional usernames from a text file (one per line).
    #[arg(short, long)]
    file: Option<String>,

    /// Write the detailed report to this path.
    #[arg(short, long)]
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args.log_level);

    let usernames = match collect_usernames(&args) {
        Ok(usernames) => usernames,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    if usernames.is_empty() {
        eprintln!("✗ No usernames to check. Pass them as arguments or via --file.");
        return ExitCode::FAILURE;
    }

    let settings = CheckerSettings::from_env_with_defaults();
    let checker = match TikTokChecker::new(settings) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("✗ Failed to build the checker: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Checking {} username(s)...\n", usernames.len());

    let results = checker.check_bulk(&usernames).await;

    for result in &results {
        println!("{result}");
    }

    let summary = ReportSummary::from_results(&results);
    println!(
        "\nTotal: {} | ✅ {} | ❌ {} | ⚠️ {} | 🔴 {}",
        summary.total, summary.available, summary.taken, summary.unavailable, summary.errors
    );

    if let Some(path) = &args.output {
        match std::fs::write(path, render_report(&results)) {
            Ok(()) => println!("✓ Report written to: {path}"),
            Err(e) => {
                eprintln!("✗ Failed to write report: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    // All checks failing outright usually means connectivity trouble.
    if summary.total > 0 && summary.errors == summary.total {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Gathers usernames from positional arguments and the optional file.
fn collect_usernames(args: &Args) -> Result<Vec<String>, String> {
    let mut combined = args.usernames.join("\n");

    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {path}: {e}"))?;
        combined.push('\n');
        combined.push_str(&content);
    }

    Ok(username::parse_username_list(&combined))
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
