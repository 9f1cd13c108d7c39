//! Telegram handler tree for the checker bot.
//!
//! The dispatcher schema branches commands first, then document uploads
//! (bulk checks), then plain text (single checks). Handlers post a
//! placeholder message and edit it in place once the verdict is known.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use teloxide::dispatching::UpdateHandler;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{Document, InputFile, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use super::messages;
use crate::checker::{TikTokChecker, username};
use crate::config::CheckerSettings;
use crate::report::{self, ReportSummary};

/// Commands registered with the Bot API.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Username checker commands:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,

    #[command(description = "show usage help")]
    Help,
}

/// Builds the dispatcher handler tree.
#[must_use]
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| msg.document().cloned()).endpoint(handle_document),
        )
        .branch(
            dptree::filter_map(|msg: Message| msg.text().map(ToOwned::to_owned))
                .endpoint(handle_text),
        )
}

/// Handles `/start` and `/help`.
async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> Result<()> {
    info!("Chat {} requested {:?}", msg.chat.id, cmd);

    match cmd {
        Command::Start | Command::Help => {
            bot.send_message(msg.chat.id, messages::START_TEXT)
                .parse_mode(ParseMode::Html)
                .await?;
        }
    }

    Ok(())
}

/// Handles plain text messages (single username check).
async fn handle_text(
    bot: Bot,
    msg: Message,
    text: String,
    checker: Arc<TikTokChecker>,
) -> Result<()> {
    let text = text.trim();

    // Unrecognized slash commands are not usernames.
    if text.starts_with('/') {
        return Ok(());
    }

    // Multiple words: check the first one.
    let Some(first) = text.split_whitespace().next() else {
        return Ok(());
    };

    let name = first.trim_start_matches('@');
    if name.is_empty() {
        return Ok(());
    }

    info!("Chat {} checks @{}", msg.chat.id, name);

    let placeholder = bot
        .send_message(msg.chat.id, messages::checking(name))
        .parse_mode(ParseMode::Html)
        .await?;

    let result = checker.check_username(name).await;

    bot.edit_message_text(msg.chat.id, placeholder.id, messages::single_result(&result))
        .parse_mode(ParseMode::Html)
        .await?;

    info!("Result for @{}: {}", result.username, result.status);

    Ok(())
}

/// Handles document uploads (bulk username check).
async fn handle_document(
    bot: Bot,
    msg: Message,
    document: Document,
    checker: Arc<TikTokChecker>,
    settings: Arc<CheckerSettings>,
) -> Result<()> {
    let is_txt = document
        .file_name
        .as_deref()
        .is_some_and(|name| name.ends_with(".txt"));

    if !is_txt {
        bot.send_message(msg.chat.id, messages::INVALID_FILE_TYPE)
            .await?;
        return Ok(());
    }

    info!(
        "Chat {} uploaded file: {:?}",
        msg.chat.id, document.file_name
    );

    let content = match download_text(&bot, &document).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to download upload from chat {}: {}", msg.chat.id, e);
            bot.send_message(msg.chat.id, messages::FILE_READ_ERROR)
                .await?;
            return Ok(());
        }
    };

    let usernames = username::parse_username_list(&content);

    if usernames.is_empty() {
        bot.send_message(msg.chat.id, messages::FILE_EMPTY).await?;
        return Ok(());
    }

    if usernames.len() > settings.max_bulk_count {
        bot.send_message(msg.chat.id, messages::file_too_large(settings.max_bulk_count))
            .await?;
        return Ok(());
    }

    let placeholder = bot
        .send_message(msg.chat.id, messages::bulk_started(usernames.len()))
        .parse_mode(ParseMode::Html)
        .await?;

    let results = checker.check_bulk(&usernames).await;
    let summary = ReportSummary::from_results(&results);

    bot.edit_message_text(msg.chat.id, placeholder.id, messages::bulk_complete(&summary))
        .parse_mode(ParseMode::Html)
        .await?;

    let rendered = report::render_report(&results);
    let attachment = InputFile::memory(rendered.into_bytes())
        .file_name(report::report_filename(Utc::now()));

    bot.send_document(msg.chat.id, attachment)
        .caption(messages::REPORT_CAPTION)
        .await?;

    info!(
        "Bulk check for chat {} finished: {} usernames",
        msg.chat.id, summary.total
    );

    Ok(())
}

/// Downloads a document via the Bot API and decodes it as UTF-8 (lossy).
async fn download_text(bot: &Bot, document: &Document) -> Result<String> {
    let file = bot.get_file(document.file.id.clone()).await?;

    let mut buf: Vec<u8> = Vec::new();
    bot.download_file(&file.path, &mut buf).await?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(
            Command::parse("/start", "checker_bot").expect("parses"),
            Command::Start
        );
        assert_eq!(
            Command::parse("/help", "checker_bot").expect("parses"),
            Command::Help
        );
        assert!(Command::parse("/unknown", "checker_bot").is_err());
    }

    #[test]
    fn test_command_descriptions_rendered() {
        let descriptions = Command::descriptions().to_string();
        assert!(descriptions.contains("/start"));
        assert!(descriptions.contains("/help"));
    }
}
