//! Username normalization, validation and list parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum username length accepted by TikTok.
pub const MIN_USERNAME_LEN: usize = 2;

/// Maximum username length accepted by TikTok.
pub const MAX_USERNAME_LEN: usize = 24;

/// TikTok usernames: 2-24 characters, letters, digits, dots and underscores.
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.]{2,24}$").expect("username pattern is valid"));

/// Normalizes raw user input into a checkable username.
///
/// Trims surrounding whitespace, strips one leading `@` and lowercases.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().trim_start_matches('@').trim().to_lowercase()
}

/// Checks whether a normalized username has a valid TikTok format.
#[must_use]
pub fn is_valid(username: &str) -> bool {
    USERNAME_PATTERN.is_match(username)
}

/// Parses a username list from text content, one username per line.
///
/// Blank lines and `#` comments are skipped, a leading `@` is stripped,
/// entries shorter than [`MIN_USERNAME_LEN`] are dropped and duplicates are
/// removed case-insensitively, keeping the first occurrence with its
/// original casing.
#[must_use]
pub fn parse_username_list(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut usernames = Vec::new();

    for line in content.lines() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }

        let name = entry.trim_start_matches('@').trim();
        if name.len() < MIN_USERNAME_LEN {
            continue;
        }

        if seen.insert(name.to_lowercase()) {
            usernames.push(name.to_owned());
        }
    }

    usernames
}
