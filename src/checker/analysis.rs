//! Verdict analysis for TikTok responses.
//!
//! Two probe routes feed this module: the user-detail API (authoritative
//! status codes) and the public profile page (heuristic body scan). The page
//! heuristics default to `Taken` when nothing proves the handle is free.

use reqwest::StatusCode;
use serde::Deserialize;

use super::result::{CheckResult, UsernameStatus};

/// API status code: request succeeded, user exists.
const API_STATUS_OK: i64 = 0;

/// API status code: user does not exist.
const API_STATUS_NOT_FOUND: i64 = 10_202;

/// API status code: account is banned.
const API_STATUS_BANNED: i64 = 10_101;

/// Response payload of the `api/user/detail` endpoint.
///
/// TikTok serves both camelCase and snake_case field spellings depending on
/// the frontend build, so every field carries an alias.
#[derive(Debug, Deserialize)]
pub struct UserDetailResponse {
    #[serde(default, alias = "statusCode")]
    pub status_code: i64,

    #[serde(default, alias = "userInfo")]
    pub user_info: Option<UserInfo>,
}

/// The `userInfo` wrapper of a user-detail response.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// The user object inside `userInfo`.
#[derive(Debug, Deserialize)]
pub struct UserSummary {
    #[serde(default, alias = "uniqueId")]
    pub unique_id: String,
}

/// Interprets a parsed user-detail API response.
///
/// Returns `None` when the response carries no recognized status code, in
/// which case the caller falls back to the profile page.
#[must_use]
pub fn interpret_api_response(
    username: &str,
    response: &UserDetailResponse,
) -> Option<CheckResult> {
    match response.status_code {
        API_STATUS_OK => {
            let returned = response
                .user_info
                .as_ref()
                .and_then(|info| info.user.as_ref())
                .map(|user| user.unique_id.as_str())?;

            if returned.eq_ignore_ascii_case(username) {
                Some(
                    CheckResult::new(username, UsernameStatus::Taken)
                        .with_detail("Username is in use (confirmed via API)"),
                )
            } else {
                None
            }
        }
        API_STATUS_NOT_FOUND => Some(
            CheckResult::new(username, UsernameStatus::Available)
                .with_detail("Username is free (confirmed via API)"),
        ),
        API_STATUS_BANNED => Some(
            CheckResult::new(username, UsernameStatus::Unavailable)
                .with_detail("Account is banned"),
        ),
        _ => None,
    }
}

/// Analyzes a profile page response to determine the username status.
#[must_use]
pub fn analyze_profile_page(username: &str, status: StatusCode, body: &str) -> CheckResult {
    if status == StatusCode::NOT_FOUND {
        return CheckResult::new(username, UsernameStatus::Available)
            .with_detail("Username is free to register");
    }

    if status.is_success() {
        return analyze_profile_body(username, body);
    }

    if status == StatusCode::FORBIDDEN {
        return CheckResult::new(username, UsernameStatus::Error)
            .with_detail("Access denied (possible rate limiting)");
    }

    if status.is_server_error() {
        return CheckResult::new(username, UsernameStatus::Error)
            .with_detail(format!("TikTok server error: {}", status.as_u16()));
    }

    CheckResult::new(username, UsernameStatus::Taken).with_detail(format!(
        "Unrecognized response (HTTP {}), assuming taken",
        status.as_u16()
    ))
}

/// Scans an HTTP 200 profile page body for availability signals.
///
/// Signals are checked in decreasing order of reliability; an unmatched body
/// yields `Taken`.
fn analyze_profile_body(username: &str, body: &str) -> CheckResult {
    let content = body.to_lowercase();
    let username_lower = username.to_lowercase();

    // Embedded API codes proving the user does not exist.
    const NOT_FOUND_CODES: [&str; 8] = [
        r#""statuscode":10202"#,
        r#""statuscode": 10202"#,
        r#""status_code":10202"#,
        r#""status_code": 10202"#,
        r#""statusmsg":"user not exist""#,
        r#""statusmsg": "user not exist""#,
        r#""statusmsg":"user doesn't exist""#,
        r#""errormsg":"user not exist""#,
    ];

    if NOT_FOUND_CODES.iter().any(|code| content.contains(code)) {
        return CheckResult::new(username, UsernameStatus::Available)
            .with_detail("Username is free to register");
    }

    // The handle embedded in the page JSON proves the profile exists.
    let id_fragments = [
        format!(r#""uniqueid":"{username_lower}""#),
        format!(r#""uniqueid": "{username_lower}""#),
        format!(r#""unique_id":"{username_lower}""#),
        format!(r#""unique_id": "{username_lower}""#),
    ];

    if id_fragments.iter().any(|frag| content.contains(frag)) {
        return CheckResult::new(username, UsernameStatus::Taken)
            .with_detail("Username is already in use");
    }

    // Profile stat fields; two or more means a profile rendered.
    const PROFILE_MARKERS: [&str; 8] = [
        r#""followercount""#,
        r#""followingcount""#,
        r#""heartcount""#,
        r#""videocount""#,
        r#""diggcount""#,
        r#""follower_count""#,
        r#""following_count""#,
        r#""heart_count""#,
    ];

    let profile_score = PROFILE_MARKERS
        .iter()
        .filter(|marker| content.contains(*marker))
        .count();

    if profile_score >= 2 {
        return CheckResult::new(username, UsernameStatus::Taken)
            .with_detail("Username is already in use");
    }

    const BANNED_MARKERS: [&str; 8] = [
        "this account has been banned",
        "account suspended",
        "this account is suspended",
        "this account was banned",
        "account has been suspended",
        "violates our community guidelines",
        r#""statuscode":10101"#,
        r#""status_code":10101"#,
    ];

    if BANNED_MARKERS.iter().any(|marker| content.contains(marker)) {
        return CheckResult::new(username, UsernameStatus::Unavailable)
            .with_detail("Account is banned (the handle may free up later)");
    }

    // Plain-text not-found phrases; least reliable, checked last.
    const NOT_FOUND_TEXT: [&str; 6] = [
        "couldn't find this account",
        "couldn't find this page",
        "user not found",
        "page not found",
        "this account doesn't exist",
        "user doesn't exist",
    ];

    if NOT_FOUND_TEXT.iter().any(|text| content.contains(text)) {
        return CheckResult::new(username, UsernameStatus::Available)
            .with_detail("Username is free to register");
    }

    // No proof the handle is free: report taken rather than a false positive.
    CheckResult::new(username, UsernameStatus::Taken)
        .with_detail("No availability signal found, assuming taken")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_response(json: &str) -> UserDetailResponse {
        serde_json::from_str(json).expect("test payload parses")
    }

    #[test]
    fn test_api_user_exists() {
        let response = api_response(
            r#"{"statusCode": 0, "userInfo": {"user": {"uniqueId": "SomeBody"}}}"#,
        );
        let result = interpret_api_response("somebody", &response).expect("verdict");
        assert_eq!(result.status, UsernameStatus::Taken);
    }

    #[test]
    fn test_api_user_exists_snake_case_fields() {
        let response = api_response(
            r#"{"status_code": 0, "user_info": {"user": {"unique_id": "somebody"}}}"#,
        );
        let result = interpret_api_response("somebody", &response).expect("verdict");
        assert_eq!(result.status, UsernameStatus::Taken);
    }

    #[test]
    fn test_api_user_not_found() {
        let response = api_response(r#"{"statusCode": 10202}"#);
        let result = interpret_api_response("somebody", &response).expect("verdict");
        assert_eq!(result.status, UsernameStatus::Available);
    }

    #[test]
    fn test_api_user_banned() {
        let response = api_response(r#"{"statusCode": 10101}"#);
        let result = interpret_api_response("somebody", &response).expect("verdict");
        assert_eq!(result.status, UsernameStatus::Unavailable);
    }

    #[test]
    fn test_api_mismatched_unique_id_is_inconclusive() {
        let response = api_response(
            r#"{"statusCode": 0, "userInfo": {"user": {"uniqueId": "different"}}}"#,
        );
        assert!(interpret_api_response("somebody", &response).is_none());
    }

    #[test]
    fn test_api_unknown_status_is_inconclusive() {
        let response = api_response(r#"{"statusCode": 10000}"#);
        assert!(interpret_api_response("somebody", &response).is_none());
    }

    #[test]
    fn test_page_404_means_available() {
        let result = analyze_profile_page("somebody", StatusCode::NOT_FOUND, "");
        assert_eq!(result.status, UsernameStatus::Available);
    }

    #[test]
    fn test_page_embedded_not_found_code() {
        let body = r#"<script>{"statusCode":10202,"statusMsg":"user not exist"}</script>"#;
        let result = analyze_profile_page("somebody", StatusCode::OK, body);
        assert_eq!(result.status, UsernameStatus::Available);
    }

    #[test]
    fn test_page_unique_id_means_taken() {
        let body = r#"{"uniqueId":"somebody","nickname":"Some Body"}"#;
        let result = analyze_profile_page("somebody", StatusCode::OK, body);
        assert_eq!(result.status, UsernameStatus::Taken);
    }

    #[test]
    fn test_page_profile_stats_mean_taken() {
        let body = r#"{"followerCount":100,"videoCount":5}"#;
        let result = analyze_profile_page("somebody", StatusCode::OK, body);
        assert_eq!(result.status, UsernameStatus::Taken);
    }

    #[test]
    fn test_page_single_stat_is_not_enough() {
        let body = r#"{"followerCount":100}"#;
        let result = analyze_profile_page("somebody", StatusCode::OK, body);
        // Falls through to the default-to-taken arm, not the stats arm.
        assert_eq!(result.status, UsernameStatus::Taken);
        assert_eq!(
            result.detail.as_deref(),
            Some("No availability signal found, assuming taken")
        );
    }

    #[test]
    fn test_page_ban_notice_means_unavailable() {
        let body = "<html>This account has been banned for violations</html>";
        let result = analyze_profile_page("somebody", StatusCode::OK, body);
        assert_eq!(result.status, UsernameStatus::Unavailable);
    }

    #[test]
    fn test_page_text_not_found_means_available() {
        let body = "<html>Couldn't find this account</html>";
        let result = analyze_profile_page("somebody", StatusCode::OK, body);
        assert_eq!(result.status, UsernameStatus::Available);
    }

    #[test]
    fn test_page_empty_body_defaults_to_taken() {
        let result = analyze_profile_page("somebody", StatusCode::OK, "<html></html>");
        assert_eq!(result.status, UsernameStatus::Taken);
    }

    #[test]
    fn test_page_403_is_an_error() {
        let result = analyze_profile_page("somebody", StatusCode::FORBIDDEN, "");
        assert_eq!(result.status, UsernameStatus::Error);
    }

    #[test]
    fn test_page_server_error() {
        let result = analyze_profile_page("somebody", StatusCode::BAD_GATEWAY, "");
        assert_eq!(result.status, UsernameStatus::Error);
        assert!(result.detail.expect("detail").contains("502"));
    }

    #[test]
    fn test_page_other_status_defaults_to_taken() {
        let result = analyze_profile_page("somebody", StatusCode::FOUND, "");
        assert_eq!(result.status, UsernameStatus::Taken);
    }
}
