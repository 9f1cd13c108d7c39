//! Black-box tests for the TikTok checker against a mock server.

use httpmock::prelude::*;
use tiktok_checker_bot::checker::{TikTokChecker, UsernameStatus};
use tiktok_checker_bot::config::CheckerSettings;
use tiktok_checker_bot::report::ReportSummary;

/// Builds a checker pointed at the mock server with fast test timings.
fn test_checker(server: &MockServer) -> TikTokChecker {
    let settings = CheckerSettings {
        base_url: server.base_url(),
        concurrent_limit: 4,
        request_timeout_secs: 5,
        max_retries: 2,
        retry_delay_secs: 0,
        bulk_delay_ms: 0,
        max_bulk_count: 500,
    };
    TikTokChecker::new(settings).expect("checker builds")
}

#[tokio::test]
async fn available_username_via_api() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/user/detail/")
            .query_param("uniqueId", "free_handle");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"statusCode": 10202}));
    });

    let checker = test_checker(&server);
    let result = checker.check_username("@free_handle").await;

    api_mock.assert();
    assert_eq!(result.status, UsernameStatus::Available);
    assert_eq!(result.username, "free_handle");
}

#[tokio::test]
async fn taken_username_via_api() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/user/detail/")
            .query_param("uniqueId", "busy_handle");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "statusCode": 0,
                "userInfo": {"user": {"uniqueId": "busy_handle"}}
            }));
    });

    let checker = test_checker(&server);
    let result = checker.check_username("busy_handle").await;

    assert_eq!(result.status, UsernameStatus::Taken);
}

#[tokio::test]
async fn banned_username_via_api() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/user/detail/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"statusCode": 10101}));
    });

    let checker = test_checker(&server);
    let result = checker.check_username("banned_handle").await;

    assert_eq!(result.status, UsernameStatus::Unavailable);
}

#[tokio::test]
async fn falls_back_to_profile_page_when_api_is_down() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/user/detail/");
        then.status(503);
    });

    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/@free_handle");
        then.status(404);
    });

    let checker = test_checker(&server);
    let result = checker.check_username("free_handle").await;

    page_mock.assert();
    assert_eq!(result.status, UsernameStatus::Available);
}

#[tokio::test]
async fn profile_page_stats_mean_taken() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/user/detail/");
        then.status(503);
    });

    server.mock(|when, then| {
        when.method(GET).path("/@busy_handle");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(r#"<html>{"followerCount":10,"videoCount":3}</html>"#);
    });

    let checker = test_checker(&server);
    let result = checker.check_username("busy_handle").await;

    assert_eq!(result.status, UsernameStatus::Taken);
}

#[tokio::test]
async fn profile_page_ban_notice_means_unavailable() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/user/detail/");
        then.status(503);
    });

    server.mock(|when, then| {
        when.method(GET).path("/@banned_handle");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>This account has been banned</html>");
    });

    let checker = test_checker(&server);
    let result = checker.check_username("banned_handle").await;

    assert_eq!(result.status, UsernameStatus::Unavailable);
}

#[tokio::test]
async fn server_errors_on_both_routes_yield_error_verdict() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/user/detail/");
        then.status(503);
    });

    server.mock(|when, then| {
        when.method(GET).path("/@some_handle");
        then.status(502);
    });

    let checker = test_checker(&server);
    let result = checker.check_username("some_handle").await;

    assert_eq!(result.status, UsernameStatus::Error);
    assert!(result.detail.expect("detail").contains("502"));
}

#[tokio::test]
async fn invalid_username_never_hits_the_network() {
    let server = MockServer::start();

    let any_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let checker = test_checker(&server);
    let result = checker.check_username("no spaces allowed").await;

    assert_eq!(result.status, UsernameStatus::Unavailable);
    assert_eq!(any_mock.hits(), 0);
}

#[tokio::test]
async fn bulk_check_preserves_order_and_counts() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/user/detail/")
            .query_param("uniqueId", "first_free");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"statusCode": 10202}));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/user/detail/")
            .query_param("uniqueId", "second_busy");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "statusCode": 0,
                "userInfo": {"user": {"uniqueId": "second_busy"}}
            }));
    });

    let checker = test_checker(&server);
    let usernames = vec!["first_free".to_owned(), "second_busy".to_owned()];
    let results = checker.check_bulk(&usernames).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].username, "first_free");
    assert_eq!(results[0].status, UsernameStatus::Available);
    assert_eq!(results[1].username, "second_busy");
    assert_eq!(results[1].status, UsernameStatus::Taken);

    let summary = ReportSummary::from_results(&results);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.available, 1);
    assert_eq!(summary.taken, 1);
}
