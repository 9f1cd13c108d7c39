//! TikTok availability checker.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use super::analysis::{self, UserDetailResponse};
use super::rate_limiter::RateLimiter;
use super::result::{CheckResult, UsernameStatus};
use super::username;
use crate::config::CheckerSettings;

/// User agent presented to TikTok; profile pages are served differently to
/// clients that do not look like a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Backoff applied to the pacer after a denied (403) response.
const DENIED_BACKOFF: Duration = Duration::from_secs(5);

/// Bulk progress is logged every this many checked usernames.
const PROGRESS_LOG_EVERY: usize = 10;

/// Errors that can occur while probing TikTok.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Checks TikTok username availability over HTTPS.
///
/// Owns the HTTP client, a semaphore bounding concurrent checks and a pacer
/// that spaces bulk requests out.
pub struct TikTokChecker {
    /// HTTP client with browser-like headers.
    http: reqwest::Client,

    /// Pacer between outbound requests.
    rate_limiter: RateLimiter,

    /// Bounds the number of in-flight checks.
    semaphore: Semaphore,

    /// Probe configuration.
    settings: CheckerSettings,
}

impl TikTokChecker {
    /// Creates a checker from the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: CheckerSettings) -> Result<Self, CheckerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let http = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            rate_limiter: RateLimiter::from_millis(settings.bulk_delay_ms),
            semaphore: Semaphore::new(settings.concurrent_limit),
            settings,
        })
    }

    /// Checks a single username.
    ///
    /// Never fails: format violations, exhausted retries and transport
    /// errors all surface as a verdict.
    pub async fn check_username(&self, raw: &str) -> CheckResult {
        let name = username::normalize(raw);

        if !username::is_valid(&name) {
            warn!("Invalid username format: {:?}", raw);
            return CheckResult::new(name, UsernameStatus::Unavailable).with_detail(format!(
                "Invalid username format ({}-{} characters: letters, digits, _ and .)",
                username::MIN_USERNAME_LEN,
                username::MAX_USERNAME_LEN
            ));
        }

        let Ok(_permit) = self.semaphore.acquire().await else {
            return CheckResult::new(name, UsernameStatus::Error)
                .with_detail("Checker is shutting down");
        };

        self.check_with_retry(&name).await
    }

    /// Checks a list of usernames sequentially, pacing the requests.
    ///
    /// Input order is preserved; a failing entry becomes an `Error` verdict
    /// instead of aborting the list.
    pub async fn check_bulk(&self, usernames: &[String]) -> Vec<CheckResult> {
        if usernames.is_empty() {
            return Vec::new();
        }

        info!("Starting bulk check of {} usernames", usernames.len());

        let mut results = Vec::with_capacity(usernames.len());

        for (i, name) in usernames.iter().enumerate() {
            self.rate_limiter.wait_and_acquire().await;
            results.push(self.check_username(name).await);

            if (i + 1) % PROGRESS_LOG_EVERY == 0 {
                info!("Checked {}/{} usernames", i + 1, usernames.len());
            }
        }

        info!("Bulk check finished: {} results", results.len());
        results
    }

    /// Runs the probe with retries on transport failures.
    async fn check_with_retry(&self, name: &str) -> CheckResult {
        let mut last_error: Option<CheckerError> = None;

        for attempt in 1..=self.settings.max_retries {
            match self.perform_check(name).await {
                Ok(result) => {
                    info!("@{}: {}", name, result.status);
                    return result;
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} for @{} failed: {}",
                        attempt, self.settings.max_retries, name, e
                    );
                    last_error = Some(e);

                    if attempt < self.settings.max_retries {
                        let delay = Duration::from_secs(
                            self.settings.retry_delay_secs * u64::from(attempt),
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        let reason = last_error.map_or_else(|| "unknown error".to_owned(), |e| e.to_string());
        error!("All attempts for @{} exhausted: {}", name, reason);

        CheckResult::new(name, UsernameStatus::Error).with_detail(format!(
            "Gave up after {} attempts: {reason}",
            self.settings.max_retries
        ))
    }

    /// Single probe: API route first, profile page as fallback.
    async fn perform_check(&self, name: &str) -> Result<CheckResult, CheckerError> {
        debug!("Checking username: @{}", name);

        if let Some(result) = self.check_via_api(name).await {
            return Ok(result);
        }

        debug!("@{}: API route inconclusive, falling back to profile page", name);

        let url = format!("{}/@{}", self.settings.base_url, name);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("@{}: profile page returned HTTP {}", name, status.as_u16());

        if status == StatusCode::FORBIDDEN {
            self.rate_limiter.penalize(DENIED_BACKOFF).await;
        }

        Ok(analysis::analyze_profile_page(name, status, &body))
    }

    /// Probes the user-detail API endpoint.
    ///
    /// Any failure on this route (transport, non-2xx, unparseable payload,
    /// unknown status code) is swallowed so the caller can fall back to the
    /// profile page.
    async fn check_via_api(&self, name: &str) -> Option<CheckResult> {
        let url = format!(
            "{}/api/user/detail/?uniqueId={}&secUid=",
            self.settings.base_url, name
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("@{}: API request failed: {}", name, e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(
                "@{}: API returned HTTP {}",
                name,
                response.status().as_u16()
            );
            return None;
        }

        let detail: UserDetailResponse = match response.json().await {
            Ok(detail) => detail,
            Err(e) => {
                debug!("@{}: could not parse API response: {}", name, e);
                return None;
            }
        };

        analysis::interpret_api_response(name, &detail)
    }

    /// Returns the time remaining until the pacer allows the next request.
    pub async fn time_until_allowed(&self) -> Duration {
        self.rate_limiter.time_until_allowed().await
    }
}

impl std::fmt::Debug for TikTokChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TikTokChecker")
            .field("rate_limiter", &self.rate_limiter)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_checker() -> TikTokChecker {
        TikTokChecker::new(CheckerSettings::default()).expect("checker builds")
    }

    #[tokio::test]
    async fn test_invalid_format_short_circuits() {
        let checker = test_checker();

        let result = checker.check_username("@a").await;
        assert_eq!(result.status, UsernameStatus::Unavailable);
        assert!(result.detail.expect("detail").contains("Invalid username format"));
    }

    #[tokio::test]
    async fn test_invalid_characters_short_circuit() {
        let checker = test_checker();

        let result = checker.check_username("has spaces").await;
        assert_eq!(result.status, UsernameStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_bulk_with_empty_input() {
        let checker = test_checker();
        assert!(checker.check_bulk(&[]).await.is_empty());
    }
}
