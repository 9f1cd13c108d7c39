//! TikTok username checking module.
//!
//! Probes TikTok over HTTPS to decide whether a handle is available, taken
//! or unavailable, with retries, bounded concurrency and request pacing.

mod analysis;
mod client;
mod rate_limiter;
mod result;
pub mod username;

pub use analysis::{
    UserDetailResponse, UserInfo, UserSummary, analyze_profile_page, interpret_api_response,
};
pub use client::{CheckerError, TikTokChecker};
pub use rate_limiter::RateLimiter;
pub use result::{CheckResult, UsernameStatus};
