//! Rate limit information from GitHub API responses.
//!
//! GitHub only tells callers *when* a window resets, not where a paginated
//! walk may safely resume. Callers therefore treat an exhausted limit as a
//! stopping point and report the reset time alongside partial results.

use std::fmt;

use chrono::{DateTime, Utc};

/// Rate limit information reported by the GitHub `/rate_limit` endpoint.
///
/// # Example
///
/// ```
/// use repominer::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(5000, 0, 1700000000);
/// assert_eq!(info.remaining(), 0);
/// assert_eq!(info.to_string(), "2023-11-14 22:13:20 UTC (1700000000)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns the reset instant as a UTC timestamp.
    ///
    /// Returns `None` when the reset value does not fit a valid timestamp.
    #[must_use]
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.reset_at).ok()?;
        DateTime::from_timestamp(seconds, 0)
    }
}

impl fmt::Display for RateLimitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(reset) = self.reset_time() else {
            return write!(f, "{}", self.reset_at);
        };
        write!(
            f,
            "{} ({})",
            reset.format("%Y-%m-%d %H:%M:%S UTC"),
            self.reset_at
        )
    }
}
