//! Pacing and failure classification for GitHub calls.
//!
//! GitHub does not say where a paginated walk could safely resume after a
//! rate limit, so a rate limited call ends the run with partial results
//! rather than being retried. Every other per-commit failure is transient:
//! the commit is skipped and the walk continues.

use std::time::Duration;

use tokio::time::Instant;

use crate::github::error::MiningError;
use crate::github::rate_limit::RateLimitInfo;

/// How a failed call affects the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    /// GitHub refused the call because of its rate limit.
    RateLimited {
        /// Reset information when GitHub provided it.
        rate_limit: Option<RateLimitInfo>,
        /// Message reported with the failure.
        message: String,
    },
    /// Any other failure; the affected commit is skipped.
    Transient(MiningError),
}

impl From<MiningError> for CallFailure {
    fn from(error: MiningError) -> Self {
        match error {
            MiningError::RateLimitExceeded {
                rate_limit,
                message,
            } => Self::RateLimited {
                rate_limit,
                message,
            },
            other => Self::Transient(other),
        }
    }
}

/// Enforces a minimum delay between consecutive classification calls.
#[derive(Debug, Clone)]
pub struct RateGovernor {
    interval: Duration,
    last_call: Option<Instant>,
}

impl RateGovernor {
    /// Creates a governor spacing calls at least `interval` apart.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: None,
        }
    }

    /// Waits until the next call is allowed and records it as issued.
    ///
    /// The first call proceeds immediately.
    pub async fn pace(&mut self) {
        if let Some(last_call) = self.last_call {
            tokio::time::sleep_until(last_call + self.interval).await;
        }
        self.last_call = Some(Instant::now());
    }

    /// Classifies a failed call.
    #[must_use]
    pub fn classify(error: MiningError) -> CallFailure {
        CallFailure::from(error)
    }
}
