//! Error mapping helpers for the Octocrab GitHub gateway implementations.

use http::StatusCode;
use octocrab::Octocrab;

use crate::github::error::MiningError;
use crate::github::rate_limit::RateLimitInfo;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Maps an Octocrab failure onto the mining error taxonomy.
///
/// Rate limit failures are recognised but carry no reset information; use
/// [`map_octocrab_error_with_rate_limit`] when a follow-up lookup is possible.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> MiningError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let status = source.status_code;
        let message = &source.message;

        if status == StatusCode::NOT_FOUND {
            return MiningError::NotFound {
                message: format!("{operation} failed: GitHub returned {status} {message}"),
            };
        }

        if is_rate_limit_error(source) {
            return MiningError::RateLimitExceeded {
                rate_limit: None,
                message: format!("{operation} failed: {message}"),
            };
        }

        return if is_auth_failure(status) {
            MiningError::Authentication {
                message: format!("{operation} failed: GitHub returned {status} {message}"),
            }
        } else {
            MiningError::Api {
                message: format!("{operation} failed with status {status}: {message}"),
            }
        };
    }

    if is_network_error(error) {
        return MiningError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    MiningError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps an Octocrab failure, querying `/rate_limit` for the reset time when
/// the failure was caused by the rate limiter.
pub(super) async fn map_octocrab_error_with_rate_limit(
    client: &Octocrab,
    operation: &str,
    error: &octocrab::Error,
) -> MiningError {
    match error {
        octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
            let rate_limit = fetch_rate_limit_info(client).await;
            let base_message = format!("{operation} failed: {message}", message = source.message);
            let message = match &rate_limit {
                Some(info) => format!(
                    "{base_message} (resets at {reset})",
                    reset = info.reset_at()
                ),
                None => base_message,
            };

            tracing::warn!(
                limit = rate_limit.as_ref().map(RateLimitInfo::limit),
                remaining = rate_limit.as_ref().map(RateLimitInfo::remaining),
                "{message}"
            );
            MiningError::RateLimitExceeded {
                rate_limit,
                message,
            }
        }
        _ => map_octocrab_error(operation, error),
    }
}

async fn fetch_rate_limit_info(client: &Octocrab) -> Option<RateLimitInfo> {
    let rate = client.ratelimit().get().await.ok()?.rate;
    let Ok(limit) = u32::try_from(rate.limit) else {
        return None;
    };
    let Ok(remaining) = u32::try_from(rate.remaining) else {
        return None;
    };
    Some(RateLimitInfo::new(limit, remaining, rate.reset))
}
