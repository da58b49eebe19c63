//! Public request and response types for gateway operations.

use crate::github::branch::CommitSha;
use crate::github::error::MiningError;
use crate::github::models::CommitRecord;
use crate::github::pagination::{MAX_PER_PAGE, PageInfo};

/// Parameters for listing commits reachable from a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCommitsParams {
    /// Commit to walk back from. GitHub uses the default branch when absent.
    pub sha: Option<CommitSha>,
    /// Page number to fetch (1-based).
    pub page: u32,
    /// Items per page (max 100).
    pub per_page: u8,
}

impl ListCommitsParams {
    /// Parameters for the first page of history behind `sha`.
    #[must_use]
    pub const fn from_tip(sha: CommitSha, per_page: u8) -> Self {
        Self {
            sha: Some(sha),
            page: 1,
            per_page,
        }
    }

    /// Validates the page position and size.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::InvalidPagination`] when the page is zero or the
    /// page size falls outside `1..=100`.
    pub fn validate(&self) -> Result<(), MiningError> {
        validate_pagination_params(self.page, self.per_page)
    }
}

/// One page of commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPage {
    /// Commits on this page, most recent first.
    pub items: Vec<CommitRecord>,
    /// Pagination state.
    pub page_info: PageInfo,
}

pub(super) fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), MiningError> {
    if page == 0 {
        return Err(MiningError::InvalidPagination {
            message: "page must be at least 1".to_owned(),
        });
    }

    if per_page == 0 {
        return Err(MiningError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_PER_PAGE {
        return Err(MiningError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}
