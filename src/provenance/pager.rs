//! Lazy, capped iteration over a branch's commit history.

use std::collections::VecDeque;

use crate::github::branch::CommitSha;
use crate::github::error::MiningError;
use crate::github::gateway::{CommitGateway, ListCommitsParams};
use crate::github::locator::RepositoryLocator;
use crate::github::models::CommitRecord;
use crate::github::pagination::MAX_PER_PAGE;

use super::run::CommitCap;

/// Yields commits reachable from a tip, most recent first, one page at a time.
///
/// The page size is fixed for the whole walk (GitHub numbers pages relative to
/// it) and never exceeds the cap, so at most one page is buffered. The pager
/// stops once the cap is satisfied, when GitHub returns a short page or no
/// `next` link, or after any error. It cannot be restarted.
#[derive(Debug)]
pub struct CommitPager<'run, G: CommitGateway + ?Sized> {
    gateway: &'run G,
    repository: &'run RepositoryLocator,
    tip: CommitSha,
    per_page: u8,
    next_page: u32,
    remaining: u32,
    buffer: VecDeque<CommitRecord>,
    source_exhausted: bool,
}

impl<'run, G: CommitGateway + ?Sized> CommitPager<'run, G> {
    /// Creates a pager over the history behind `tip`.
    ///
    /// `page_size` is clamped to `1..=100` and to the cap.
    #[must_use]
    pub fn new(
        gateway: &'run G,
        repository: &'run RepositoryLocator,
        tip: CommitSha,
        cap: CommitCap,
        page_size: u8,
    ) -> Self {
        let capped = u8::try_from(cap.get()).unwrap_or(MAX_PER_PAGE);
        let per_page = page_size.clamp(1, MAX_PER_PAGE).min(capped);
        Self {
            gateway,
            repository,
            tip,
            per_page,
            next_page: 1,
            remaining: cap.get(),
            buffer: VecDeque::with_capacity(usize::from(per_page)),
            source_exhausted: false,
        }
    }

    /// Page size requested from GitHub.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Returns true once the cap has been satisfied.
    #[must_use]
    pub const fn cap_reached(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the next commit, fetching another page when the buffer is empty.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error for a failed page request. The pager
    /// yields nothing further afterwards.
    pub async fn next(&mut self) -> Result<Option<CommitRecord>, MiningError> {
        if self.remaining == 0 {
            return Ok(None);
        }

        if self.buffer.is_empty() && !self.source_exhausted {
            self.fetch_page().await?;
        }

        let Some(commit) = self.buffer.pop_front() else {
            return Ok(None);
        };
        self.remaining = self.remaining.saturating_sub(1);
        Ok(Some(commit))
    }

    async fn fetch_page(&mut self) -> Result<(), MiningError> {
        let params = ListCommitsParams {
            sha: Some(self.tip.clone()),
            page: self.next_page,
            per_page: self.per_page,
        };

        tracing::debug!(
            repository = %self.repository.full_name(),
            page = params.page,
            per_page = params.per_page,
            "requesting commit page"
        );

        let page = match self.gateway.list_commits(self.repository, &params).await {
            Ok(page) => page,
            Err(error) => {
                self.source_exhausted = true;
                return Err(error);
            }
        };

        let received = page.items.len();
        self.source_exhausted = page.page_info.is_final(received);
        self.next_page = self.next_page.saturating_add(1);
        tracing::debug!(
            page = page.page_info.current_page(),
            received,
            last = self.source_exhausted,
            "received commit page"
        );

        let wanted = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        self.buffer.extend(page.items.into_iter().take(wanted));
        Ok(())
    }
}
