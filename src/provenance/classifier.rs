//! Labels individual commits from their pull request associations.

use crate::github::gateway::CommitGateway;
use crate::github::locator::RepositoryLocator;
use crate::github::models::CommitRecord;

use super::governor::{CallFailure, RateGovernor};
use super::run::ProvenanceLabel;

/// Classifies commits one at a time, pacing each lookup.
#[derive(Debug)]
pub struct CommitClassifier<'run, G: CommitGateway + ?Sized> {
    gateway: &'run G,
    repository: &'run RepositoryLocator,
    governor: RateGovernor,
}

impl<'run, G: CommitGateway + ?Sized> CommitClassifier<'run, G> {
    /// Creates a classifier for commits of `repository`.
    #[must_use]
    pub const fn new(
        gateway: &'run G,
        repository: &'run RepositoryLocator,
        governor: RateGovernor,
    ) -> Self {
        Self {
            gateway,
            repository,
            governor,
        }
    }

    /// Labels a commit.
    ///
    /// A commit with at least one associated pull request is
    /// [`ProvenanceLabel::PullRequestMerged`]; otherwise it is
    /// [`ProvenanceLabel::Direct`].
    ///
    /// # Errors
    ///
    /// Returns [`CallFailure::RateLimited`] when GitHub's rate limit refused
    /// the lookup and [`CallFailure::Transient`] for any other failure.
    pub async fn classify(&mut self, commit: &CommitRecord) -> Result<ProvenanceLabel, CallFailure> {
        self.governor.pace().await;
        let associations = self
            .gateway
            .pull_requests_for_commit(self.repository, &commit.sha)
            .await
            .map_err(RateGovernor::classify)?;

        tracing::debug!(
            sha = commit.sha.short(),
            associations = associations.len(),
            "classified commit"
        );
        Ok(ProvenanceLabel::from_associations(&associations))
    }
}
