//! Gateways for reading repository history through Octocrab.
//!
//! Trait-based gateways keep the mining pipeline independent of HTTP. The
//! Octocrab implementations translate GitHub responses into domain models and
//! map failures into [`MiningError`] variants the pipeline can match on.

mod client;
mod commits;
mod error_mapping;
mod organisation;
mod types;

pub use commits::OctocrabCommitGateway;
pub use organisation::OctocrabOrganisationGateway;
pub use types::{CommitPage, ListCommitsParams};

use async_trait::async_trait;

use crate::github::branch::{BranchReference, CommitSha};
use crate::github::error::MiningError;
use crate::github::locator::{OrganisationLocator, RepositoryLocator};
use crate::github::models::{PullRequestRef, RepositorySummary};

/// Gateway for branch resolution and commit history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommitGateway: Send + Sync {
    /// Resolve a branch to the hash of its tip commit.
    async fn resolve_branch(&self, branch: &BranchReference) -> Result<CommitSha, MiningError>;

    /// List one page of commits, most recent first.
    async fn list_commits(
        &self,
        repository: &RepositoryLocator,
        params: &ListCommitsParams,
    ) -> Result<CommitPage, MiningError>;

    /// List the pull requests associated with a commit.
    async fn pull_requests_for_commit(
        &self,
        repository: &RepositoryLocator,
        sha: &CommitSha,
    ) -> Result<Vec<PullRequestRef>, MiningError>;
}

/// Gateway for organisation-wide repository metadata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganisationGateway: Send + Sync {
    /// List every repository owned by the organisation.
    async fn list_repositories(
        &self,
        organisation: &OrganisationLocator,
    ) -> Result<Vec<RepositorySummary>, MiningError>;

    /// Count the contributors of a repository.
    async fn contributor_count(&self, repository: &RepositoryLocator) -> Result<u64, MiningError>;
}
