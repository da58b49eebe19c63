//! Octocrab implementation of the commit gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::branch::{BranchReference, CommitSha};
use crate::github::error::MiningError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{
    ApiCommit, ApiGitRef, ApiPullRequestRef, CommitRecord, PullRequestRef,
};
use crate::github::pagination::PageInfo;

use super::CommitGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error_with_rate_limit;
use super::types::{CommitPage, ListCommitsParams};

/// Octocrab-backed commit gateway.
pub struct OctocrabCommitGateway {
    client: Octocrab,
}

impl OctocrabCommitGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::InvalidUrl` when the base URI cannot be parsed or
    /// `MiningError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, MiningError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }

    async fn map_error(&self, operation: &str, error: &octocrab::Error) -> MiningError {
        map_octocrab_error_with_rate_limit(&self.client, operation, error).await
    }
}

#[async_trait]
impl CommitGateway for OctocrabCommitGateway {
    async fn resolve_branch(&self, branch: &BranchReference) -> Result<CommitSha, MiningError> {
        tracing::debug!("resolving branch {branch}");
        let reference: ApiGitRef = match self.client.get(branch.ref_path(), None::<&()>).await {
            Ok(reference) => reference,
            Err(error) => return Err(self.map_error("resolve branch", &error).await),
        };

        CommitSha::from_api(reference.object.sha)
    }

    async fn list_commits(
        &self,
        repository: &RepositoryLocator,
        params: &ListCommitsParams,
    ) -> Result<CommitPage, MiningError> {
        params.validate()?;

        let page_str = params.page.to_string();
        let per_page_str = params.per_page.to_string();
        let mut query_params = vec![
            ("page", page_str.as_str()),
            ("per_page", per_page_str.as_str()),
        ];
        if let Some(sha) = params.sha.as_ref() {
            query_params.push(("sha", sha.as_str()));
        }

        tracing::debug!(
            "listing commits for {} page {} ({} per page)",
            repository.full_name(),
            params.page,
            params.per_page
        );
        let page_result: Page<ApiCommit> = match self
            .client
            .get(repository.commits_path(), Some(&query_params))
            .await
        {
            Ok(page_result) => page_result,
            Err(error) => return Err(self.map_error("list commits", &error).await),
        };

        let has_next = page_result.next.is_some();

        let items = page_result
            .items
            .into_iter()
            .map(CommitRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let page_info = PageInfo::builder(params.page, params.per_page)
            .has_next(has_next)
            .build();

        Ok(CommitPage { items, page_info })
    }

    async fn pull_requests_for_commit(
        &self,
        repository: &RepositoryLocator,
        sha: &CommitSha,
    ) -> Result<Vec<PullRequestRef>, MiningError> {
        let pulls: Vec<ApiPullRequestRef> = match self
            .client
            .get(repository.commit_pulls_path(sha.as_str()), None::<&()>)
            .await
        {
            Ok(pulls) => pulls,
            Err(error) => {
                return Err(self
                    .map_error(&format!("pull requests for {}", sha.short()), &error)
                    .await);
            }
        };

        Ok(pulls.into_iter().map(PullRequestRef::from).collect())
    }
}
