//! Octocrab implementation of the organisation gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::error::MiningError;
use crate::github::locator::{OrganisationLocator, PersonalAccessToken, RepositoryLocator};
use crate::github::models::{ApiRepository, RepositorySummary};
use crate::github::pagination::MAX_PER_PAGE;

use super::OrganisationGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error_with_rate_limit;

/// Octocrab-backed organisation gateway.
pub struct OctocrabOrganisationGateway {
    client: Octocrab,
}

impl OctocrabOrganisationGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and organisation locator.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::InvalidUrl` when the base URI cannot be parsed or
    /// `MiningError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &OrganisationLocator,
    ) -> Result<Self, MiningError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }

    /// Fetches the first page at `route` and follows `Link` headers until the
    /// listing is exhausted.
    async fn fetch_all<T>(&self, operation: &str, route: String) -> Result<Vec<T>, MiningError>
    where
        T: serde::de::DeserializeOwned,
    {
        let per_page = MAX_PER_PAGE.to_string();
        let query_params = [("per_page", per_page.as_str())];

        let first: Page<T> = match self.client.get(route, Some(&query_params)).await {
            Ok(page) => page,
            Err(error) => {
                return Err(
                    map_octocrab_error_with_rate_limit(&self.client, operation, &error).await,
                );
            }
        };

        match self.client.all_pages(first).await {
            Ok(items) => Ok(items),
            Err(error) => {
                Err(map_octocrab_error_with_rate_limit(&self.client, operation, &error).await)
            }
        }
    }
}

#[async_trait]
impl OrganisationGateway for OctocrabOrganisationGateway {
    async fn list_repositories(
        &self,
        organisation: &OrganisationLocator,
    ) -> Result<Vec<RepositorySummary>, MiningError> {
        tracing::debug!("listing repositories for {}", organisation.name().as_str());
        let repositories: Vec<ApiRepository> = self
            .fetch_all("list organisation repositories", organisation.repos_path())
            .await?;

        Ok(repositories
            .into_iter()
            .map(RepositorySummary::from)
            .collect())
    }

    async fn contributor_count(&self, repository: &RepositoryLocator) -> Result<u64, MiningError> {
        let contributors: Vec<serde_json::Value> = self
            .fetch_all("list contributors", repository.contributors_path())
            .await?;

        u64::try_from(contributors.len()).map_err(|error| MiningError::Api {
            message: format!("contributor count overflow: {error}"),
        })
    }
}
