//! Shortlisting an organisation's repositories for mining.
//!
//! Repositories are filtered to unarchived projects in a language of
//! interest, ordered by size and popularity, and optionally re-ranked by how
//! many people contribute to them.

mod results_file;

pub use results_file::write_results;

use chrono::{DateTime, Utc};

use crate::github::error::MiningError;
use crate::github::gateway::OrganisationGateway;
use crate::github::locator::OrganisationLocator;
use crate::github::models::RepositorySummary;

/// Filter and size of a shortlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlistCriteria {
    /// Language matched against the primary language or the topics.
    pub language: String,
    /// Number of repositories to keep.
    pub take: usize,
}

impl ShortlistCriteria {
    /// Returns true when `repository` is unarchived and written in, or
    /// tagged with, the configured language. Comparison ignores case.
    #[must_use]
    pub fn accepts(&self, repository: &RepositorySummary) -> bool {
        if repository.archived {
            return false;
        }
        let wanted = self.language.trim();
        let language_matches = repository
            .language
            .as_deref()
            .is_some_and(|language| language.eq_ignore_ascii_case(wanted));
        language_matches
            || repository
                .topics
                .iter()
                .any(|topic| topic.eq_ignore_ascii_case(wanted))
    }
}

/// A shortlisted repository with its contributor count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRepository {
    /// Repository metadata.
    pub repository: RepositorySummary,
    /// Number of contributors GitHub reports.
    pub contributors: u64,
}

/// Filters, orders, and truncates `repositories`.
///
/// Ordering is by size, stars, subscribers, and forks (all descending), then
/// creation date (oldest first) and full name.
#[must_use]
pub fn shortlist(
    repositories: Vec<RepositorySummary>,
    criteria: &ShortlistCriteria,
) -> Vec<RepositorySummary> {
    let mut selected: Vec<_> = repositories
        .into_iter()
        .filter(|repository| criteria.accepts(repository))
        .collect();
    selected.sort_by(|left, right| {
        right
            .size
            .cmp(&left.size)
            .then_with(|| right.stargazers_count.cmp(&left.stargazers_count))
            .then_with(|| right.subscribers_count.cmp(&left.subscribers_count))
            .then_with(|| right.forks_count.cmp(&left.forks_count))
            .then_with(|| created_order(left).cmp(&created_order(right)))
            .then_with(|| left.full_name.cmp(&right.full_name))
    });
    selected.truncate(criteria.take);
    selected
}

/// Repositories with a known creation date sort before those without one.
fn created_order(repository: &RepositorySummary) -> (bool, Option<DateTime<Utc>>) {
    (repository.created_at.is_none(), repository.created_at)
}

/// Orders repositories by contributor count, most first, then by full name.
#[must_use]
pub fn rank_by_contributors(mut ranked: Vec<RankedRepository>) -> Vec<RankedRepository> {
    ranked.sort_by(|left, right| {
        right
            .contributors
            .cmp(&left.contributors)
            .then_with(|| left.repository.full_name.cmp(&right.repository.full_name))
    });
    ranked
}

/// Builds shortlists through an organisation gateway.
pub struct RepositoryShortlist<'client, G: OrganisationGateway + ?Sized> {
    gateway: &'client G,
}

impl<'client, G: OrganisationGateway + ?Sized> RepositoryShortlist<'client, G> {
    /// Creates a shortlist builder backed by `gateway`.
    #[must_use]
    pub const fn new(gateway: &'client G) -> Self {
        Self { gateway }
    }

    /// Lists the organisation's repositories and applies [`shortlist`].
    ///
    /// # Errors
    ///
    /// Propagates gateway failures such as [`MiningError::NotFound`] for an
    /// unknown organisation.
    pub async fn build(
        &self,
        organisation: &OrganisationLocator,
        criteria: &ShortlistCriteria,
    ) -> Result<Vec<RepositorySummary>, MiningError> {
        let repositories = self.gateway.list_repositories(organisation).await?;
        tracing::debug!(
            organisation = organisation.name().as_str(),
            listed = repositories.len(),
            "listed organisation repositories"
        );
        Ok(shortlist(repositories, criteria))
    }

    /// Looks up contributor counts and re-ranks the shortlist by them.
    ///
    /// # Errors
    ///
    /// Returns the first contributor lookup failure.
    pub async fn rank_by_contributors(
        &self,
        organisation: &OrganisationLocator,
        repositories: Vec<RepositorySummary>,
    ) -> Result<Vec<RankedRepository>, MiningError> {
        let mut ranked = Vec::with_capacity(repositories.len());
        for repository in repositories {
            let locator = organisation.repository(&repository.owner, &repository.name)?;
            let contributors = self.gateway.contributor_count(&locator).await?;
            ranked.push(RankedRepository {
                repository,
                contributors,
            });
        }
        Ok(rank_by_contributors(ranked))
    }
}
