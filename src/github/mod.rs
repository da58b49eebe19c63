//! GitHub access for repository mining.
//!
//! This module wraps Octocrab to resolve branches, page through commit
//! history, look up the pull requests associated with each commit, and list
//! organisation repositories. Errors are mapped into [`MiningError`] variants
//! so that callers can tell rate limits and missing resources apart from
//! ordinary API failures without exposing Octocrab internals.

pub mod branch;
pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use branch::{BranchName, BranchReference, CommitSha};
pub use error::MiningError;
pub use gateway::{
    CommitGateway, CommitPage, ListCommitsParams, OctocrabCommitGateway,
    OctocrabOrganisationGateway, OrganisationGateway,
};
pub use locator::{
    OrganisationLocator, PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{CommitRecord, PullRequestRef, RepositorySummary};
pub use pagination::PageInfo;
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::{MockCommitGateway, MockOrganisationGateway};

#[cfg(test)]
mod tests;
