//! Data models representing commits, pull request references and
//! repositories returned by the GitHub API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into public domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::branch::CommitSha;
use super::error::MiningError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// A commit reachable from a branch tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit hash.
    pub sha: CommitSha,
    /// Full commit message.
    pub message: String,
    /// Author name as recorded in the commit.
    pub author: Option<String>,
}

impl CommitRecord {
    /// Returns the first line of the commit message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// A pull request associated with a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// State (e.g. open, closed).
    pub state: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

/// Repository attributes used when shortlisting an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySummary {
    /// Owner login.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Whether the repository is archived.
    pub archived: bool,
    /// Primary language detected by GitHub.
    pub language: Option<String>,
    /// Repository topics.
    pub topics: Vec<String>,
    /// Repository size in kilobytes.
    pub size: u64,
    /// Star count.
    pub stargazers_count: u64,
    /// Subscriber (watcher) count.
    pub subscribers_count: u64,
    /// Fork count.
    pub forks_count: u64,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiGitRef {
    pub(crate) object: ApiGitObject,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiGitObject {
    pub(crate) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommit {
    pub(crate) sha: String,
    pub(crate) commit: ApiCommitDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitDetails {
    #[serde(default)]
    pub(crate) message: String,
    pub(crate) author: Option<ApiCommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitAuthor {
    pub(crate) name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestRef {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRepository {
    pub(crate) name: String,
    pub(crate) full_name: Option<String>,
    pub(crate) owner: Option<ApiOwner>,
    #[serde(default)]
    pub(crate) archived: bool,
    pub(crate) language: Option<String>,
    #[serde(default)]
    pub(crate) topics: Vec<String>,
    #[serde(default)]
    pub(crate) size: u64,
    #[serde(default)]
    pub(crate) stargazers_count: u64,
    pub(crate) subscribers_count: Option<u64>,
    #[serde(default)]
    pub(crate) watchers_count: u64,
    #[serde(default)]
    pub(crate) forks_count: u64,
    pub(crate) created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiOwner {
    pub(crate) login: String,
}

impl TryFrom<ApiCommit> for CommitRecord {
    type Error = MiningError;

    fn try_from(value: ApiCommit) -> Result<Self, Self::Error> {
        Ok(Self {
            sha: CommitSha::from_api(value.sha)?,
            message: value.commit.message,
            author: value.commit.author.and_then(|author| author.name),
        })
    }
}

impl From<ApiPullRequestRef> for PullRequestRef {
    fn from(value: ApiPullRequestRef) -> Self {
        Self {
            number: value.number,
            title: value.title,
            state: value.state,
            html_url: value.html_url,
        }
    }
}

impl From<ApiRepository> for RepositorySummary {
    fn from(value: ApiRepository) -> Self {
        let owner = value.owner.map(|owner| owner.login).unwrap_or_default();
        let full_name = value
            .full_name
            .unwrap_or_else(|| format!("{owner}/{}", value.name));
        Self {
            owner,
            name: value.name,
            full_name,
            archived: value.archived,
            language: value.language,
            topics: value.topics,
            size: value.size,
            stargazers_count: value.stargazers_count,
            subscribers_count: value.subscribers_count.unwrap_or(value.watchers_count),
            forks_count: value.forks_count,
            created_at: value.created_at,
        }
    }
}
