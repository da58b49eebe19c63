//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.repominer.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REPOMINER_OWNER`, `REPOMINER_TOKEN`, or
//!    `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--owner`/`-o`, `--token`/`-t`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! owner = "apache"
//! repo = "hadoop"
//! branch = "trunk"
//! max_commits = 500
//! pacing_millis = 250
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::branch::BranchReference;
use crate::github::error::MiningError;
use crate::github::locator::{OrganisationLocator, PersonalAccessToken, RepositoryLocator};
use crate::github::pagination::MAX_PER_PAGE;
use crate::provenance::{AnalysisSettings, CommitCap};
use crate::ranking::ShortlistCriteria;

/// Operation mode determined by the configured targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Classify the commits of one branch.
    BranchAnalysis,
    /// Shortlist an organisation's repositories.
    RepositoryShortlist,
    /// Neither target is configured.
    Unconfigured,
}

const DEFAULT_MAX_COMMITS: u32 = 1000;
const DEFAULT_PAGE_SIZE: u8 = MAX_PER_PAGE;
const DEFAULT_PACING_MILLIS: u64 = 100;
const DEFAULT_LANGUAGE: &str = "Java";
const DEFAULT_TAKE: usize = 30;
const DEFAULT_RESULTS_PATH: &str = "repos-results.txt";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `REPOMINER_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `REPOMINER_OWNER`, `REPOMINER_REPO`, `REPOMINER_BRANCH`: Analysis target
/// - `REPOMINER_ORGANISATION` or `--organisation`: Organisation to shortlist
/// - `REPOMINER_GITHUB_URL` or `--github-url`: GitHub Enterprise web URL
///
/// # Example
///
/// ```no_run
/// use repominer::MinerConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = MinerConfig::load().expect("failed to load configuration");
/// let target = config.require_branch_target().expect("branch target required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPOMINER",
    discovery(
        dotfile_name = ".repominer.toml",
        config_file_name = "repominer.toml",
        app_name = "repominer"
    )
)]
pub struct MinerConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REPOMINER_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Web URL of a GitHub Enterprise instance (e.g.
    /// `https://github.example.com`). Defaults to `github.com`.
    #[ortho_config(cli_short = 'g')]
    pub github_url: Option<String>,

    /// Repository owner (e.g., "apache").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hadoop").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Branch to analyse (e.g., "trunk").
    #[ortho_config(cli_short = 'b')]
    pub branch: Option<String>,

    /// Maximum number of commits to classify. Defaults to 1000.
    #[ortho_config(cli_short = 'm')]
    pub max_commits: u32,

    /// Commits requested per page, between 1 and 100. Defaults to 100.
    #[ortho_config()]
    pub page_size: u8,

    /// Minimum delay between pull request lookups, in milliseconds.
    /// Defaults to 100.
    #[ortho_config()]
    pub pacing_millis: u64,

    /// Organisation whose repositories are shortlisted.
    #[ortho_config()]
    pub organisation: Option<String>,

    /// Language matched against repository languages and topics.
    #[ortho_config(cli_short = 'l')]
    pub language: String,

    /// Number of repositories to shortlist. Defaults to 30.
    #[ortho_config()]
    pub take: usize,

    /// File receiving the shortlisted repository names.
    #[ortho_config()]
    pub results_path: String,

    /// Re-ranks the shortlist by contributor count.
    ///
    /// `ortho_config` does not load boolean values from the environment, so
    /// this is set through the CLI or a configuration file.
    #[ortho_config()]
    pub rank_by_contributors: bool,

    /// Emits progress events on stderr as JSON lines instead of a progress
    /// counter.
    #[ortho_config()]
    pub progress_jsonl: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            token: None,
            github_url: None,
            owner: None,
            repo: None,
            branch: None,
            max_commits: DEFAULT_MAX_COMMITS,
            page_size: DEFAULT_PAGE_SIZE,
            pacing_millis: DEFAULT_PACING_MILLIS,
            organisation: None,
            language: DEFAULT_LANGUAGE.to_owned(),
            take: DEFAULT_TAKE,
            results_path: DEFAULT_RESULTS_PATH.to_owned(),
            rank_by_contributors: false,
            progress_jsonl: false,
        }
    }
}

impl MinerConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, MiningError> {
        let raw = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(MiningError::MissingToken)?;
        PersonalAccessToken::new(raw)
    }

    /// Determines the operation mode based on the configured targets.
    ///
    /// Any branch field selects branch analysis, so an incomplete target is
    /// reported field by field by [`Self::require_branch_target`]. Combining
    /// one with an organisation is rejected by [`Self::validate`].
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.owner.is_some() || self.repo.is_some() || self.branch.is_some() {
            OperationMode::BranchAnalysis
        } else if self.organisation.is_some() {
            OperationMode::RepositoryShortlist
        } else {
            OperationMode::Unconfigured
        }
    }

    /// Builds the branch to analyse.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::Configuration`] when owner, repo, or branch is
    /// missing, and the locator's validation errors otherwise.
    pub fn require_branch_target(&self) -> Result<BranchReference, MiningError> {
        let (owner, repo, branch) = match (&self.owner, &self.repo, &self.branch) {
            (Some(owner), Some(repo), Some(branch)) => (owner, repo, branch),
            (None, _, _) => return Err(missing("repository owner is required (use --owner or -o)")),
            (_, None, _) => return Err(missing("repository name is required (use --repo or -r)")),
            (_, _, None) => return Err(missing("branch is required (use --branch or -b)")),
        };

        let repository = match self.github_url.as_deref() {
            Some(base) => RepositoryLocator::parse(&format!(
                "{}/{}/{}",
                base.trim_end_matches('/'),
                owner.trim(),
                repo.trim()
            ))?,
            None => RepositoryLocator::from_owner_repo(owner, repo)?,
        };
        BranchReference::new(repository, branch)
    }

    /// Builds the organisation to shortlist.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::Configuration`] when no organisation is set.
    pub fn require_organisation(&self) -> Result<OrganisationLocator, MiningError> {
        let name = self
            .organisation
            .as_deref()
            .ok_or_else(|| missing("organisation is required (use --organisation)"))?;
        self.github_url.as_deref().map_or_else(
            || OrganisationLocator::from_name(name),
            |base| {
                OrganisationLocator::parse(&format!("{}/{}", base.trim_end_matches('/'), name.trim()))
            },
        )
    }

    /// Validated commit cap.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::InvalidCommitCap`] when `max_commits` is zero.
    pub const fn commit_cap(&self) -> Result<CommitCap, MiningError> {
        CommitCap::new(self.max_commits)
    }

    /// Page size and pacing for a branch analysis.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::Configuration`] when `page_size` falls outside
    /// `1..=100`.
    pub fn analysis_settings(&self) -> Result<AnalysisSettings, MiningError> {
        if self.page_size == 0 || self.page_size > MAX_PER_PAGE {
            return Err(MiningError::Configuration {
                message: format!("page_size must be between 1 and {MAX_PER_PAGE}"),
            });
        }
        Ok(AnalysisSettings {
            page_size: self.page_size,
            pacing: Duration::from_millis(self.pacing_millis),
        })
    }

    /// Filter and size of the repository shortlist.
    #[must_use]
    pub fn shortlist_criteria(&self) -> ShortlistCriteria {
        ShortlistCriteria {
            language: self.language.clone(),
            take: self.take,
        }
    }

    /// Destination of the shortlist.
    #[must_use]
    pub fn results_path(&self) -> &Utf8Path {
        Utf8Path::new(&self.results_path)
    }

    /// Rejects configurations that target a branch and an organisation at
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::Configuration`] when both targets are set.
    pub fn validate(&self) -> Result<(), MiningError> {
        let targets_branch = self.owner.is_some() || self.repo.is_some() || self.branch.is_some();
        if targets_branch && self.organisation.is_some() {
            return Err(MiningError::Configuration {
                message: "--organisation cannot be combined with --owner, --repo, or --branch"
                    .to_owned(),
            });
        }
        Ok(())
    }
}

fn missing(message: &str) -> MiningError {
    MiningError::Configuration {
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests;
