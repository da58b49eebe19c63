//! Branch and commit identifiers.

use std::fmt;

use super::error::MiningError;
use super::locator::RepositoryLocator;

/// Branch name wrapper.
///
/// Accepts either a bare name (`trunk`) or a fully qualified head reference
/// (`refs/heads/trunk`); the stored value is always the bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(String);

impl BranchName {
    /// Validates and normalises a branch name.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when the name is blank.
    pub fn new(value: &str) -> Result<Self, MiningError> {
        let trimmed = value.trim();
        let bare = trimmed.strip_prefix("refs/heads/").unwrap_or(trimmed);
        if bare.is_empty() {
            return Err(MiningError::MissingPathSegments);
        }
        Ok(Self(bare.to_owned()))
    }

    /// Borrow the branch name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Content-addressed commit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    /// Wraps a commit hash.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Wraps a hash reported by GitHub, rejecting blank values.
    pub(crate) fn from_api(value: String) -> Result<Self, MiningError> {
        if value.trim().is_empty() {
            return Err(MiningError::Api {
                message: "GitHub returned an empty commit hash".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Borrow the full hash.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the conventional seven character abbreviation.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named branch of one repository.
///
/// # Example
///
/// ```
/// use repominer::{BranchReference, RepositoryLocator};
///
/// let repository = RepositoryLocator::from_owner_repo("apache", "hadoop")
///     .expect("valid repository");
/// let branch = BranchReference::new(repository, "trunk").expect("valid branch");
/// assert_eq!(branch.to_string(), "apache/hadoop@trunk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchReference {
    repository: RepositoryLocator,
    branch: BranchName,
}

impl BranchReference {
    /// Creates a branch reference within the given repository.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when the branch is blank.
    pub fn new(repository: RepositoryLocator, branch: &str) -> Result<Self, MiningError> {
        Ok(Self {
            repository,
            branch: BranchName::new(branch)?,
        })
    }

    /// Repository hosting the branch.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Branch name.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub(crate) fn ref_path(&self) -> String {
        self.repository.branch_ref_path(self.branch.as_str())
    }
}

impl fmt::Display for BranchReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}",
            self.repository.full_name(),
            self.branch.as_str()
        )
    }
}
