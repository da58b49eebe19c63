//! URL parsing and identity wrappers for repositories and organisations.

use url::Url;

use super::error::MiningError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when the value is blank.
    pub fn new(value: &str) -> Result<Self, MiningError> {
        non_blank(value).map(Self)
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the repository name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when the value is blank.
    pub fn new(value: &str) -> Result<Self, MiningError> {
        non_blank(value).map(Self)
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, MiningError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MiningError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

fn non_blank(value: &str) -> Result<String, MiningError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MiningError::MissingPathSegments);
    }
    Ok(trimmed.to_owned())
}

fn public_api_base() -> Result<Url, MiningError> {
    Url::parse("https://api.github.com").map_err(|error| MiningError::InvalidUrl(error.to_string()))
}

/// Derives the GitHub API base URL from a parsed web URL.
///
/// `github.com` maps to the public API; any other host is treated as GitHub
/// Enterprise and served from `/api/v3` on the same authority.
fn derive_api_base(parsed: &Url) -> Result<Url, MiningError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| MiningError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return public_api_base();
    }

    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{}://{authority}", parsed.scheme()))
        .map_err(|error| MiningError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(parsed.port())
        .map_err(|()| MiningError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

fn parse_web_url(input: &str) -> Result<Url, MiningError> {
    Url::parse(input).map_err(|error| MiningError::InvalidUrl(error.to_string()))
}

/// Parsed repository URL with derived API base.
///
/// # Example
///
/// ```
/// use repominer::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/apache/hadoop")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "apache");
/// assert_eq!(locator.repository().as_str(), "hadoop");
/// assert_eq!(locator.full_name(), "apache/hadoop");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings.
    ///
    /// Uses `github.com` as the default host.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, MiningError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;

        Ok(Self {
            api_base: public_api_base()?,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses a repository URL in the form `https://<host>/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::InvalidUrl` when parsing fails or
    /// `MissingPathSegments` when the path lacks an owner and repository.
    pub fn parse(input: &str) -> Result<Self, MiningError> {
        let parsed = parse_web_url(input)?;

        let mut segments = parsed
            .path_segments()
            .ok_or(MiningError::MissingPathSegments)?;
        let owner_segment = segments.next().ok_or(MiningError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(MiningError::MissingPathSegments)?;

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment.trim_end_matches(".git"))?;
        let api_base = derive_api_base(&parsed)?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the `owner/name` form used in reports and results files.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    fn repo_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn branch_ref_path(&self, branch: &str) -> String {
        format!("{}/git/ref/heads/{branch}", self.repo_path())
    }

    pub(crate) fn commits_path(&self) -> String {
        format!("{}/commits", self.repo_path())
    }

    pub(crate) fn commit_pulls_path(&self, sha: &str) -> String {
        format!("{}/commits/{sha}/pulls", self.repo_path())
    }

    pub(crate) fn contributors_path(&self) -> String {
        format!("{}/contributors", self.repo_path())
    }
}

/// Parsed organisation URL with derived API base.
///
/// # Example
///
/// ```
/// use repominer::OrganisationLocator;
///
/// let locator = OrganisationLocator::from_name("apache").expect("valid organisation");
/// assert_eq!(locator.name().as_str(), "apache");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganisationLocator {
    api_base: Url,
    name: RepositoryOwner,
}

impl OrganisationLocator {
    /// Creates an organisation locator on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when the name is empty.
    pub fn from_name(name: &str) -> Result<Self, MiningError> {
        Ok(Self {
            api_base: public_api_base()?,
            name: RepositoryOwner::new(name)?,
        })
    }

    /// Parses an organisation URL in the form `https://<host>/<organisation>`.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::InvalidUrl` when parsing fails or
    /// `MissingPathSegments` when the organisation segment is absent.
    pub fn parse(input: &str) -> Result<Self, MiningError> {
        let parsed = parse_web_url(input)?;
        let name_segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .ok_or(MiningError::MissingPathSegments)?;

        Ok(Self {
            name: RepositoryOwner::new(name_segment)?,
            api_base: derive_api_base(&parsed)?,
        })
    }

    /// API base URL derived from the organisation host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Organisation login.
    #[must_use]
    pub const fn name(&self) -> &RepositoryOwner {
        &self.name
    }

    /// Builds a locator for a repository owned by another account on the
    /// same API host.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::MissingPathSegments` when owner or repo is empty.
    pub fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryLocator, MiningError> {
        Ok(RepositoryLocator {
            api_base: self.api_base.clone(),
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    pub(crate) fn repos_path(&self) -> String {
        format!("/orgs/{}/repos", self.name.as_str())
    }
}
