//! Scenario state and shortlist runner for the repository shortlist BDD tests.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use repominer::ranking::write_results;
use repominer::{
    MiningError, OctocrabOrganisationGateway, OrganisationLocator, PersonalAccessToken,
    RepositoryShortlist, ShortlistCriteria,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;
use wiremock::{Mock, MockServer};

use super::runtime::{SharedRuntime, ensure_runtime_and_server};

/// Count of repositories in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RepositoryCount(u32);

impl RepositoryCount {
    pub(crate) const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for RepositoryCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

impl fmt::Display for RepositoryCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct ShortlistState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) organisation: Slot<String>,
    pub(crate) workdir: Slot<TempDir>,
    pub(crate) written: Slot<Vec<String>>,
    pub(crate) error: Slot<MiningError>,
}

impl ShortlistState {
    /// Mounts `mock` on the scenario's server, starting it on first use.
    pub(crate) fn mount(&self, mock: Mock) {
        let runtime = ensure_runtime_and_server(&self.runtime, &self.server)
            .unwrap_or_else(|error| panic!("failed to start mock server: {error}"));
        self.server
            .with_ref(|server| runtime.block_on(mock.mount(server)))
            .unwrap_or_else(|| panic!("mock server not initialised"));
    }

    fn results_path(&self) -> Utf8PathBuf {
        if self.workdir.with_ref(|_| ()).is_none() {
            let dir = TempDir::new()
                .unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"));
            self.workdir.set(dir);
        }
        self.workdir
            .with_ref(|dir| Utf8PathBuf::from_path_buf(dir.path().join("repos-results.txt")))
            .unwrap_or_else(|| panic!("work directory missing"))
            .unwrap_or_else(|path| panic!("non UTF-8 temporary path: {}", path.display()))
    }

    /// Builds the shortlist against the mock server and writes the results
    /// file, returning the names read back from it.
    pub(crate) fn shortlist(&self, take: u32, by_contributors: bool) -> Result<Vec<String>, MiningError> {
        let runtime = self.runtime.get().ok_or_else(|| MiningError::Api {
            message: "runtime not initialised".to_owned(),
        })?;
        let server_url = self
            .server
            .with_ref(MockServer::uri)
            .ok_or_else(|| MiningError::Api {
                message: "mock server URL missing".to_owned(),
            })?;
        let name = self.organisation.get().unwrap_or_else(|| "apache".to_owned());
        let organisation = OrganisationLocator::parse(&format!("{server_url}/{name}"))?;
        let criteria = ShortlistCriteria {
            language: "java".to_owned(),
            take: usize::try_from(take).unwrap_or(usize::MAX),
        };
        let path = self.results_path();

        let names = runtime.block_on(async {
            let token = PersonalAccessToken::new("ghp_example")?;
            let gateway = OctocrabOrganisationGateway::for_token(&token, &organisation)?;
            let builder = RepositoryShortlist::new(&gateway);
            let selected = builder.build(&organisation, &criteria).await?;
            let names: Vec<String> = if by_contributors {
                builder
                    .rank_by_contributors(&organisation, selected)
                    .await?
                    .into_iter()
                    .map(|ranked| ranked.repository.full_name)
                    .collect()
            } else {
                selected
                    .into_iter()
                    .map(|repository| repository.full_name)
                    .collect()
            };
            Ok::<_, MiningError>(names)
        })?;

        write_results(&path, &names)?;
        let written = std::fs::read_to_string(&path).map_err(|error| MiningError::Io {
            message: error.to_string(),
        })?;
        Ok(written.lines().map(str::to_owned).collect())
    }
}
