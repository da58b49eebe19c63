//! Scenario state and analysis runner for the branch analysis BDD tests.

use std::time::Duration;

use repominer::{
    AnalysisReport, AnalysisSettings, BranchAnalysis, BranchReference, CommitCap, MiningError,
    OctocrabCommitGateway, PersonalAccessToken, RepositoryLocator,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::{Mock, MockServer};

use super::runtime::{SharedRuntime, ensure_runtime_and_server};

#[derive(ScenarioState, Default)]
pub(crate) struct AnalysisState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) branch: Slot<String>,
    pub(crate) report: Slot<AnalysisReport>,
}

impl AnalysisState {
    /// Mounts `mock` on the scenario's server, starting it on first use.
    pub(crate) fn mount(&self, mock: Mock) {
        let runtime = ensure_runtime_and_server(&self.runtime, &self.server)
            .unwrap_or_else(|error| panic!("failed to start mock server: {error}"));
        self.server
            .with_ref(|server| runtime.block_on(mock.mount(server)))
            .unwrap_or_else(|| panic!("mock server not initialised"));
    }

    /// Runs the analysis against the mock server without pacing.
    pub(crate) fn analyse(&self, cap: u32) -> Result<AnalysisReport, MiningError> {
        let runtime = self.runtime.get().ok_or_else(|| MiningError::Api {
            message: "runtime not initialised".to_owned(),
        })?;
        let server_url = self
            .server
            .with_ref(MockServer::uri)
            .ok_or_else(|| MiningError::Api {
                message: "mock server URL missing".to_owned(),
            })?;
        let branch = self.branch.get().unwrap_or_else(|| "trunk".to_owned());

        let repository = RepositoryLocator::parse(&format!("{server_url}/apache/hadoop"))?;
        let target = BranchReference::new(repository, &branch)?;
        let cap = CommitCap::new(cap)?;
        let settings = AnalysisSettings {
            page_size: 100,
            pacing: Duration::ZERO,
        };

        runtime.block_on(async {
            let token = PersonalAccessToken::new("ghp_example")?;
            let gateway = OctocrabCommitGateway::for_token(&token, target.repository())?;
            let report = BranchAnalysis::new(&gateway, settings)
                .analyze_branch(&target, cap)
                .await;
            Ok::<_, MiningError>(report)
        })
    }
}
