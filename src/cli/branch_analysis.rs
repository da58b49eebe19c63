//! Branch provenance analysis operation.

use std::io::{self, Write};

use repominer::telemetry::{StderrJsonlTelemetrySink, TelemetrySink};
use repominer::{
    BranchAnalysis, CommitGateway, MinerConfig, MiningError, OctocrabCommitGateway,
    PersonalAccessToken, RepositoryLocator, TerminalState,
};

use super::output::write_report;
use super::progress::ConsoleProgressSink;

/// Analyses the configured branch and prints the report.
///
/// # Errors
///
/// Returns [`MiningError::Configuration`] if required configuration is
/// missing and [`MiningError::NotFound`] when the repository or branch does
/// not exist. Runs halted by a rate limit or another failure still print
/// their partial report and succeed.
pub async fn run(config: &MinerConfig) -> Result<(), MiningError> {
    let mut stdout = io::stdout().lock();
    let telemetry: Box<dyn TelemetrySink> = if config.progress_jsonl {
        Box::new(StderrJsonlTelemetrySink)
    } else {
        Box::new(ConsoleProgressSink::stderr())
    };
    run_with_gateway_builder(
        config,
        OctocrabCommitGateway::for_token,
        telemetry.as_ref(),
        &mut stdout,
    )
    .await
}

/// Analyses the configured branch using a custom gateway builder.
///
/// This function is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &MinerConfig,
    build_gateway: F,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), MiningError>
where
    G: CommitGateway,
    F: FnOnce(&PersonalAccessToken, &RepositoryLocator) -> Result<G, MiningError>,
    W: Write,
{
    let target = config.require_branch_target()?;
    let cap = config.commit_cap()?;
    let settings = config.analysis_settings()?;
    let token = config.resolve_token()?;

    let gateway = build_gateway(&token, target.repository())?;
    let report = BranchAnalysis::new(&gateway, settings)
        .with_telemetry(telemetry)
        .analyze_branch(&target, cap)
        .await;

    if let TerminalState::NotFound { message } = &report.terminal {
        return Err(MiningError::NotFound {
            message: message.clone(),
        });
    }
    write_report(writer, &report)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use repominer::github::{CommitPage, CommitRecord, ListCommitsParams, PageInfo, PullRequestRef};
    use repominer::telemetry::NoopTelemetrySink;
    use repominer::{
        BranchReference, CommitGateway, CommitSha, MinerConfig, MiningError, RepositoryLocator,
    };

    use super::run_with_gateway_builder;

    /// Serves a fixed history; commits listed in `merged` belong to a pull
    /// request.
    #[derive(Clone, Default)]
    struct StubGateway {
        tip: Option<CommitSha>,
        history: Vec<CommitRecord>,
        merged: Vec<CommitSha>,
        requested_pages: Arc<Mutex<Vec<ListCommitsParams>>>,
    }

    #[async_trait]
    impl CommitGateway for StubGateway {
        async fn resolve_branch(&self, branch: &BranchReference) -> Result<CommitSha, MiningError> {
            self.tip.clone().ok_or_else(|| MiningError::NotFound {
                message: format!("no branch {branch}"),
            })
        }

        async fn list_commits(
            &self,
            _repository: &RepositoryLocator,
            params: &ListCommitsParams,
        ) -> Result<CommitPage, MiningError> {
            self.requested_pages
                .lock()
                .expect("pages mutex should be available")
                .push(params.clone());
            Ok(CommitPage {
                items: self.history.clone(),
                page_info: PageInfo::builder(params.page, params.per_page).build(),
            })
        }

        async fn pull_requests_for_commit(
            &self,
            _repository: &RepositoryLocator,
            sha: &CommitSha,
        ) -> Result<Vec<PullRequestRef>, MiningError> {
            Ok(if self.merged.contains(sha) {
                vec![PullRequestRef {
                    number: 7,
                    ..Default::default()
                }]
            } else {
                Vec::new()
            })
        }
    }

    fn commit(sha: &str) -> CommitRecord {
        CommitRecord {
            sha: CommitSha::new(sha),
            message: format!("commit {sha}"),
            author: None,
        }
    }

    fn config() -> MinerConfig {
        MinerConfig {
            token: Some("ghp_example".to_owned()),
            owner: Some("apache".to_owned()),
            repo: Some("hadoop".to_owned()),
            branch: Some("trunk".to_owned()),
            max_commits: 10,
            page_size: 5,
            pacing_millis: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn prints_report_for_configured_branch() {
        let requested_pages = Arc::new(Mutex::new(Vec::new()));
        let gateway = StubGateway {
            tip: Some(CommitSha::new("aaaaaaa1")),
            history: vec![commit("aaaaaaa1"), commit("bbbbbbb2")],
            merged: vec![CommitSha::new("bbbbbbb2")],
            requested_pages: Arc::clone(&requested_pages),
        };

        let mut buffer = Vec::new();
        run_with_gateway_builder(
            &config(),
            move |token, locator| {
                assert_eq!(token.value(), "ghp_example");
                assert_eq!(locator.full_name(), "apache/hadoop");
                Ok(gateway)
            },
            &NoopTelemetrySink,
            &mut buffer,
        )
        .await
        .expect("analysis should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(
            output.contains("Results for apache/hadoop@trunk:"),
            "missing header: {output}"
        );
        assert!(
            output.contains("Percentage of direct commits: 50.00%"),
            "missing percentage: {output}"
        );

        let pages = requested_pages
            .lock()
            .expect("pages mutex should be available")
            .clone();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.first().map(|params| params.per_page), Some(5));
        assert_eq!(
            pages.first().and_then(|params| params.sha.clone()),
            Some(CommitSha::new("aaaaaaa1"))
        );
    }

    #[tokio::test]
    async fn missing_branch_is_reported_as_error() {
        let mut buffer = Vec::new();
        let result = run_with_gateway_builder(
            &config(),
            |_token, _locator| Ok(StubGateway::default()),
            &NoopTelemetrySink,
            &mut buffer,
        )
        .await;

        assert!(
            matches!(result, Err(MiningError::NotFound { .. })),
            "expected NotFound, got {result:?}"
        );
        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn zero_commit_cap_is_rejected_before_any_call() {
        let config = MinerConfig {
            max_commits: 0,
            ..config()
        };

        let mut buffer = Vec::new();
        let result = run_with_gateway_builder(
            &config,
            |_token, _locator| -> Result<StubGateway, MiningError> {
                panic!("gateway should not be built for an invalid cap")
            },
            &NoopTelemetrySink,
            &mut buffer,
        )
        .await;

        assert_eq!(result, Err(MiningError::InvalidCommitCap));
    }
}
