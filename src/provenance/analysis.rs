//! Entry point for analysing the provenance of a branch's history.

use std::time::Duration;

use crate::github::branch::BranchReference;
use crate::github::error::MiningError;
use crate::github::gateway::CommitGateway;
use crate::github::models::CommitRecord;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::classifier::CommitClassifier;
use super::governor::{CallFailure, RateGovernor};
use super::pager::CommitPager;
use super::report::AnalysisReport;
use super::run::{AnalysisRun, CommitCap, CommitOutcome, CompletionReason, TerminalState};

/// Tuning for a branch analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Commits requested per page (GitHub caps this at 100).
    pub page_size: u8,
    /// Minimum delay between consecutive association lookups.
    pub pacing: Duration,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            page_size: 100,
            pacing: Duration::from_millis(100),
        }
    }
}

/// Analyses how commits reached a branch.
///
/// Walks the history behind the branch tip, newest first, labelling each
/// commit as pushed directly or merged through a pull request. The walk stops
/// at the commit cap, at the end of history, or at the first rate limit.
///
/// # Example
///
/// ```no_run
/// use repominer::provenance::{AnalysisSettings, BranchAnalysis, CommitCap};
/// use repominer::{BranchReference, OctocrabCommitGateway, PersonalAccessToken, RepositoryLocator};
///
/// # async fn demo() -> Result<(), repominer::MiningError> {
/// let repository = RepositoryLocator::from_owner_repo("apache", "hadoop")?;
/// let token = PersonalAccessToken::new("ghp_example")?;
/// let gateway = OctocrabCommitGateway::for_token(&token, &repository)?;
/// let target = BranchReference::new(repository, "trunk")?;
///
/// let analysis = BranchAnalysis::new(&gateway, AnalysisSettings::default());
/// let report = analysis.analyze_branch(&target, CommitCap::new(50)?).await;
/// println!("{report}");
/// # Ok(())
/// # }
/// ```
pub struct BranchAnalysis<'client, G: CommitGateway + ?Sized> {
    gateway: &'client G,
    settings: AnalysisSettings,
    telemetry: &'client dyn TelemetrySink,
}

impl<'client, G: CommitGateway + ?Sized> BranchAnalysis<'client, G> {
    /// Creates an analysis that reports no telemetry.
    #[must_use]
    pub const fn new(gateway: &'client G, settings: AnalysisSettings) -> Self {
        Self {
            gateway,
            settings,
            telemetry: &NoopTelemetrySink,
        }
    }

    /// Routes progress events to `telemetry`.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'client dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Analyses up to `cap` commits reachable from the tip of `target`.
    ///
    /// Failures never escape as errors; they determine the report's
    /// [`TerminalState`]. Commits whose association lookup fails are counted
    /// as skipped and the walk continues.
    pub async fn analyze_branch(&self, target: &BranchReference, cap: CommitCap) -> AnalysisReport {
        tracing::info!(branch = %target, requested = cap.get(), "starting branch analysis");
        let mut run = AnalysisRun::new(target.clone(), cap);
        self.telemetry.record(TelemetryEvent::RunStarted {
            target: target.to_string(),
            requested: cap.get(),
        });

        let terminal = self.drive(&mut run).await;

        tracing::info!(branch = %target, outcome = %terminal, "branch analysis finished");
        self.telemetry.record(TelemetryEvent::RunFinished {
            target: target.to_string(),
            processed: run.counts().processed,
            outcome: terminal.to_string(),
        });
        run.finish(terminal)
    }

    async fn drive(&self, run: &mut AnalysisRun) -> TerminalState {
        let tip = match self.gateway.resolve_branch(run.target()).await {
            Ok(tip) => tip,
            Err(error) => return TerminalState::from_error(error),
        };
        run.tip_resolved();
        tracing::debug!(branch = %run.target(), tip = tip.short(), "resolved branch tip");

        let repository = run.target().repository().clone();
        let mut pager = CommitPager::new(
            self.gateway,
            &repository,
            tip,
            run.requested(),
            self.settings.page_size,
        );
        let mut classifier = CommitClassifier::new(
            self.gateway,
            &repository,
            RateGovernor::new(self.settings.pacing),
        );

        loop {
            let commit = match pager.next().await {
                Ok(Some(commit)) => commit,
                Ok(None) if pager.cap_reached() => {
                    return TerminalState::Completed(CompletionReason::CapReached);
                }
                Ok(None) => return TerminalState::Completed(CompletionReason::HistoryExhausted),
                Err(error) => return halt(error),
            };

            match classifier.classify(&commit).await {
                Ok(label) => self.record(run, commit, CommitOutcome::Labelled(label)),
                Err(CallFailure::RateLimited {
                    rate_limit,
                    message,
                }) => {
                    tracing::warn!(sha = commit.sha.short(), "rate limit reached, halting");
                    return TerminalState::HaltedByRateLimit {
                        rate_limit,
                        message,
                    };
                }
                Err(CallFailure::Transient(error)) => {
                    tracing::warn!(sha = commit.sha.short(), %error, "skipping commit");
                    let reason = error.to_string();
                    self.record(run, commit, CommitOutcome::SkippedDueToError { reason });
                }
            }
        }
    }

    fn record(&self, run: &mut AnalysisRun, commit: CommitRecord, outcome: CommitOutcome) {
        let sha = commit.sha.short().to_owned();
        let event_outcome = outcome.clone();
        run.record(commit, outcome);

        let processed = run.counts().processed;
        let requested = run.requested().get();
        self.telemetry.record(match event_outcome {
            CommitOutcome::Labelled(_) => TelemetryEvent::CommitClassified {
                sha,
                processed,
                requested,
            },
            CommitOutcome::SkippedDueToError { reason } => TelemetryEvent::CommitSkipped {
                sha,
                processed,
                requested,
                reason,
            },
        });
    }
}

/// Maps a failed page request onto the state that ends the walk.
fn halt(error: MiningError) -> TerminalState {
    match RateGovernor::classify(error) {
        CallFailure::RateLimited {
            rate_limit,
            message,
        } => TerminalState::HaltedByRateLimit {
            rate_limit,
            message,
        },
        CallFailure::Transient(other) => TerminalState::HaltedByFatalError {
            message: other.to_string(),
        },
    }
}
