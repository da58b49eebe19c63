//! Mutable state of one branch analysis and its terminal outcomes.

use std::fmt;

use crate::github::branch::BranchReference;
use crate::github::error::MiningError;
use crate::github::models::{CommitRecord, PullRequestRef};
use crate::github::rate_limit::RateLimitInfo;

use super::report::{AnalysisReport, RunCounts};

/// Maximum number of commits one run may examine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitCap(u32);

impl CommitCap {
    /// Validates a positive cap.
    ///
    /// # Errors
    ///
    /// Returns [`MiningError::InvalidCommitCap`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, MiningError> {
        if value == 0 {
            return Err(MiningError::InvalidCommitCap);
        }
        Ok(Self(value))
    }

    /// Returns the numeric cap.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// How a commit reached its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvenanceLabel {
    /// Pushed straight to the branch.
    Direct,
    /// Landed through at least one pull request.
    PullRequestMerged,
}

impl ProvenanceLabel {
    /// Labels a commit from its pull request associations.
    #[must_use]
    pub const fn from_associations(pull_requests: &[PullRequestRef]) -> Self {
        if pull_requests.is_empty() {
            Self::Direct
        } else {
            Self::PullRequestMerged
        }
    }
}

/// Result of classifying one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The commit received a definitive label.
    Labelled(ProvenanceLabel),
    /// The association lookup failed; the commit was not labelled.
    SkippedDueToError {
        /// Diagnostic describing the failed lookup.
        reason: String,
    },
}

/// A commit paired with its classification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    /// The commit as listed by GitHub.
    pub commit: CommitRecord,
    /// Classification outcome.
    pub outcome: CommitOutcome,
}

/// Why a run that finished normally stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// Every commit reachable from the tip was examined.
    HistoryExhausted,
    /// The requested commit cap was satisfied.
    CapReached,
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalState {
    /// The run examined its whole window.
    Completed(CompletionReason),
    /// GitHub's rate limit stopped the run; counts are partial.
    HaltedByRateLimit {
        /// Reset information when GitHub provided it.
        rate_limit: Option<RateLimitInfo>,
        /// Message reported with the failure.
        message: String,
    },
    /// An unrecoverable failure stopped the run; counts are partial.
    HaltedByFatalError {
        /// Description of the failure.
        message: String,
    },
    /// The repository or branch does not exist.
    NotFound {
        /// Description of the missing resource.
        message: String,
    },
}

impl TerminalState {
    /// Maps a failure that ends the run onto its terminal state.
    #[must_use]
    pub fn from_error(error: MiningError) -> Self {
        match error {
            MiningError::RateLimitExceeded {
                rate_limit,
                message,
            } => Self::HaltedByRateLimit {
                rate_limit,
                message,
            },
            MiningError::NotFound { message } => Self::NotFound { message },
            other => Self::HaltedByFatalError {
                message: other.to_string(),
            },
        }
    }

    /// Returns true for states where the window was fully analysed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(CompletionReason::HistoryExhausted) => {
                f.write_str("completed (branch history exhausted)")
            }
            Self::Completed(CompletionReason::CapReached) => {
                f.write_str("completed (commit cap reached)")
            }
            Self::HaltedByRateLimit {
                rate_limit: Some(info),
                ..
            } => write!(f, "halted by rate limit, resets at {info}"),
            Self::HaltedByRateLimit {
                rate_limit: None,
                message,
            } => write!(f, "halted by rate limit: {message}"),
            Self::HaltedByFatalError { message } => write!(f, "halted by error: {message}"),
            Self::NotFound { message } => write!(f, "repository or branch not found: {message}"),
        }
    }
}

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Resolving the branch tip.
    Resolving,
    /// Tip resolved; waiting for the first page of history.
    Paginating,
    /// At least one commit has been classified or skipped.
    Classifying,
}

/// Aggregate state of one analysis.
///
/// Counters only grow, and `processed == direct + pr_merged + skipped` holds
/// after every mutation. [`AnalysisRun::finish`] consumes the run so that a
/// finalised analysis cannot change.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    target: BranchReference,
    requested: CommitCap,
    phase: RunPhase,
    commits: Vec<ClassifiedCommit>,
    counts: RunCounts,
}

impl AnalysisRun {
    /// Starts a run for `target` capped at `requested` commits.
    #[must_use]
    pub const fn new(target: BranchReference, requested: CommitCap) -> Self {
        Self {
            target,
            requested,
            phase: RunPhase::Resolving,
            commits: Vec::new(),
            counts: RunCounts::ZERO,
        }
    }

    /// Branch being analysed.
    #[must_use]
    pub const fn target(&self) -> &BranchReference {
        &self.target
    }

    /// Requested commit cap.
    #[must_use]
    pub const fn requested(&self) -> CommitCap {
        self.requested
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn counts(&self) -> RunCounts {
        self.counts
    }

    /// Commits examined so far, in classification order.
    #[must_use]
    pub fn commits(&self) -> &[ClassifiedCommit] {
        &self.commits
    }

    /// Marks the branch tip as resolved.
    pub const fn tip_resolved(&mut self) {
        self.phase = RunPhase::Paginating;
    }

    /// Records the outcome for one commit.
    pub fn record(&mut self, commit: CommitRecord, outcome: CommitOutcome) {
        self.counts = self.counts.with_outcome(&outcome);
        self.phase = RunPhase::Classifying;
        self.commits.push(ClassifiedCommit { commit, outcome });
    }

    /// Finalises the run into a report.
    ///
    /// A run ending in [`TerminalState::NotFound`] reports no counts.
    #[must_use]
    pub fn finish(self, terminal: TerminalState) -> AnalysisReport {
        let counts = match terminal {
            TerminalState::NotFound { .. } => None,
            _ => Some(self.counts),
        };
        AnalysisReport {
            target: self.target,
            requested: self.requested,
            counts,
            commits: self.commits,
            terminal,
        }
    }
}
