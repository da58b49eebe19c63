//! Final aggregate of a branch analysis.

use std::fmt;
use std::io::{self, Write};

use crate::github::branch::BranchReference;

use super::run::{ClassifiedCommit, CommitCap, CommitOutcome, ProvenanceLabel, TerminalState};

/// Commit counters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    /// Commits examined, including skipped ones.
    pub processed: u32,
    /// Commits labelled [`ProvenanceLabel::Direct`].
    pub direct: u32,
    /// Commits labelled [`ProvenanceLabel::PullRequestMerged`].
    pub pr_merged: u32,
    /// Commits whose association lookup failed.
    pub skipped: u32,
}

impl RunCounts {
    pub(crate) const ZERO: Self = Self {
        processed: 0,
        direct: 0,
        pr_merged: 0,
        skipped: 0,
    };

    pub(crate) const fn with_outcome(self, outcome: &CommitOutcome) -> Self {
        let mut next = self;
        next.processed = next.processed.saturating_add(1);
        match outcome {
            CommitOutcome::Labelled(ProvenanceLabel::Direct) => {
                next.direct = next.direct.saturating_add(1);
            }
            CommitOutcome::Labelled(ProvenanceLabel::PullRequestMerged) => {
                next.pr_merged = next.pr_merged.saturating_add(1);
            }
            CommitOutcome::SkippedDueToError { .. } => {
                next.skipped = next.skipped.saturating_add(1);
            }
        }
        next
    }

    /// Share of labelled commits that were pushed directly.
    ///
    /// Skipped commits are excluded from the denominator.
    #[must_use]
    pub fn direct_percentage(&self) -> DirectPercentage {
        DirectPercentage::from_counts(self.direct, self.pr_merged)
    }
}

/// Percentage of direct commits, held in hundredths of a percent.
///
/// # Example
///
/// ```
/// use repominer::provenance::DirectPercentage;
///
/// assert_eq!(DirectPercentage::from_counts(1, 2).to_string(), "33.33");
/// assert_eq!(DirectPercentage::from_counts(0, 0).to_string(), "0.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirectPercentage(u64);

impl DirectPercentage {
    /// Computes `direct / (direct + pr_merged)` rounded half up to two
    /// decimal places. Zero when no commit was labelled.
    #[must_use]
    pub fn from_counts(direct: u32, pr_merged: u32) -> Self {
        let labelled = u64::from(direct) + u64::from(pr_merged);
        let numerator = u64::from(direct) * 20_000 + labelled;
        Self(numerator.checked_div(labelled * 2).unwrap_or_default())
    }

    /// Hundredths of a percent, so `10_000` is 100%.
    #[must_use]
    pub const fn basis_points(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DirectPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.checked_div(100).unwrap_or_default();
        let fraction = self.0.checked_rem(100).unwrap_or_default();
        write!(f, "{whole}.{fraction:02}")
    }
}

/// Outcome of [`BranchAnalysis::analyze_branch`](super::BranchAnalysis::analyze_branch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Branch that was analysed.
    pub target: BranchReference,
    /// Commit cap the caller requested.
    pub requested: CommitCap,
    /// Counters, absent when the repository or branch was not found.
    pub counts: Option<RunCounts>,
    /// Commits examined, in classification order.
    pub commits: Vec<ClassifiedCommit>,
    /// How the run ended.
    pub terminal: TerminalState,
}

impl AnalysisReport {
    /// Direct share of labelled commits, absent when the run never resolved
    /// its branch.
    #[must_use]
    pub fn direct_percentage(&self) -> Option<DirectPercentage> {
        self.counts.as_ref().map(RunCounts::direct_percentage)
    }

    /// Writes the human readable summary.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying writer.
    pub fn write_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{self}")
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results for {}:", self.target)?;
        if let Some(counts) = self.counts {
            writeln!(f, "Total commits analyzed: {}", counts.processed)?;
            writeln!(f, "Direct commits: {}", counts.direct)?;
            writeln!(f, "PR-merged commits: {}", counts.pr_merged)?;
            writeln!(f, "Skipped commits: {}", counts.skipped)?;
            writeln!(
                f,
                "Percentage of direct commits: {}%",
                counts.direct_percentage()
            )?;
        }
        write!(f, "Outcome: {}", self.terminal)
    }
}
