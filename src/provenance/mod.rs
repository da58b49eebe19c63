//! Commit provenance analysis.
//!
//! A branch analysis resolves the branch tip, pages lazily through the
//! history behind it, and asks GitHub which pull requests each commit belongs
//! to. A commit with no associated pull request was pushed directly. The
//! pieces are:
//!
//! - [`CommitPager`] yields commits newest first and honours the commit cap.
//! - [`CommitClassifier`] labels one commit, paced by a [`RateGovernor`].
//! - [`AnalysisRun`] accumulates counts and finalises into an
//!   [`AnalysisReport`].
//! - [`BranchAnalysis`] drives the run to a [`TerminalState`].

mod analysis;
mod classifier;
mod governor;
mod pager;
mod report;
mod run;

pub use analysis::{AnalysisSettings, BranchAnalysis};
pub use classifier::CommitClassifier;
pub use governor::{CallFailure, RateGovernor};
pub use pager::CommitPager;
pub use report::{AnalysisReport, DirectPercentage, RunCounts};
pub use run::{
    AnalysisRun, ClassifiedCommit, CommitCap, CommitOutcome, CompletionReason, ProvenanceLabel,
    RunPhase, TerminalState,
};
