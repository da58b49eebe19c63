//! Support modules for the branch analysis BDD tests.

pub(crate) mod domain;
pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use domain::{CommitCount, CommitNumber};
pub(crate) use harness::EXPECTED_RATE_LIMIT_RESET_AT;
pub(crate) use state::AnalysisState;
