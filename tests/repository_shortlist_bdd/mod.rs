//! Support modules for the repository shortlist BDD tests.

pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{RepositoryCount, ShortlistState};
