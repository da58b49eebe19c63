//! Repository mining library for GitHub commit provenance.
//!
//! The library wraps Octocrab to walk a branch's history, decide for each
//! commit whether it was pushed directly or merged through a pull request,
//! and aggregate the shares into a report. It also shortlists an
//! organisation's repositories as mining candidates.

pub mod config;
pub mod github;
pub mod provenance;
pub mod ranking;
pub mod telemetry;

pub use config::{MinerConfig, OperationMode};
pub use github::{
    BranchReference, CommitGateway, CommitSha, MiningError, OctocrabCommitGateway,
    OctocrabOrganisationGateway, OrganisationGateway, OrganisationLocator, PersonalAccessToken,
    RateLimitInfo, RepositoryLocator, RepositorySummary,
};
pub use provenance::{
    AnalysisReport, AnalysisSettings, BranchAnalysis, CommitCap, ProvenanceLabel, TerminalState,
};
pub use ranking::{RepositoryShortlist, ShortlistCriteria};
