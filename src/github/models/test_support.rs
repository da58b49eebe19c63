//! Builders for model fixtures shared by unit and behavioural tests.
//!
//! # Examples
//!
//! ```
//! use repominer::github::models::test_support::{commit_record, repository_summary};
//!
//! let commit = commit_record(1);
//! assert_eq!(commit.summary(), "Commit 1");
//!
//! let repository = repository_summary("apache/kafka");
//! assert_eq!(repository.name, "kafka");
//! ```

use super::{CommitRecord, RepositorySummary};
use crate::github::branch::CommitSha;

/// Returns a deterministic 40 character hash for the given sequence number.
#[must_use]
pub fn sha_for(sequence: u32) -> String {
    format!("{sequence:040x}")
}

/// Builds a commit record whose hash and message derive from `sequence`.
#[must_use]
pub fn commit_record(sequence: u32) -> CommitRecord {
    CommitRecord {
        sha: CommitSha::new(sha_for(sequence)),
        message: format!("Commit {sequence}"),
        author: Some("committer".to_owned()),
    }
}

/// Builds an unarchived Java repository summary for `owner/name`.
#[must_use]
pub fn repository_summary(full_name: &str) -> RepositorySummary {
    let (owner, name) = full_name.split_once('/').unwrap_or(("", full_name));
    RepositorySummary {
        owner: owner.to_owned(),
        name: name.to_owned(),
        full_name: full_name.to_owned(),
        language: Some("Java".to_owned()),
        ..Default::default()
    }
}
