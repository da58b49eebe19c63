//! Tests for branch and commit identifiers.

use rstest::rstest;

use crate::github::{BranchName, BranchReference, CommitSha, MiningError, RepositoryLocator};

#[rstest]
#[case::bare("trunk", "trunk")]
#[case::qualified("refs/heads/trunk", "trunk")]
#[case::nested("release/3.4", "release/3.4")]
#[case::padded("  main ", "main")]
fn branch_name_normalises(#[case] input: &str, #[case] expected: &str) {
    let branch = BranchName::new(input).expect("branch should be valid");
    assert_eq!(branch.as_str(), expected);
}

#[rstest]
#[case::empty("")]
#[case::bare_prefix("refs/heads/")]
fn branch_name_rejects_blank(#[case] input: &str) {
    let result = BranchName::new(input);
    assert!(
        matches!(result, Err(MiningError::MissingPathSegments)),
        "expected MissingPathSegments, got {result:?}"
    );
}

#[rstest]
fn branch_reference_builds_ref_path_and_display() {
    let repository =
        RepositoryLocator::from_owner_repo("apache", "hadoop").expect("locator should be valid");
    let branch =
        BranchReference::new(repository, "refs/heads/trunk").expect("branch should be valid");

    assert_eq!(branch.ref_path(), "/repos/apache/hadoop/git/ref/heads/trunk");
    assert_eq!(branch.to_string(), "apache/hadoop@trunk");
}

#[rstest]
#[case::full("6dcb09b5b57875f334f61aebed695e2e4193db5e", "6dcb09b")]
#[case::already_short("abc", "abc")]
fn commit_sha_abbreviates(#[case] sha: &str, #[case] expected: &str) {
    assert_eq!(CommitSha::new(sha).short(), expected);
}

#[rstest]
fn commit_sha_from_api_rejects_blank() {
    let result = CommitSha::from_api("  ".to_owned());
    assert!(
        matches!(result, Err(MiningError::Api { .. })),
        "expected Api error, got {result:?}"
    );
}
