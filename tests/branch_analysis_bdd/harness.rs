//! Mock GitHub endpoints for the branch analysis BDD tests.

use repominer::github::models::test_support::sha_for;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockBuilder, ResponseTemplate};

pub(crate) const EXPECTED_RATE_LIMIT_RESET_AT: u64 = 1_700_000_000;

const REPO_PATH: &str = "/api/v3/repos/apache/hadoop";

/// Most specific mocks win over the catch-all pull request lookup.
const SPECIFIC: u8 = 1;
const FALLBACK: u8 = 10;

pub(crate) fn branch_ref(branch: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/git/ref/heads/{branch}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": format!("refs/heads/{branch}"),
            "object": { "sha": sha_for(1), "type": "commit" }
        })))
}

pub(crate) fn missing_branch_ref(branch: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/git/ref/heads/{branch}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/git/refs#get-a-reference"
        })))
}

pub(crate) fn commit_history(count: u32) -> Mock {
    let commits: Vec<_> = (1..=count)
        .map(|sequence| {
            json!({
                "sha": sha_for(sequence),
                "commit": {
                    "message": format!("Commit {sequence}"),
                    "author": { "name": "committer", "date": "2024-01-01T00:00:00Z" }
                }
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/commits")))
        .respond_with(ResponseTemplate::new(200).set_body_json(commits))
}

pub(crate) fn no_pull_requests() -> Mock {
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex(format!(
            "^{REPO_PATH}/commits/[0-9a-f]+/pulls$"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(FALLBACK)
}

fn pulls_for(sequence: u32) -> MockBuilder {
    Mock::given(method("GET")).and(path(format!(
        "{REPO_PATH}/commits/{}/pulls",
        sha_for(sequence)
    )))
}

pub(crate) fn merged_through_pull_request(sequence: u32) -> Mock {
    pulls_for(sequence)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "number": sequence + 100,
            "title": format!("Change {sequence}"),
            "state": "closed",
            "html_url": format!("https://github.com/apache/hadoop/pull/{}", sequence + 100)
        }])))
        .with_priority(SPECIFIC)
}

pub(crate) fn failing_lookup(sequence: u32) -> Mock {
    pulls_for(sequence)
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "No commit found for SHA",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .with_priority(SPECIFIC)
}

pub(crate) fn rate_limited_lookup(sequence: u32) -> Mock {
    pulls_for(sequence)
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({
                    "message": "API rate limit exceeded for user",
                    "documentation_url": "https://docs.github.com/rest/rate-limit"
                }))
                .insert_header("X-RateLimit-Limit", "5000")
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header(
                    "X-RateLimit-Reset",
                    EXPECTED_RATE_LIMIT_RESET_AT.to_string(),
                ),
        )
        .with_priority(SPECIFIC)
}

pub(crate) fn rate_limit_status() -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/v3/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": {
                "core": {
                    "limit": 5000,
                    "used": 5000,
                    "remaining": 0,
                    "reset": EXPECTED_RATE_LIMIT_RESET_AT
                },
                "search": {
                    "limit": 30,
                    "used": 0,
                    "remaining": 30,
                    "reset": EXPECTED_RATE_LIMIT_RESET_AT
                }
            },
            "rate": {
                "limit": 5000,
                "used": 5000,
                "remaining": 0,
                "reset": EXPECTED_RATE_LIMIT_RESET_AT
            }
        })))
}
