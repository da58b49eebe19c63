//! Mock GitHub organisation endpoints for the shortlist BDD tests.

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

fn repository_json(owner: &str, name: &str, language: &str, size: u32, archived: bool) -> serde_json::Value {
    json!({
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": { "login": owner },
        "archived": archived,
        "language": language,
        "topics": [],
        "size": size,
        "stargazers_count": 10,
        "watchers_count": 10,
        "forks_count": 1,
        "created_at": "2015-06-01T00:00:00Z"
    })
}

/// Lists `java` active Java repositories sized 100, 200, … plus the
/// requested Python and archived Java repositories.
pub(crate) fn organisation_repositories(
    organisation: &str,
    java: u32,
    python: u32,
    archived: u32,
) -> Mock {
    let mut repositories: Vec<_> = (1..=java)
        .map(|index| {
            repository_json(organisation, &format!("java-{index}"), "Java", index * 100, false)
        })
        .collect();
    repositories.extend((1..=python).map(|index| {
        repository_json(organisation, &format!("python-{index}"), "Python", 10_000, false)
    }));
    repositories.extend((1..=archived).map(|index| {
        repository_json(organisation, &format!("retired-{index}"), "Java", 10_000, true)
    }));

    Mock::given(method("GET"))
        .and(path(format!("/api/v3/orgs/{organisation}/repos")))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repositories))
}

pub(crate) fn missing_organisation(organisation: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v3/orgs/{organisation}/repos")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/repos/repos#list-organization-repositories"
        })))
}

fn contributors_json(count: u32) -> Vec<serde_json::Value> {
    (1..=count)
        .map(|index| json!({ "login": format!("contributor-{index}"), "contributions": 1 }))
        .collect()
}

pub(crate) fn contributors(organisation: &str, repository: &str, count: u32) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v3/repos/{organisation}/{repository}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributors_json(count)))
        .with_priority(1)
}

pub(crate) fn single_contributor_everywhere() -> Mock {
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v3/repos/[^/]+/[^/]+/contributors$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributors_json(1)))
        .with_priority(10)
}
