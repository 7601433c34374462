use folio_stats::{GithubClient, GithubSection, StatsError, aggregate};
use httpmock::prelude::*;
use serde_json::{Value, json};
use std::time::{Duration, Instant};

fn repo_json(server: &MockServer, id: u64, stars: u64, language: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": format!("r{id}"),
        "description": format!("repo number {id}"),
        "html_url": format!("https://github.com/octo/r{id}"),
        "stargazers_count": stars,
        "forks_count": id,
        "language": language,
        "languages_url": server.url(format!("/repos/octo/r{id}/languages")),
    })
}

fn user_json() -> Value {
    json!({
        "login": "octo",
        "name": "Octo Cat",
        "public_repos": 10,
        "followers": 42,
        "avatar_url": "https://avatars.example/octo",
        "html_url": "https://github.com/octo",
    })
}

async fn mock_account(server: &MockServer, stars: &[u64]) {
    let repos: Vec<Value> = stars
        .iter()
        .enumerate()
        .map(|(i, s)| repo_json(server, i as u64, *s, Some("Dart")))
        .collect();

    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo");
            then.status(200).json_body(user_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/octo/repos")
                .query_param("sort", "updated")
                .query_param("per_page", "100");
            then.status(200).json_body(Value::Array(repos));
        })
        .await;
}

#[tokio::test]
async fn aggregates_ten_repositories() {
    let server = MockServer::start_async().await;
    mock_account(&server, &[50, 10, 5, 5, 3, 2, 1, 1, 0, 0]).await;

    for id in 0..4 {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/repos/octo/r{id}/languages"));
                then.status(200)
                    .json_body(json!({ "TypeScript": 200, "Rust": 9000, "Shell": 10, "Nix": 5 }));
            })
            .await;
    }
    let untouched = server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/r4/languages");
            then.status(200).json_body(json!({ "C": 1 }));
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let result = aggregate(&client, "octo").await.unwrap();

    assert_eq!(result.stats.total_stars, 77);
    assert_eq!(result.stats.total_contributions, 481);
    assert_eq!(result.stats.public_repos, 10);
    assert_eq!(result.stats.followers, 42);
    assert_eq!(result.stats.name, "Octo Cat");

    let stars: Vec<u64> = result.top_repos.iter().map(|r| r.stars).collect();
    assert_eq!(stars, vec![50, 10, 5, 5]);
    let mut ids: Vec<u64> = result.top_repos.iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    for repo in &result.top_repos {
        assert_eq!(repo.languages, vec!["Rust", "TypeScript", "Shell", "Nix"]);
        assert_eq!(repo.display_languages(), ["Rust", "TypeScript", "Shell"]);
    }
    untouched.assert_hits_async(0).await;
}

#[tokio::test]
async fn language_failure_is_isolated() {
    let server = MockServer::start_async().await;

    let repos = vec![
        repo_json(&server, 1, 9, Some("Go")),
        repo_json(&server, 2, 7, None),
        repo_json(&server, 3, 5, Some("Kotlin")),
        repo_json(&server, 4, 3, Some("Swift")),
    ];
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo");
            then.status(200).json_body(user_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo/repos");
            then.status(200).json_body(Value::Array(repos));
        })
        .await;

    for id in [1, 3, 4] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/repos/octo/r{id}/languages"));
                then.status(200).json_body(json!({ "Rust": 100, "C": 50 }));
            })
            .await;
    }
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/r2/languages");
            then.status(500);
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let result = aggregate(&client, "octo").await.unwrap();

    let names: Vec<&str> = result.top_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["r1", "r2", "r3", "r4"]);
    assert_eq!(result.top_repos[1].languages, vec!["Unknown"]);
    for i in [0, 2, 3] {
        assert_eq!(result.top_repos[i].languages, vec!["Rust", "C"]);
    }
}

#[tokio::test]
async fn failed_language_lookup_uses_primary_language() {
    let server = MockServer::start_async().await;
    let repos = vec![repo_json(&server, 1, 2, Some("Dart"))];
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo");
            then.status(200).json_body(user_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo/repos");
            then.status(200).json_body(Value::Array(repos));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/r1/languages");
            then.status(403);
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let result = aggregate(&client, "octo").await.unwrap();
    assert_eq!(result.top_repos.len(), 1);
    assert_eq!(result.top_repos[0].languages, vec!["Dart"]);
}

#[tokio::test]
async fn metadata_failure_fails_the_run() {
    let server = MockServer::start_async().await;
    let user = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/ghost");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let err = aggregate(&client, "ghost").await.unwrap_err();
    assert!(matches!(err, StatsError::Status { status: 404, .. }));
    user.assert_async().await;

    let section = GithubSection::load(&client, "ghost").await;
    assert!(!section.is_loading);
    assert!(section.top_repos.is_empty());
    assert!(section.error.is_some());

    let stats = section.stats.unwrap();
    assert_eq!(stats.profile_url, "https://github.com/ghost");
    assert_eq!(
        (stats.public_repos, stats.followers, stats.total_stars, stats.total_contributions),
        (0, 0, 0, 0)
    );
}

#[tokio::test]
async fn listing_failure_fails_the_run() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo");
            then.status(200).json_body(user_json());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo/repos");
            then.status(200).body("not json");
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let err = aggregate(&client, "octo").await.unwrap_err();
    assert!(matches!(err, StatsError::Decode { .. }));
}

#[tokio::test]
async fn empty_username_makes_no_requests() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(user_json());
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let section = GithubSection::load(&client, "").await;

    assert!(section.stats.is_none());
    assert!(section.error.is_none());
    assert!(!section.is_loading);
    any.assert_hits_async(0).await;
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let server = MockServer::start_async().await;
    mock_account(&server, &[4, 8, 15, 16, 23, 42]).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/languages");
            then.status(200).json_body(json!({ "Python": 30, "C": 30, "Cython": 2 }));
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let first = aggregate(&client, "octo").await.unwrap();
    let second = aggregate(&client, "octo").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.top_repos[0].languages, vec!["C", "Python", "Cython"]);
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let server = MockServer::start_async().await;
    let user = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/octo")
                .header("authorization", "Bearer s3cret")
                .header("user-agent", "folio-stats");
            then.status(200).json_body(user_json());
        })
        .await;

    let client = GithubClient::new(&server.base_url(), Some("s3cret".into())).unwrap();
    let fetched = client.user("octo").await.unwrap();
    assert_eq!(fetched.login, "octo");
    user.assert_async().await;
}

#[tokio::test]
async fn language_lookups_run_concurrently() {
    let server = MockServer::start_async().await;
    mock_account(&server, &[40, 30, 20, 10]).await;
    let languages = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/languages");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "Rust": 1 }));
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let started = Instant::now();
    let result = aggregate(&client, "octo").await.unwrap();
    let elapsed = started.elapsed();

    languages.assert_hits_async(4).await;
    assert_eq!(result.top_repos.len(), 4);
    // Four sequential lookups would take at least two seconds.
    assert!(
        elapsed < Duration::from_millis(1500),
        "lookups took {elapsed:?}"
    );
}

#[tokio::test]
async fn login_cannot_reach_another_endpoint() {
    let server = MockServer::start_async().await;
    let user = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo");
            then.status(200).json_body(user_json());
        })
        .await;
    let repos = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo/repos");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = GithubClient::new(&server.base_url(), None).unwrap();
    let section = GithubSection::load(&client, "octo?x=").await;

    user.assert_hits_async(0).await;
    repos.assert_hits_async(0).await;
    assert!(section.error.is_some());
    assert_eq!(
        section.stats.unwrap().profile_url,
        "https://github.com/octo%3Fx="
    );
}
