//! End-to-end tests of the reqwest transport against a local mock server.
//!
//! Run with: cargo test --test http_tests

use std::ops::ControlFlow;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use behave_rs::client::IterateOptions;
use behave_rs::prelude::*;

async fn client_for(server: &MockServer) -> BehaveClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5));
    BehaveClient::with_config(ApiToken::new("app-token-1").unwrap(), config).unwrap()
}

#[tokio::test]
async fn test_track_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/players/user-42/track"))
        .and(header("X-Behave-Api-Token", "app-token-1"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "verb": "login", "context": {} })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "points": 10 } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let rewards = client
        .players()
        .track(&PlayerId::new("user-42"), "login", None)
        .await
        .unwrap();

    assert_eq!(rewards, json!({ "points": 10 }));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    let user_agent = ClientConfig::default().user_agent;
    Mock::given(method("GET"))
        .and(path("/players/user-42/badges"))
        .and(header("User-Agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let badges = client.players().badges(&PlayerId::new("user-42")).await.unwrap();
    assert!(badges.is_empty());
}

#[tokio::test]
async fn test_iterate_over_http() {
    let server = MockServer::start().await;
    let page = |first: u64, count: u64| {
        let data: Vec<_> = (first..first + count)
            .map(|position| json!({ "position": position }))
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
    };

    for (offset, first, count) in [("0", 1, 2), ("2", 3, 2), ("4", 5, 1)] {
        Mock::given(method("POST"))
            .and(path("/leaderboards/weekly-xp/results"))
            .and(query_param("offset", offset))
            .and(query_param("limit", "2"))
            .respond_with(page(first, count))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server).await;
    let mut positions = Vec::new();
    let summary = client
        .leaderboards()
        .iterate_results(
            &LeaderboardId::new("weekly-xp"),
            IterateOptions::new().with_limit(2),
            |results, _| {
                positions.extend(results.into_iter().filter_map(|r| r.position));
                ControlFlow::Continue(())
            },
        )
        .await
        .unwrap();

    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    assert_eq!(summary.pages, 3);
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/user-42/badges"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid app token" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .players()
        .badges(&PlayerId::new("user-42"))
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert!(matches!(err, Error::Unauthorized(ref m) if m == "Invalid app token"));
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/leaderboards/weekly-xp"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .leaderboards()
        .delete(&LeaderboardId::new("weekly-xp"))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, json!("Bad Gateway"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/leaderboards/weekly-xp/results"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .leaderboards()
        .fetch_results(&LeaderboardId::new("weekly-xp"), IterateOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Json(_)));
    assert!(err.is_request_error());
}

#[tokio::test]
async fn test_connection_failure_is_a_request_error() {
    // Nothing listens on this port once the server is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let config = ClientConfig::default()
        .with_base_url(uri)
        .with_timeout(Duration::from_secs(2));
    let client = BehaveClient::with_config(ApiToken::new("tok").unwrap(), config).unwrap();

    let err = client
        .players()
        .badges(&PlayerId::new("user-42"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_request_error());
}

#[tokio::test]
async fn test_player_id_with_slash_is_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players/a%2Fb/badges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let badges = client.players().badges(&PlayerId::new("a/b")).await.unwrap();
    assert!(badges.is_empty());
}

#[tokio::test]
async fn test_leaderboard_id_cannot_escape_its_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/leaderboards/..%2Fplayers%2Fp1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/leaderboards/wk%3Fx%3D1%23frag/results"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .leaderboards()
        .delete(&LeaderboardId::new("../players/p1"))
        .await
        .unwrap();

    let summary = client
        .leaderboards()
        .iterate_results(
            &LeaderboardId::new("wk?x=1#frag"),
            IterateOptions::new().with_limit(5),
            |_, _| ControlFlow::Continue(()),
        )
        .await
        .unwrap();
    assert_eq!(summary.pages, 0);
}
