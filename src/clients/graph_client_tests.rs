#![cfg(test)]
use super::graph_client::{GraphApi, HttpGraphClient};
use crate::errors::GraphError;
use crate::types::graph::{Account, Cursors, FollowingPage, Paging};
use httpmock::prelude::*;

fn account(id: &str, handle: &str, verified: bool) -> Account {
    Account {
        id: id.to_string(),
        handle: handle.to_string(),
        display_name: handle.to_uppercase(),
        verified,
    }
}

fn client_for(server: &MockServer) -> HttpGraphClient {
    HttpGraphClient::new(server.base_url(), "test_token".to_string())
}

#[tokio::test]
async fn test_resolve_account_success() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/alice")
                .query_param("access_token", "test_token")
                .query_param("fields", "id,username,name,is_verified");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "1",
                    "username": "alice",
                    "name": "Alice A.",
                    "is_verified": true
                }));
        })
        .await;

    let resolved = client.resolve_account("alice").await.unwrap();
    mock.assert_async().await;
    assert_eq!(resolved.id, "1");
    assert_eq!(resolved.handle, "alice");
    assert_eq!(resolved.display_name, "Alice A.");
    assert!(resolved.verified);
}

#[tokio::test]
async fn test_resolve_account_missing_optional_fields() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    server
        .mock_async(|when, then| {
            when.method(GET).path("/bob");
            then.status(200)
                .json_body(serde_json::json!({ "id": "2", "username": "bob" }));
        })
        .await;

    let resolved = client.resolve_account("bob").await.unwrap();
    assert_eq!(resolved.display_name, "");
    assert!(!resolved.verified);
}

#[tokio::test]
async fn test_resolve_account_not_found() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ghost");
            then.status(404);
        })
        .await;

    let err = client.resolve_account("ghost").await.unwrap_err();
    match err {
        GraphError::NotFound { handle } => assert_eq!(handle, "ghost"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    // 404 is not retried
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_invalid_token_is_auth_error_without_retry() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/following");
            then.status(401);
        })
        .await;

    let err = client.list_following("1").await.unwrap_err();
    assert!(matches!(err, GraphError::Auth));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_list_following_single_page() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    let page = FollowingPage {
        data: vec![account("2", "bob", false), account("3", "carol", true)],
        paging: None,
    };

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/following")
                .query_param("access_token", "test_token");
            then.status(200).json_body_obj(&page);
        })
        .await;

    let following = client.list_following("1").await.unwrap();
    assert_eq!(following, page.data);
}

#[tokio::test]
async fn test_list_following_aggregates_all_pages() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    let second_page = FollowingPage {
        data: vec![account("4", "dave", false)],
        paging: None,
    };
    // The cursor-bearing request is the more specific matcher; register it
    // first so the catch-all below serves only the initial request.
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/following")
                .query_param("after", "page-2");
            then.status(200).json_body_obj(&second_page);
        })
        .await;

    let first_page = FollowingPage {
        data: vec![account("2", "bob", false), account("3", "carol", false)],
        paging: Some(Paging {
            cursors: Some(Cursors {
                after: Some("page-2".to_string()),
            }),
        }),
    };
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/following");
            then.status(200).json_body_obj(&first_page);
        })
        .await;

    let following = client.list_following("1").await.unwrap();
    let ids: Vec<&str> = following.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3", "4"]);
}

#[tokio::test]
async fn test_empty_following_list() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/following");
            then.status(200)
                .json_body(serde_json::json!({ "data": [] }));
        })
        .await;

    let following = client.list_following("1").await.unwrap();
    assert!(following.is_empty());
}

#[tokio::test]
async fn test_rate_limit_retried_then_surfaced() {
    let server = MockServer::start_async().await;
    let client = client_for(&server).with_retry_count(2);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/following");
            then.status(429);
        })
        .await;

    let err = client.list_following("1").await.unwrap_err();
    assert!(matches!(err, GraphError::RateLimited));
    // The retry budget was spent before surfacing the error.
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_server_error_retried_then_surfaced() {
    let server = MockServer::start_async().await;
    let client = client_for(&server).with_retry_count(2);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/following");
            then.status(503);
        })
        .await;

    let err = client.list_following("1").await.unwrap_err();
    match err {
        GraphError::Server { status_code } => assert_eq!(status_code, 503),
        other => panic!("expected Server, got {:?}", other),
    }
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start_async().await;
    let client = client_for(&server).with_retry_count(1);

    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/following");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{\"data\": \"not a list\"");
        })
        .await;

    let err = client.list_following("1").await.unwrap_err();
    assert!(matches!(err, GraphError::Parse(_)));
}
