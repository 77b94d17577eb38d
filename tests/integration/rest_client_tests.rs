//! REST directory client tests against a local mock server

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orgboard::config::DirectoryConfig;
use orgboard::services::{DirectoryApi, DirectoryError, RestDirectoryClient};

use crate::common::{organization, team};

fn client_for(server: &MockServer, timeout_secs: u64) -> RestDirectoryClient {
    RestDirectoryClient::new(&DirectoryConfig {
        base_url: server.uri(),
        timeout_secs,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_organizations_decodes_list() {
    let server = MockServer::start().await;
    let organizations = vec![organization(), organization()];

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&organizations))
        .mount(&server)
        .await;

    let fetched = client_for(&server, 5).fetch_organizations().await.unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].id, organizations[0].id);
    assert_eq!(fetched[1].id, organizations[1].id);
}

#[tokio::test]
async fn test_fetch_teams_is_scoped_to_the_organization() {
    let server = MockServer::start().await;
    let teams = vec![team(3), team(3)];

    Mock::given(method("GET"))
        .and(path("/organizations/3/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&teams))
        .mount(&server)
        .await;

    let fetched = client_for(&server, 5)
        .fetch_organization_teams(3)
        .await
        .unwrap();
    assert_eq!(fetched.len(), 2);
    assert!(fetched.iter().all(|t| t.organization_id == 3));
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server, 5).fetch_organizations().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Status(500)));
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server, 5).fetch_organizations().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode(_)));
}

#[tokio::test]
async fn test_slow_server_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(Vec::<orgboard::models::Organization>::new())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, 1).fetch_organizations().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Timeout));
}
