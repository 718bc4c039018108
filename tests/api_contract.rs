//! Contract tests for the HTTP layer: authentication, content types, and
//! the error taxonomy, exercised against a wiremock backend.

use serde_json::json;
use upcloud::{Credentials, TagRequest, UpCloudClient, UpCloudError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// "user:pass" in RFC 2045 base64, as reqwest sends it.
const BASIC_USER_PASS: &str = "Basic dXNlcjpwYXNz";

fn client_for(server: &MockServer) -> UpCloudClient {
    UpCloudClient::new(Credentials::new("user", "pass"))
        .expect("client builds")
        .with_api_root(server.uri())
}

#[tokio::test]
async fn every_method_carries_basic_auth() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/server"))
        .and(header("authorization", BASIC_USER_PASS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": {"server": []}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tag"))
        .and(header("authorization", BASIC_USER_PASS))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "tag": {"name": "prod"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tag/prod"))
        .and(header("authorization", BASIC_USER_PASS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag": {"name": "production"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tag/production"))
        .and(header("authorization", BASIC_USER_PASS))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.list_servers().await.expect("list succeeds");
    client
        .create_tag(&TagRequest::new("prod"))
        .await
        .expect("create succeeds");
    client
        .modify_tag("prod", &TagRequest::new("production"))
        .await
        .expect("modify succeeds");
    client.delete_tag("production").await.expect("delete succeeds");
}

#[tokio::test]
async fn writes_send_json_content_type_and_wrapped_body() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/tag"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"tag": {"name": "web"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "tag": {"name": "web"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tag = client
        .create_tag(&TagRequest::new("web"))
        .await
        .expect("create succeeds");
    assert_eq!(tag.name, "web");
}

#[tokio::test]
async fn provider_error_body_maps_to_api_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/server/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "error_code": "SERVER_NOT_FOUND",
                "error_message": "The server does not exist."
            }
        })))
        .mount(&server)
        .await;

    let err = client.get_server("missing").await.expect_err("should fail");
    assert_eq!(
        err,
        UpCloudError::Api {
            status: 404,
            code: "SERVER_NOT_FOUND".to_owned(),
            message: "The server does not exist.".to_owned(),
        }
    );
}

#[tokio::test]
async fn unauthorised_response_is_an_api_error_not_a_transport_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "error_code": "AUTHENTICATION_FAILED",
                "error_message": "Authentication failed using the given username and password."
            }
        })))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("should fail");
    assert!(matches!(err, UpCloudError::Api { status: 401, .. }));
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = client.get_account().await.expect_err("should fail");
    assert!(matches!(err, UpCloudError::Parse { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Nothing listens on the reserved discard-style port below.
    let client = UpCloudClient::new(Credentials::new("user", "pass"))
        .expect("client builds")
        .with_api_root("http://127.0.0.1:9/");

    let err = client.list_servers().await.expect_err("should fail");
    assert!(matches!(err, UpCloudError::Transport { .. }));
}

#[tokio::test]
async fn collection_decoding_preserves_document_order() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": {
                "server": [
                    {
                        "core_number": "1",
                        "hostname": "a.example.com",
                        "memory_amount": "1024",
                        "state": "started",
                        "title": "a",
                        "uuid": "abc",
                        "zone": "fi-hel1"
                    },
                    {
                        "core_number": "2",
                        "hostname": "b.example.com",
                        "memory_amount": "2048",
                        "state": "stopped",
                        "title": "b",
                        "uuid": "def",
                        "zone": "uk-lon1"
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    let servers = client.list_servers().await.expect("list succeeds");
    let uuids: Vec<&str> = servers.iter().map(|s| s.uuid.as_str()).collect();
    assert_eq!(uuids, vec!["abc", "def"]);
}
