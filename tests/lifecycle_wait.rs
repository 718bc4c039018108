//! Scenario tests for the synchronous lifecycle helpers: the poll phase
//! observing state transitions, resource disappearance, and deadlines
//! against a wiremock backend.

use std::time::{Duration, Instant};

use serde_json::{Value, json};
use upcloud::{Credentials, PollOutcome, StopServerRequest, UpCloudClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_body(uuid: &str, state: &str) -> Value {
    json!({
        "server": {
            "core_number": "1",
            "hostname": "test.example.com",
            "memory_amount": "1024",
            "state": state,
            "title": "test",
            "uuid": uuid,
            "zone": "fi-hel1"
        }
    })
}

fn storage_body(uuid: &str, state: &str) -> Value {
    json!({
        "storage": {
            "access": "private",
            "size": 10,
            "state": state,
            "title": "disk",
            "type": "normal",
            "uuid": uuid,
            "zone": "fi-hel1"
        }
    })
}

fn client_for(server: &MockServer) -> UpCloudClient {
    UpCloudClient::new(Credentials::new("user", "pass"))
        .expect("client builds")
        .with_api_root(server.uri())
        .with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn stop_and_wait_reaches_stopped_after_two_polls() {
    let backend = MockServer::start().await;
    let client = client_for(&backend);

    Mock::given(method("POST"))
        .and(path("/server/srv-1/stop"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(server_body("srv-1", "maintenance")),
        )
        .expect(1)
        .mount(&backend)
        .await;
    // Two polls still see the shutdown in progress, then the state flips.
    Mock::given(method("GET"))
        .and(path("/server/srv-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(server_body("srv-1", "maintenance")),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/server/srv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_body("srv-1", "stopped")))
        .expect(1)
        .mount(&backend)
        .await;

    let outcome = client
        .stop_server_and_wait("srv-1", &StopServerRequest::default())
        .await
        .expect("stop command succeeds");

    match outcome {
        PollOutcome::Reached(details) => assert_eq!(details.state, "stopped"),
        other => panic!("expected Reached, got {other:?}"),
    }
}

#[tokio::test]
async fn wait_returns_immediately_when_state_already_matches() {
    let backend = MockServer::start().await;
    let client = client_for(&backend);

    Mock::given(method("GET"))
        .and(path("/server/srv-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_body("srv-2", "stopped")))
        .expect(1)
        .mount(&backend)
        .await;

    let started = Instant::now();
    let outcome = client
        .wait_for_server_state("srv-2", "stopped", Duration::from_secs(5))
        .await;

    assert!(outcome.is_reached());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn deletion_races_the_poll_and_wins() {
    let backend = MockServer::start().await;
    let client = client_for(&backend);

    Mock::given(method("POST"))
        .and(path("/storage/bak-9/restore"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend)
        .await;
    // One poll sees the restore in progress; then the storage is deleted
    // out from under the poller.
    Mock::given(method("GET"))
        .and(path("/storage/sto-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(storage_body("sto-1", "maintenance")),
        )
        .up_to_n_times(1)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/sto-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "error_code": "STORAGE_NOT_FOUND",
                "error_message": "The storage does not exist."
            }
        })))
        .mount(&backend)
        .await;

    client.restore_backup("bak-9").await.expect("restore accepted");
    let outcome = client
        .wait_for_storage_state("sto-1", "online", Duration::from_secs(5))
        .await;

    assert_eq!(outcome, PollOutcome::Disappeared);
}

#[tokio::test]
async fn wait_times_out_when_the_state_never_arrives() {
    let backend = MockServer::start().await;
    let client = client_for(&backend);

    Mock::given(method("GET"))
        .and(path("/server/srv-3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(server_body("srv-3", "maintenance")),
        )
        .mount(&backend)
        .await;

    let started = Instant::now();
    let outcome = client
        .wait_for_server_state("srv-3", "stopped", Duration::from_millis(150))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert!(elapsed >= Duration::from_millis(150), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "overran bound: {elapsed:?}");
}

#[tokio::test]
async fn transient_backend_failures_do_not_abort_the_wait() {
    let backend = MockServer::start().await;
    let client = client_for(&backend);

    // The backend answers 500 twice before recovering.
    Mock::given(method("GET"))
        .and(path("/storage/sto-2"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/sto-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(storage_body("sto-2", "online")))
        .mount(&backend)
        .await;

    let outcome = client
        .wait_for_storage_state("sto-2", "online", Duration::from_secs(5))
        .await;

    assert!(outcome.is_reached());
}
