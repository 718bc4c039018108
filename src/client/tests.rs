//! Unit tests for response decoding and credential handling.

use super::*;
use rstest::rstest;
use serde::Deserialize;

#[derive(Debug, Deserialize, Eq, PartialEq)]
struct Sample {
    value: String,
}

fn response(status: StatusCode, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

#[test]
fn decode_returns_typed_value_on_success() {
    let decoded: Sample =
        UpCloudClient::decode(&response(StatusCode::OK, r#"{"value":"ok"}"#)).expect("decodes");
    assert_eq!(
        decoded,
        Sample {
            value: "ok".to_owned()
        }
    );
}

#[test]
fn decode_surfaces_parse_error_on_malformed_success_body() {
    let result: Result<Sample, _> =
        UpCloudClient::decode(&response(StatusCode::OK, "not json"));
    assert!(matches!(result, Err(UpCloudError::Parse { .. })));
}

#[test]
fn decode_maps_provider_error_body() {
    let body = r#"{"error":{"error_code":"SERVER_STATE_ILLEGAL","error_message":"stop first"}}"#;
    let result: Result<Sample, _> =
        UpCloudClient::decode(&response(StatusCode::CONFLICT, body));
    assert_eq!(
        result,
        Err(UpCloudError::Api {
            status: 409,
            code: "SERVER_STATE_ILLEGAL".to_owned(),
            message: "stop first".to_owned(),
        })
    );
}

#[rstest]
#[case(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")]
#[case(StatusCode::INTERNAL_SERVER_ERROR, "")]
fn decode_keeps_raw_body_when_error_envelope_is_absent(
    #[case] status: StatusCode,
    #[case] body: &str,
) {
    let result: Result<Sample, _> = UpCloudClient::decode(&response(status, body));
    assert_eq!(
        result,
        Err(UpCloudError::Api {
            status: status.as_u16(),
            code: String::new(),
            message: body.to_owned(),
        })
    );
}

#[test]
fn credentials_debug_never_prints_password() {
    let rendered = format!("{:?}", Credentials::new("account", "hunter2"));
    assert!(rendered.contains("account"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
fn with_api_root_normalises_trailing_slash() {
    let client = UpCloudClient::new(Credentials::new("u", "p")).expect("client builds");
    let repointed = client.with_api_root("http://127.0.0.1:9/base");
    assert_eq!(repointed.api_root, "http://127.0.0.1:9/base/");
}
