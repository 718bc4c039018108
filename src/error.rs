//! Error types shared across the UpCloud client.

use thiserror::Error;

/// Errors raised by the UpCloud client.
///
/// The taxonomy keeps "no answer was received" ([`UpCloudError::Transport`])
/// apart from "the provider answered with an error"
/// ([`UpCloudError::Api`]) and from "the provider sent something we could
/// not decode" ([`UpCloudError::Parse`]); callers routinely branch on the
/// distinction.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum UpCloudError {
    /// Raised when the client configuration is incomplete or fails to load.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when a request is missing a required field.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Raised when no response was received at all (DNS, TCP, TLS, or a
    /// transport-level timeout). Never retried automatically.
    #[error("transport failure: {message}")]
    Transport {
        /// Description of the underlying transport failure.
        message: String,
    },
    /// Raised when the provider answered with a non-success status.
    #[error("API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Provider error code (for example `SERVER_STATE_ILLEGAL`), empty
        /// when the error body carried none.
        code: String,
        /// Human-readable message from the provider.
        message: String,
    },
    /// Raised when a response body is not valid JSON or lacks an expected
    /// key.
    #[error("malformed response: {message}")]
    Parse {
        /// Description of the decoding failure.
        message: String,
    },
}

impl From<reqwest::Error> for UpCloudError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Parse {
                message: value.to_string(),
            }
        } else {
            Self::Transport {
                message: value.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for UpCloudError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse {
            message: value.to_string(),
        }
    }
}
