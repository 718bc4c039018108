//! HTTP plumbing shared by every API façade.
//!
//! [`UpCloudClient`] owns the credential pair and a [`reqwest::Client`],
//! and exposes one-attempt request helpers to the resource modules. No
//! retries happen at this layer; the only deliberate re-request loop in
//! the crate lives in [`crate::poll`].

#[cfg(test)]
mod tests;

use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::UpCloudConfig;
use crate::error::UpCloudError;

/// Production API root, version segment included.
pub const DEFAULT_API_ROOT: &str = "https://api.upcloud.com/1.2/";

/// Delay between poll attempts used by the `*_and_wait` façade methods.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Immutable credential pair attached to every request as HTTP Basic
/// Authentication. Safe to share across tasks; never mutated.
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair from an account username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Normalized result of one HTTP attempt: status code plus raw body bytes.
pub(crate) struct ApiResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

/// Client for the UpCloud REST API.
///
/// Each method call maps to exactly one HTTP request (plus an optional
/// deadline-bounded poll for the synchronous lifecycle helpers). The
/// client holds no cache; the remote system is the sole arbiter of
/// resource state.
#[derive(Clone, Debug)]
pub struct UpCloudClient {
    http: reqwest::Client,
    api_root: String,
    credentials: Credentials,
    poll_interval: Duration,
}

impl UpCloudClient {
    /// Constructs a client against the production API root.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`] when the underlying HTTP client
    /// cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, UpCloudError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_root: DEFAULT_API_ROOT.to_owned(),
            credentials,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Constructs a client from loaded configuration, honouring its
    /// optional API root override.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Config`] when credentials are missing and
    /// [`UpCloudError::Transport`] when the HTTP client cannot be built.
    pub fn from_config(config: &UpCloudConfig) -> Result<Self, UpCloudError> {
        let client = Self::new(config.credentials()?)?;
        Ok(match &config.api_root {
            Some(root) => client.with_api_root(root),
            None => client,
        })
    }

    /// Replaces the API root, normalising a missing trailing slash. Used
    /// to point the client at a test double.
    #[must_use]
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        let mut root = api_root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        self.api_root = root;
        self
    }

    /// Replaces the delay between poll attempts used by the synchronous
    /// lifecycle helpers.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub(crate) const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Issues one HTTP request and returns the raw status/body pair.
    ///
    /// Basic-auth credentials are attached to every request; bodies carry
    /// `Content-Type: application/json`. Exactly one attempt is made.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, UpCloudError> {
        let url = format!("{}{path}", self.api_root);
        debug!(%method, path, "issuing API request");
        let mut builder = self
            .http
            .request(method, &url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()));
        if let Some(bytes) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        let response = builder.send().await?;
        let status = response.status();
        let payload = response.bytes().await?;
        Ok(ApiResponse {
            status,
            body: payload.to_vec(),
        })
    }

    /// GET `path` and decode a JSON response.
    pub(crate) async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpCloudError> {
        let response = self.request(Method::GET, path, None).await?;
        Self::decode(&response)
    }

    /// GET `path`, mapping HTTP 404 to `None`. Resource accessors used by
    /// the poller go through this so disappearance is distinguishable from
    /// transient failure.
    pub(crate) async fn read_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, UpCloudError> {
        let response = self.request(Method::GET, path, None).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(&response).map(Some)
    }

    /// Send `body` as JSON with the given method and decode a JSON
    /// response.
    pub(crate) async fn write<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, UpCloudError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body)?;
        let response = self.request(method, path, Some(bytes)).await?;
        Self::decode(&response)
    }

    /// Send a bodyless write (for example `POST server/{id}/start`) and
    /// decode a JSON response.
    pub(crate) async fn write_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T, UpCloudError> {
        let response = self.request(method, path, None).await?;
        Self::decode(&response)
    }

    /// Issue a write whose success response carries no meaningful body.
    pub(crate) async fn write_no_content(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(), UpCloudError> {
        let response = self.request(method, path, None).await?;
        if response.status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(&response))
        }
    }

    fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, UpCloudError> {
        if response.status.is_success() {
            serde_json::from_slice(&response.body).map_err(UpCloudError::from)
        } else {
            Err(Self::api_error(response))
        }
    }

    fn api_error(response: &ApiResponse) -> UpCloudError {
        let status = response.status.as_u16();
        match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => UpCloudError::Api {
                status,
                code: envelope.error.error_code,
                message: envelope.error.error_message,
            },
            Err(_) => UpCloudError::Api {
                status,
                code: String::new(),
                message: String::from_utf8_lossy(&response.body).into_owned(),
            },
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_code: String,
    #[serde(default)]
    error_message: String,
}
