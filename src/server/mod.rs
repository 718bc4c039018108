//! Server lifecycle operations.
//!
//! Mutating calls return the provider's post-operation view of the
//! server. Stop is inherently asynchronous on the provider side;
//! [`UpCloudClient::stop_server_and_wait`] layers the deadline-bounded
//! poll on top, and [`UpCloudClient::wait_for_server_state`] is the
//! building block for callers who restart and poll separately.

mod types;

use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::UpCloudClient;
use crate::error::UpCloudError;
use crate::poll::{PollOutcome, Poller};

pub use types::{
    AttachStorageRequest, AttachedStorage, CreateServerRequest, CreateServerRequestBuilder,
    ModifyServerRequest, RestartServerRequest, Server, ServerDetails, ServerIpAddress,
    ServerIpAddressList, StopServerRequest, StopType, StorageDeviceList, StorageDeviceSpec,
    StorageDeviceSpecs, TagList,
};

/// Default deadline for waiting until a stopped server reports `stopped`.
pub const STOP_WAIT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Deserialize)]
struct ServerListResponse {
    servers: ServerListInner,
}

#[derive(Deserialize)]
struct ServerListInner {
    #[serde(default)]
    server: Vec<Server>,
}

#[derive(Deserialize)]
struct ServerDetailResponse {
    server: ServerDetails,
}

#[derive(Serialize)]
struct ServerWrapper<'a, T: Serialize> {
    server: &'a T,
}

#[derive(Serialize)]
struct StopServerBody<'a> {
    stop_server: WireStop<'a>,
}

#[derive(Serialize)]
struct WireStop<'a> {
    stop_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<String>,
}

#[derive(Serialize)]
struct RestartServerBody<'a> {
    restart_server: WireRestart<'a>,
}

#[derive(Serialize)]
struct WireRestart<'a> {
    stop_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_action: Option<&'a str>,
}

#[derive(Serialize)]
struct StorageDeviceWrapper<T: Serialize> {
    storage_device: T,
}

#[derive(Serialize)]
struct DetachDevice<'a> {
    address: &'a str,
}

impl UpCloudClient {
    /// Lists all servers on the account.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_servers(&self) -> Result<Vec<Server>, UpCloudError> {
        let response: ServerListResponse = self.read("server").await?;
        Ok(response.servers.server)
    }

    /// Fetches the full view of one server.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Api`] with status 404 when no server has
    /// the given UUID.
    pub async fn get_server(&self, uuid: &str) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self.read(&format!("server/{uuid}")).await?;
        Ok(response.server)
    }

    /// Creates a server. Returns immediately; the new server boots in the
    /// background and can be observed via [`Self::wait_for_server_state`].
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Validation`] for an incomplete request and
    /// the usual transport/API/parse errors otherwise.
    pub async fn create_server(
        &self,
        request: &CreateServerRequest,
    ) -> Result<ServerDetails, UpCloudError> {
        request.validate()?;
        let response: ServerDetailResponse = self
            .write(Method::POST, "server", &ServerWrapper { server: request })
            .await?;
        Ok(response.server)
    }

    /// Modifies server settings. Most sizing changes require the server to
    /// be stopped first; the provider rejects them otherwise.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn modify_server(
        &self,
        uuid: &str,
        request: &ModifyServerRequest,
    ) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self
            .write(
                Method::PUT,
                &format!("server/{uuid}"),
                &ServerWrapper { server: request },
            )
            .await?;
        Ok(response.server)
    }

    /// Deletes a server. Attached storages survive and must be deleted
    /// separately.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn delete_server(&self, uuid: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::DELETE, &format!("server/{uuid}"))
            .await
    }

    /// Starts a stopped server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn start_server(&self, uuid: &str) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self
            .write_empty(Method::POST, &format!("server/{uuid}/start"))
            .await?;
        Ok(response.server)
    }

    /// Issues a stop command and returns the provider's immediate view of
    /// the server (typically still in `maintenance`).
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn stop_server(
        &self,
        uuid: &str,
        request: &StopServerRequest,
    ) -> Result<ServerDetails, UpCloudError> {
        let body = StopServerBody {
            stop_server: WireStop {
                stop_type: request.stop_type.as_str(),
                timeout: request.timeout.map(|secs| secs.to_string()),
            },
        };
        let response: ServerDetailResponse = self
            .write(Method::POST, &format!("server/{uuid}/stop"), &body)
            .await?;
        Ok(response.server)
    }

    /// Issues a stop command, then polls until the server reports
    /// `stopped`, disappears, or [`STOP_WAIT_TIMEOUT`] elapses.
    ///
    /// # Errors
    ///
    /// Returns an error only when the stop command itself fails; the poll
    /// phase reports through the returned [`PollOutcome`].
    pub async fn stop_server_and_wait(
        &self,
        uuid: &str,
        request: &StopServerRequest,
    ) -> Result<PollOutcome<ServerDetails>, UpCloudError> {
        self.stop_server(uuid, request).await?;
        Ok(self
            .wait_for_server_state(uuid, "stopped", STOP_WAIT_TIMEOUT)
            .await)
    }

    /// Issues a restart command. The provider transitions the server
    /// through `maintenance` back to `started`; callers who need to block
    /// on that can poll with [`Self::wait_for_server_state`].
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn restart_server(
        &self,
        uuid: &str,
        request: &RestartServerRequest,
    ) -> Result<ServerDetails, UpCloudError> {
        let body = RestartServerBody {
            restart_server: WireRestart {
                stop_type: request.stop_type.as_str(),
                timeout: request.timeout.map(|secs| secs.to_string()),
                timeout_action: request.timeout_action.as_deref(),
            },
        };
        let response: ServerDetailResponse = self
            .write(Method::POST, &format!("server/{uuid}/restart"), &body)
            .await?;
        Ok(response.server)
    }

    /// Polls the server until its state equals `state`, it disappears, or
    /// `deadline` elapses. The poll interval comes from the client
    /// configuration.
    pub async fn wait_for_server_state(
        &self,
        uuid: &str,
        state: &str,
        deadline: Duration,
    ) -> PollOutcome<ServerDetails> {
        let poller = Poller::new(deadline, self.poll_interval());
        poller
            .run(
                || self.fetch_server_snapshot(uuid),
                |snapshot| snapshot.state == state,
            )
            .await
    }

    /// Attaches a storage to a server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn attach_storage(
        &self,
        server_uuid: &str,
        request: &AttachStorageRequest,
    ) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self
            .write(
                Method::POST,
                &format!("server/{server_uuid}/storage/attach"),
                &StorageDeviceWrapper {
                    storage_device: request,
                },
            )
            .await?;
        Ok(response.server)
    }

    /// Detaches the storage device at `address` from a server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn detach_storage(
        &self,
        server_uuid: &str,
        address: &str,
    ) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self
            .write(
                Method::POST,
                &format!("server/{server_uuid}/storage/detach"),
                &StorageDeviceWrapper {
                    storage_device: DetachDevice { address },
                },
            )
            .await?;
        Ok(response.server)
    }

    /// Current snapshot of a server, or `None` once it no longer exists.
    pub(crate) async fn fetch_server_snapshot(
        &self,
        uuid: &str,
    ) -> Result<Option<ServerDetails>, UpCloudError> {
        let response: Option<ServerDetailResponse> =
            self.read_optional(&format!("server/{uuid}")).await?;
        Ok(response.map(|detail| detail.server))
    }
}
