//! Storage lifecycle operations.
//!
//! Clone, backup, and restore are asynchronous on the provider side: the
//! affected storage leaves `online` and returns to it when the operation
//! finishes. The `*_and_wait` helpers poll for that transition;
//! [`UpCloudClient::wait_for_storage_state`] is the building block for
//! restore, where the *origin* storage is what changes state.

mod types;

use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::UpCloudClient;
use crate::error::UpCloudError;
use crate::poll::{PollOutcome, Poller};

pub use types::{
    BackupList, BackupRule, CloneStorageRequest, CreateStorageRequest, ModifyStorageRequest,
    ServerUuidList, Storage, StorageDetails, StorageKind,
};

/// Default deadline for waiting until a clone or backup reports `online`.
pub const ONLINE_WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// Default deadline for waiting out a backup restore; restores of large
/// storages are the slowest operation the API exposes.
pub const RESTORE_WAIT_TIMEOUT: Duration = Duration::from_secs(1200);

#[derive(Deserialize)]
struct StorageListResponse {
    storages: StorageListInner,
}

#[derive(Deserialize)]
struct StorageListInner {
    #[serde(default)]
    storage: Vec<Storage>,
}

#[derive(Deserialize)]
struct StorageDetailResponse {
    storage: StorageDetails,
}

#[derive(Serialize)]
struct StorageWrapper<'a, T: Serialize> {
    storage: &'a T,
}

#[derive(Serialize)]
struct TitleOnly<'a> {
    title: &'a str,
}

impl UpCloudClient {
    /// Lists storages, optionally narrowed to one kind.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_storages(
        &self,
        kind: Option<StorageKind>,
    ) -> Result<Vec<Storage>, UpCloudError> {
        let path = match kind {
            Some(kind_filter) => format!("storage/{}", kind_filter.as_str()),
            None => "storage".to_owned(),
        };
        let response: StorageListResponse = self.read(&path).await?;
        Ok(response.storages.storage)
    }

    /// Fetches the full view of one storage.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Api`] with status 404 when no storage has
    /// the given UUID.
    pub async fn get_storage(&self, uuid: &str) -> Result<StorageDetails, UpCloudError> {
        let response: StorageDetailResponse = self.read(&format!("storage/{uuid}")).await?;
        Ok(response.storage)
    }

    /// Creates a storage.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Validation`] for an incomplete request and
    /// the usual transport/API/parse errors otherwise.
    pub async fn create_storage(
        &self,
        request: &CreateStorageRequest,
    ) -> Result<StorageDetails, UpCloudError> {
        request.validate()?;
        let response: StorageDetailResponse = self
            .write(Method::POST, "storage", &StorageWrapper { storage: request })
            .await?;
        Ok(response.storage)
    }

    /// Modifies storage settings.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn modify_storage(
        &self,
        uuid: &str,
        request: &ModifyStorageRequest,
    ) -> Result<StorageDetails, UpCloudError> {
        let response: StorageDetailResponse = self
            .write(
                Method::PUT,
                &format!("storage/{uuid}"),
                &StorageWrapper { storage: request },
            )
            .await?;
        Ok(response.storage)
    }

    /// Deletes a storage. The storage must be detached and `online`.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn delete_storage(&self, uuid: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::DELETE, &format!("storage/{uuid}"))
            .await
    }

    /// Starts cloning a storage and returns the provider's view of the
    /// new clone, typically still in `maintenance`.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn clone_storage(
        &self,
        uuid: &str,
        request: &CloneStorageRequest,
    ) -> Result<StorageDetails, UpCloudError> {
        let response: StorageDetailResponse = self
            .write(
                Method::POST,
                &format!("storage/{uuid}/clone"),
                &StorageWrapper { storage: request },
            )
            .await?;
        Ok(response.storage)
    }

    /// Clones a storage, then polls the clone until it reports `online`,
    /// disappears, or [`ONLINE_WAIT_TIMEOUT`] elapses.
    ///
    /// # Errors
    ///
    /// Returns an error only when the clone command itself fails; the
    /// poll phase reports through the returned [`PollOutcome`].
    pub async fn clone_storage_and_wait(
        &self,
        uuid: &str,
        request: &CloneStorageRequest,
    ) -> Result<PollOutcome<StorageDetails>, UpCloudError> {
        let clone = self.clone_storage(uuid, request).await?;
        Ok(self
            .wait_for_storage_state(&clone.uuid, "online", ONLINE_WAIT_TIMEOUT)
            .await)
    }

    /// Turns a storage into a template usable for new servers.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn templatize_storage(
        &self,
        uuid: &str,
        title: &str,
    ) -> Result<StorageDetails, UpCloudError> {
        let response: StorageDetailResponse = self
            .write(
                Method::POST,
                &format!("storage/{uuid}/templatize"),
                &StorageWrapper {
                    storage: &TitleOnly { title },
                },
            )
            .await?;
        Ok(response.storage)
    }

    /// Starts a backup of the storage identified by `uuid` and returns
    /// the provider's view of the new backup storage.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn create_backup(
        &self,
        uuid: &str,
        title: &str,
    ) -> Result<StorageDetails, UpCloudError> {
        let response: StorageDetailResponse = self
            .write(
                Method::POST,
                &format!("storage/{uuid}/backup"),
                &StorageWrapper {
                    storage: &TitleOnly { title },
                },
            )
            .await?;
        Ok(response.storage)
    }

    /// Takes a backup, then polls the backup until it reports `online`,
    /// disappears, or [`ONLINE_WAIT_TIMEOUT`] elapses.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backup command itself fails; the
    /// poll phase reports through the returned [`PollOutcome`].
    pub async fn create_backup_and_wait(
        &self,
        uuid: &str,
        title: &str,
    ) -> Result<PollOutcome<StorageDetails>, UpCloudError> {
        let backup = self.create_backup(uuid, title).await?;
        Ok(self
            .wait_for_storage_state(&backup.uuid, "online", ONLINE_WAIT_TIMEOUT)
            .await)
    }

    /// Restores a backup onto its origin storage. Takes the *backup's*
    /// UUID; the origin storage is what transitions state, so callers
    /// block with `wait_for_storage_state(origin_uuid, "online",
    /// RESTORE_WAIT_TIMEOUT)`.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn restore_backup(&self, backup_uuid: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::POST, &format!("storage/{backup_uuid}/restore"))
            .await
    }

    /// Marks a storage as a favourite.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn favorite_storage(&self, uuid: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::POST, &format!("storage/{uuid}/favorite"))
            .await
    }

    /// Removes a storage from the favourites.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn defavorite_storage(&self, uuid: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::DELETE, &format!("storage/{uuid}/favorite"))
            .await
    }

    /// Polls the storage until its state equals `state`, it disappears,
    /// or `deadline` elapses. The poll interval comes from the client
    /// configuration.
    pub async fn wait_for_storage_state(
        &self,
        uuid: &str,
        state: &str,
        deadline: Duration,
    ) -> PollOutcome<StorageDetails> {
        let poller = Poller::new(deadline, self.poll_interval());
        poller
            .run(
                || self.fetch_storage_snapshot(uuid),
                |snapshot| snapshot.state == state,
            )
            .await
    }

    /// Current snapshot of a storage, or `None` once it no longer exists.
    pub(crate) async fn fetch_storage_snapshot(
        &self,
        uuid: &str,
    ) -> Result<Option<StorageDetails>, UpCloudError> {
        let response: Option<StorageDetailResponse> =
            self.read_optional(&format!("storage/{uuid}")).await?;
        Ok(response.map(|detail| detail.storage))
    }
}
