//! Serde models for the storage endpoints.

use serde::{Deserialize, Serialize};

use crate::error::UpCloudError;

/// Summary of a storage as returned by the list endpoints.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Storage {
    /// `public` or `private`.
    #[serde(default)]
    pub access: String,
    /// Number of licence units consumed.
    #[serde(default)]
    pub license: u32,
    /// Plan the storage is bundled with, when any.
    #[serde(default)]
    pub part_of_plan: Option<String>,
    /// Size in gigabytes.
    pub size: u32,
    /// Current state (`online`, `maintenance`, `cloning`, `backuping`,
    /// `error`).
    #[serde(default)]
    pub state: String,
    /// Storage tier (for example `maxiops` or `hdd`).
    #[serde(default)]
    pub tier: String,
    /// Human-readable title.
    pub title: String,
    /// Storage type (`disk`, `cdrom`, `template`, `backup`).
    #[serde(rename = "type", default)]
    pub storage_type: String,
    /// Provider-assigned identifier.
    pub uuid: String,
    /// Zone the storage lives in.
    #[serde(default)]
    pub zone: String,
}

/// Full view of a storage as returned by the detail endpoint and by
/// mutating operations.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct StorageDetails {
    /// `public` or `private`.
    #[serde(default)]
    pub access: String,
    /// Scheduled backup rule, when configured.
    #[serde(default)]
    pub backup_rule: Option<BackupRule>,
    /// UUIDs of backups taken of this storage.
    #[serde(default)]
    pub backups: Option<BackupList>,
    /// Number of licence units consumed.
    #[serde(default)]
    pub license: u32,
    /// UUIDs of servers this storage is attached to.
    #[serde(default)]
    pub servers: Option<ServerUuidList>,
    /// Size in gigabytes.
    pub size: u32,
    /// Current state.
    #[serde(default)]
    pub state: String,
    /// Storage tier.
    #[serde(default)]
    pub tier: String,
    /// Human-readable title.
    pub title: String,
    /// Storage type.
    #[serde(rename = "type", default)]
    pub storage_type: String,
    /// Provider-assigned identifier.
    pub uuid: String,
    /// Zone the storage lives in.
    #[serde(default)]
    pub zone: String,
}

/// Scheduled backup settings for a storage.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BackupRule {
    /// Weekday the backup runs on (`daily` or a weekday name).
    pub interval: String,
    /// Start time as `hhmm`.
    pub time: String,
    /// Days the backup is retained.
    pub retention: String,
}

/// Doubly-keyed wrapper around backup UUIDs.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct BackupList {
    /// UUIDs of the backups.
    #[serde(default)]
    pub backup: Vec<String>,
}

/// Doubly-keyed wrapper around server UUIDs.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ServerUuidList {
    /// UUIDs of the servers.
    #[serde(default)]
    pub server: Vec<String>,
}

/// Filter applied to the storage list endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StorageKind {
    /// Storages visible to everyone.
    Public,
    /// Storages owned by the account.
    Private,
    /// Plain disk storages.
    Normal,
    /// Backups.
    Backup,
    /// CD-ROM images.
    Cdrom,
    /// Templates.
    Template,
    /// Storages marked as favourites.
    Favorite,
}

impl StorageKind {
    /// Path segment selecting this kind on the list endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Normal => "normal",
            Self::Backup => "backup",
            Self::Cdrom => "cdrom",
            Self::Template => "template",
            Self::Favorite => "favorite",
        }
    }
}

/// Parameters for creating a storage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateStorageRequest {
    /// Size in gigabytes.
    pub size: u32,
    /// Human-readable title.
    pub title: String,
    /// Target zone.
    pub zone: String,
    /// Storage tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Scheduled backup rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_rule: Option<BackupRule>,
}

impl CreateStorageRequest {
    /// Creates a request for a storage of `size` gigabytes.
    #[must_use]
    pub fn new(size: u32, title: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            size,
            title: title.into(),
            zone: zone.into(),
            tier: None,
            backup_rule: None,
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Validation`] when the size is zero or a
    /// required field is empty.
    pub fn validate(&self) -> Result<(), UpCloudError> {
        if self.size == 0 {
            return Err(UpCloudError::Validation("size".to_owned()));
        }
        if self.title.trim().is_empty() {
            return Err(UpCloudError::Validation("title".to_owned()));
        }
        if self.zone.trim().is_empty() {
            return Err(UpCloudError::Validation("zone".to_owned()));
        }
        Ok(())
    }
}

/// Parameters for modifying a storage. Unset fields are left untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ModifyStorageRequest {
    /// New size in gigabytes; shrinking is not supported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New scheduled backup rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_rule: Option<BackupRule>,
}

/// Parameters for cloning a storage into a new one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CloneStorageRequest {
    /// Zone the clone is created in.
    pub zone: String,
    /// Title for the clone.
    pub title: String,
    /// Tier for the clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl CloneStorageRequest {
    /// Creates a clone request targeting `zone`.
    #[must_use]
    pub fn new(zone: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            title: title.into(),
            tier: None,
        }
    }
}
