//! Serde models for the server endpoints.
//!
//! Field-by-field these mirror the provider's JSON. Numeric-looking values
//! the API delivers as JSON strings (`core_number`, `memory_amount`) stay
//! `String` and are round-tripped untouched.

use serde::{Deserialize, Serialize};

use crate::error::UpCloudError;

/// Summary of a server as returned by the list endpoint.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Server {
    /// Number of CPU cores, as a string.
    #[serde(default)]
    pub core_number: String,
    /// Hostname of the server.
    pub hostname: String,
    /// Number of licence units consumed.
    #[serde(default)]
    pub license: u32,
    /// Memory in megabytes, as a string.
    #[serde(default)]
    pub memory_amount: String,
    /// Preconfigured plan name, or `custom`.
    #[serde(default)]
    pub plan: String,
    /// Current state (`started`, `stopped`, `maintenance`, `error`).
    pub state: String,
    /// Tags attached to the server.
    #[serde(default)]
    pub tags: Option<TagList>,
    /// Human-readable title.
    pub title: String,
    /// Provider-assigned identifier.
    pub uuid: String,
    /// Zone the server lives in.
    pub zone: String,
}

/// Full view of a server as returned by the detail endpoint and by
/// mutating operations.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ServerDetails {
    /// Boot device order (for example `cdrom,disk`).
    #[serde(default)]
    pub boot_order: String,
    /// Number of CPU cores, as a string.
    #[serde(default)]
    pub core_number: String,
    /// Firewall state for the server (`on` or `off`).
    #[serde(default)]
    pub firewall: String,
    /// Hostname of the server.
    pub hostname: String,
    /// IP addresses assigned to the server.
    #[serde(default)]
    pub ip_addresses: Option<ServerIpAddressList>,
    /// Number of licence units consumed.
    #[serde(default)]
    pub license: u32,
    /// Memory in megabytes, as a string.
    #[serde(default)]
    pub memory_amount: String,
    /// Network interface card model.
    #[serde(default)]
    pub nic_model: String,
    /// Preconfigured plan name, or `custom`.
    #[serde(default)]
    pub plan: String,
    /// Current state (`started`, `stopped`, `maintenance`, `error`).
    pub state: String,
    /// Storage devices attached to the server.
    #[serde(default)]
    pub storage_devices: Option<StorageDeviceList>,
    /// Tags attached to the server.
    #[serde(default)]
    pub tags: Option<TagList>,
    /// IANA timezone of the hardware clock.
    #[serde(default)]
    pub timezone: String,
    /// Human-readable title.
    pub title: String,
    /// Provider-assigned identifier.
    pub uuid: String,
    /// Video adapter model.
    #[serde(default)]
    pub video_model: String,
    /// VNC remote-access state (`on` or `off`).
    #[serde(default)]
    pub vnc: String,
    /// Password for the VNC console, when enabled.
    #[serde(default)]
    pub vnc_password: String,
    /// Zone the server lives in.
    pub zone: String,
}

/// Doubly-keyed wrapper around the tag names on a server.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct TagList {
    /// Tag names.
    #[serde(default)]
    pub tag: Vec<String>,
}

/// Doubly-keyed wrapper around a server's assigned IP addresses.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ServerIpAddressList {
    /// Assigned addresses.
    #[serde(default)]
    pub ip_address: Vec<ServerIpAddress>,
}

/// One IP address as embedded in a server detail response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ServerIpAddress {
    /// `public`, `private`, or `utility`.
    pub access: String,
    /// The address itself.
    pub address: String,
    /// Address family (`IPv4` or `IPv6`).
    #[serde(default)]
    pub family: String,
}

/// Doubly-keyed wrapper around a server's attached storage devices.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct StorageDeviceList {
    /// Attached devices.
    #[serde(default)]
    pub storage_device: Vec<AttachedStorage>,
}

/// One storage device as embedded in a server detail response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct AttachedStorage {
    /// Bus address the device is attached at (for example `virtio:1`).
    #[serde(default)]
    pub address: String,
    /// UUID of the backing storage resource.
    pub storage: String,
    /// Size of the backing storage in gigabytes.
    #[serde(default)]
    pub storage_size: u32,
    /// Title of the backing storage.
    #[serde(default)]
    pub storage_title: String,
    /// Device type (`disk` or `cdrom`).
    #[serde(rename = "type", default)]
    pub device_type: String,
}

/// Parameters for creating a server.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreateServerRequest {
    /// Hostname for the new server.
    pub hostname: String,
    /// Human-readable title.
    pub title: String,
    /// Target zone.
    pub zone: String,
    /// Preconfigured plan; mutually exclusive with explicit sizing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Explicit CPU core count, as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_number: Option<String>,
    /// Explicit memory in megabytes, as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_amount: Option<String>,
    /// Storage devices to create, clone, or attach with the server.
    pub storage_devices: StorageDeviceSpecs,
}

impl CreateServerRequest {
    /// Starts a builder for a [`CreateServerRequest`].
    #[must_use]
    pub fn builder() -> CreateServerRequestBuilder {
        CreateServerRequestBuilder::default()
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Validation`] when a required field is empty
    /// or no storage device was specified.
    pub fn validate(&self) -> Result<(), UpCloudError> {
        if self.hostname.is_empty() {
            return Err(UpCloudError::Validation("hostname".to_owned()));
        }
        if self.title.is_empty() {
            return Err(UpCloudError::Validation("title".to_owned()));
        }
        if self.zone.is_empty() {
            return Err(UpCloudError::Validation("zone".to_owned()));
        }
        if self.storage_devices.storage_device.is_empty() {
            return Err(UpCloudError::Validation("storage_devices".to_owned()));
        }
        Ok(())
    }
}

/// Builder for [`CreateServerRequest`] that defers trimming and validation
/// to construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateServerRequestBuilder {
    hostname: String,
    title: String,
    zone: String,
    plan: Option<String>,
    core_number: Option<String>,
    memory_amount: Option<String>,
    storage_devices: Vec<StorageDeviceSpec>,
}

impl CreateServerRequestBuilder {
    /// Sets the hostname.
    #[must_use]
    pub fn hostname(mut self, value: impl Into<String>) -> Self {
        self.hostname = value.into();
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = value.into();
        self
    }

    /// Sets the target zone.
    #[must_use]
    pub fn zone(mut self, value: impl Into<String>) -> Self {
        self.zone = value.into();
        self
    }

    /// Sets a preconfigured plan.
    #[must_use]
    pub fn plan(mut self, value: impl Into<String>) -> Self {
        self.plan = Some(value.into());
        self
    }

    /// Sets an explicit CPU core count.
    #[must_use]
    pub fn core_number(mut self, value: impl Into<String>) -> Self {
        self.core_number = Some(value.into());
        self
    }

    /// Sets explicit memory in megabytes.
    #[must_use]
    pub fn memory_amount(mut self, value: impl Into<String>) -> Self {
        self.memory_amount = Some(value.into());
        self
    }

    /// Adds a storage device specification; at least one is required.
    #[must_use]
    pub fn storage_device(mut self, device: StorageDeviceSpec) -> Self {
        self.storage_devices.push(device);
        self
    }

    /// Builds and validates the [`CreateServerRequest`], trimming string
    /// inputs.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Validation`] when a required field is empty
    /// or no storage device was added.
    pub fn build(self) -> Result<CreateServerRequest, UpCloudError> {
        let request = CreateServerRequest {
            hostname: self.hostname.trim().to_owned(),
            title: self.title.trim().to_owned(),
            zone: self.zone.trim().to_owned(),
            plan: self.plan,
            core_number: self.core_number,
            memory_amount: self.memory_amount,
            storage_devices: StorageDeviceSpecs {
                storage_device: self.storage_devices,
            },
        };
        request.validate()?;
        Ok(request)
    }
}

/// Doubly-keyed wrapper around the storage device specifications of a
/// create request.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StorageDeviceSpecs {
    /// The device specifications.
    pub storage_device: Vec<StorageDeviceSpec>,
}

/// One storage device specification in a create request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StorageDeviceSpec {
    /// `create`, `clone`, or `attach`.
    pub action: String,
    /// UUID of an existing storage or template, for clone/attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    /// Size in gigabytes, for create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Title for the new storage, for create/clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Storage tier (for example `maxiops`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

impl StorageDeviceSpec {
    /// Specification for a blank storage of `size` gigabytes.
    #[must_use]
    pub fn create(size: u32, title: impl Into<String>) -> Self {
        Self {
            action: "create".to_owned(),
            storage: None,
            size: Some(size),
            title: Some(title.into()),
            tier: None,
        }
    }

    /// Specification cloning an existing storage or template.
    #[must_use]
    pub fn clone_from(storage: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            action: "clone".to_owned(),
            storage: Some(storage.into()),
            size: None,
            title: Some(title.into()),
            tier: None,
        }
    }

    /// Specification attaching an existing storage.
    #[must_use]
    pub fn attach(storage: impl Into<String>) -> Self {
        Self {
            action: "attach".to_owned(),
            storage: Some(storage.into()),
            size: None,
            title: None,
            tier: None,
        }
    }
}

/// Parameters for modifying a server. Unset fields are left untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ModifyServerRequest {
    /// New hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New CPU core count, as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_number: Option<String>,
    /// New memory in megabytes, as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_amount: Option<String>,
    /// New plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// New firewall state (`on` or `off`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall: Option<String>,
}

/// How a server should be stopped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StopType {
    /// ACPI shutdown signal; the guest may ignore it.
    #[default]
    Soft,
    /// Immediate power-off.
    Hard,
}

impl StopType {
    /// Wire value for the stop type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Hard => "hard",
        }
    }
}

/// Parameters for stopping a server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StopServerRequest {
    /// Soft or hard stop.
    pub stop_type: StopType,
    /// Seconds to wait for a soft stop before giving up, provider-side.
    pub timeout: Option<u32>,
}

impl Default for StopServerRequest {
    fn default() -> Self {
        Self {
            stop_type: StopType::Soft,
            timeout: Some(60),
        }
    }
}

/// Parameters for restarting a server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestartServerRequest {
    /// Soft or hard stop phase of the restart.
    pub stop_type: StopType,
    /// Seconds the provider waits for the stop phase.
    pub timeout: Option<u32>,
    /// What the provider does when the stop phase times out (`destroy` or
    /// `ignore`).
    pub timeout_action: Option<String>,
}

impl Default for RestartServerRequest {
    fn default() -> Self {
        Self {
            stop_type: StopType::Soft,
            timeout: Some(60),
            timeout_action: Some("destroy".to_owned()),
        }
    }
}

/// Parameters for attaching a storage to a server.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AttachStorageRequest {
    /// UUID of the storage to attach.
    pub storage: String,
    /// Bus address to attach at (for example `virtio`); the provider picks
    /// a free slot when only the bus is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Device type (`disk` or `cdrom`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

impl AttachStorageRequest {
    /// Attaches `storage` as a virtio disk.
    #[must_use]
    pub fn disk(storage: impl Into<String>) -> Self {
        Self {
            storage: storage.into(),
            address: Some("virtio".to_owned()),
            device_type: Some("disk".to_owned()),
        }
    }
}
