//! Typed async client for the UpCloud REST API.
//!
//! The crate exposes server, storage, tag, firewall, and IP address
//! lifecycle management as method calls on [`UpCloudClient`]. Mutating
//! operations that the provider completes asynchronously (stop, clone,
//! backup, restore) have `*_and_wait` companions built on the
//! deadline-bounded [`poll::Poller`], which blocks until the resource
//! reaches the requested state, disappears, or the deadline elapses.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod firewall;
pub mod ip_address;
pub mod plan;
pub mod poll;
pub mod server;
pub mod storage;
pub mod tag;

pub use account::Account;
pub use client::{Credentials, DEFAULT_API_ROOT, DEFAULT_POLL_INTERVAL, UpCloudClient};
pub use config::{ConfigError, UpCloudConfig};
pub use error::UpCloudError;
pub use firewall::FirewallRule;
pub use ip_address::{AssignIpAddressRequest, IpAddress};
pub use plan::{Plan, ServerSize};
pub use poll::{MIN_POLL_INTERVAL, PollOutcome, Poller};
pub use server::{
    AttachStorageRequest, CreateServerRequest, CreateServerRequestBuilder, ModifyServerRequest,
    RestartServerRequest, STOP_WAIT_TIMEOUT, Server, ServerDetails, StopServerRequest, StopType,
    StorageDeviceSpec,
};
pub use storage::{
    CloneStorageRequest, CreateStorageRequest, ModifyStorageRequest, ONLINE_WAIT_TIMEOUT,
    RESTORE_WAIT_TIMEOUT, Storage, StorageDetails, StorageKind,
};
pub use tag::{Tag, TagRequest, TagSelector};
