//! IP address management.
//!
//! Addresses are detached resources with their own lifecycle: they can be
//! assigned to a server, given a reverse-DNS record, and released.


use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::UpCloudClient;
use crate::error::UpCloudError;

/// One IP address as returned by the API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct IpAddress {
    /// `public`, `private`, or `utility`.
    pub access: String,
    /// The address itself; also the identifier used in paths.
    pub address: String,
    /// Address family (`IPv4` or `IPv6`).
    #[serde(default)]
    pub family: String,
    /// Reverse-DNS record, when configured.
    #[serde(default)]
    pub ptr_record: String,
    /// UUID of the server the address is assigned to.
    #[serde(default)]
    pub server: String,
}

/// Parameters for assigning a new IP address to a server.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AssignIpAddressRequest {
    /// Address family to allocate from (`IPv4` or `IPv6`).
    pub family: String,
    /// UUID of the server the new address is assigned to.
    pub server: String,
}

impl AssignIpAddressRequest {
    /// Assign a new IPv4 address to `server`.
    #[must_use]
    pub fn ipv4(server: impl Into<String>) -> Self {
        Self {
            family: "IPv4".to_owned(),
            server: server.into(),
        }
    }
}

#[derive(Deserialize)]
struct IpAddressListResponse {
    ip_addresses: IpAddressListInner,
}

#[derive(Deserialize)]
struct IpAddressListInner {
    #[serde(default)]
    ip_address: Vec<IpAddress>,
}

#[derive(Deserialize)]
struct IpAddressDetailResponse {
    ip_address: IpAddress,
}

#[derive(Serialize)]
struct IpAddressWrapper<T: Serialize> {
    ip_address: T,
}

#[derive(Serialize)]
struct PtrRecordOnly<'a> {
    ptr_record: &'a str,
}

impl UpCloudClient {
    /// Lists every IP address on the account.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_ip_addresses(&self) -> Result<Vec<IpAddress>, UpCloudError> {
        let response: IpAddressListResponse = self.read("ip_address").await?;
        Ok(response.ip_addresses.ip_address)
    }

    /// Fetches the details of one IP address.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Api`] with status 404 for an unknown
    /// address.
    pub async fn get_ip_address(&self, address: &str) -> Result<IpAddress, UpCloudError> {
        let response: IpAddressDetailResponse =
            self.read(&format!("ip_address/{address}")).await?;
        Ok(response.ip_address)
    }

    /// Assigns a new IP address to a server. The server must be stopped.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn assign_ip_address(
        &self,
        request: &AssignIpAddressRequest,
    ) -> Result<IpAddress, UpCloudError> {
        let response: IpAddressDetailResponse = self
            .write(
                Method::POST,
                "ip_address",
                &IpAddressWrapper {
                    ip_address: request,
                },
            )
            .await?;
        Ok(response.ip_address)
    }

    /// Sets the reverse-DNS record of an IP address.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn modify_ip_address(
        &self,
        address: &str,
        ptr_record: &str,
    ) -> Result<IpAddress, UpCloudError> {
        let response: IpAddressDetailResponse = self
            .write(
                Method::PUT,
                &format!("ip_address/{address}"),
                &IpAddressWrapper {
                    ip_address: PtrRecordOnly { ptr_record },
                },
            )
            .await?;
        Ok(response.ip_address)
    }

    /// Releases an IP address back to the provider.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn release_ip_address(&self, address: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::DELETE, &format!("ip_address/{address}"))
            .await
    }
}
