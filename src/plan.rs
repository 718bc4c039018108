//! Preconfigured plans and legacy server sizes.

use serde::Deserialize;

use crate::client::UpCloudClient;
use crate::error::UpCloudError;

/// One preconfigured plan.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Plan {
    /// Number of CPU cores.
    pub core_number: u32,
    /// Memory in megabytes.
    pub memory_amount: u32,
    /// Plan name (for example `1xCPU-1GB`).
    pub name: String,
    /// Monthly public traffic allowance in megabytes.
    #[serde(default)]
    pub public_traffic_out: u32,
    /// Bundled storage size in gigabytes.
    #[serde(default)]
    pub storage_size: u32,
    /// Bundled storage tier.
    #[serde(default)]
    pub storage_tier: String,
}

/// One legacy freely-sizable server configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ServerSize {
    /// Number of CPU cores, as a string.
    pub core_number: String,
    /// Memory in megabytes, as a string.
    pub memory_amount: String,
}

#[derive(Deserialize)]
struct PlanListResponse {
    plans: PlanListInner,
}

#[derive(Deserialize)]
struct PlanListInner {
    #[serde(default)]
    plan: Vec<Plan>,
}

#[derive(Deserialize)]
struct ServerSizeListResponse {
    server_sizes: ServerSizeListInner,
}

#[derive(Deserialize)]
struct ServerSizeListInner {
    #[serde(default)]
    server_size: Vec<ServerSize>,
}

impl UpCloudClient {
    /// Lists the preconfigured plans available to new servers.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_plans(&self) -> Result<Vec<Plan>, UpCloudError> {
        let response: PlanListResponse = self.read("plan").await?;
        Ok(response.plans.plan)
    }

    /// Lists the legacy freely-sizable server configurations.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_server_sizes(&self) -> Result<Vec<ServerSize>, UpCloudError> {
        let response: ServerSizeListResponse = self.read("server_size").await?;
        Ok(response.server_sizes.server_size)
    }
}
