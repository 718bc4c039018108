//! Per-server firewall rule management.
//!
//! Rules are addressed by position within a server's rule list; creating
//! a rule without a position appends it.

#[cfg(test)]
mod tests;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::UpCloudClient;
use crate::error::UpCloudError;

/// One firewall rule. The same shape is used for creation and reads;
/// unset fields mean "any" on the matching side.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FirewallRule {
    /// Position in the rule list, `1`-based. Assigned by the provider
    /// when omitted on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// `accept` or `drop`.
    pub action: String,
    /// `in` or `out`.
    pub direction: String,
    /// Address family (`IPv4` or `IPv6`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Protocol (`tcp`, `udp`, `icmp`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// ICMP type, when `protocol` is `icmp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<String>,
    /// First address of the matched source range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_address_start: Option<String>,
    /// Last address of the matched source range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_address_end: Option<String>,
    /// First port of the matched source range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port_start: Option<String>,
    /// Last port of the matched source range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port_end: Option<String>,
    /// First address of the matched destination range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_address_start: Option<String>,
    /// Last address of the matched destination range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_address_end: Option<String>,
    /// First port of the matched destination range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_port_start: Option<String>,
    /// Last port of the matched destination range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_port_end: Option<String>,
    /// Free-form comment shown in rule listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Deserialize)]
struct FirewallRuleListResponse {
    firewall_rules: FirewallRuleListInner,
}

#[derive(Deserialize)]
struct FirewallRuleListInner {
    #[serde(default)]
    firewall_rule: Vec<FirewallRule>,
}

#[derive(Deserialize)]
struct FirewallRuleDetailResponse {
    firewall_rule: FirewallRule,
}

#[derive(Serialize)]
struct FirewallRuleWrapper<'a> {
    firewall_rule: &'a FirewallRule,
}

impl UpCloudClient {
    /// Lists the firewall rules of a server in position order.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_firewall_rules(
        &self,
        server_uuid: &str,
    ) -> Result<Vec<FirewallRule>, UpCloudError> {
        let response: FirewallRuleListResponse = self
            .read(&format!("server/{server_uuid}/firewall_rule"))
            .await?;
        Ok(response.firewall_rules.firewall_rule)
    }

    /// Creates a firewall rule on a server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn create_firewall_rule(
        &self,
        server_uuid: &str,
        rule: &FirewallRule,
    ) -> Result<FirewallRule, UpCloudError> {
        let response: FirewallRuleDetailResponse = self
            .write(
                Method::POST,
                &format!("server/{server_uuid}/firewall_rule"),
                &FirewallRuleWrapper { firewall_rule: rule },
            )
            .await?;
        Ok(response.firewall_rule)
    }

    /// Fetches the rule at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Api`] with status 404 when no rule exists
    /// at that position.
    pub async fn get_firewall_rule(
        &self,
        server_uuid: &str,
        position: u32,
    ) -> Result<FirewallRule, UpCloudError> {
        let response: FirewallRuleDetailResponse = self
            .read(&format!("server/{server_uuid}/firewall_rule/{position}"))
            .await?;
        Ok(response.firewall_rule)
    }

    /// Deletes the rule at `position`; later rules shift up.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn delete_firewall_rule(
        &self,
        server_uuid: &str,
        position: u32,
    ) -> Result<(), UpCloudError> {
        self.write_no_content(
            Method::DELETE,
            &format!("server/{server_uuid}/firewall_rule/{position}"),
        )
        .await
    }
}
