//! Tag management and server tag assignment.
//!
//! Tag attach/detach accepts either one tag or a collection through the
//! explicit [`TagSelector`] sum type, normalised to a comma-joined path
//! segment at the call site.


use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::UpCloudClient;
use crate::error::UpCloudError;
use crate::server::ServerDetails;

/// One tag as returned by the API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Tag {
    /// Tag name; the identifier used in paths.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// UUIDs of servers carrying the tag.
    #[serde(default)]
    pub servers: Option<TaggedServers>,
}

/// Doubly-keyed wrapper around the servers carrying a tag.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct TaggedServers {
    /// Server UUIDs.
    #[serde(default)]
    pub server: Vec<String>,
}

/// Parameters for creating or modifying a tag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TagRequest {
    /// Tag name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TagRequest {
    /// Creates a request for a tag called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Selects one tag or several for attach/detach operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagSelector {
    /// A single tag name.
    Single(String),
    /// Several tag names, applied in one call.
    Multiple(Vec<String>),
}

impl TagSelector {
    /// Normalises the selection to the comma-joined path segment the API
    /// expects.
    #[must_use]
    pub fn path_segment(&self) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Multiple(names) => names.join(","),
        }
    }
}

impl From<&str> for TagSelector {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<Vec<String>> for TagSelector {
    fn from(value: Vec<String>) -> Self {
        Self::Multiple(value)
    }
}

#[derive(Deserialize)]
struct TagListResponse {
    tags: TagListInner,
}

#[derive(Deserialize)]
struct TagListInner {
    #[serde(default)]
    tag: Vec<Tag>,
}

#[derive(Deserialize)]
struct TagDetailResponse {
    tag: Tag,
}

#[derive(Serialize)]
struct TagWrapper<'a> {
    tag: &'a TagRequest,
}

#[derive(Deserialize)]
struct ServerDetailResponse {
    server: ServerDetails,
}

impl UpCloudClient {
    /// Lists all tags on the account.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, UpCloudError> {
        let response: TagListResponse = self.read("tag").await?;
        Ok(response.tags.tag)
    }

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn create_tag(&self, request: &TagRequest) -> Result<Tag, UpCloudError> {
        let response: TagDetailResponse = self
            .write(Method::POST, "tag", &TagWrapper { tag: request })
            .await?;
        Ok(response.tag)
    }

    /// Renames or re-describes an existing tag.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn modify_tag(&self, name: &str, request: &TagRequest) -> Result<Tag, UpCloudError> {
        let response: TagDetailResponse = self
            .write(Method::PUT, &format!("tag/{name}"), &TagWrapper { tag: request })
            .await?;
        Ok(response.tag)
    }

    /// Deletes a tag, removing it from every server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API errors.
    pub async fn delete_tag(&self, name: &str) -> Result<(), UpCloudError> {
        self.write_no_content(Method::DELETE, &format!("tag/{name}"))
            .await
    }

    /// Attaches the selected tags to a server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn assign_tags(
        &self,
        server_uuid: &str,
        tags: &TagSelector,
    ) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self
            .write_empty(
                Method::POST,
                &format!("server/{server_uuid}/tag/{}", tags.path_segment()),
            )
            .await?;
        Ok(response.server)
    }

    /// Detaches the selected tags from a server.
    ///
    /// # Errors
    ///
    /// Returns the usual transport/API/parse errors.
    pub async fn remove_tags(
        &self,
        server_uuid: &str,
        tags: &TagSelector,
    ) -> Result<ServerDetails, UpCloudError> {
        let response: ServerDetailResponse = self
            .write_empty(
                Method::POST,
                &format!("server/{server_uuid}/untag/{}", tags.path_segment()),
            )
            .await?;
        Ok(response.server)
    }
}
