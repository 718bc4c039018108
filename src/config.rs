//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::client::Credentials;
use crate::error::UpCloudError;

/// UpCloud API configuration derived from environment variables and
/// configuration files.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "UPCLOUD")]
pub struct UpCloudConfig {
    /// Account username used for HTTP Basic Authentication. Required.
    pub username: String,
    /// Account password used for HTTP Basic Authentication. Required.
    pub password: String,
    /// Override for the API root URL. Primarily useful for pointing the
    /// client at a test double; production callers can leave it unset.
    pub api_root: Option<String>,
}

/// Metadata for a configuration field, used to generate actionable error
/// messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(
        description: &'static str,
        env_var: &'static str,
        toml_key: &'static str,
    ) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }
}

impl UpCloudConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to upcloud.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads configuration by merging defaults, configuration files, and
    /// environment variables. Command-line arguments are never consulted;
    /// this crate is a library and owns no CLI surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge
    /// sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("upcloud")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds the credential pair held by a client for its lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when either credential is
    /// blank.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        self.validate()?;
        Ok(Credentials::new(&self.username, &self.password))
    }

    /// Performs semantic validation on required fields. Error messages
    /// include guidance on how to provide missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is
    /// empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.username,
            &FieldMetadata::new("UpCloud account username", "UPCLOUD_USERNAME", "username"),
        )?;
        Self::require_field(
            &self.password,
            &FieldMetadata::new("UpCloud account password", "UPCLOUD_PASSWORD", "password"),
        )?;
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<ConfigError> for UpCloudError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
