//! # Configuration Settings
//!
//! Where the credential server lives and how request paths map onto it.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::api::ApiRequest;
use crate::errors::{CredHubError, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CredHubConfig {
    /// Base URL of the credential server
    #[validate(custom(function = "validate_server_url"))]
    pub url: String,

    /// Prefix inserted between the base URL and every request path, for
    /// servers mounted behind a path-routing proxy
    #[serde(default)]
    #[validate(custom(function = "validate_path_prefix"))]
    pub api_path_prefix: String,
}

impl CredHubConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), api_path_prefix: String::new() }
    }

    pub fn with_api_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_path_prefix = prefix.into();
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| CredHubError::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(|e| CredHubError::config_error(e.to_string()))
    }

    /// Absolute URL a request should be sent to.
    pub fn endpoint(&self, request: &ApiRequest) -> Result<Url> {
        let prefix = self.api_path_prefix.trim_end_matches('/');
        let full = format!("{}{}{}", self.url.trim_end_matches('/'), prefix, request.path()?);
        Url::parse(&full)
            .map_err(|e| CredHubError::config_error(format!("Invalid endpoint {}: {}", full, e)))
    }
}

fn validate_server_url(url: &str) -> std::result::Result<(), ValidationError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ValidationError::new("invalid_server_url")),
    }
}

fn validate_path_prefix(prefix: &str) -> std::result::Result<(), ValidationError> {
    if prefix.is_empty() || (prefix.starts_with('/') && !prefix.contains(['?', '#'])) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_api_path_prefix"))
    }
}
