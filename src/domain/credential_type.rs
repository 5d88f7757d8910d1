//! Credential type tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CredHubError;

/// Credential type enumeration matching the server's `type` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    /// Single opaque string
    Value,
    /// Single password string
    Password,
    /// Username/password pair
    User,
    /// Arbitrary JSON object
    Json,
    /// Certificate, CA and private key
    Certificate,
    /// RSA key pair
    Rsa,
    /// SSH key pair
    Ssh,
}

impl CredentialType {
    /// All tags in wire order.
    pub const ALL: [CredentialType; 7] = [
        Self::Value,
        Self::Password,
        Self::User,
        Self::Json,
        Self::Certificate,
        Self::Rsa,
        Self::Ssh,
    ];

    /// Get the wire representation of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Password => "password",
            Self::User => "user",
            Self::Json => "json",
            Self::Certificate => "certificate",
            Self::Rsa => "rsa",
            Self::Ssh => "ssh",
        }
    }
}

impl FromStr for CredentialType {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(Self::Value),
            "password" => Ok(Self::Password),
            "user" => Ok(Self::User),
            "json" => Ok(Self::Json),
            "certificate" => Ok(Self::Certificate),
            "rsa" => Ok(Self::Rsa),
            "ssh" => Ok(Self::Ssh),
            _ => Err(CredHubError::deserialization(format!("Unknown credential type: {}", s))),
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
