//! Response envelopes.
//!
//! The `type` tag and the `value` are siblings in every credential document,
//! so [`CredentialDetails`] decodes the envelope first and then hands the raw
//! value to [`CredentialValueType::from_wire`] with the tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::values::CredentialValueType;
use crate::domain::{CredentialId, CredentialName, CredentialType};
use crate::errors::{CredHubError, Result};

/// A credential version as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialDetails<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<CredentialId>,
    name: CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transitional: Option<bool>,
}

#[derive(Deserialize)]
struct RawCredentialDetails {
    id: Option<CredentialId>,
    name: CredentialName,
    #[serde(rename = "type")]
    credential_type: CredentialType,
    value: Value,
    version_created_at: Option<DateTime<Utc>>,
    transitional: Option<bool>,
}

impl<T: CredentialValueType> CredentialDetails<T> {
    /// Decode a credential document.
    ///
    /// # Errors
    ///
    /// [`CredHubError::Deserialization`] when the envelope is missing `name`,
    /// `type` or `value`, the tag is unknown, or the value does not match `T`.
    pub fn from_json(document: Value) -> Result<Self> {
        let raw: RawCredentialDetails = serde_json::from_value(document)
            .map_err(|e| CredHubError::decode("invalid credential document", e))?;
        let value = T::from_wire(raw.credential_type, raw.value)?;

        Ok(Self {
            id: raw.id,
            name: raw.name,
            credential_type: raw.credential_type,
            value,
            version_created_at: raw.version_created_at,
            transitional: raw.transitional,
        })
    }

    pub fn id(&self) -> Option<&CredentialId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    pub fn credential_type(&self) -> CredentialType {
        self.credential_type
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn version_created_at(&self) -> Option<DateTime<Utc>> {
        self.version_created_at
    }

    /// Only reported for certificates.
    pub fn is_transitional(&self) -> Option<bool> {
        self.transitional
    }
}

impl<'de, T: CredentialValueType> Deserialize<'de> for CredentialDetails<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        Self::from_json(document).map_err(serde::de::Error::custom)
    }
}

/// All versions of a credential, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: CredentialValueType"))]
pub struct CredentialDetailsData<T> {
    data: Vec<CredentialDetails<T>>,
}

impl<T: CredentialValueType> CredentialDetailsData<T> {
    pub fn data(&self) -> &[CredentialDetails<T>] {
        &self.data
    }

    pub fn into_data(self) -> Vec<CredentialDetails<T>> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Search hit: a credential name and when its latest version was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    name: CredentialName,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_created_at: Option<DateTime<Utc>>,
}

impl CredentialSummary {
    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    pub fn version_created_at(&self) -> Option<DateTime<Utc>> {
        self.version_created_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummaryData {
    #[serde(default)]
    credentials: Vec<CredentialSummary>,
}

impl CredentialSummaryData {
    pub fn credentials(&self) -> &[CredentialSummary] {
        &self.credentials
    }

    pub fn into_credentials(self) -> Vec<CredentialSummary> {
        self.credentials
    }
}

/// A path prefix that holds at least one credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPath {
    path: String,
}

impl CredentialPath {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPathData {
    #[serde(default)]
    paths: Vec<CredentialPath>,
}

impl CredentialPathData {
    pub fn paths(&self) -> &[CredentialPath] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<CredentialPath> {
        self.paths
    }
}

/// Server version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    version: String,
}

impl VersionInfo {
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Service binding data in the shape of `VCAP_SERVICES`.
///
/// Interpolation replaces `credhub-ref` entries in each binding's
/// `credentials` with the referenced credential values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicesData(Map<String, Value>);

impl ServicesData {
    pub fn new(services: Map<String, Value>) -> Self {
        Self(services)
    }

    /// Bindings offered under a service label.
    pub fn service(&self, label: &str) -> Option<&Value> {
        self.0.get(label)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for ServicesData {
    type Error = CredHubError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CredHubError::invalid_argument(format!(
                "services data must be a JSON object, got {}",
                other
            ))),
        }
    }
}
