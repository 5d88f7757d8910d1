//! Hierarchical credential names.
//!
//! A credential name is an ordered list of path segments rendered as
//! `/segment/segment/...`. The root (no segments) renders as `/`.
//!
//! ```rust,ignore
//! let name = CredentialName::new(["example", "credential"])?;
//! assert_eq!(name.as_str(), "/example/credential");
//!
//! let bound = ServiceInstanceCredentialName::builder()
//!     .service_broker_name("broker")
//!     .service_offering_name("offering")
//!     .service_binding_id("1234")
//!     .credential_name("db")
//!     .build()?;
//! assert_eq!(CredentialName::from(bound).as_str(), "/broker/offering/1234/db");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::errors::{CredHubError, Result};

const SEPARATOR: char = '/';

/// Validates a single path segment.
///
/// Rejects empty segments and segments containing the `/` separator.
fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(CredHubError::invalid_argument("credential name segment cannot be empty"));
    }

    if segment.contains(SEPARATOR) {
        return Err(CredHubError::invalid_argument(format!(
            "credential name segment '{}' cannot contain '/'",
            segment
        )));
    }

    Ok(())
}

fn render(segments: &[String]) -> String {
    if segments.is_empty() {
        return SEPARATOR.to_string();
    }
    segments.iter().fold(String::new(), |mut path, segment| {
        path.push(SEPARATOR);
        path.push_str(segment);
        path
    })
}

/// Name of a credential, addressed by its slash-separated path.
///
/// Equality and hashing use the rendered path.
#[derive(Clone)]
pub struct CredentialName {
    segments: Vec<String>,
    path: String,
}

impl CredentialName {
    /// Build a name from path segments.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] if any segment is empty or contains `/`.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        for segment in &segments {
            validate_segment(segment)?;
        }
        let path = render(&segments);
        Ok(Self { segments, path })
    }

    /// The root name `/`.
    pub fn root() -> Self {
        Self { segments: Vec::new(), path: SEPARATOR.to_string() }
    }

    /// Parse a rendered path such as `/example/credential`.
    ///
    /// The leading slash is optional; a trailing slash or an empty inner
    /// segment is rejected.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.strip_prefix(SEPARATOR).unwrap_or(path);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        Self::new(trimmed.split(SEPARATOR)).map_err(|_| {
            CredHubError::invalid_argument(format!("malformed credential name '{}'", path))
        })
    }

    /// Append a segment, producing a child name.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        validate_segment(&segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment);
        let path = render(&segments);
        Ok(Self { segments, path })
    }

    /// The rendered path.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The individual path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, `None` for the root.
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl PartialEq for CredentialName {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for CredentialName {}

impl Hash for CredentialName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Debug for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CredentialName").field(&self.path).finish()
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl FromStr for CredentialName {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for CredentialName {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl Serialize for CredentialName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.path)
    }
}

impl<'de> Deserialize<'de> for CredentialName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let path = String::deserialize(deserializer)?;
        Self::parse(&path).map_err(serde::de::Error::custom)
    }
}

/// Name of a credential bound to a service instance by a service broker.
///
/// Renders as `/<broker>/<offering>/<binding id>/<credential>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceInstanceCredentialName {
    service_broker_name: String,
    service_offering_name: String,
    service_binding_id: String,
    credential_name: String,
    name: CredentialName,
}

impl ServiceInstanceCredentialName {
    /// Build directly from the four components.
    pub fn new(
        service_broker_name: impl Into<String>,
        service_offering_name: impl Into<String>,
        service_binding_id: impl Into<String>,
        credential_name: impl Into<String>,
    ) -> Result<Self> {
        let service_broker_name = service_broker_name.into();
        let service_offering_name = service_offering_name.into();
        let service_binding_id = service_binding_id.into();
        let credential_name = credential_name.into();

        let name = CredentialName::new([
            service_broker_name.as_str(),
            service_offering_name.as_str(),
            service_binding_id.as_str(),
            credential_name.as_str(),
        ])?;

        Ok(Self {
            service_broker_name,
            service_offering_name,
            service_binding_id,
            credential_name,
            name,
        })
    }

    /// Start a builder.
    pub fn builder() -> ServiceInstanceCredentialNameBuilder {
        ServiceInstanceCredentialNameBuilder::default()
    }

    pub fn service_broker_name(&self) -> &str {
        &self.service_broker_name
    }

    pub fn service_offering_name(&self) -> &str {
        &self.service_offering_name
    }

    pub fn service_binding_id(&self) -> &str {
        &self.service_binding_id
    }

    pub fn credential_name(&self) -> &str {
        &self.credential_name
    }

    /// The rendered path.
    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }

    /// Borrow as a plain credential name.
    pub fn as_credential_name(&self) -> &CredentialName {
        &self.name
    }
}

impl fmt::Display for ServiceInstanceCredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

impl From<ServiceInstanceCredentialName> for CredentialName {
    fn from(name: ServiceInstanceCredentialName) -> Self {
        name.name
    }
}

/// Builder for [`ServiceInstanceCredentialName`].
#[derive(Debug, Clone, Default)]
pub struct ServiceInstanceCredentialNameBuilder {
    service_broker_name: Option<String>,
    service_offering_name: Option<String>,
    service_binding_id: Option<String>,
    credential_name: Option<String>,
}

impl ServiceInstanceCredentialNameBuilder {
    pub fn service_broker_name(mut self, name: impl Into<String>) -> Self {
        self.service_broker_name = Some(name.into());
        self
    }

    pub fn service_offering_name(mut self, name: impl Into<String>) -> Self {
        self.service_offering_name = Some(name.into());
        self
    }

    pub fn service_binding_id(mut self, id: impl Into<String>) -> Self {
        self.service_binding_id = Some(id.into());
        self
    }

    pub fn credential_name(mut self, name: impl Into<String>) -> Self {
        self.credential_name = Some(name.into());
        self
    }

    /// Build the name.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] if a component is missing or invalid.
    pub fn build(self) -> Result<ServiceInstanceCredentialName> {
        fn required(value: Option<String>, field: &str) -> Result<String> {
            value.ok_or_else(|| CredHubError::invalid_argument(format!("{} must be set", field)))
        }

        ServiceInstanceCredentialName::new(
            required(self.service_broker_name, "service broker name")?,
            required(self.service_offering_name, "service offering name")?,
            required(self.service_binding_id, "service binding id")?,
            required(self.credential_name, "credential name")?,
        )
    }
}
