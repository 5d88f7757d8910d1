//! Access-control entries, v1 model.
//!
//! A [`Permission`] grants a set of [`Operation`]s to one [`Actor`]. The v1 API
//! batches permissions per credential in [`CredentialPermissions`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::name::CredentialName;
use crate::errors::{CredHubError, Result};

/// Kind of identity an actor authenticates as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorType {
    /// Application authenticated by mTLS instance identity
    App,
    /// UAA user
    User,
    /// UAA client
    Client,
}

impl ActorType {
    pub const ALL: [ActorType; 3] = [Self::App, Self::User, Self::Client];

    /// Get the wire prefix of this actor type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "mtls-app",
            Self::User => "uaa-user",
            Self::Client => "uaa-client",
        }
    }
}

impl FromStr for ActorType {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mtls-app" => Ok(Self::App),
            "uaa-user" => Ok(Self::User),
            "uaa-client" => Ok(Self::Client),
            _ => Err(CredHubError::deserialization(format!("Unknown actor type: {}", s))),
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An identity permissions are granted to, `"<type>:<identity>"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    actor_type: ActorType,
    identity: String,
}

impl Actor {
    /// Create an actor.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] if `identity` is empty.
    pub fn new(actor_type: ActorType, identity: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        if identity.is_empty() {
            return Err(CredHubError::invalid_argument("actor identity cannot be empty"));
        }
        Ok(Self { actor_type, identity })
    }

    pub fn app(identity: impl Into<String>) -> Result<Self> {
        Self::new(ActorType::App, identity)
    }

    pub fn user(identity: impl Into<String>) -> Result<Self> {
        Self::new(ActorType::User, identity)
    }

    pub fn client(identity: impl Into<String>) -> Result<Self> {
        Self::new(ActorType::Client, identity)
    }

    pub fn actor_type(&self) -> ActorType {
        self.actor_type
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Encode as `"<type>:<identity>"`.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.actor_type.as_str(), self.identity)
    }

    /// Decode the wire form. Splits on the first `:`, so identities may
    /// themselves contain colons.
    ///
    /// # Errors
    ///
    /// [`CredHubError::Deserialization`] for a missing type prefix, an
    /// unknown type or an empty identity.
    pub fn decode(encoded: &str) -> Result<Self> {
        let (prefix, identity) = encoded.split_once(':').ok_or_else(|| {
            CredHubError::deserialization(format!("malformed actor '{}': missing type prefix", encoded))
        })?;
        let actor_type: ActorType = prefix.parse()?;
        if identity.is_empty() {
            return Err(CredHubError::deserialization(format!(
                "malformed actor '{}': empty identity",
                encoded
            )));
        }
        Ok(Self { actor_type, identity: identity.to_string() })
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.actor_type, self.identity)
    }
}

impl FromStr for Actor {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for Actor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Actor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::decode(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Operation a permission can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
    Delete,
    ReadAcl,
    WriteAcl,
}

impl Operation {
    pub const ALL: [Operation; 5] =
        [Self::Read, Self::Write, Self::Delete, Self::ReadAcl, Self::WriteAcl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::ReadAcl => "read_acl",
            Self::WriteAcl => "write_acl",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operations granted to one actor
///
/// Decoding applies the builder's rules: an entry with no operations is
/// rejected and repeated operations are collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermission")]
pub struct Permission {
    actor: Actor,
    operations: Vec<Operation>,
}

#[derive(Deserialize)]
pub(crate) struct RawPermission {
    pub(crate) actor: Actor,
    pub(crate) operations: Vec<Operation>,
}

impl TryFrom<RawPermission> for Permission {
    type Error = CredHubError;

    fn try_from(raw: RawPermission) -> Result<Self> {
        Permission::builder().actor(raw.actor).operations(raw.operations).build()
    }
}

impl Permission {
    pub fn builder() -> PermissionBuilder {
        PermissionBuilder::default()
    }

    pub(crate) fn from_parts(actor: Actor, operations: Vec<Operation>) -> Self {
        Self { actor, operations }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn allows(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }
}

/// Builder for [`Permission`].
#[derive(Debug, Clone, Default)]
pub struct PermissionBuilder {
    actor: Option<Actor>,
    operations: Vec<Operation>,
}

impl PermissionBuilder {
    pub fn actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn app(self, identity: impl Into<String>) -> Result<Self> {
        Ok(self.actor(Actor::app(identity)?))
    }

    pub fn user(self, identity: impl Into<String>) -> Result<Self> {
        Ok(self.actor(Actor::user(identity)?))
    }

    pub fn client(self, identity: impl Into<String>) -> Result<Self> {
        Ok(self.actor(Actor::client(identity)?))
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        if !self.operations.contains(&operation) {
            self.operations.push(operation);
        }
        self
    }

    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        for operation in operations {
            self = self.operation(operation);
        }
        self
    }

    /// Build the permission.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] when no actor or no operation is set.
    pub fn build(self) -> Result<Permission> {
        let actor =
            self.actor.ok_or_else(|| CredHubError::invalid_argument("permission actor must be set"))?;
        if self.operations.is_empty() {
            return Err(CredHubError::invalid_argument("at least one operation must be set"));
        }
        Ok(Permission { actor, operations: self.operations })
    }
}

/// Permissions attached to one credential (v1 API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPermissions {
    credential_name: CredentialName,
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl CredentialPermissions {
    pub fn new(credential_name: CredentialName, permissions: Vec<Permission>) -> Self {
        Self { credential_name, permissions }
    }

    pub fn credential_name(&self) -> &CredentialName {
        &self.credential_name
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn into_permissions(self) -> Vec<Permission> {
        self.permissions
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}
