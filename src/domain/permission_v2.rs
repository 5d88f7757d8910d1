//! Access-control entries, v2 model.
//!
//! v2 permissions are individually addressable: each entry grants one actor
//! operations on a path and is identified by a server-assigned uuid. Paths may
//! end in `*` to cover a whole subtree, so they are kept as plain strings.

use serde::{Deserialize, Serialize};

use super::id::PermissionId;
use super::permission::{Actor, Operation, Permission, RawPermission};
use crate::errors::{CredHubError, Result};

/// A single permission on a credential path (v2 API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentialPermission")]
pub struct CredentialPermission {
    #[serde(skip_serializing_if = "Option::is_none")]
    uuid: Option<PermissionId>,
    path: String,
    actor: Actor,
    operations: Vec<Operation>,
}

#[derive(Deserialize)]
struct RawCredentialPermission {
    uuid: Option<PermissionId>,
    path: String,
    actor: Actor,
    operations: Vec<Operation>,
}

impl TryFrom<RawCredentialPermission> for CredentialPermission {
    type Error = CredHubError;

    fn try_from(raw: RawCredentialPermission) -> Result<Self> {
        let permission =
            Permission::try_from(RawPermission { actor: raw.actor, operations: raw.operations })?;
        let mut built = CredentialPermission::builder().path(raw.path).permission(permission).build()?;
        built.uuid = raw.uuid;
        Ok(built)
    }
}

impl CredentialPermission {
    pub fn builder() -> CredentialPermissionBuilder {
        CredentialPermissionBuilder::default()
    }

    /// Server-assigned identifier; only set on permissions read back.
    pub fn uuid(&self) -> Option<&PermissionId> {
        self.uuid.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The actor/operations pair as a v1-style permission.
    pub fn permission(&self) -> Permission {
        Permission::from_parts(self.actor.clone(), self.operations.clone())
    }
}

/// Builder for [`CredentialPermission`].
#[derive(Debug, Clone, Default)]
pub struct CredentialPermissionBuilder {
    path: Option<String>,
    permission: Option<Permission>,
}

impl CredentialPermissionBuilder {
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Build the permission.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] when the path or the permission is unset.
    pub fn build(self) -> Result<CredentialPermission> {
        let path = self
            .path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| CredHubError::invalid_argument("permission path must be set"))?;
        let permission =
            self.permission.ok_or_else(|| CredHubError::invalid_argument("permission must be set"))?;
        Ok(CredentialPermission {
            uuid: None,
            path,
            actor: permission.actor().clone(),
            operations: permission.operations().to_vec(),
        })
    }
}
