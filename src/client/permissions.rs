//! Permission operations, v1 API.

use std::sync::Arc;

use super::transport::CredHubTransport;
use super::{decode, encode, execute};
use crate::api::{routes, ApiRequest};
use crate::domain::{Actor, CredentialName, CredentialPermissions, Permission};
use crate::errors::{CredHubError, Result};

/// Operations on per-credential permission batches (`/api/v1/permissions`)
pub struct PermissionOperations<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for PermissionOperations<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport + ?Sized> PermissionOperations<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Permissions granted on a credential. A credential with no grants
    /// yields an empty list.
    pub async fn get_permissions(&self, name: &CredentialName) -> Result<Vec<Permission>> {
        let request = ApiRequest::get(routes::PERMISSIONS_V1_BY_NAME).var(name);
        let body = execute(&*self.transport, "get_permissions", request).await?;
        let permissions: CredentialPermissions = decode(body, "get_permissions")?;
        Ok(permissions.into_permissions())
    }

    /// Grant permissions on a credential.
    pub async fn add_permissions(
        &self,
        name: &CredentialName,
        permissions: Vec<Permission>,
    ) -> Result<()> {
        if permissions.is_empty() {
            return Err(CredHubError::invalid_argument("at least one permission must be given"));
        }
        let body = CredentialPermissions::new(name.clone(), permissions);
        let request = ApiRequest::post(routes::PERMISSIONS_V1).body(encode(&body)?);
        execute(&*self.transport, "add_permissions", request).await?;
        Ok(())
    }

    /// Revoke every operation an actor holds on a credential.
    pub async fn delete_permission(&self, name: &CredentialName, actor: &Actor) -> Result<()> {
        let request = ApiRequest::delete(routes::PERMISSIONS_V1_BY_NAME_AND_ACTOR)
            .var(name)
            .var(actor.encode());
        execute(&*self.transport, "delete_permission", request).await?;
        Ok(())
    }
}
