//! Permission operations, v2 API.

use std::sync::Arc;

use super::transport::CredHubTransport;
use super::{decode, encode, execute};
use crate::api::{routes, ApiRequest};
use crate::domain::{Actor, CredentialPermission, PermissionId};
use crate::errors::Result;

/// Operations on individually addressable permissions (`/api/v2/permissions`)
pub struct PermissionV2Operations<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for PermissionV2Operations<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport + ?Sized> PermissionV2Operations<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn get_permission(&self, uuid: &PermissionId) -> Result<CredentialPermission> {
        let request = ApiRequest::get(routes::PERMISSIONS_V2_BY_ID).var(uuid);
        let body = execute(&*self.transport, "get_permission", request).await?;
        decode(body, "get_permission")
    }

    pub async fn get_permission_by_path_and_actor(
        &self,
        path: &str,
        actor: &Actor,
    ) -> Result<CredentialPermission> {
        let request =
            ApiRequest::get(routes::PERMISSIONS_V2_BY_PATH_AND_ACTOR).var(path).var(actor.encode());
        let body = execute(&*self.transport, "get_permission_by_path_and_actor", request)
            .await?;
        decode(body, "get_permission_by_path_and_actor")
    }

    /// Create a permission. The returned entry carries the server-assigned uuid.
    pub async fn add_permissions(
        &self,
        permission: &CredentialPermission,
    ) -> Result<CredentialPermission> {
        let request = ApiRequest::post(routes::PERMISSIONS_V2).body(encode(permission)?);
        let body = execute(&*self.transport, "add_permissions", request).await?;
        decode(body, "add_permissions")
    }

    /// Replace the path, actor and operations of an existing permission.
    pub async fn update_permission(
        &self,
        uuid: &PermissionId,
        permission: &CredentialPermission,
    ) -> Result<CredentialPermission> {
        let request = ApiRequest::put(routes::PERMISSIONS_V2_BY_ID).var(uuid).body(encode(permission)?);
        let body = execute(&*self.transport, "update_permission", request).await?;
        decode(body, "update_permission")
    }

    /// Delete a permission, returning the entry as it was before deletion.
    pub async fn delete_permission(&self, uuid: &PermissionId) -> Result<CredentialPermission> {
        let request = ApiRequest::delete(routes::PERMISSIONS_V2_BY_ID).var(uuid);
        let body = execute(&*self.transport, "delete_permission", request).await?;
        decode(body, "delete_permission")
    }
}
