//! Credential reads, writes and searches.

use std::sync::Arc;

use super::transport::CredHubTransport;
use super::{decode, decode_details, encode, execute};
use crate::api::{
    routes, ApiRequest, CredentialDetails, CredentialDetailsData, CredentialPath,
    CredentialPathData, CredentialRequest, CredentialSummary, CredentialSummaryData,
    RegenerateRequest, RequestPayload,
};
use crate::domain::{CredentialId, CredentialName, CredentialValueType, GenerationParameters};
use crate::errors::{CredHubError, Result};

/// Operations on credentials (`/api/v1/data`)
pub struct CredentialOperations<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for CredentialOperations<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport + ?Sized> CredentialOperations<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Write a new version of a credential with a caller-supplied value.
    pub async fn write<V>(&self, request: &CredentialRequest<V>) -> Result<CredentialDetails<V>>
    where
        V: RequestPayload + CredentialValueType,
    {
        let request = ApiRequest::put(routes::DATA).body(request.to_json()?);
        let body = execute(&*self.transport, "write", request).await?;
        decode_details(body, "write")
    }

    /// Have the server generate a credential from parameters.
    pub async fn generate<P>(
        &self,
        request: &CredentialRequest<P>,
    ) -> Result<CredentialDetails<P::Credential>>
    where
        P: RequestPayload + GenerationParameters,
    {
        let request = ApiRequest::post(routes::DATA).body(request.to_json()?);
        let body = execute(&*self.transport, "generate", request).await?;
        decode_details(body, "generate")
    }

    /// Regenerate a credential with the parameters it was last generated with.
    pub async fn regenerate<V: CredentialValueType>(
        &self,
        name: &CredentialName,
    ) -> Result<CredentialDetails<V>> {
        let request = ApiRequest::post(routes::REGENERATE)
            .body(encode(&RegenerateRequest::new(name.clone()))?);
        let body = execute(&*self.transport, "regenerate", request).await?;
        decode_details(body, "regenerate")
    }

    /// Fetch one credential version by id.
    pub async fn get_by_id<V: CredentialValueType>(
        &self,
        id: &CredentialId,
    ) -> Result<CredentialDetails<V>> {
        let request = ApiRequest::get(routes::DATA_BY_ID).var(id);
        let body = execute(&*self.transport, "get_by_id", request).await?;
        decode_details(body, "get_by_id")
    }

    /// Fetch the current version of a credential.
    pub async fn get_by_name<V: CredentialValueType>(
        &self,
        name: &CredentialName,
    ) -> Result<CredentialDetails<V>> {
        let request = ApiRequest::get(routes::DATA_CURRENT_BY_NAME).var(name);
        let body = execute(&*self.transport, "get_by_name", request).await?;
        let data: CredentialDetailsData<V> = decode(body, "get_by_name")?;
        data.into_data().into_iter().next().ok_or_else(|| {
            CredHubError::deserialization(format!("get_by_name: no versions returned for {}", name))
        })
    }

    /// Fetch up to `versions` versions of a credential, newest first.
    pub async fn get_by_name_with_history<V: CredentialValueType>(
        &self,
        name: &CredentialName,
        versions: u32,
    ) -> Result<Vec<CredentialDetails<V>>> {
        if versions == 0 {
            return Err(CredHubError::invalid_argument("versions must be greater than 0"));
        }
        let request = ApiRequest::get(routes::DATA_VERSIONS_BY_NAME).var(name).var(versions);
        let body = execute(&*self.transport, "get_by_name_with_history", request).await?;
        let data: CredentialDetailsData<V> = decode(body, "get_by_name_with_history")?;
        Ok(data.into_data())
    }

    /// Find credentials whose name contains `name_like`.
    pub async fn find_by_name(&self, name_like: &str) -> Result<Vec<CredentialSummary>> {
        let request = ApiRequest::get(routes::DATA_NAME_LIKE).var(name_like);
        let body = execute(&*self.transport, "find_by_name", request).await?;
        let data: CredentialSummaryData = decode(body, "find_by_name")?;
        Ok(data.into_credentials())
    }

    /// Find credentials stored under a path.
    pub async fn find_by_path(&self, path: &str) -> Result<Vec<CredentialSummary>> {
        let request = ApiRequest::get(routes::DATA_BY_PATH).var(path);
        let body = execute(&*self.transport, "find_by_path", request).await?;
        let data: CredentialSummaryData = decode(body, "find_by_path")?;
        Ok(data.into_credentials())
    }

    /// List every path that holds at least one credential.
    pub async fn get_all_paths(&self) -> Result<Vec<CredentialPath>> {
        let request = ApiRequest::get(routes::DATA_PATHS);
        let body = execute(&*self.transport, "get_all_paths", request).await?;
        let data: CredentialPathData = decode(body, "get_all_paths")?;
        Ok(data.into_paths())
    }

    /// Delete every version of a credential.
    pub async fn delete_by_name(&self, name: &CredentialName) -> Result<()> {
        let request = ApiRequest::delete(routes::DATA_BY_NAME).var(name);
        execute(&*self.transport, "delete_by_name", request).await?;
        Ok(())
    }
}
