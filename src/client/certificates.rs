//! Certificate listing and rotation.

use std::sync::Arc;

use super::transport::CredHubTransport;
use super::{decode, decode_details, encode, execute};
use crate::api::{
    routes, ApiRequest, BulkRegenerateRequest, BulkRegenerateResponse,
    CertificateRegenerateRequest, CertificateSummary, CertificateSummaryData, CertificateVersion,
    CredentialDetails, TransitionalVersionRequest,
};
use crate::domain::{CertificateCredential, CertificateId, CredentialId, CredentialName};
use crate::errors::{CredHubError, Result};

/// Operations on certificates (`/api/v1/certificates`)
pub struct CertificateOperations<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for CertificateOperations<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport + ?Sized> CertificateOperations<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn get_all(&self) -> Result<Vec<CertificateSummary>> {
        let request = ApiRequest::get(routes::CERTIFICATES);
        let body = execute(&*self.transport, "get_all", request).await?;
        let data: CertificateSummaryData = decode(body, "get_all")?;
        Ok(data.into_certificates())
    }

    pub async fn get_by_name(&self, name: &CredentialName) -> Result<CertificateSummary> {
        let request = ApiRequest::get(routes::CERTIFICATES_BY_NAME).var(name);
        let body = execute(&*self.transport, "get_by_name", request).await?;
        let data: CertificateSummaryData = decode(body, "get_by_name")?;
        data.into_certificates().into_iter().next().ok_or_else(|| {
            CredHubError::deserialization(format!("get_by_name: no certificate returned for {}", name))
        })
    }

    /// Regenerate a certificate, optionally marking the new version transitional.
    pub async fn regenerate(
        &self,
        id: &CertificateId,
        set_as_transitional: Option<bool>,
    ) -> Result<CredentialDetails<CertificateCredential>> {
        let body = match set_as_transitional {
            Some(flag) => CertificateRegenerateRequest::transitional(flag),
            None => CertificateRegenerateRequest::new(),
        };
        let request = ApiRequest::post(routes::CERTIFICATE_REGENERATE).var(id).body(encode(&body)?);
        let body = execute(&*self.transport, "regenerate", request).await?;
        decode_details(body, "regenerate")
    }

    /// Regenerate every certificate signed by a CA.
    pub async fn bulk_regenerate(&self, signed_by: &CredentialName) -> Result<Vec<CredentialName>> {
        let request = ApiRequest::post(routes::BULK_REGENERATE)
            .body(encode(&BulkRegenerateRequest::new(signed_by.clone()))?);
        let body = execute(&*self.transport, "bulk_regenerate", request).await?;
        let response: BulkRegenerateResponse = decode(body, "bulk_regenerate")?;
        Ok(response.regenerated_credentials().to_vec())
    }

    /// Mark `version` transitional, or clear the flag with `None`.
    pub async fn update_transitional_version(
        &self,
        id: &CertificateId,
        version: Option<CredentialId>,
    ) -> Result<Vec<CertificateVersion>> {
        let body = match version {
            Some(version) => TransitionalVersionRequest::set(version),
            None => TransitionalVersionRequest::clear(),
        };
        let request =
            ApiRequest::put(routes::CERTIFICATE_TRANSITIONAL_VERSION).var(id).body(encode(&body)?);
        let body = execute(&*self.transport, "update_transitional_version", request).await?;
        decode(body, "update_transitional_version")
    }
}
