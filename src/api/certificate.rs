//! Certificate listing and rotation payloads.
//!
//! Rotation happens in three steps: regenerate a CA version as transitional,
//! redeploy so clients trust both, then move the transitional flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CertificateId, CredentialId, CredentialName};

/// One stored version of a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateVersion {
    id: CredentialId,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    transitional: bool,
    #[serde(default)]
    certificate_authority: bool,
    #[serde(default)]
    self_signed: bool,
}

impl CertificateVersion {
    pub fn id(&self) -> &CredentialId {
        &self.id
    }

    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    pub fn is_transitional(&self) -> bool {
        self.transitional
    }

    pub fn is_certificate_authority(&self) -> bool {
        self.certificate_authority
    }

    pub fn is_self_signed(&self) -> bool {
        self.self_signed
    }
}

/// A certificate credential with its signing relationships and versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    id: CertificateId,
    name: CredentialName,
    #[serde(skip_serializing_if = "Option::is_none")]
    signed_by: Option<String>,
    #[serde(default)]
    signs: Vec<String>,
    #[serde(default)]
    versions: Vec<CertificateVersion>,
}

impl CertificateSummary {
    pub fn id(&self) -> &CertificateId {
        &self.id
    }

    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    /// Name of the signing CA, empty for self-signed certificates.
    pub fn signed_by(&self) -> Option<&str> {
        self.signed_by.as_deref().filter(|s| !s.is_empty())
    }

    /// Names of certificates this one signs.
    pub fn signs(&self) -> &[String] {
        &self.signs
    }

    pub fn versions(&self) -> &[CertificateVersion] {
        &self.versions
    }

    pub fn transitional_version(&self) -> Option<&CertificateVersion> {
        self.versions.iter().find(|v| v.transitional)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummaryData {
    #[serde(default)]
    certificates: Vec<CertificateSummary>,
}

impl CertificateSummaryData {
    pub fn certificates(&self) -> &[CertificateSummary] {
        &self.certificates
    }

    pub fn into_certificates(self) -> Vec<CertificateSummary> {
        self.certificates
    }
}

/// Body of a single-certificate regenerate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateRegenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    set_as_transitional: Option<bool>,
}

impl CertificateRegenerateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitional(set_as_transitional: bool) -> Self {
        Self { set_as_transitional: Some(set_as_transitional) }
    }
}

/// Marks one version transitional, or clears the flag.
///
/// `version` is written even when unset: `{"version": null}` is how the
/// server is told to clear the transitional flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionalVersionRequest {
    version: Option<CredentialId>,
}

impl TransitionalVersionRequest {
    pub fn set(version: CredentialId) -> Self {
        Self { version: Some(version) }
    }

    pub fn clear() -> Self {
        Self { version: None }
    }

    pub fn version(&self) -> Option<&CredentialId> {
        self.version.as_ref()
    }
}

/// Names of the certificates a bulk regenerate rewrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRegenerateResponse {
    #[serde(default)]
    regenerated_credentials: Vec<CredentialName>,
}

impl BulkRegenerateResponse {
    pub fn regenerated_credentials(&self) -> &[CredentialName] {
        &self.regenerated_credentials
    }
}
