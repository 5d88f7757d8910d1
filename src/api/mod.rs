//! # Wire Envelopes
//!
//! JSON documents exchanged with the credential server: request envelopes,
//! response envelopes, certificate rotation payloads and the endpoint
//! templates they are sent to.

pub mod certificate;
pub mod request;
pub mod response;
pub mod routes;

pub use certificate::{
    BulkRegenerateResponse, CertificateRegenerateRequest, CertificateSummary,
    CertificateSummaryData, CertificateVersion, TransitionalVersionRequest,
};
pub use request::{
    BulkRegenerateRequest, CredentialRequest, CredentialRequestBuilder, ParametersRequest,
    PayloadField, RegenerateRequest, RequestPayload,
};
pub use response::{
    CredentialDetails, CredentialDetailsData, CredentialPath, CredentialPathData,
    CredentialSummary, CredentialSummaryData, ServicesData, VersionInfo,
};
pub use routes::ApiRequest;
