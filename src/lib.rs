//! # credhub-model
//!
//! Typed data model and client operations for CredHub-compatible credential
//! servers.
//!
//! ## Architecture
//!
//! ```text
//! domain values → request envelopes → CredHubTransport → response envelopes → domain values
//! ```
//!
//! ## Core Components
//!
//! - **Domain**: credential names, types, values, generation parameters and
//!   permissions, each validated on construction
//! - **Envelopes**: sparse JSON request documents and tag-dispatched response
//!   documents
//! - **Operations**: async operation groups over a caller-supplied transport
//!
//! ## Example Usage
//!
//! ```rust
//! use credhub_model::{CredentialName, CredentialRequest, PasswordCredential, WriteMode};
//!
//! # fn main() -> credhub_model::Result<()> {
//! let request = CredentialRequest::builder()
//!     .name(CredentialName::new(["example", "credential"])?)
//!     .value(PasswordCredential::new("secret"))
//!     .mode(WriteMode::Overwrite)
//!     .build()?;
//!
//! assert_eq!(
//!     serde_json::to_string(&request)?,
//!     r#"{"name":"/example/credential","type":"password","mode":"overwrite","value":"secret"}"#
//! );
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;

// Re-export commonly used types and traits
pub use api::{
    ApiRequest, CredentialDetails, CredentialDetailsData, CredentialRequest,
    CredentialRequestBuilder, ParametersRequest, RequestPayload,
};
pub use client::{CredHubClient, CredHubTransport};
pub use config::CredHubConfig;
pub use domain::{
    Actor, ActorType, CertificateCredential, CertificateParameters, CredentialName,
    CredentialPermission, CredentialPermissions, CredentialType, CredentialValue,
    CredentialValueType, JsonCredential, KeyLength, Operation, PasswordCredential,
    PasswordParameters, Permission, RsaCredential, RsaParameters, ServiceInstanceCredentialName,
    SshCredential, SshParameters, UserCredential, UserParameters, ValueCredential, WriteMode,
};
pub use errors::{CredHubError, Result};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
