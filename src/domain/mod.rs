//! Domain layer
//!
//! Pure value objects describing credentials, their generation parameters
//! and the permissions attached to them. Nothing in here performs I/O; every
//! type is immutable once built and validates itself on construction.
//!
//! ## Module Organization
//!
//! - `name`: Slash-separated credential names
//! - `credential_type`: The closed set of credential type tags
//! - `values`: Typed credential values, one per type
//! - `parameters`: Server-side generation parameters
//! - `permission`: Actors, operations and v1 permission batches
//! - `permission_v2`: Individually addressable v2 permissions
//! - `write_mode`: Write modes and the legacy overwrite flag
//! - `id`: Server-assigned identifiers
//! - `secret_string`: Redacting wrapper for secret material

pub mod credential_type;
pub mod id;
pub mod name;
pub mod parameters;
pub mod permission;
pub mod permission_v2;
pub mod secret_string;
pub mod values;
pub mod write_mode;

pub use credential_type::CredentialType;
pub use id::{CertificateId, CredentialId, PermissionId};
pub use name::{CredentialName, ServiceInstanceCredentialName, ServiceInstanceCredentialNameBuilder};
pub use parameters::{
    CertificateParameters, CertificateParametersBuilder, ExtendedKeyUsage, GenerationParameters,
    KeyLength, KeyUsage, PasswordParameters, PasswordParametersBuilder, RsaParameters,
    SshParameters, UserParameters,
};
pub use permission::{
    Actor, ActorType, CredentialPermissions, Operation, Permission, PermissionBuilder,
};
pub use permission_v2::{CredentialPermission, CredentialPermissionBuilder};
pub use secret_string::SecretString;
pub use values::{
    CertificateCredential, CertificateCredentialBuilder, CredentialValue, CredentialValueType,
    JsonCredential, KeyPairBuilder, KeyPairCredential, PasswordCredential, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
pub use write_mode::{WriteMode, WritePolicy};
