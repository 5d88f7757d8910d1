//! Request envelopes.
//!
//! A [`CredentialRequest`] wraps one payload, either a typed credential value
//! (a write) or generation parameters (a generate), together with the
//! credential name, the write policy and, for writes, extra permissions.
//!
//! The serialized document is sparse: fields the caller never set are left
//! out, so the server applies its own defaults.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::parameters::{
    CertificateParameters, GenerationParameters, PasswordParameters, RsaParameters, SshParameters,
    UserParameters,
};
use crate::domain::values::{
    CertificateCredential, CredentialValue, CredentialValueType, JsonCredential,
    PasswordCredential, RsaCredential, SshCredential, UserCredential, ValueCredential,
};
use crate::domain::{CredentialName, CredentialType, Permission, WriteMode, WritePolicy};
use crate::errors::{CredHubError, Result};

/// Envelope key a payload is serialized under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField {
    Value,
    Parameters,
}

impl PayloadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Parameters => "parameters",
        }
    }
}

/// Anything a [`CredentialRequest`] can carry.
pub trait RequestPayload: Serialize {
    /// Key the payload is written under.
    const FIELD: PayloadField;

    /// Type tag written next to the payload.
    fn credential_type(&self) -> CredentialType;

    /// Re-check the payload's own rules. Payloads built through `Deserialize`
    /// or struct literals bypass their builders, so envelopes call this again.
    fn validate(&self) -> Result<()>;
}

macro_rules! value_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RequestPayload for $ty {
                const FIELD: PayloadField = PayloadField::Value;

                fn credential_type(&self) -> CredentialType {
                    CredentialValueType::credential_type(self)
                }

                fn validate(&self) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! parameters_payload {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RequestPayload for $ty {
                const FIELD: PayloadField = PayloadField::Parameters;

                fn credential_type(&self) -> CredentialType {
                    GenerationParameters::credential_type(self)
                }

                fn validate(&self) -> Result<()> {
                    GenerationParameters::validate(self)
                }
            }
        )*
    };
}

// Certificate and key-pair values validate during construction and deserialization
value_payload!(
    ValueCredential,
    PasswordCredential,
    UserCredential,
    JsonCredential,
    CertificateCredential,
    RsaCredential,
    SshCredential,
    CredentialValue,
);

parameters_payload!(
    PasswordParameters,
    UserParameters,
    RsaParameters,
    SshParameters,
    CertificateParameters,
);

/// Envelope for writing or generating a credential
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRequest<P> {
    name: CredentialName,
    payload: P,
    policy: WritePolicy,
    permissions: Vec<Permission>,
}

/// Generate request: a [`CredentialRequest`] over generation parameters.
pub type ParametersRequest<P> = CredentialRequest<P>;

impl<P: RequestPayload> CredentialRequest<P> {
    pub fn builder() -> CredentialRequestBuilder<P> {
        CredentialRequestBuilder::default()
    }

    pub fn name(&self) -> &CredentialName {
        &self.name
    }

    pub fn credential_type(&self) -> CredentialType {
        self.payload.credential_type()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.policy
    }

    /// The mode the server will apply, if the caller set one.
    pub fn mode(&self) -> Option<WriteMode> {
        self.policy.effective_mode()
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<P: RequestPayload> Serialize for CredentialRequest<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.payload.credential_type())?;
        if let Some(mode) = self.policy.mode_field() {
            map.serialize_entry("mode", &mode)?;
        }
        if let Some(overwrite) = self.policy.overwrite_field() {
            map.serialize_entry("overwrite", &overwrite)?;
        }
        map.serialize_entry(P::FIELD.as_str(), &self.payload)?;
        if !self.permissions.is_empty() {
            map.serialize_entry("permissions", &self.permissions)?;
        }
        map.end()
    }
}

/// Builder for [`CredentialRequest`].
///
/// [`value`](Self::value) only accepts credential values and
/// [`parameters`](Self::parameters) only accepts generation parameters, so the
/// envelope key always matches the payload:
///
/// ```compile_fail
/// use credhub_model::domain::PasswordParameters;
/// use credhub_model::{CredentialName, ParametersRequest};
///
/// # fn main() -> credhub_model::Result<()> {
/// let request = ParametersRequest::builder()
///     .name(CredentialName::new(["example"])?)
///     .value(PasswordParameters::default())
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// ```compile_fail
/// use credhub_model::{CredentialName, CredentialRequest, PasswordCredential};
///
/// # fn main() -> credhub_model::Result<()> {
/// let request = CredentialRequest::builder()
///     .name(CredentialName::new(["example"])?)
///     .parameters(PasswordCredential::new("secret"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CredentialRequestBuilder<P> {
    name: Option<CredentialName>,
    payload: Option<P>,
    mode: Option<WriteMode>,
    overwrite: Option<bool>,
    permissions: Vec<Permission>,
}

impl<P> Default for CredentialRequestBuilder<P> {
    fn default() -> Self {
        Self { name: None, payload: None, mode: None, overwrite: None, permissions: Vec::new() }
    }
}

impl<P: RequestPayload> CredentialRequestBuilder<P> {
    pub fn name(mut self, name: impl Into<CredentialName>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mode(mut self, mode: WriteMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Legacy overwrite flag; an explicit [`mode`](Self::mode) takes precedence.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Grant an extra permission along with a write.
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] when the name or payload is unset, the
    /// payload fails validation, or permissions are attached to a generate
    /// request.
    pub fn build(self) -> Result<CredentialRequest<P>> {
        let name =
            self.name.ok_or_else(|| CredHubError::invalid_argument("credential name must be set"))?;
        let payload = self.payload.ok_or_else(|| {
            CredHubError::invalid_argument(format!("credential {} must be set", P::FIELD.as_str()))
        })?;
        payload.validate()?;

        if P::FIELD == PayloadField::Parameters && !self.permissions.is_empty() {
            return Err(CredHubError::invalid_argument(
                "permissions can only be attached to value writes",
            ));
        }

        let policy = WritePolicy::reconcile(self.mode, self.overwrite);
        tracing::debug!(
            name = %name,
            credential_type = %payload.credential_type(),
            "Built credential request"
        );

        Ok(CredentialRequest { name, payload, policy, permissions: self.permissions })
    }
}

impl<P: RequestPayload + CredentialValueType> CredentialRequestBuilder<P> {
    /// Set the value of a write request.
    pub fn value(mut self, value: P) -> Self {
        self.payload = Some(value);
        self
    }
}

impl<P: RequestPayload + GenerationParameters> CredentialRequestBuilder<P> {
    /// Set the parameters of a generate request.
    pub fn parameters(mut self, parameters: P) -> Self {
        self.payload = Some(parameters);
        self
    }
}

/// Regenerate a credential with the parameters it was last generated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegenerateRequest {
    name: CredentialName,
}

impl RegenerateRequest {
    pub fn new(name: impl Into<CredentialName>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &CredentialName {
        &self.name
    }
}

/// Regenerate every certificate signed by a CA
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkRegenerateRequest {
    signed_by: CredentialName,
}

impl BulkRegenerateRequest {
    pub fn new(signed_by: impl Into<CredentialName>) -> Self {
        Self { signed_by: signed_by.into() }
    }

    pub fn signed_by(&self) -> &CredentialName {
        &self.signed_by
    }
}
