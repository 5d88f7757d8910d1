//! Credential value variants.
//!
//! Each credential type has its own value shape:
//!
//! - **value**: a single opaque string
//! - **password**: a single password string
//! - **user**: optional username, password, and a server-computed hash
//! - **json**: an arbitrary JSON object
//! - **certificate**: certificate, CA and private key (at least one)
//! - **rsa** / **ssh**: public and private key (at least one)
//!
//! On the wire the type tag and the value are sibling fields of the envelope
//! (`{"type": "password", "value": "..."}`), so decoding a value always goes
//! through [`CredentialValueType::from_wire`] with the tag in hand.
//!
//! Optional fields that were never set are omitted from the JSON document,
//! never written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::credential_type::CredentialType;
use super::secret_string::SecretString;
use crate::errors::{CredHubError, Result};

/// A typed value that can travel in the `value` field of an envelope.
pub trait CredentialValueType: Serialize + Sized {
    /// Tag written next to this value.
    fn credential_type(&self) -> CredentialType;

    /// Decode a value from its wire form, given the envelope's type tag.
    ///
    /// # Errors
    ///
    /// [`CredHubError::Deserialization`] if the tag does not match this value
    /// type or the payload does not have the expected shape.
    fn from_wire(credential_type: CredentialType, value: Value) -> Result<Self>;
}

fn expect_type(expected: CredentialType, actual: CredentialType) -> Result<()> {
    if expected != actual {
        return Err(CredHubError::deserialization(format!(
            "Credential type mismatch: expected {}, found {}",
            expected, actual
        )));
    }
    Ok(())
}

/// Fails unless at least one of the named fields is populated.
fn require_any(fields: &[(&str, bool)]) -> Result<()> {
    if fields.iter().any(|(_, present)| *present) {
        return Ok(());
    }
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    Err(CredHubError::invalid_argument(format!(
        "at least one of {} must be set",
        names.join(", ")
    )))
}

macro_rules! credential_value {
    ($ty:ident, $variant:ident) => {
        impl CredentialValueType for $ty {
            fn credential_type(&self) -> CredentialType {
                CredentialType::$variant
            }

            fn from_wire(credential_type: CredentialType, value: Value) -> Result<Self> {
                expect_type(CredentialType::$variant, credential_type)?;
                serde_json::from_value(value).map_err(|e| {
                    CredHubError::decode(concat!("invalid ", stringify!($ty)), e)
                })
            }
        }

        impl From<$ty> for CredentialValue {
            fn from(value: $ty) -> Self {
                CredentialValue::$variant(value)
            }
        }
    };
}

/// Opaque string credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCredential(SecretString);

impl ValueCredential {
    pub fn new(value: impl Into<SecretString>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Password credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordCredential(SecretString);

impl PasswordCredential {
    pub fn new(password: impl Into<SecretString>) -> Self {
        Self(password.into())
    }

    pub fn password(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Username and password credential
///
/// `password_hash` is computed by the server and only ever read from
/// responses; it is never written to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    password: SecretString,
    #[serde(skip_serializing)]
    password_hash: Option<String>,
}

impl UserCredential {
    /// User credential with a username.
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self { username: Some(username.into()), password: password.into(), password_hash: None }
    }

    /// User credential carrying only a password.
    pub fn with_password(password: impl Into<SecretString>) -> Self {
        Self { username: None, password: password.into(), password_hash: None }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Hash of the password as reported by the server.
    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }
}

/// JSON object credential
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonCredential(Map<String, Value>);

impl JsonCredential {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Build from any value that serializes to a JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CredHubError::invalid_argument(format!(
                "json credential must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl fmt::Debug for JsonCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // keys only
        f.debug_struct("JsonCredential").field("keys", &self.0.keys().collect::<Vec<_>>()).finish()
    }
}

impl From<Map<String, Value>> for JsonCredential {
    fn from(values: Map<String, Value>) -> Self {
        Self(values)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Certificate credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCertificateCredential")]
pub struct CertificateCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ca_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<SecretString>,
}

#[derive(Deserialize)]
struct RawCertificateCredential {
    certificate: Option<String>,
    ca: Option<String>,
    ca_name: Option<String>,
    private_key: Option<SecretString>,
}

impl TryFrom<RawCertificateCredential> for CertificateCredential {
    type Error = CredHubError;

    fn try_from(raw: RawCertificateCredential) -> Result<Self> {
        CertificateCredential::validated(raw.certificate, raw.ca, raw.ca_name, raw.private_key)
    }
}

impl CertificateCredential {
    pub fn builder() -> CertificateCredentialBuilder {
        CertificateCredentialBuilder::default()
    }

    fn validated(
        certificate: Option<String>,
        ca: Option<String>,
        ca_name: Option<String>,
        private_key: Option<SecretString>,
    ) -> Result<Self> {
        require_any(&[
            ("certificate", certificate.is_some()),
            ("certificate_authority", ca.is_some()),
            ("private_key", private_key.is_some()),
        ])?;
        Ok(Self { certificate, ca, ca_name, private_key })
    }

    pub fn certificate(&self) -> Option<&str> {
        self.certificate.as_deref()
    }

    pub fn certificate_authority(&self) -> Option<&str> {
        self.ca.as_deref()
    }

    /// Name of the CA credential that signed this certificate.
    pub fn certificate_authority_name(&self) -> Option<&str> {
        self.ca_name.as_deref()
    }

    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_ref().map(SecretString::expose_secret)
    }
}

/// Builder for [`CertificateCredential`].
#[derive(Debug, Clone, Default)]
pub struct CertificateCredentialBuilder {
    certificate: Option<String>,
    ca: Option<String>,
    ca_name: Option<String>,
    private_key: Option<SecretString>,
}

impl CertificateCredentialBuilder {
    pub fn certificate(mut self, certificate: impl Into<String>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    pub fn certificate_authority(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }

    pub fn certificate_authority_name(mut self, ca_name: impl Into<String>) -> Self {
        self.ca_name = Some(ca_name.into());
        self
    }

    pub fn private_key(mut self, private_key: impl Into<SecretString>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] unless at least one of certificate,
    /// certificate authority or private key is set.
    pub fn build(self) -> Result<CertificateCredential> {
        CertificateCredential::validated(self.certificate, self.ca, self.ca_name, self.private_key)
    }
}

/// RSA key pair credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyPair")]
pub struct RsaCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<SecretString>,
}

/// SSH key pair credential
///
/// `public_key_fingerprint` is computed by the server and only read from
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyPair")]
pub struct SshCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<SecretString>,
    #[serde(skip_serializing)]
    public_key_fingerprint: Option<String>,
}

#[derive(Deserialize)]
struct RawKeyPair {
    public_key: Option<String>,
    private_key: Option<SecretString>,
    public_key_fingerprint: Option<String>,
}

fn validate_key_pair(public_key: &Option<String>, private_key: &Option<SecretString>) -> Result<()> {
    require_any(&[("public_key", public_key.is_some()), ("private_key", private_key.is_some())])
}

/// Credentials made of a public and a private key.
pub trait KeyPairCredential: Sized {
    /// Build from keys, requiring at least one of them.
    fn from_keys(public_key: Option<String>, private_key: Option<SecretString>) -> Result<Self>;
}

impl KeyPairCredential for RsaCredential {
    fn from_keys(public_key: Option<String>, private_key: Option<SecretString>) -> Result<Self> {
        validate_key_pair(&public_key, &private_key)?;
        Ok(Self { public_key, private_key })
    }
}

impl KeyPairCredential for SshCredential {
    fn from_keys(public_key: Option<String>, private_key: Option<SecretString>) -> Result<Self> {
        validate_key_pair(&public_key, &private_key)?;
        Ok(Self { public_key, private_key, public_key_fingerprint: None })
    }
}

impl TryFrom<RawKeyPair> for RsaCredential {
    type Error = CredHubError;

    fn try_from(raw: RawKeyPair) -> Result<Self> {
        Self::from_keys(raw.public_key, raw.private_key)
    }
}

impl TryFrom<RawKeyPair> for SshCredential {
    type Error = CredHubError;

    fn try_from(raw: RawKeyPair) -> Result<Self> {
        let credential = Self::from_keys(raw.public_key, raw.private_key)?;
        Ok(Self { public_key_fingerprint: raw.public_key_fingerprint, ..credential })
    }
}

impl RsaCredential {
    pub fn builder() -> KeyPairBuilder<RsaCredential> {
        KeyPairBuilder::default()
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_ref().map(SecretString::expose_secret)
    }
}

impl SshCredential {
    pub fn builder() -> KeyPairBuilder<SshCredential> {
        KeyPairBuilder::default()
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_ref().map(SecretString::expose_secret)
    }

    /// Fingerprint of the public key as reported by the server.
    pub fn public_key_fingerprint(&self) -> Option<&str> {
        self.public_key_fingerprint.as_deref()
    }
}

/// Builder shared by the key pair credentials.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder<T> {
    public_key: Option<String>,
    private_key: Option<SecretString>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for KeyPairBuilder<T> {
    fn default() -> Self {
        Self { public_key: None, private_key: None, _marker: std::marker::PhantomData }
    }
}

impl<T: KeyPairCredential> KeyPairBuilder<T> {
    pub fn public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    pub fn private_key(mut self, private_key: impl Into<SecretString>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] unless at least one key is set.
    pub fn build(self) -> Result<T> {
        T::from_keys(self.public_key, self.private_key)
    }
}

credential_value!(ValueCredential, Value);
credential_value!(PasswordCredential, Password);
credential_value!(UserCredential, User);
credential_value!(JsonCredential, Json);
credential_value!(CertificateCredential, Certificate);
credential_value!(RsaCredential, Rsa);
credential_value!(SshCredential, Ssh);

/// Any credential value, for reads where the type is only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CredentialValue {
    Value(ValueCredential),
    Password(PasswordCredential),
    User(UserCredential),
    Json(JsonCredential),
    Certificate(CertificateCredential),
    Rsa(RsaCredential),
    Ssh(SshCredential),
}

impl CredentialValueType for CredentialValue {
    fn credential_type(&self) -> CredentialType {
        match self {
            Self::Value(_) => CredentialType::Value,
            Self::Password(_) => CredentialType::Password,
            Self::User(_) => CredentialType::User,
            Self::Json(_) => CredentialType::Json,
            Self::Certificate(_) => CredentialType::Certificate,
            Self::Rsa(_) => CredentialType::Rsa,
            Self::Ssh(_) => CredentialType::Ssh,
        }
    }

    fn from_wire(credential_type: CredentialType, value: Value) -> Result<Self> {
        match credential_type {
            CredentialType::Value => ValueCredential::from_wire(credential_type, value).map(Self::Value),
            CredentialType::Password => {
                PasswordCredential::from_wire(credential_type, value).map(Self::Password)
            }
            CredentialType::User => UserCredential::from_wire(credential_type, value).map(Self::User),
            CredentialType::Json => JsonCredential::from_wire(credential_type, value).map(Self::Json),
            CredentialType::Certificate => {
                CertificateCredential::from_wire(credential_type, value).map(Self::Certificate)
            }
            CredentialType::Rsa => RsaCredential::from_wire(credential_type, value).map(Self::Rsa),
            CredentialType::Ssh => SshCredential::from_wire(credential_type, value).map(Self::Ssh),
        }
    }
}
