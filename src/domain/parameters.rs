//! Generation parameters.
//!
//! Parameters tell the server how to generate a credential. Every field is
//! optional; the server applies its own default for anything left unset, and
//! unset fields never appear in the serialized document.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::credential_type::CredentialType;
use super::values::{
    CertificateCredential, CredentialValueType, PasswordCredential, RsaCredential, SshCredential,
    UserCredential,
};
use crate::errors::{CredHubError, Result};

/// Parameters that can travel in the `parameters` field of a generate request.
pub trait GenerationParameters: Serialize {
    /// Value type the server returns for a generated credential.
    type Credential: CredentialValueType;

    /// Credential type generated with these parameters.
    fn credential_type(&self) -> CredentialType;

    /// Check cross-field rules.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Allowed RSA/SSH/certificate key lengths, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum KeyLength {
    Length2048,
    Length3072,
    Length4096,
}

impl KeyLength {
    pub fn bits(&self) -> u32 {
        match self {
            Self::Length2048 => 2048,
            Self::Length3072 => 3072,
            Self::Length4096 => 4096,
        }
    }
}

impl TryFrom<u32> for KeyLength {
    type Error = CredHubError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            2048 => Ok(Self::Length2048),
            3072 => Ok(Self::Length3072),
            4096 => Ok(Self::Length4096),
            _ => Err(CredHubError::invalid_argument(format!(
                "unsupported key length {}, expected one of 2048, 3072, 4096",
                bits
            ))),
        }
    }
}

impl From<KeyLength> for u32 {
    fn from(length: KeyLength) -> Self {
        length.bits()
    }
}

impl fmt::Display for KeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Password generation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_upper: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_lower: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_special: Option<bool>,
}

impl PasswordParameters {
    pub fn builder() -> PasswordParametersBuilder {
        PasswordParametersBuilder::default()
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    pub fn exclude_upper(&self) -> Option<bool> {
        self.exclude_upper
    }

    pub fn exclude_lower(&self) -> Option<bool> {
        self.exclude_lower
    }

    pub fn exclude_number(&self) -> Option<bool> {
        self.exclude_number
    }

    pub fn include_special(&self) -> Option<bool> {
        self.include_special
    }
}

impl GenerationParameters for PasswordParameters {
    type Credential = PasswordCredential;

    fn credential_type(&self) -> CredentialType {
        CredentialType::Password
    }

    fn validate(&self) -> Result<()> {
        if self.length == Some(0) {
            return Err(CredHubError::invalid_argument("password length must be greater than 0"));
        }
        // all character classes excluded leaves nothing to generate from
        if self.exclude_upper == Some(true)
            && self.exclude_lower == Some(true)
            && self.exclude_number == Some(true)
            && self.include_special != Some(true)
        {
            return Err(CredHubError::invalid_argument(
                "password parameters exclude every character class",
            ));
        }
        Ok(())
    }
}

/// Builder for [`PasswordParameters`].
#[derive(Debug, Clone, Default)]
pub struct PasswordParametersBuilder {
    params: PasswordParameters,
}

impl PasswordParametersBuilder {
    pub fn length(mut self, length: u32) -> Self {
        self.params.length = Some(length);
        self
    }

    pub fn exclude_upper(mut self, exclude: bool) -> Self {
        self.params.exclude_upper = Some(exclude);
        self
    }

    pub fn exclude_lower(mut self, exclude: bool) -> Self {
        self.params.exclude_lower = Some(exclude);
        self
    }

    pub fn exclude_number(mut self, exclude: bool) -> Self {
        self.params.exclude_number = Some(exclude);
        self
    }

    pub fn include_special(mut self, include: bool) -> Self {
        self.params.include_special = Some(include);
        self
    }

    pub fn build(self) -> Result<PasswordParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// User generation parameters
///
/// The generated user's password follows the wrapped password parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserParameters(PasswordParameters);

impl UserParameters {
    pub fn new(password: PasswordParameters) -> Self {
        Self(password)
    }

    pub fn password_parameters(&self) -> &PasswordParameters {
        &self.0
    }
}

impl GenerationParameters for UserParameters {
    type Credential = UserCredential;

    fn credential_type(&self) -> CredentialType {
        CredentialType::User
    }

    fn validate(&self) -> Result<()> {
        self.0.validate()
    }
}

/// RSA key generation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    key_length: Option<KeyLength>,
}

impl RsaParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_length(key_length: KeyLength) -> Self {
        Self { key_length: Some(key_length) }
    }

    pub fn key_length(&self) -> Option<KeyLength> {
        self.key_length
    }
}

impl GenerationParameters for RsaParameters {
    type Credential = RsaCredential;

    fn credential_type(&self) -> CredentialType {
        CredentialType::Rsa
    }
}

/// SSH key generation parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    key_length: Option<KeyLength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_comment: Option<String>,
}

impl SshParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_length(mut self, key_length: KeyLength) -> Self {
        self.key_length = Some(key_length);
        self
    }

    pub fn ssh_comment(mut self, comment: impl Into<String>) -> Self {
        self.ssh_comment = Some(comment.into());
        self
    }

    pub fn get_key_length(&self) -> Option<KeyLength> {
        self.key_length
    }

    pub fn get_ssh_comment(&self) -> Option<&str> {
        self.ssh_comment.as_deref()
    }
}

impl GenerationParameters for SshParameters {
    type Credential = SshCredential;

    fn credential_type(&self) -> CredentialType {
        CredentialType::Ssh
    }
}

/// X.509 key usage extension values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyUsage {
    DigitalSignature,
    NonRepudiation,
    KeyEncipherment,
    DataEncipherment,
    KeyAgreement,
    KeyCertSign,
    CrlSign,
    EncipherOnly,
    DecipherOnly,
}

/// X.509 extended key usage extension values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedKeyUsage {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    Timestamping,
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Certificate generation parameters
///
/// A certificate needs a subject (at least one distinguished-name field) and a
/// signer: a CA credential name, `self_sign`, or `is_ca`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    key_length: Option<KeyLength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternative_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    #[serde(rename = "ca", skip_serializing_if = "Option::is_none")]
    certificate_authority_credential: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_ca: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    self_sign: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_usage: Option<Vec<KeyUsage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extended_key_usage: Option<Vec<ExtendedKeyUsage>>,
}

impl CertificateParameters {
    pub fn builder() -> CertificateParametersBuilder {
        CertificateParametersBuilder::default()
    }

    pub fn key_length(&self) -> Option<KeyLength> {
        self.key_length
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    pub fn alternative_names(&self) -> &[String] {
        self.alternative_names.as_deref().unwrap_or_default()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn organization_unit(&self) -> Option<&str> {
        self.organization_unit.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Validity in days.
    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn certificate_authority_credential(&self) -> Option<&str> {
        self.certificate_authority_credential.as_deref()
    }

    pub fn is_certificate_authority(&self) -> Option<bool> {
        self.is_ca
    }

    pub fn self_sign(&self) -> Option<bool> {
        self.self_sign
    }

    pub fn key_usage(&self) -> &[KeyUsage] {
        self.key_usage.as_deref().unwrap_or_default()
    }

    pub fn extended_key_usage(&self) -> &[ExtendedKeyUsage] {
        self.extended_key_usage.as_deref().unwrap_or_default()
    }

    fn has_subject(&self) -> bool {
        [
            &self.common_name,
            &self.organization,
            &self.organization_unit,
            &self.locality,
            &self.state,
            &self.country,
        ]
        .iter()
        .any(|field| field.is_some())
    }

    fn has_signer(&self) -> bool {
        self.certificate_authority_credential.is_some()
            || self.self_sign == Some(true)
            || self.is_ca == Some(true)
    }
}

impl GenerationParameters for CertificateParameters {
    type Credential = CertificateCredential;

    fn credential_type(&self) -> CredentialType {
        CredentialType::Certificate
    }

    fn validate(&self) -> Result<()> {
        if !self.has_subject() {
            return Err(CredHubError::invalid_argument(
                "at least one of common_name, organization, organization_unit, locality, state, country must be set",
            ));
        }
        if !self.has_signer() {
            return Err(CredHubError::invalid_argument(
                "one of certificate_authority_credential, self_sign, is_certificate_authority must be set",
            ));
        }
        if self.duration == Some(0) {
            return Err(CredHubError::invalid_argument("certificate duration must be greater than 0"));
        }
        Ok(())
    }
}

/// Builder for [`CertificateParameters`].
#[derive(Debug, Clone, Default)]
pub struct CertificateParametersBuilder {
    params: CertificateParameters,
}

impl CertificateParametersBuilder {
    pub fn key_length(mut self, key_length: KeyLength) -> Self {
        self.params.key_length = Some(key_length);
        self
    }

    pub fn common_name(mut self, common_name: impl Into<String>) -> Self {
        self.params.common_name = Some(common_name.into());
        self
    }

    pub fn alternative_name(mut self, name: impl Into<String>) -> Self {
        push_unique(self.params.alternative_names.get_or_insert_with(Vec::new), name.into());
        self
    }

    pub fn alternative_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.alternative_name(name);
        }
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.params.organization = Some(organization.into());
        self
    }

    pub fn organization_unit(mut self, unit: impl Into<String>) -> Self {
        self.params.organization_unit = Some(unit.into());
        self
    }

    pub fn locality(mut self, locality: impl Into<String>) -> Self {
        self.params.locality = Some(locality.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.params.state = Some(state.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.params.country = Some(country.into());
        self
    }

    pub fn duration(mut self, days: u32) -> Self {
        self.params.duration = Some(days);
        self
    }

    pub fn certificate_authority_credential(mut self, ca_name: impl Into<String>) -> Self {
        self.params.certificate_authority_credential = Some(ca_name.into());
        self
    }

    pub fn certificate_authority(mut self, is_ca: bool) -> Self {
        self.params.is_ca = Some(is_ca);
        self
    }

    pub fn self_sign(mut self, self_sign: bool) -> Self {
        self.params.self_sign = Some(self_sign);
        self
    }

    pub fn key_usage(mut self, usage: KeyUsage) -> Self {
        push_unique(self.params.key_usage.get_or_insert_with(Vec::new), usage);
        self
    }

    pub fn key_usages(mut self, usages: impl IntoIterator<Item = KeyUsage>) -> Self {
        for usage in usages {
            self = self.key_usage(usage);
        }
        self
    }

    pub fn extended_key_usage(mut self, usage: ExtendedKeyUsage) -> Self {
        push_unique(self.params.extended_key_usage.get_or_insert_with(Vec::new), usage);
        self
    }

    pub fn extended_key_usages(mut self, usages: impl IntoIterator<Item = ExtendedKeyUsage>) -> Self {
        for usage in usages {
            self = self.extended_key_usage(usage);
        }
        self
    }

    /// Build the parameters.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] when no subject field or no signer is set.
    pub fn build(self) -> Result<CertificateParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}
