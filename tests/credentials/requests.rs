//! Request envelope scenarios.

use credhub_model::domain::{
    CertificateParameters, ExtendedKeyUsage, KeyLength, KeyUsage, PasswordParameters,
    SshCredential, UserParameters,
};
use credhub_model::{
    CertificateCredential, CredentialName, CredentialRequest, CredentialValue, JsonCredential,
    Operation, ParametersRequest, PasswordCredential, Permission, ServiceInstanceCredentialName,
    UserCredential, WriteMode,
};
use serde_json::json;

fn example_name() -> anyhow::Result<CredentialName> {
    Ok(CredentialName::new(["example", "credential"])?)
}

#[test]
fn password_write_request() -> anyhow::Result<()> {
    let request = CredentialRequest::builder()
        .name(example_name()?)
        .value(PasswordCredential::new("secret"))
        .mode(WriteMode::Overwrite)
        .build()?;

    assert_eq!(
        serde_json::to_string(&request)?,
        r#"{"name":"/example/credential","type":"password","mode":"overwrite","value":"secret"}"#
    );
    Ok(())
}

#[test]
fn explicit_mode_beats_legacy_overwrite() -> anyhow::Result<()> {
    let request = CredentialRequest::builder()
        .name(example_name()?)
        .value(PasswordCredential::new("secret"))
        .overwrite(false)
        .mode(WriteMode::Overwrite)
        .build()?;

    let json = request.to_json()?;
    assert_eq!(json["mode"], json!("overwrite"));
    assert!(json.get("overwrite").is_none());
    Ok(())
}

#[test]
fn ssh_value_with_only_public_key() -> anyhow::Result<()> {
    let request = CredentialRequest::builder()
        .name(example_name()?)
        .value(SshCredential::builder().public_key("ssh-rsa AAAAB3Nz").build()?)
        .build()?;

    let json = request.to_json()?;
    assert_eq!(json["type"], json!("ssh"));
    assert_eq!(json["value"]["public_key"], json!("ssh-rsa AAAAB3Nz"));
    assert!(json["value"].get("private_key").is_none());
    Ok(())
}

#[test]
fn user_value_omits_hash_and_missing_username() -> anyhow::Result<()> {
    let request = CredentialRequest::builder()
        .name(example_name()?)
        .value(UserCredential::with_password("pw"))
        .build()?;

    assert_eq!(request.to_json()?["value"], json!({ "password": "pw" }));
    Ok(())
}

#[test]
fn json_value_with_permissions() -> anyhow::Result<()> {
    let value = JsonCredential::from_serializable(&json!({ "key": "value", "nested": { "n": 1 } }))?;
    let reader = Permission::builder().app("app-id")?.operation(Operation::Read).build()?;

    let request = CredentialRequest::builder()
        .name(example_name()?)
        .value(value)
        .permission(reader)
        .build()?;

    assert_eq!(
        request.to_json()?,
        json!({
            "name": "/example/credential",
            "type": "json",
            "value": { "key": "value", "nested": { "n": 1 } },
            "permissions": [{ "actor": "mtls-app:app-id", "operations": ["read"] }]
        })
    );
    Ok(())
}

#[test]
fn dynamic_value_request_uses_variant_tag() -> anyhow::Result<()> {
    let value: CredentialValue = CertificateCredential::builder()
        .certificate_authority("-----BEGIN CERTIFICATE-----")
        .build()?
        .into();

    let request = CredentialRequest::builder().name(example_name()?).value(value).build()?;

    let json = request.to_json()?;
    assert_eq!(json["type"], json!("certificate"));
    assert_eq!(json["value"], json!({ "ca": "-----BEGIN CERTIFICATE-----" }));
    Ok(())
}

#[test]
fn password_generate_request() -> anyhow::Result<()> {
    let request = ParametersRequest::builder()
        .name(example_name()?)
        .parameters(PasswordParameters::builder().length(40).include_special(true).build()?)
        .mode(WriteMode::NoOverwrite)
        .build()?;

    assert_eq!(
        request.to_json()?,
        json!({
            "name": "/example/credential",
            "type": "password",
            "mode": "no-overwrite",
            "parameters": { "length": 40, "include_special": true }
        })
    );
    Ok(())
}

#[test]
fn user_generate_request_carries_password_parameters() -> anyhow::Result<()> {
    let params = UserParameters::new(PasswordParameters::builder().exclude_number(true).build()?);
    let request = ParametersRequest::builder().name(example_name()?).parameters(params).build()?;

    let json = request.to_json()?;
    assert_eq!(json["type"], json!("user"));
    assert_eq!(json["parameters"], json!({ "exclude_number": true }));
    assert!(json.get("value").is_none());
    Ok(())
}

#[test]
fn certificate_generate_request() -> anyhow::Result<()> {
    let params = CertificateParameters::builder()
        .common_name("example.com")
        .alternative_names(["example.com", "www.example.com"])
        .organization("Example")
        .certificate_authority_credential("/example-ca")
        .duration(365)
        .key_length(KeyLength::Length4096)
        .key_usages([KeyUsage::DigitalSignature, KeyUsage::KeyEncipherment])
        .extended_key_usage(ExtendedKeyUsage::ServerAuth)
        .build()?;

    let request = ParametersRequest::builder()
        .name(example_name()?)
        .parameters(params)
        .mode(WriteMode::Converge)
        .build()?;

    assert_eq!(
        request.to_json()?,
        json!({
            "name": "/example/credential",
            "type": "certificate",
            "mode": "converge",
            "parameters": {
                "key_length": 4096,
                "common_name": "example.com",
                "alternative_names": ["example.com", "www.example.com"],
                "organization": "Example",
                "duration": 365,
                "ca": "/example-ca",
                "key_usage": ["digital_signature", "key_encipherment"],
                "extended_key_usage": ["server_auth"]
            }
        })
    );
    Ok(())
}

#[test]
fn certificate_parameters_with_only_key_length_are_rejected() {
    let err = CertificateParameters::builder().key_length(KeyLength::Length2048).build().unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn service_instance_name_in_request() -> anyhow::Result<()> {
    let name = ServiceInstanceCredentialName::new("broker", "offering", "binding-1", "creds")?;

    let request = CredentialRequest::builder()
        .name(name)
        .value(PasswordCredential::new("secret"))
        .build()?;

    assert_eq!(request.name().as_str(), "/broker/offering/binding-1/creds");
    Ok(())
}

#[test]
fn missing_name_or_value_is_invalid_argument() {
    let err = CredentialRequest::<PasswordCredential>::builder()
        .mode(WriteMode::Overwrite)
        .build()
        .unwrap_err();
    assert!(err.is_invalid_argument());
}
