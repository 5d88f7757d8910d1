//! Operation groups driven through the in-memory transport.

use std::sync::Arc;

use credhub_model::api::{routes, ServicesData};
use credhub_model::domain::{CertificateId, CredentialId, PermissionId};
use credhub_model::{
    Actor, CredHubClient, CredentialName, CredentialRequest, CredentialValue, Operation,
    ParametersRequest, PasswordCredential, PasswordParameters, Permission, RsaCredential,
    WriteMode,
};
use http::Method;
use serde_json::json;

use super::support::MockTransport;

fn example_name() -> CredentialName {
    CredentialName::new(["example", "credential"]).expect("valid name")
}

fn password_document(value: &str) -> serde_json::Value {
    json!({
        "id": "67fc3def-bbfb-4953-83f8-4ab0682ad675",
        "name": "/example/credential",
        "type": "password",
        "value": value,
        "version_created_at": "2017-01-01T04:07:18Z"
    })
}

fn client(transport: MockTransport) -> (CredHubClient<MockTransport>, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    (CredHubClient::from_arc(Arc::clone(&transport)), transport)
}

#[tokio::test]
async fn write_sends_put_with_envelope() -> anyhow::Result<()> {
    let (client, transport) = client(MockTransport::new().respond(password_document("secret")));
    let request = CredentialRequest::builder()
        .name(example_name())
        .value(PasswordCredential::new("secret"))
        .mode(WriteMode::Overwrite)
        .build()?;

    let details = client.credentials().write(&request).await?;

    assert_eq!(details.value().password(), "secret");
    let sent = transport.last_request();
    assert_eq!(sent.method(), &Method::PUT);
    assert_eq!(sent.path()?, "/api/v1/data");
    assert_eq!(sent.json_body(), Some(&request.to_json()?));
    Ok(())
}

#[tokio::test]
async fn generate_returns_parameters_credential_type() -> anyhow::Result<()> {
    let (client, transport) = client(MockTransport::new().respond(password_document("generated")));
    let request = ParametersRequest::builder()
        .name(example_name())
        .parameters(PasswordParameters::builder().length(20).build()?)
        .build()?;

    let details = client.credentials().generate(&request).await?;

    assert_eq!(details.value().password(), "generated");
    let sent = transport.last_request();
    assert_eq!(sent.method(), &Method::POST);
    assert_eq!(sent.json_body().map(|b| b["parameters"].clone()), Some(json!({ "length": 20 })));
    Ok(())
}

#[tokio::test]
async fn generate_with_mismatched_response_is_deserialization_error() -> anyhow::Result<()> {
    let (client, _) = client(MockTransport::new().respond(json!({
        "name": "/example/credential",
        "type": "rsa",
        "value": { "public_key": "pub" }
    })));
    let request = ParametersRequest::builder()
        .name(example_name())
        .parameters(PasswordParameters::default())
        .build()?;

    let err = client.credentials().generate(&request).await.unwrap_err();
    assert!(err.is_deserialization());
    Ok(())
}

#[tokio::test]
async fn get_by_name_takes_current_version() -> anyhow::Result<()> {
    let (client, transport) =
        client(MockTransport::new().respond(json!({ "data": [password_document("current")] })));

    let details = client.credentials().get_by_name::<PasswordCredential>(&example_name()).await?;

    assert_eq!(details.value().password(), "current");
    assert_eq!(
        transport.last_request().path()?,
        "/api/v1/data?name=%2Fexample%2Fcredential&current=true"
    );
    Ok(())
}

#[tokio::test]
async fn get_by_name_with_no_versions_fails() {
    let (client, _) = client(MockTransport::new().respond(json!({ "data": [] })));

    let err = client
        .credentials()
        .get_by_name::<CredentialValue>(&example_name())
        .await
        .unwrap_err();
    assert!(err.is_deserialization());
}

#[tokio::test]
async fn history_and_id_lookups() -> anyhow::Result<()> {
    let (client, transport) = client(
        MockTransport::new()
            .respond(json!({ "data": [password_document("two"), password_document("one")] }))
            .respond(password_document("one")),
    );

    let history = client
        .credentials()
        .get_by_name_with_history::<PasswordCredential>(&example_name(), 2)
        .await?;
    assert_eq!(history.len(), 2);

    let id = CredentialId::from_string("67fc3def-bbfb-4953-83f8-4ab0682ad675".into());
    let details = client.credentials().get_by_id::<CredentialValue>(&id).await?;
    assert!(matches!(details.value(), CredentialValue::Password(_)));

    let paths: Vec<String> = transport.requests().iter().map(|r| r.path()).collect::<Result<_, _>>()?;
    assert_eq!(
        paths,
        vec![
            "/api/v1/data?name=%2Fexample%2Fcredential&versions=2".to_string(),
            "/api/v1/data/67fc3def-bbfb-4953-83f8-4ab0682ad675".to_string(),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn history_requires_positive_version_count() {
    let (client, transport) = client(MockTransport::new());
    let err = client
        .credentials()
        .get_by_name_with_history::<PasswordCredential>(&example_name(), 0)
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn searches_and_paths() -> anyhow::Result<()> {
    let (client, transport) = client(
        MockTransport::new()
            .respond(json!({ "credentials": [{ "name": "/example/credential" }] }))
            .respond(json!({ "credentials": [] }))
            .respond(json!({ "paths": [{ "path": "/example/" }] })),
    );

    let by_name = client.credentials().find_by_name("credential").await?;
    assert_eq!(by_name[0].name(), &example_name());

    assert!(client.credentials().find_by_path("/nothing").await?.is_empty());
    assert_eq!(client.credentials().get_all_paths().await?[0].path(), "/example/");

    let templates: Vec<&str> = transport.requests().iter().map(|r| r.template()).collect();
    assert_eq!(templates, vec![routes::DATA_NAME_LIKE, routes::DATA_BY_PATH, routes::DATA_PATHS]);
    Ok(())
}

#[tokio::test]
async fn regenerate_and_delete() -> anyhow::Result<()> {
    let (client, transport) = client(
        MockTransport::new()
            .respond(json!({ "name": "/example/credential", "type": "rsa", "value": { "public_key": "pub", "private_key": "priv" } }))
            .respond_empty(),
    );

    let details = client.credentials().regenerate::<RsaCredential>(&example_name()).await?;
    assert_eq!(details.value().public_key(), Some("pub"));
    client.credentials().delete_by_name(&example_name()).await?;

    let requests = transport.requests();
    assert_eq!(requests[0].json_body(), Some(&json!({ "name": "/example/credential" })));
    assert_eq!(requests[1].method(), &Method::DELETE);
    assert_eq!(requests[1].path()?, "/api/v1/data?name=%2Fexample%2Fcredential");
    Ok(())
}

#[tokio::test]
async fn transport_errors_pass_through() {
    let (client, _) = client(MockTransport::new().fail(404, "The request could not be completed"));

    let err = client
        .credentials()
        .get_by_name::<PasswordCredential>(&example_name())
        .await
        .unwrap_err();
    assert!(matches!(err, credhub_model::CredHubError::Transport { status: Some(404), .. }));
}

#[tokio::test]
async fn empty_body_where_one_is_required() {
    let (client, _) = client(MockTransport::new().respond_empty());
    let err = client.info().version().await.unwrap_err();
    assert!(err.is_deserialization());
}

#[tokio::test]
async fn v1_permission_operations() -> anyhow::Result<()> {
    let (client, transport) = client(
        MockTransport::new()
            .respond(json!({ "credential_name": "/example/credential", "permissions": [] }))
            .respond_empty()
            .respond_empty(),
    );
    let reader = Permission::builder().app("app-id")?.operation(Operation::Read).build()?;

    assert!(client.permissions().get_permissions(&example_name()).await?.is_empty());
    client.permissions().add_permissions(&example_name(), vec![reader]).await?;
    client.permissions().delete_permission(&example_name(), &Actor::app("app-id")?).await?;

    let requests = transport.requests();
    assert_eq!(
        requests[1].json_body(),
        Some(&json!({
            "credential_name": "/example/credential",
            "permissions": [{ "actor": "mtls-app:app-id", "operations": ["read"] }]
        }))
    );
    assert_eq!(
        requests[2].path()?,
        "/api/v1/permissions?credential_name=%2Fexample%2Fcredential&actor=mtls-app%3Aapp-id"
    );
    Ok(())
}

#[tokio::test]
async fn v2_permission_operations() -> anyhow::Result<()> {
    let stored = json!({
        "uuid": "1a2b3c4d-0000-4000-8000-000000000000",
        "path": "/example/*",
        "actor": "uaa-user:alice",
        "operations": ["read"]
    });
    let (client, transport) = client(
        MockTransport::new()
            .respond(stored.clone())
            .respond(stored.clone())
            .respond(stored.clone())
            .respond(stored),
    );
    let permission = credhub_model::CredentialPermission::builder()
        .path("/example/*")
        .permission(Permission::builder().user("alice")?.operation(Operation::Read).build()?)
        .build()?;

    let created = client.permissions_v2().add_permissions(&permission).await?;
    let uuid: PermissionId = created.uuid().cloned().expect("server assigned uuid");
    client.permissions_v2().get_permission(&uuid).await?;
    client
        .permissions_v2()
        .get_permission_by_path_and_actor("/example/*", &Actor::user("alice")?)
        .await?;
    client.permissions_v2().delete_permission(&uuid).await?;

    let requests = transport.requests();
    assert_eq!(requests[0].json_body(), Some(&serde_json::to_value(&permission)?));
    assert_eq!(requests[1].path()?, "/api/v2/permissions/1a2b3c4d-0000-4000-8000-000000000000");
    assert_eq!(requests[2].path()?, "/api/v2/permissions?path=%2Fexample%2F%2A&actor=uaa-user%3Aalice");
    assert_eq!(requests[3].method(), &Method::DELETE);
    Ok(())
}

#[tokio::test]
async fn v2_update_permission() -> anyhow::Result<()> {
    let (client, transport) = client(MockTransport::new().respond(json!({
        "uuid": "1a2b3c4d-0000-4000-8000-000000000000",
        "path": "/example",
        "actor": "uaa-user:alice",
        "operations": ["read", "write"]
    })));
    let uuid = PermissionId::from_string("1a2b3c4d-0000-4000-8000-000000000000".into());
    let permission = credhub_model::CredentialPermission::builder()
        .path("/example")
        .permission(
            Permission::builder().user("alice")?.operations([Operation::Read, Operation::Write]).build()?,
        )
        .build()?;

    let updated = client.permissions_v2().update_permission(&uuid, &permission).await?;

    assert_eq!(updated.operations(), &[Operation::Read, Operation::Write]);
    assert_eq!(transport.last_request().method(), &Method::PUT);
    Ok(())
}

#[tokio::test]
async fn certificate_operations() -> anyhow::Result<()> {
    let summary = json!({
        "id": "f1b6c2d4-0000-4000-8000-00000000000a",
        "name": "/example-ca",
        "signed_by": "/example-ca",
        "signs": [],
        "versions": [{ "id": "v1", "transitional": false }]
    });
    let (client, transport) = client(
        MockTransport::new()
            .respond(json!({ "certificates": [summary.clone()] }))
            .respond(json!({ "certificates": [summary] }))
            .respond(json!({
                "name": "/example-ca",
                "type": "certificate",
                "transitional": true,
                "value": { "ca": "ca", "certificate": "cert", "private_key": "key" }
            }))
            .respond(json!({ "regenerated_credentials": ["/leaf-one", "/leaf-two"] }))
            .respond(json!([{ "id": "v1", "transitional": true }])),
    );
    let ca_name = CredentialName::new(["example-ca"])?;
    let ca_id = CertificateId::from_string("f1b6c2d4-0000-4000-8000-00000000000a".into());

    assert_eq!(client.certificates().get_all().await?.len(), 1);
    assert_eq!(client.certificates().get_by_name(&ca_name).await?.id(), &ca_id);

    let rotated = client.certificates().regenerate(&ca_id, Some(true)).await?;
    assert_eq!(rotated.is_transitional(), Some(true));

    let regenerated = client.certificates().bulk_regenerate(&ca_name).await?;
    assert_eq!(regenerated.len(), 2);

    let versions = client
        .certificates()
        .update_transitional_version(&ca_id, Some(CredentialId::from_string("v1".into())))
        .await?;
    assert!(versions[0].is_transitional());

    let requests = transport.requests();
    assert_eq!(requests[2].json_body(), Some(&json!({ "set_as_transitional": true })));
    assert_eq!(requests[3].json_body(), Some(&json!({ "signed_by": "/example-ca" })));
    assert_eq!(
        requests[4].path()?,
        "/api/v1/certificates/f1b6c2d4-0000-4000-8000-00000000000a/update_transitional_version"
    );
    assert_eq!(requests[4].json_body(), Some(&json!({ "version": "v1" })));
    Ok(())
}

#[tokio::test]
async fn interpolation_and_version() -> anyhow::Result<()> {
    let interpolated = json!({
        "p-demo": [{ "credentials": { "password": "secret" }, "label": "p-demo" }]
    });
    let (client, transport) = client(
        MockTransport::new()
            .respond(interpolated.clone())
            .respond(json!({ "version": "2.12.0" })),
    );
    let services = ServicesData::try_from(json!({
        "p-demo": [{ "credentials": { "credhub-ref": "/example/credential" }, "label": "p-demo" }]
    }))?;

    let result = client.interpolation().interpolate_service_data(&services).await?;
    assert_eq!(serde_json::to_value(&result)?, interpolated);
    assert_eq!(client.info().version().await?.version(), "2.12.0");

    assert_eq!(transport.requests()[0].template(), routes::INTERPOLATE);
    Ok(())
}
