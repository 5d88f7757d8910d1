use credhub_model::domain::{
    ActorType, CertificateCredential, JsonCredential, KeyPairCredential, SecretString,
};
use credhub_model::{
    Actor, CredentialDetails, CredentialName, CredentialPermission, CredentialPermissions,
    CredentialValueType, Operation, PasswordCredential, Permission, RsaCredential, SshCredential,
    UserCredential, ValueCredential,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-]{1,12}"
}

fn actor_type() -> impl Strategy<Value = ActorType> {
    prop::sample::select(ActorType::ALL.to_vec())
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::sample::subsequence(Operation::ALL.to_vec(), 1..=Operation::ALL.len())
}

fn pem() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("-----BEGIN [A-Z]{3,11}-----[A-Za-z0-9+/]{4,24}")
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Decode a value through a full response envelope.
fn through_envelope<V: CredentialValueType>(value: &V) -> V {
    let document = json!({
        "name": "/roundtrip",
        "type": value.credential_type(),
        "value": serde_json::to_value(value).expect("serializable value"),
    });
    CredentialDetails::<V>::from_json(document).expect("decodable envelope").into_value()
}

proptest! {
    #[test]
    fn name_renders_as_joined_segments(segments in prop::collection::vec(segment(), 0..6)) {
        let name = CredentialName::new(segments.iter().map(String::as_str)).unwrap();
        let expected = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segments.join("/"))
        };
        prop_assert_eq!(name.as_str(), expected.as_str());
        prop_assert_eq!(CredentialName::parse(name.as_str()).unwrap(), name);
    }

    #[test]
    fn names_with_empty_segments_are_rejected(
        before in prop::collection::vec(segment(), 0..3),
        after in prop::collection::vec(segment(), 0..3),
    ) {
        let mut segments = before;
        segments.push(String::new());
        segments.extend(after);
        prop_assert!(CredentialName::new(segments).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn actor_roundtrip(actor_type in actor_type(), identity in "[a-z0-9:-]{1,20}") {
        let actor = Actor::new(actor_type, identity.clone()).unwrap();
        let decoded = Actor::decode(&actor.encode()).unwrap();
        prop_assert_eq!(decoded.actor_type(), actor_type);
        prop_assert_eq!(decoded.identity(), identity.as_str());
    }

    #[test]
    fn identities_without_type_prefix_are_rejected(identity in "[a-z0-9-]{0,20}") {
        prop_assert!(Actor::decode(&identity).is_err());
    }

    #[test]
    fn permissions_roundtrip(
        actor_type in actor_type(),
        identity in "[a-z0-9-]{1,12}",
        ops in operations(),
    ) {
        let permission = Permission::builder()
            .actor(Actor::new(actor_type, identity).unwrap())
            .operations(ops)
            .build()
            .unwrap();
        let batch = CredentialPermissions::new(CredentialName::new(["p"]).unwrap(), vec![permission]);

        let json = serde_json::to_value(&batch).unwrap();
        prop_assert_eq!(serde_json::from_value::<CredentialPermissions>(json).unwrap(), batch);
    }

    #[test]
    fn string_values_roundtrip(secret in ".{0,40}") {
        let value = ValueCredential::new(secret.as_str());
        prop_assert_eq!(through_envelope(&value), value);

        let password = PasswordCredential::new(secret.as_str());
        prop_assert_eq!(through_envelope(&password), password);
    }

    #[test]
    fn user_values_roundtrip(username in proptest::option::of("[a-z]{1,10}"), password in ".{1,20}") {
        let user = match username {
            Some(username) => UserCredential::new(username, password),
            None => UserCredential::with_password(password),
        };
        prop_assert_eq!(through_envelope(&user), user);
    }

    #[test]
    fn key_pairs_roundtrip(
        public_key in proptest::option::of("ssh-rsa [A-Za-z0-9+/]{8,32}"),
        private_key in proptest::option::of("[A-Za-z0-9+/]{8,32}"),
    ) {
        let rsa = RsaCredential::from_keys(public_key.clone(), private_key.clone().map(SecretString::new));
        let ssh = SshCredential::from_keys(public_key.clone(), private_key.clone().map(SecretString::new));

        if public_key.is_none() && private_key.is_none() {
            prop_assert!(rsa.unwrap_err().is_invalid_argument());
            prop_assert!(ssh.unwrap_err().is_invalid_argument());
        } else {
            let rsa = rsa.unwrap();
            prop_assert_eq!(through_envelope(&rsa), rsa.clone());
            let ssh = ssh.unwrap();
            prop_assert_eq!(through_envelope(&ssh), ssh.clone());

            // The unset key never appears in the document
            let json = serde_json::to_value(&rsa).unwrap();
            prop_assert_eq!(json.get("public_key").is_some(), public_key.is_some());
            prop_assert_eq!(json.get("private_key").is_some(), private_key.is_some());
        }
    }

    #[test]
    fn certificates_roundtrip(
        certificate in pem(),
        ca in pem(),
        ca_name in proptest::option::of("/[a-z]{1,8}/ca"),
        private_key in pem(),
    ) {
        let mut builder = CertificateCredential::builder();
        if let Some(certificate) = &certificate {
            builder = builder.certificate(certificate.as_str());
        }
        if let Some(ca) = &ca {
            builder = builder.certificate_authority(ca.as_str());
        }
        if let Some(ca_name) = &ca_name {
            builder = builder.certificate_authority_name(ca_name.as_str());
        }
        if let Some(private_key) = &private_key {
            builder = builder.private_key(private_key.as_str());
        }

        if certificate.is_none() && ca.is_none() && private_key.is_none() {
            prop_assert!(builder.build().unwrap_err().is_invalid_argument());
        } else {
            let value = builder.build().unwrap();
            prop_assert_eq!(through_envelope(&value), value.clone());

            // Only the populated fields appear in the document
            let json = serde_json::to_value(&value).unwrap();
            prop_assert_eq!(json.get("certificate").is_some(), certificate.is_some());
            prop_assert_eq!(json.get("ca").is_some(), ca.is_some());
            prop_assert_eq!(json.get("ca_name").is_some(), ca_name.is_some());
            prop_assert_eq!(json.get("private_key").is_some(), private_key.is_some());
        }
    }

    #[test]
    fn json_values_roundtrip(entries in prop::collection::btree_map("[a-z_]{1,8}", json_value(), 0..5)) {
        let map: Map<String, Value> = entries.into_iter().collect();
        let value = JsonCredential::new(map.clone());
        prop_assert_eq!(through_envelope(&value), value.clone());
        prop_assert_eq!(serde_json::to_value(&value).unwrap(), Value::Object(map));
    }

    #[test]
    fn v2_permissions_roundtrip(
        path in "/[a-z]{1,8}(/[a-z]{1,8}){0,2}(/\\*)?",
        actor_type in actor_type(),
        identity in "[a-z0-9-]{1,12}",
        ops in operations(),
        uuid in proptest::option::of("[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}"),
    ) {
        let permission = Permission::builder()
            .actor(Actor::new(actor_type, identity).unwrap())
            .operations(ops)
            .build()
            .unwrap();
        let built = CredentialPermission::builder().path(path).permission(permission).build().unwrap();

        // Server responses carry the uuid; requests never do
        let mut document = serde_json::to_value(&built).unwrap();
        prop_assert!(document.get("uuid").is_none());
        if let Some(uuid) = &uuid {
            document["uuid"] = json!(uuid);
        }
        let read: CredentialPermission = serde_json::from_value(document).unwrap();
        prop_assert_eq!(read.uuid().map(|id| id.as_str()), uuid.as_deref());

        let again: CredentialPermission =
            serde_json::from_value(serde_json::to_value(&read).unwrap()).unwrap();
        prop_assert_eq!(again, read);
    }
}
