//! End-to-end tests for the traversal engine.
//!
//! These tests exercise the integration of:
//! - `Aggregate` derive schemas and walks,
//! - the AES-GCM transform applied per sensitive field, and
//! - recursion through nested structs, options and sequences.

use zeropii::{
    apply, apply_in_place, Action, Aggregate, DocumentNumber, Email, FieldShape, PhoneNumber,
    PiiEngine, PiiError, Protectable, SchemaError, Sensitivity, SensitivityKind, TransformError,
};

const KEY: &str = "0123456789abcdef0123456789abcdef";
const OTHER_KEY: &str = "fedcba9876543210fedcba9876543210";

#[derive(Clone, PartialEq, Aggregate)]
struct Holder {
    #[pii]
    name: String,
    #[pii(Email)]
    email: String,
}

#[derive(Clone, Debug, PartialEq, Aggregate)]
#[pii(skip_debug)]
struct Card {
    label: String,
    #[pii(DocumentNumber)]
    number: String,
    issued: chrono::NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Aggregate)]
#[pii(skip_debug)]
struct Wallet {
    owner: String,
    holder: Holder,
    cards: Vec<Card>,
    #[pii(PhoneNumber)]
    backup_phone: Option<String>,
    verified: bool,
    #[pii(skip)]
    raw: std::collections::HashMap<String, String>,
}

fn card(label: &str, number: &str) -> Card {
    Card {
        label: label.into(),
        number: number.into(),
        issued: chrono::NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
    }
}

fn wallet() -> Wallet {
    Wallet {
        owner: "w-1".into(),
        holder: Holder {
            name: "Jane Doe".into(),
            email: "jane.doe@example.com".into(),
        },
        cards: vec![
            card("first", "A1234567"),
            card("second", "B7654321"),
            card("third", "C0000001"),
        ],
        backup_phone: Some("5551234567".into()),
        verified: true,
        raw: [("note".to_string(), "kept".to_string())].into(),
    }
}

#[test]
fn test_nested_and_sequence_leaves_are_transformed_in_one_call() {
    let original = wallet();
    let encrypted = original.clone().encrypt_pii(KEY).unwrap();

    assert_ne!(encrypted.holder.email, original.holder.email);
    for (sealed, plain) in encrypted.cards.iter().zip(&original.cards) {
        assert_ne!(sealed.number, plain.number);
        assert_eq!(sealed.label, plain.label);
        assert_eq!(sealed.issued, plain.issued);
    }
    assert_eq!(encrypted.owner, original.owner);
    assert_eq!(encrypted.verified, original.verified);
    assert_eq!(encrypted.raw, original.raw);
    assert_eq!(encrypted.cards.len(), 3);
}

#[test]
fn test_round_trip_restores_every_field() {
    let original = wallet();
    let restored = original
        .clone()
        .encrypt_pii(KEY)
        .and_then(|sealed| sealed.decrypt_pii(KEY))
        .unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_empty_strings_are_transformed() {
    let mut original = wallet();
    original.holder.name = String::new();
    original.cards[1].number = String::new();

    let encrypted = original.clone().encrypt_pii(KEY).unwrap();
    assert!(!encrypted.holder.name.is_empty());
    assert!(!encrypted.cards[1].number.is_empty());

    let restored = encrypted.decrypt_pii(KEY).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_encryption_is_not_deterministic() {
    let first = wallet().encrypt_pii(KEY).unwrap();
    let second = wallet().encrypt_pii(KEY).unwrap();
    assert_ne!(first.holder.email, second.holder.email);
    assert_eq!(
        first.decrypt_pii(KEY).unwrap(),
        second.decrypt_pii(KEY).unwrap()
    );
}

#[test]
fn test_wrong_key_fails_with_transform_error() {
    let encrypted = wallet().encrypt_pii(KEY).unwrap();
    let err = encrypted.decrypt_pii(OTHER_KEY).unwrap_err();

    assert_eq!(err.transform_error(), Some(&TransformError::Authentication));
    match err {
        PiiError::Transform { field, .. } => assert_eq!(field, "holder.name"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_decrypting_plaintext_is_malformed() {
    let err = apply(wallet(), &Action::Decrypt { key: KEY }).unwrap_err();
    assert_eq!(
        err.transform_error(),
        Some(&TransformError::MalformedCiphertext)
    );
}

#[test]
fn test_failure_in_sequence_names_element() {
    let mut encrypted = wallet().encrypt_pii(KEY).unwrap();
    encrypted.cards[2].number = "C0000001".into();

    let mut target = encrypted;
    let err = apply_in_place(&mut target, &Action::Decrypt { key: KEY }).unwrap_err();
    match err {
        PiiError::Transform { field, source } => {
            assert_eq!(field, "cards[2].number");
            assert_eq!(source, TransformError::MalformedCiphertext);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Fields before the failure were already rewritten.
    assert_eq!(target.holder.email, "jane.doe@example.com");
}

#[test]
fn test_empty_key_is_rejected_before_any_field() {
    let mut value = wallet();
    let err = apply_in_place(&mut value, &Action::Encrypt { key: "" }).unwrap_err();
    assert!(matches!(err, PiiError::Key(TransformError::EmptyKey)));
    assert_eq!(value, wallet());
}

#[test]
fn test_absent_optional_is_left_absent() {
    let mut original = wallet();
    original.backup_phone = None;
    let encrypted = original.clone().encrypt_pii(KEY).unwrap();
    assert_eq!(encrypted.backup_phone, None);
    assert_eq!(encrypted.decrypt_pii(KEY).unwrap(), original);
}

#[test]
fn test_schema_error_before_mutation() {
    #[derive(Clone, Aggregate)]
    struct Mislabelled {
        #[pii(Email)]
        email: String,
        #[pii]
        holder: Holder,
    }

    let mut value = Mislabelled {
        email: "jane.doe@example.com".into(),
        holder: Holder {
            name: "Jane".into(),
            email: "jane@example.com".into(),
        },
    };
    let err = PiiEngine::default()
        .apply_in_place(&mut value, &Action::Encrypt { key: KEY })
        .unwrap_err();

    assert_eq!(
        err.schema_error(),
        Some(&SchemaError::NotText {
            aggregate: "Mislabelled",
            field: "holder".into(),
            shape: "a nested aggregate",
        })
    );
    assert_eq!(value.email, "jane.doe@example.com");
}

#[test]
fn test_describe_matches_declaration() {
    let schema = Wallet::describe();
    let summary: Vec<_> = schema
        .fields
        .iter()
        .map(|field| (field.name, field.sensitivity))
        .collect();
    assert_eq!(
        summary,
        [
            ("owner", Sensitivity::None),
            ("holder", Sensitivity::None),
            ("cards", Sensitivity::None),
            ("backup_phone", Sensitivity::Pii(SensitivityKind::Phone)),
            ("verified", Sensitivity::None),
            ("raw", Sensitivity::None),
        ]
    );
    assert!(matches!(schema.fields[1].shape, FieldShape::Nested(_)));
    assert!(matches!(schema.fields[2].shape, FieldShape::Sequence(_)));
    assert!(matches!(schema.fields[5].shape, FieldShape::Opaque));
}

#[test]
fn test_tuple_and_generic_structs() {
    #[derive(Clone, PartialEq, Aggregate)]
    struct Token(#[pii] String, u32);

    #[derive(Clone, PartialEq, Aggregate)]
    struct Envelope<T> {
        id: String,
        items: Vec<T>,
    }

    let original = Envelope {
        id: "env".to_string(),
        items: vec![Token("abc".into(), 1), Token("def".into(), 2)],
    };
    let encrypted = original.clone().encrypt_pii(KEY).unwrap();
    assert_ne!(encrypted.items[0].0, "abc");
    assert_eq!(encrypted.items[1].1, 2);
    assert_eq!(encrypted.decrypt_pii(KEY).unwrap(), original);
}

#[test]
fn test_derived_debug_shows_values_under_test_cfg() {
    let holder = Holder {
        name: "Jane".into(),
        email: "jane@example.com".into(),
    };
    // Integration tests build with `cfg(test)`, so the derived Debug shows values.
    assert!(format!("{holder:?}").contains("jane@example.com"));
}
