//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `into_masked_json()` logs the viewer-masked form of a plaintext aggregate
//! - `Masked<T>` serializes through slog's nested-value support
//! - Nested structures and sequences are masked when logged

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use serde::Serialize;
use serde_json::Value as JsonValue;
use zeropii::{
    slog::IntoMaskedJson, Aggregate, DateOfBirth, DocumentNumber, Email, PhoneNumber, Role,
    Sealed,
};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Unit,
    None,
    // For nested serde values, we capture the JSON representation
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.into()));
        Ok(())
    }

    fn emit_bool(&mut self, key: slog::Key, val: bool) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Bool(val));
        Ok(())
    }

    fn emit_i64(&mut self, key: slog::Key, val: i64) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::I64(val));
        Ok(())
    }

    fn emit_u64(&mut self, key: slog::Key, val: u64) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::U64(val));
        Ok(())
    }

    fn emit_f64(&mut self, key: slog::Key, val: f64) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::F64(val));
        Ok(())
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Unit);
        Ok(())
    }

    fn emit_none(&mut self, key: slog::Key) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::None);
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        // Serialize the value to JSON to capture it
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

/// Helper function to serialize a slog::Value into any Serializer.
fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    // The record is created and used in a single expression to avoid lifetime issues
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    // We need to ensure format_args! result lives long enough
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

const KEY: &str = "0123456789abcdef0123456789abcdef";

#[derive(Clone, Serialize, Aggregate)]
struct Document {
    doc_type: String,
    #[pii(DocumentNumber)]
    doc_number: String,
}

#[derive(Clone, Serialize, Aggregate)]
struct Applicant {
    full_name: String,
    #[pii(Email)]
    email: String,
    #[pii(PhoneNumber)]
    phone: String,
    #[pii(DateOfBirth)]
    dob: String,
    documents: Vec<Document>,
}

fn applicant() -> Applicant {
    Applicant {
        full_name: "Jane Doe".into(),
        email: "jane.doe@example.com".into(),
        phone: "5551234567".into(),
        dob: "1990-05-12".into(),
        documents: vec![
            Document {
                doc_type: "passport".into(),
                doc_number: "A1234567".into(),
            },
            Document {
                doc_type: "pan".into(),
                doc_number: "ABCDE1234F".into(),
            },
        ],
    }
}

fn captured_json(serializer: &CapturingSerializer, key: &str) -> JsonValue {
    match serializer.get(key) {
        Some(CapturedValue::Serde(json)) => json,
        other => panic!("Expected Serde value for '{key}' key, got {other:?}"),
    }
}

#[test]
fn test_into_masked_json_masks_for_viewer() {
    let masked = applicant().into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "applicant", &mut serializer);

    let json = captured_json(&serializer, "applicant");
    assert_eq!(json["full_name"], "Jane Doe");
    assert_eq!(json["email"], "j*******@example.com");
    assert_eq!(json["phone"], "*******567");
    assert_eq!(json["dob"], "**-**-12");
}

#[test]
fn test_into_masked_json_masks_sequences() {
    let masked = applicant().into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "applicant", &mut serializer);

    let json = captured_json(&serializer, "applicant");
    assert_eq!(json["documents"][0]["doc_type"], "passport");
    assert_eq!(json["documents"][0]["doc_number"], "***-**-4567");
    assert_eq!(json["documents"][1]["doc_number"], "***-**-234F");
}

#[test]
fn test_masked_value_logs_its_role_view() {
    let sealed = Sealed::seal(applicant(), KEY).unwrap();
    let masked = sealed.reveal(KEY, Role::Manager).unwrap();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "applicant", &mut serializer);

    let json = captured_json(&serializer, "applicant");
    assert_eq!(json["email"], "jane.doe@example.com");
    assert_eq!(json["phone"], "5551234567");
    assert_eq!(json["dob"], "**-**-12");
    assert_eq!(json["documents"][1]["doc_number"], "***-**-234F");
}

#[test]
fn test_logged_output_never_contains_plaintext() {
    let masked = applicant().into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "applicant", &mut serializer);

    let rendered = captured_json(&serializer, "applicant").to_string();
    for secret in ["jane.doe@", "5551234567", "1990-05", "A1234567"] {
        assert!(!rendered.contains(secret), "{secret} leaked into {rendered}");
    }
}

#[test]
fn test_invalid_schema_logs_placeholder() {
    #[derive(Clone, Serialize, Aggregate)]
    struct Tagged {
        #[pii]
        tags: Vec<String>,
    }

    let masked = Tagged {
        tags: vec!["secret".into()],
    }
    .into_masked_json();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&masked, "tagged", &mut serializer);

    assert_eq!(
        captured_json(&serializer, "tagged"),
        JsonValue::String("Failed to serialize masked value".into())
    );
}
