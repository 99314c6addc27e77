//! Adapters for emitting aggregates through `slog`.
//!
//! This module provides `slog::Value` implementations that serialize masked
//! aggregates as structured JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation comes from the masked value, never
//!   from plaintext.
//! - Avoiding fallible logging APIs: serialization and masking failures are
//!   represented as placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or choose a role for the caller:
//! [`IntoMaskedJson`] always masks for [`Role::Viewer`].

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{masking::Role, pipeline::Masked, traverse::Protectable};

const SERIALIZE_FAILED: &str = "Failed to serialize masked value";

/// A `slog::Value` that emits an owned masked payload as structured JSON.
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    fn serialized<T: Serialize>(value: &T) -> Self {
        let json = serde_json::to_value(value)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()));
        Self::new(json)
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl<T: Serialize> SlogValue for Masked<T> {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        SlogValue::serialize(&MaskedJson::serialized(&**self), record, key, serializer)
    }
}

/// Converts plaintext aggregates into a `slog::Value` that logs their masked
/// form as JSON.
///
/// Calling `into_masked_json` consumes the value, masks it for
/// [`Role::Viewer`] and stores the result as a `serde_json::Value`. The
/// plaintext is never serialized.
///
/// ## Example
/// ```ignore
/// use zeropii::slog::IntoMaskedJson;
///
/// info!(logger, "customer received"; "customer" => customer.into_masked_json());
/// ```
pub trait IntoMaskedJson: Protectable + Serialize {
    /// Masks `self` and returns a `slog::Value` that serializes as structured JSON.
    ///
    /// If masking or the JSON conversion fails, the returned value stores a
    /// JSON string with the message `"Failed to serialize masked value"`.
    fn into_masked_json(self) -> MaskedJson {
        match self.mask_pii(Role::Viewer) {
            Ok(masked) => MaskedJson::serialized(&masked),
            Err(_) => MaskedJson::new(JsonValue::String(SERIALIZE_FAILED.to_string())),
        }
    }
}

impl<T> IntoMaskedJson for T where T: Protectable + Serialize {}
