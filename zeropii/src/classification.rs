//! Sensitivity kinds and the marker types used to attach them to fields.
//!
//! Markers are zero-sized and exist only at the type level: `#[pii(Email)]`
//! resolves to `<Email as Classification>::KIND` when the schema is built, so
//! the kind is fixed per field at compile time and never inferred from a
//! field's name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic kind of a PII field, which selects its masking rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensitivityKind {
    /// Any PII without a more specific rule. Always fully redacted when masked.
    #[default]
    GenericPii,
    /// An email address (`local@domain`).
    Email,
    /// A phone number.
    Phone,
    /// A government or account document number (passport, PAN, ...).
    DocumentNumber,
    /// A date of birth.
    ///
    /// Masking assumes the `YYYY-MM-DD` layout and keeps only the segment
    /// after the last `-`. A value without any `-` (including the empty
    /// string) is fully hidden as `****-**-**`.
    DateOfBirth,
}

impl SensitivityKind {
    /// All kinds, in table order.
    pub const ALL: [Self; 5] = [
        Self::GenericPii,
        Self::Email,
        Self::Phone,
        Self::DocumentNumber,
        Self::DateOfBirth,
    ];

    /// Stable label used in logs and serialized schemas.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GenericPii => "generic-pii",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DocumentNumber => "document-number",
            Self::DateOfBirth => "date-of-birth",
        }
    }
}

impl fmt::Display for SensitivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker trait for classification categories.
///
/// Implement this for zero-sized marker types to introduce project-specific
/// names for a kind:
///
/// ```rust
/// use zeropii::{Classification, SensitivityKind};
///
/// #[derive(Clone, Copy)]
/// struct TaxId;
///
/// impl Classification for TaxId {
///     const KIND: SensitivityKind = SensitivityKind::DocumentNumber;
/// }
/// ```
pub trait Classification {
    /// The kind recorded in the schema for fields carrying this marker.
    const KIND: SensitivityKind;
}

/// Classification marker for generic personally identifiable information.
#[derive(Clone, Copy)]
pub struct Pii;
impl Classification for Pii {
    const KIND: SensitivityKind = SensitivityKind::GenericPii;
}

/// Classification marker for email addresses.
#[derive(Clone, Copy)]
pub struct Email;
impl Classification for Email {
    const KIND: SensitivityKind = SensitivityKind::Email;
}

/// Classification marker for phone numbers.
#[derive(Clone, Copy)]
pub struct PhoneNumber;
impl Classification for PhoneNumber {
    const KIND: SensitivityKind = SensitivityKind::Phone;
}

/// Classification marker for document numbers (passport, PAN, national id).
#[derive(Clone, Copy)]
pub struct DocumentNumber;
impl Classification for DocumentNumber {
    const KIND: SensitivityKind = SensitivityKind::DocumentNumber;
}

/// Classification marker for dates of birth in `YYYY-MM-DD` form.
///
/// Masked values keep the day only; a value without `-` is fully hidden.
#[derive(Clone, Copy)]
pub struct DateOfBirth;
impl Classification for DateOfBirth {
    const KIND: SensitivityKind = SensitivityKind::DateOfBirth;
}
