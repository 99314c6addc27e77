//! Masking rules for sensitive string values.
//!
//! Rules are pure string transformations. They do not traverse structures or
//! decide visibility; [`mask`] pairs a rule with the caller's role.

use crate::classification::SensitivityKind;

use super::role::Role;

/// Placeholder for values that have no partial form.
pub const REDACTED: &str = "REDACTED";

const DATE_PLACEHOLDER: &str = "****-**-**";

/// Keeps the trailing characters of a value behind a fixed mask prefix.
///
/// Operates on Unicode scalar values. Values shorter than `min_len` have no
/// safe partial form and are fully redacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeepLast {
    /// Replaces everything before the visible tail.
    pub prefix: &'static str,
    /// Number of trailing characters kept visible.
    pub visible: usize,
    /// Minimum length for the partial form.
    pub min_len: usize,
}

impl KeepLast {
    fn apply_to(&self, value: &str) -> String {
        let total = value.chars().count();
        if total < self.min_len {
            return REDACTED.to_string();
        }
        let tail: String = value.chars().skip(total.saturating_sub(self.visible)).collect();
        format!("{}{tail}", self.prefix)
    }
}

/// How a value of one kind is displayed when the role may not see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskRule {
    /// Replace the whole value with [`REDACTED`].
    Redact,
    /// Keep the first character of the local part and the whole domain.
    Email,
    /// Keep a fixed number of trailing characters.
    KeepLast(KeepLast),
    /// Keep the segment after the last `-`. A value with no `-` is replaced
    /// by `****-**-**`.
    DateTail,
}

impl MaskRule {
    /// `*******` followed by the last 3 characters, for values of 10 or more.
    pub const PHONE: Self = Self::KeepLast(KeepLast {
        prefix: "*******",
        visible: 3,
        min_len: 10,
    });

    /// `***-**-` followed by the last 4 characters, for values of 4 or more.
    pub const DOCUMENT_NUMBER: Self = Self::KeepLast(KeepLast {
        prefix: "***-**-",
        visible: 4,
        min_len: 4,
    });

    /// The rule used for a kind.
    pub const fn for_kind(kind: SensitivityKind) -> Self {
        match kind {
            SensitivityKind::GenericPii => Self::Redact,
            SensitivityKind::Email => Self::Email,
            SensitivityKind::Phone => Self::PHONE,
            SensitivityKind::DocumentNumber => Self::DOCUMENT_NUMBER,
            SensitivityKind::DateOfBirth => Self::DateTail,
        }
    }

    /// Applies the rule to `value`.
    ///
    /// This method is total (it does not return errors).
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        match self {
            Self::Redact => REDACTED.to_string(),
            Self::Email => mask_email(value),
            Self::KeepLast(config) => config.apply_to(value),
            Self::DateTail => mask_date(value),
        }
    }
}

fn mask_email(value: &str) -> String {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return REDACTED.to_string();
    };

    let mut chars = local.chars();
    match (chars.next(), chars.clone().count()) {
        (Some(first), rest) if rest > 0 => format!("{first}{}@{domain}", "*".repeat(rest)),
        _ => format!("*@{domain}"),
    }
}

fn mask_date(value: &str) -> String {
    match value.rsplit_once('-') {
        Some((_, last)) => format!("**-**-{last}"),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// Produces the display value of a plaintext `value` of `kind` for `role`.
///
/// Kinds the role may view are returned unchanged; everything else goes
/// through the kind's [`MaskRule`].
#[must_use]
pub fn mask(role: Role, kind: SensitivityKind, value: &str) -> String {
    if role.can_view(kind) {
        value.to_string()
    } else {
        MaskRule::for_kind(kind).apply_to(value)
    }
}
