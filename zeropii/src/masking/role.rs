//! Viewing privilege derived from a caller-supplied role label.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classification::SensitivityKind;

/// The privilege level that decides which kinds are shown in clear.
///
/// Parsing is total: every label, including the empty string and unknown
/// values, maps to a role. Anything that is not exactly `"admin"` or
/// `"manager"` is a [`Role::Viewer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees every kind in clear.
    Admin,
    /// Sees emails and phone numbers; everything else is masked.
    Manager,
    /// Sees nothing in clear.
    #[default]
    Viewer,
}

impl Role {
    /// Interprets a role label. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Self {
        match label {
            "admin" => Self::Admin,
            "manager" => Self::Manager,
            _ => Self::Viewer,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Viewer => "viewer",
        }
    }

    /// Whether values of `kind` are shown unmasked to this role.
    pub const fn can_view(self, kind: SensitivityKind) -> bool {
        match self {
            Self::Admin => true,
            Self::Manager => matches!(kind, SensitivityKind::Email | SensitivityKind::Phone),
            Self::Viewer => false,
        }
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
