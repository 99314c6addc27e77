//! Role-aware masking of decrypted values.
//!
//! - **`role`**: who is looking (`Role`, parsed from a free-form label)
//! - **`policy`**: how each kind is displayed when hidden (`MaskRule`, `mask`)
//!
//! Masking is total: there is no input, role or kind for which it fails.

mod policy;
mod role;

pub use policy::{mask, KeepLast, MaskRule, REDACTED};
pub use role::Role;
