//! Schema-driven encryption and role-aware masking of PII in nested records.
//!
//! This crate separates:
//! - **Classification**: which fields carry PII and of what kind.
//! - **Transform**: encrypting and decrypting those fields under a key.
//! - **Masking**: how each kind is displayed to a given role.
//!
//! `#[derive(Aggregate)]` generates a static schema and a visitor-driven walk
//! for a struct. The engine validates the schema, then applies one action to
//! every sensitive string, recursing through nested structs and sequences.
//!
//! Key rules:
//! - Use `#[pii(Kind)]` on string fields (`String`, `Option<String>`).
//! - Unannotated fields are not sensitive; nested aggregates are still walked.
//! - Sensitivity is fixed per type, never per instance or field name.
//! - `Debug` prints `"[REDACTED]"` for sensitive fields outside tests.
//!
//! ```rust
//! use zeropii::{Aggregate, Email, Protectable, Role};
//!
//! #[derive(Clone, Aggregate)]
//! struct Contact {
//!     name: String,
//!     #[pii(Email)]
//!     email: String,
//! }
//!
//! let key = "0123456789abcdef0123456789abcdef";
//! let contact = Contact { name: "Jane".into(), email: "jane.doe@example.com".into() };
//!
//! let stored = contact.encrypt_pii(key)?;
//! let shown = stored.decrypt_pii(key)?.mask_pii(Role::Viewer)?;
//! assert_eq!(shown.email, "j*******@example.com");
//! # Ok::<(), zeropii::PiiError>(())
//! ```
//!
//! What this crate does not do:
//! - serve HTTP or talk to a database
//! - authenticate callers or generate keys

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use zeropii_derive::Aggregate;

#[allow(unused_extern_crates)]
extern crate self as zeropii;

// Module declarations
pub mod cipher;
mod classification;
pub mod config;
mod error;
mod masking;
pub mod models;
mod pipeline;
pub mod schema;
pub mod service;
pub mod slog;
mod traverse;

// Re-exports
pub use classification::{
    Classification, DateOfBirth, DocumentNumber, Email, PhoneNumber, Pii, SensitivityKind,
};
pub use config::VaultConfig;
pub use error::{ConfigError, PiiError, Result, SchemaError, ServiceError, StoreError, TransformError};
pub use masking::{mask, KeepLast, MaskRule, Role, REDACTED};
pub use pipeline::{Masked, Sealed};
pub use schema::{FieldDescriptor, FieldShape, Schema, Sensitivity};
pub use service::{CustomerStore, InMemoryCustomerStore, OnboardingService};
pub use traverse::{
    apply, apply_in_place, Action, Aggregate, Field, FieldPath, FieldVisitor, PathSegment,
    PiiEngine, Protectable, TextSlot,
};

#[doc(hidden)]
pub mod __private {
    pub use crate::traverse::{visit_sensitive, walk_field};
}
