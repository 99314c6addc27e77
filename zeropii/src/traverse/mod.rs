//! Schema-driven traversal of aggregates.
//!
//! - **`field`**: what can be walked (`Aggregate`, `Field`, std/chrono impls)
//! - **`visitor`**: what happens at each sensitive string (`FieldVisitor`)
//! - **`engine`**: the encrypt/decrypt/mask actions (`PiiEngine`, `Protectable`)

mod engine;
mod field;
mod visitor;

pub use engine::{apply, apply_in_place, Action, PiiEngine, Protectable};
pub use field::{Aggregate, Field, TextSlot};
pub use visitor::{FieldPath, FieldVisitor, PathSegment};

use crate::{classification::SensitivityKind, error::SchemaError};

/// Walks one unannotated field, bracketed by its path segment.
#[doc(hidden)]
pub fn walk_field<F: Field, V: FieldVisitor>(
    field: &mut F,
    name: &'static str,
    visitor: &mut V,
) -> Result<(), V::Error> {
    visitor.enter(PathSegment::Field(name));
    let result = field.walk_field(visitor);
    visitor.leave();
    result
}

/// Hands one sensitive field's string to the visitor.
///
/// Absent optional values are skipped. A field that is not a string field is
/// a schema error; the engine rejects such schemas before walking, so this
/// only fires for visitors driven directly through [`Aggregate::walk`].
#[doc(hidden)]
pub fn visit_sensitive<F: Field, V: FieldVisitor>(
    field: &mut F,
    owner: &'static str,
    name: &'static str,
    kind: SensitivityKind,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match field.text_mut() {
        TextSlot::Present(value) => {
            visitor.enter(PathSegment::Field(name));
            let result = visitor.visit_text(kind, value);
            visitor.leave();
            result
        }
        TextSlot::Absent => Ok(()),
        TextSlot::NotText => Err(SchemaError::NotText {
            aggregate: owner,
            field: name.to_string(),
            shape: F::shape().label(),
        }
        .into()),
    }
}
