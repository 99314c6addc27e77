//! Static field descriptors and their validation.
//!
//! `#[derive(Aggregate)]` produces a [`Schema`] per type: one
//! [`FieldDescriptor`] per field, in declaration order, recording the field's
//! sensitivity and its shape. Nested and sequence shapes point at the child
//! type's schema function, so the whole tree can be checked without an
//! instance.

use std::collections::HashSet;

use crate::{classification::SensitivityKind, error::SchemaError, traverse::Aggregate};

/// Produces the schema of a nested aggregate type.
pub type SchemaFn = fn() -> Schema;

/// Whether a field carries PII, and of which kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sensitivity {
    None,
    Pii(SensitivityKind),
}

impl Sensitivity {
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Self::Pii(_))
    }

    pub const fn kind(self) -> Option<SensitivityKind> {
        match self {
            Self::None => None,
            Self::Pii(kind) => Some(kind),
        }
    }
}

/// What a field holds, as far as traversal is concerned.
#[derive(Clone, Copy)]
pub enum FieldShape {
    /// A string scalar; the only shape that may be sensitive.
    Text,
    /// A single nested aggregate.
    Nested(SchemaFn),
    /// An ordered sequence of nested aggregates.
    Sequence(SchemaFn),
    /// Anything else: non-string scalars, timestamps, sequences of scalars, maps.
    Opaque,
}

impl FieldShape {
    /// Short human-readable label used in schema errors.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Nested(_) => "a nested aggregate",
            Self::Sequence(_) => "a sequence of aggregates",
            Self::Opaque => "opaque",
        }
    }

    /// Schema of the child aggregate for nested and sequence shapes.
    pub fn child_schema(&self) -> Option<Schema> {
        match self {
            Self::Nested(schema) | Self::Sequence(schema) => Some(schema()),
            Self::Text | Self::Opaque => None,
        }
    }
}

impl std::fmt::Debug for FieldShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Nested(schema) => f.debug_tuple("Nested").field(&schema().name).finish(),
            Self::Sequence(schema) => f.debug_tuple("Sequence").field(&schema().name).finish(),
            Self::Opaque => f.write_str("Opaque"),
        }
    }
}

/// One `(accessor name, sensitivity, shape)` entry of a schema.
#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub sensitivity: Sensitivity,
    pub shape: FieldShape,
}

impl FieldDescriptor {
    pub const fn plain(name: &'static str, shape: FieldShape) -> Self {
        Self {
            name,
            sensitivity: Sensitivity::None,
            shape,
        }
    }

    pub const fn sensitive(name: &'static str, kind: SensitivityKind, shape: FieldShape) -> Self {
        Self {
            name,
            sensitivity: Sensitivity::Pii(kind),
            shape,
        }
    }
}

/// The ordered field descriptors of one aggregate type.
#[derive(Clone, Debug)]
pub struct Schema {
    /// Type name as written in the source.
    pub name: &'static str,
    /// Fully qualified type name, unique per monomorphized type.
    pub type_key: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(name: &'static str, type_key: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            type_key,
            fields,
        }
    }

    /// Iterates over the sensitive fields declared directly on this type.
    pub fn sensitive_fields(&self) -> impl Iterator<Item = (&'static str, SensitivityKind)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| field.sensitivity.kind().map(|kind| (field.name, kind)))
    }
}

/// Checks the whole schema tree of `T`.
///
/// Every field tagged sensitive must have the `Text` shape. Each distinct
/// type is checked once, so recursive types terminate.
pub fn validate<T: Aggregate>() -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    validate_schema(&T::describe(), "", &mut seen)
}

fn validate_schema(
    schema: &Schema,
    prefix: &str,
    seen: &mut HashSet<&'static str>,
) -> Result<(), SchemaError> {
    if !seen.insert(schema.type_key) {
        return Ok(());
    }

    for field in &schema.fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        if field.sensitivity.is_sensitive() && !matches!(field.shape, FieldShape::Text) {
            return Err(SchemaError::NotText {
                aggregate: schema.name,
                field: path,
                shape: field.shape.label(),
            });
        }

        match field.shape {
            FieldShape::Nested(child) => validate_schema(&child(), &path, seen)?,
            FieldShape::Sequence(child) => validate_schema(&child(), &format!("{path}[]"), seen)?,
            FieldShape::Text | FieldShape::Opaque => {}
        }
    }
    Ok(())
}
