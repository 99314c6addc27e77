//! The per-field callback interface driven by [`Aggregate::walk`].
//!
//! [`Aggregate::walk`]: super::Aggregate::walk

use std::fmt;

use crate::{classification::SensitivityKind, error::SchemaError};

/// One step of the path from the root aggregate to a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Receives every sensitive string reached by a walk.
///
/// `enter`/`leave` bracket every field and sequence element, so a visitor can
/// track where it is. Visitors that do not care about paths keep the default
/// no-op implementations.
pub trait FieldVisitor {
    /// Must absorb schema errors found while walking.
    type Error: From<SchemaError>;

    fn enter(&mut self, segment: PathSegment) {
        let _ = segment;
    }

    fn leave(&mut self) {}

    /// Called once for each present sensitive string, in walk order.
    fn visit_text(&mut self, kind: SensitivityKind, value: &mut String) -> Result<(), Self::Error>;
}

/// The current position of a walk, rendered as `documents[1].doc_number`.
#[derive(Clone, Debug, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 && matches!(segment, PathSegment::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
