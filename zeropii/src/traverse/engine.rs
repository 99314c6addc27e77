//! The traversal engine: validates, then walks an aggregate applying one
//! action to every sensitive string.
//!
//! An action is either a cryptographic transform (`Encrypt`, `Decrypt`) under
//! a caller-supplied key, or a role-aware `Mask`. The engine never reads the
//! key from the environment, never caches it and never logs values.
//!
//! ## Failure
//!
//! Schema and key problems are detected before the first field is touched.
//! A failure while transforming a field aborts the walk immediately; fields
//! visited before it have already been rewritten, so [`PiiEngine::apply`]
//! takes the aggregate by value and drops it on error.

use slog::{crit, debug, error, o, Discard, Logger};

use super::{
    field::Aggregate,
    visitor::{FieldPath, FieldVisitor, PathSegment},
};
use crate::{
    cipher::Cipher,
    classification::SensitivityKind,
    error::{PiiError, Result, TransformError},
    masking::{mask, Role},
    schema,
};

/// The operation applied to every sensitive field of one traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action<'a> {
    /// Replace plaintext with ciphertext under `key`.
    Encrypt { key: &'a str },
    /// Replace ciphertext with plaintext under `key`.
    Decrypt { key: &'a str },
    /// Replace plaintext with its display form for the role.
    Mask(Role),
}

impl Action<'_> {
    /// Label used in log records.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Encrypt { .. } => "encrypt",
            Self::Decrypt { .. } => "decrypt",
            Self::Mask(_) => "mask",
        }
    }
}

/// Applies [`Action`]s to aggregates and reports what it did through `slog`.
///
/// The engine holds no key material and no per-call state, so one instance
/// can serve any number of threads.
#[derive(Clone)]
pub struct PiiEngine {
    logger: Logger,
}

impl Default for PiiEngine {
    fn default() -> Self {
        Self {
            logger: Logger::root(Discard, o!()),
        }
    }
}

impl std::fmt::Debug for PiiEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiiEngine").finish_non_exhaustive()
    }
}

impl PiiEngine {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.new(o!("component" => "pii_engine")),
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Applies `action` to every sensitive field of `value`.
    ///
    /// On error the partially transformed value is dropped and only the error
    /// is returned.
    pub fn apply<T: Aggregate>(&self, mut value: T, action: &Action<'_>) -> Result<T> {
        self.apply_in_place(&mut value, action)?;
        Ok(value)
    }

    /// Applies `action` to `value` in place.
    ///
    /// If this returns an error, `value` may be partially transformed and must
    /// be discarded. Prefer [`PiiEngine::apply`], which enforces that.
    pub fn apply_in_place<T: Aggregate>(&self, value: &mut T, action: &Action<'_>) -> Result<()> {
        let aggregate = T::describe().name;

        if let Err(err) = schema::validate::<T>() {
            crit!(self.logger, "aggregate schema is invalid";
                "aggregate" => aggregate,
                "action" => action.name(),
                "error" => %err
            );
            return Err(err.into());
        }

        let fields = match action {
            Action::Encrypt { key } => self.transform(value, key, Direction::Encrypt, aggregate)?,
            Action::Decrypt { key } => self.transform(value, key, Direction::Decrypt, aggregate)?,
            Action::Mask(role) => {
                let mut visitor = MaskVisitor {
                    role: *role,
                    fields: 0,
                };
                value.walk(&mut visitor)?;
                visitor.fields
            }
        };

        debug!(self.logger, "pii traversal complete";
            "aggregate" => aggregate,
            "action" => action.name(),
            "fields" => fields
        );
        Ok(())
    }

    pub fn encrypt<T: Aggregate>(&self, value: T, key: &str) -> Result<T> {
        self.apply(value, &Action::Encrypt { key })
    }

    pub fn decrypt<T: Aggregate>(&self, value: T, key: &str) -> Result<T> {
        self.apply(value, &Action::Decrypt { key })
    }

    pub fn mask<T: Aggregate>(&self, value: T, role: Role) -> Result<T> {
        self.apply(value, &Action::Mask(role))
    }

    fn transform<T: Aggregate>(
        &self,
        value: &mut T,
        key: &str,
        direction: Direction,
        aggregate: &'static str,
    ) -> Result<usize> {
        let cipher = Cipher::new(key).map_err(|source| {
            error!(self.logger, "encryption key rejected";
                "aggregate" => aggregate,
                "error" => %source
            );
            PiiError::Key(source)
        })?;

        let mut visitor = TransformVisitor {
            cipher: &cipher,
            direction,
            path: FieldPath::default(),
            fields: 0,
        };
        if let Err(err) = value.walk(&mut visitor) {
            if let PiiError::Transform { field, source } = &err {
                error!(self.logger, "failed to transform pii field";
                    "aggregate" => aggregate,
                    "direction" => direction.name(),
                    "field" => field.as_str(),
                    "error" => %source
                );
            }
            return Err(err);
        }
        Ok(visitor.fields)
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    const fn name(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }
}

struct TransformVisitor<'c> {
    cipher: &'c Cipher,
    direction: Direction,
    path: FieldPath,
    fields: usize,
}

impl TransformVisitor<'_> {
    fn run(&self, value: &str) -> std::result::Result<String, TransformError> {
        match self.direction {
            Direction::Encrypt => self.cipher.encrypt(value),
            Direction::Decrypt => self.cipher.decrypt(value),
        }
    }
}

impl FieldVisitor for TransformVisitor<'_> {
    type Error = PiiError;

    fn enter(&mut self, segment: PathSegment) {
        self.path.push(segment);
    }

    fn leave(&mut self) {
        self.path.pop();
    }

    fn visit_text(&mut self, _kind: SensitivityKind, value: &mut String) -> Result<()> {
        *value = self.run(value).map_err(|source| PiiError::Transform {
            field: self.path.to_string(),
            source,
        })?;
        self.fields += 1;
        Ok(())
    }
}

struct MaskVisitor {
    role: Role,
    fields: usize,
}

impl FieldVisitor for MaskVisitor {
    type Error = PiiError;

    fn visit_text(&mut self, kind: SensitivityKind, value: &mut String) -> Result<()> {
        *value = mask(self.role, kind, value);
        self.fields += 1;
        Ok(())
    }
}

/// Applies `action` to `value` with a non-logging engine.
pub fn apply<T: Aggregate>(value: T, action: &Action<'_>) -> Result<T> {
    PiiEngine::default().apply(value, action)
}

/// Applies `action` to `value` in place with a non-logging engine.
///
/// On error `value` must be discarded.
pub fn apply_in_place<T: Aggregate>(value: &mut T, action: &Action<'_>) -> Result<()> {
    PiiEngine::default().apply_in_place(value, action)
}

/// Method-call entry points for every [`Aggregate`].
pub trait Protectable: Aggregate {
    /// Encrypts every sensitive field under `key`.
    fn encrypt_pii(self, key: &str) -> Result<Self> {
        apply(self, &Action::Encrypt { key })
    }

    /// Decrypts every sensitive field under `key`.
    fn decrypt_pii(self, key: &str) -> Result<Self> {
        apply(self, &Action::Decrypt { key })
    }

    /// Masks every sensitive field for `role`.
    fn mask_pii(self, role: Role) -> Result<Self> {
        apply(self, &Action::Mask(role))
    }
}

impl<T> Protectable for T where T: Aggregate {}
