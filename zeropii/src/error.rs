//! Error types for zeropii

use thiserror::Error;

/// Failures of the cryptographic transform.
///
/// Messages never include key material, plaintext or ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The key is the empty string
    #[error("encryption key must not be empty")]
    EmptyKey,

    /// The key has the wrong length for AES-256
    #[error("encryption key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The input is not something `encrypt` could have produced
    #[error("ciphertext is not well-formed")]
    MalformedCiphertext,

    /// The ciphertext was produced under another key or was altered
    #[error("ciphertext failed authentication")]
    Authentication,

    /// The cipher refused to encrypt
    #[error("encryption failed")]
    Encryption,
}

/// A field is tagged sensitive but cannot hold a transformable string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{field}` of `{aggregate}` is tagged as PII but is {shape}, not a string")]
    NotText {
        aggregate: &'static str,
        field: String,
        shape: &'static str,
    },
}

/// Errors surfaced by a traversal.
///
/// After any error the aggregate must be discarded; fields visited before
/// the failure may already have been rewritten.
#[derive(Debug, Error)]
pub enum PiiError {
    /// The aggregate's schema is invalid; nothing was mutated
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The key was rejected before any field was touched
    #[error("invalid encryption key")]
    Key(#[source] TransformError),

    /// Encrypting or decrypting one field failed
    #[error("failed to transform field `{field}`")]
    Transform {
        field: String,
        #[source]
        source: TransformError,
    },
}

impl PiiError {
    /// The underlying transform failure, for both key and per-field errors.
    pub fn transform_error(&self) -> Option<&TransformError> {
        match self {
            Self::Key(source) | Self::Transform { source, .. } => Some(source),
            Self::Schema(_) => None,
        }
    }

    /// The underlying schema failure, if any.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors raised while loading the key from process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The variable is not set or not valid unicode
    #[error("environment variable `{0}` is not set")]
    MissingKey(String),

    /// The key is present but unusable
    #[error("configured encryption key is invalid: {0}")]
    InvalidKey(#[source] TransformError),
}

/// Failures of a customer store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("customer `{0}` already exists")]
    Duplicate(String),

    #[error("customer store is unavailable")]
    Unavailable,
}

/// Errors returned by the onboarding service.
///
/// `ProcessingFailed` carries no field name or cause; those only go to the
/// service log.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("customer not found")]
    NotFound,

    #[error("failed to process customer data")]
    ProcessingFailed,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type alias for traversals
pub type Result<T> = std::result::Result<T, PiiError>;
