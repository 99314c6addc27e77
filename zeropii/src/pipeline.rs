//! The typed write and read paths.
//!
//! ```text
//! T ──seal(key)──▶ Sealed<T> ──reveal(key, role)──▶ Masked<T>
//! ```
//!
//! A [`Sealed`] aggregate holds ciphertext in every sensitive field and is the
//! only form a store should see. [`Sealed::reveal`] decrypts and masks in one
//! call and yields a [`Masked`] aggregate, which can be read and serialized
//! but never handed back to the engine, so a value cannot be masked twice or
//! masked before it is decrypted.

use std::ops::Deref;

use serde::{Deserialize, Serialize, Serializer};

use crate::{
    error::Result,
    masking::Role,
    traverse::{Aggregate, PiiEngine},
};

/// An aggregate whose sensitive fields are encrypted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sealed<T> {
    stored: T,
}

impl<T: Aggregate> Sealed<T> {
    /// Encrypts `value` under `key`.
    pub fn seal(value: T, key: &str) -> Result<Self> {
        PiiEngine::default().seal(value, key)
    }

    /// Wraps a value loaded from storage, trusting that it was sealed.
    pub fn from_stored(stored: T) -> Self {
        Self { stored }
    }

    pub fn as_stored(&self) -> &T {
        &self.stored
    }

    pub fn into_stored(self) -> T {
        self.stored
    }

    /// Decrypts every sensitive field, yielding plaintext.
    pub fn unseal(self, key: &str) -> Result<T> {
        PiiEngine::default().decrypt(self.stored, key)
    }

    /// Decrypts, then masks for `role`.
    pub fn reveal(self, key: &str, role: Role) -> Result<Masked<T>> {
        PiiEngine::default().reveal(self, key, role)
    }
}

/// An aggregate in its display form for one role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Masked<T> {
    value: T,
    role: Role,
}

impl<T> Masked<T> {
    /// The role the value was masked for.
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Masked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl PiiEngine {
    /// Encrypts `value` under `key` into its storable form.
    pub fn seal<T: Aggregate>(&self, value: T, key: &str) -> Result<Sealed<T>> {
        let stored = self.encrypt(value, key)?;
        Ok(Sealed { stored })
    }

    /// Decrypts `sealed` under `key`, then masks it for `role`.
    pub fn reveal<T: Aggregate>(&self, sealed: Sealed<T>, key: &str, role: Role) -> Result<Masked<T>> {
        let plaintext = self.decrypt(sealed.stored, key)?;
        let value = self.mask(plaintext, role)?;
        Ok(Masked { value, role })
    }
}
