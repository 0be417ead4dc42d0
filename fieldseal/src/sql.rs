//! `rusqlite` bindings for encrypted fields and blind indexes.
//!
//! Ciphertexts are stored as BLOBs; an empty plaintext is stored as a
//! zero-length BLOB. Blind indexes are bound as TEXT so they can be compared
//! with `=` in a `WHERE` clause.

use crate::blind_index::BlindIndex;
use crate::cipher::FieldCipher;
use crate::ciphertext::Ciphertext;
use crate::error::Error;
use crate::key_provider::KeyProvider;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

impl ToSql for Ciphertext {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(ValueRef::Blob(self.as_bytes())))
    }
}

impl FromSql for Ciphertext {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Blob(bytes) => Ok(Self::from_bytes(bytes.to_vec())),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl ToSql for BlindIndex {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_text()))
    }
}

impl<P: KeyProvider> FieldCipher<P> {
    /// Encrypts `plaintext` into its storage representation.
    ///
    /// # Errors
    ///
    /// Returns error if encryption fails.
    pub fn to_sql(&self, plaintext: &str) -> Result<Ciphertext, Error> {
        self.encrypt(plaintext)
    }

    /// Decrypts a column value read from storage.
    ///
    /// # Errors
    ///
    /// Returns `Error::SourceTypeMismatch` if the value is not a BLOB, or any
    /// error from [`decrypt`](Self::decrypt).
    pub fn from_sql(&self, value: ValueRef<'_>) -> Result<String, Error> {
        match value {
            ValueRef::Blob(bytes) => self.decrypt(bytes),
            other => Err(Error::SourceTypeMismatch { found: other.data_type().to_string() }),
        }
    }
}
