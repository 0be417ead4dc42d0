//! Storage form of an encrypted field.

use crate::error::Error;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use std::fmt;

/// Versioned ciphertext bytes as produced by [`FieldCipher`](crate::cipher::FieldCipher).
///
/// An empty `Ciphertext` stands for an empty plaintext. The text form is
/// URL-safe base64 with padding.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    /// Wraps raw ciphertext bytes read from storage.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the empty ciphertext.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the ciphertext and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the ciphertext of an empty plaintext.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the ciphertext as URL-safe base64.
    #[must_use]
    pub fn to_text(&self) -> String {
        URL_SAFE.encode(&self.0)
    }

    /// Decodes a ciphertext from URL-safe base64.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if `text` is not valid base64.
    pub fn from_text(text: &str) -> Result<Self, Error> {
        URL_SAFE
            .decode(text)
            .map(Self)
            .map_err(|e| Error::Serialization(format!("invalid base64 ciphertext: {e}")))
    }
}

impl AsRef<[u8]> for Ciphertext {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Ciphertext {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<Ciphertext> for Vec<u8> {
    fn from(ciphertext: Ciphertext) -> Self {
        ciphertext.0
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ciphertext({} bytes)", self.0.len())
    }
}
