//! Blind index generation for searchable encryption.
//!
//! Blind indexes allow equality queries on encrypted data without revealing
//! the plaintext value. The index is an HMAC-SHA-512 of the value under a
//! dedicated key, stored next to the encrypted column.
//!
//! The mapping is deterministic: equal values always produce equal indexes,
//! which is what makes lookup possible and also means repeated values are
//! visible in the index column.

use crate::error::Error;
use crate::key_provider::{KeyProvider, BLIND_INDEX_KEY_NAME};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha512;
use std::fmt;
use std::sync::Arc;

type HmacSha512 = Hmac<Sha512>;

/// Blind index output size (64 bytes).
pub const BLIND_INDEX_SIZE: usize = 64;

/// Keyed digest of a plaintext value.
///
/// The empty index is produced for empty input and means "do not index"; it
/// never collides with a real digest, which is always [`BLIND_INDEX_SIZE`]
/// bytes long.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BlindIndex(Vec<u8>);

impl BlindIndex {
    /// Returns the digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` for the "do not index" value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the digest as URL-safe base64; the empty index encodes to `""`.
    #[must_use]
    pub fn to_text(&self) -> String {
        URL_SAFE.encode(&self.0)
    }
}

impl AsRef<[u8]> for BlindIndex {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for BlindIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for BlindIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlindIndex({})", self.to_text())
    }
}

/// Generates blind indexes under a named key.
///
/// # Example
///
/// ```
/// use fieldseal::blind_index::BlindIndexer;
/// use fieldseal::key_registry::KeyRegistry;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut registry = KeyRegistry::new();
/// registry.register("blindIndex", vec![42u8; 64])?;
/// let indexer = BlindIndexer::new(Arc::new(registry));
///
/// let index1 = indexer.hash("alice@example.com")?;
/// let index2 = indexer.hash("alice@example.com")?;
/// assert_eq!(index1, index2);
/// # Ok(())
/// # }
/// ```
pub struct BlindIndexer<P: KeyProvider> {
    provider: Arc<P>,
    key_name: String,
}

impl<P: KeyProvider> BlindIndexer<P> {
    /// Creates an indexer that uses the key registered as `"blindIndex"`.
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_key_name(provider, BLIND_INDEX_KEY_NAME)
    }

    /// Creates an indexer that uses the key registered under `key_name`.
    pub fn with_key_name(provider: Arc<P>, key_name: impl Into<String>) -> Self {
        Self { provider, key_name: key_name.into() }
    }

    /// Returns the name of the key this indexer uses.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Computes the blind index of `plaintext`.
    ///
    /// The index is `HMAC-SHA512(key, plaintext)`. Empty input yields the
    /// empty index without a key lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::Key` if the key is not registered.
    pub fn hash(&self, plaintext: &str) -> Result<BlindIndex, Error> {
        if plaintext.is_empty() {
            return Ok(BlindIndex::default());
        }

        let key = self.provider.key(&self.key_name)?;

        // HMAC accepts keys of any length
        let mut mac = HmacSha512::new_from_slice(key.expose_secret())
            .map_err(|_| Error::InvalidKeyLength {
                name: self.key_name.clone(),
                length: key.expose_secret().len(),
            })?;
        mac.update(plaintext.as_bytes());

        Ok(BlindIndex(mac.finalize().into_bytes().to_vec()))
    }

    /// Computes the blind index of `plaintext` as URL-safe base64 text.
    ///
    /// # Errors
    ///
    /// Returns error if [`hash`](Self::hash) fails.
    pub fn encode_text(&self, plaintext: &str) -> Result<String, Error> {
        self.hash(plaintext).map(|index| index.to_text())
    }
}

impl<P: KeyProvider> Clone for BlindIndexer<P> {
    fn clone(&self) -> Self {
        Self { provider: Arc::clone(&self.provider), key_name: self.key_name.clone() }
    }
}
