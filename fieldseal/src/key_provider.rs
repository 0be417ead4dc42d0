//! Key provider abstraction used by the cipher and the blind indexer.

use crate::error::KeyError;
use secrecy::SecretVec;

/// Conventional name of the key used by [`FieldCipher`](crate::cipher::FieldCipher).
pub const ENCRYPTION_KEY_NAME: &str = "encrypt";

/// Conventional name of the key used by [`BlindIndexer`](crate::blind_index::BlindIndexer).
pub const BLIND_INDEX_KEY_NAME: &str = "blindIndex";

/// Supplies named key material to encryption and hashing operations.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single provider
/// can be shared by concurrent encrypt, decrypt and hash calls. Keys are
/// requested on every operation; implementations should not hand out keys
/// that change over the lifetime of the provider.
///
/// # Example
///
/// ```rust,ignore
/// use fieldseal::key_provider::KeyProvider;
///
/// struct SingleKey(SecretVec<u8>);
///
/// impl KeyProvider for SingleKey {
///     fn key(&self, _name: &str) -> Result<&SecretVec<u8>, KeyError> {
///         Ok(&self.0)
///     }
/// }
/// ```
pub trait KeyProvider: Send + Sync {
    /// Returns the key registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::NoSuchKey` if no key exists under that name.
    fn key(&self, name: &str) -> Result<&SecretVec<u8>, KeyError>;
}
