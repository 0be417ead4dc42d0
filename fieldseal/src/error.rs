//! Error types for `fieldseal` operations.

use std::fmt;

/// Main error type for `fieldseal` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ciphertext is shorter than the version byte plus nonce
    #[error("ciphertext too short")]
    ShortCipher,

    /// Ciphertext was produced by an unsupported format version
    #[error("version mismatch: {version} (supported: {supported})")]
    VersionMismatch {
        /// The version byte found in the ciphertext
        version: u8,
        /// Supported versions
        supported: String,
    },

    /// A storage adapter received a value that is not a byte sequence
    #[error("source type mismatch: expected a byte sequence, found {found}")]
    SourceTypeMismatch {
        /// Description of the value that was received
        found: String,
    },

    /// Key registry operation failed
    #[error("key registry error: {0}")]
    Key(#[from] KeyError),

    /// Authentication tag verification failed (data may be corrupted, tampered,
    /// or sealed under another key)
    #[error("authentication failed: ciphertext may be corrupted or tampered")]
    AuthenticationFailed,

    /// Registered key cannot be used with the cipher
    #[error("invalid key length for '{name}': {length} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength {
        /// Name the key is registered under
        name: String,
        /// Length of the registered key
        length: usize,
    },

    /// The secure random source could not produce a nonce
    #[error("secure random source unavailable: {0}")]
    Entropy(String),

    /// Encryption operation failed
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decrypted bytes are not valid UTF-8
    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,

    /// Text adapter could not decode its input
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors specific to key registry operations.
#[derive(Debug)]
pub enum KeyError {
    /// No key is registered under the name
    NoSuchKey(String),

    /// A key is already registered under the name
    KeyAlreadyExists(String),

    /// Key material could not be loaded
    LoadFailed(String),

    /// I/O operation failed
    Io(std::io::Error),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchKey(name) => write!(f, "no such key: {name}"),
            Self::KeyAlreadyExists(name) => write!(f, "key with this name already exists: {name}"),
            Self::LoadFailed(msg) => write!(f, "key load failed: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KeyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_error_display() {
        assert_eq!(KeyError::NoSuchKey("encrypt".into()).to_string(), "no such key: encrypt");
        assert_eq!(
            KeyError::KeyAlreadyExists("blindIndex".into()).to_string(),
            "key with this name already exists: blindIndex"
        );
    }

    #[test]
    fn test_key_error_converts_into_error() {
        let err: Error = KeyError::NoSuchKey("encrypt".into()).into();
        assert!(matches!(err, Error::Key(KeyError::NoSuchKey(ref name)) if name == "encrypt"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = KeyError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(KeyError::LoadFailed("x".into()).source().is_none());
    }
}
