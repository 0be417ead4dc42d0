//! Field cipher for encryption and decryption operations.
//!
//! The `FieldCipher` seals text values with AES-GCM under a named key from a
//! [`KeyProvider`] and emits the versioned layout described in
//! [`format`](crate::format).

use crate::ciphertext::Ciphertext;
use crate::error::Error;
use crate::format::{assemble, FormatVersion, SealedParts, NONCE_SIZE};
use crate::key_provider::{KeyProvider, ENCRYPTION_KEY_NAME};
use aes_gcm::{
    aead::{consts::U12, rand_core::RngCore, Aead, KeyInit, OsRng},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use zeroize::Zeroize;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES-GCM instance sized by the registered key (16, 24 or 32 bytes).
enum AesGcmCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl AesGcmCipher {
    fn new(name: &str, key: &[u8]) -> Result<Self, Error> {
        let invalid = || Error::InvalidKeyLength { name: name.to_string(), length: key.len() };
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Self::Aes128).map_err(|_| invalid()),
            24 => Aes192Gcm::new_from_slice(key).map(Self::Aes192).map_err(|_| invalid()),
            32 => Aes256Gcm::new_from_slice(key).map(Self::Aes256).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            Self::Aes192(cipher) => cipher.encrypt(nonce, plaintext),
            Self::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        }
    }

    fn open(&self, nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(cipher) => cipher.decrypt(nonce, sealed),
            Self::Aes192(cipher) => cipher.decrypt(nonce, sealed),
            Self::Aes256(cipher) => cipher.decrypt(nonce, sealed),
        }
    }
}

/// Encrypts and decrypts text fields.
///
/// Encryption draws a fresh random nonce on every call, so sealing the same
/// plaintext twice yields different ciphertexts. Empty plaintexts are stored
/// as empty ciphertexts without touching the cipher.
///
/// # Example
///
/// ```
/// use fieldseal::cipher::FieldCipher;
/// use fieldseal::key_registry::KeyRegistry;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut registry = KeyRegistry::new();
/// registry.register("encrypt", b"Y53DIiG6XX7eguA0SOzK7p6EPV7wfRNe".to_vec())?;
/// let cipher = FieldCipher::new(Arc::new(registry));
///
/// let ciphertext = cipher.encrypt("Hello World")?;
/// assert_eq!(cipher.decrypt(ciphertext.as_bytes())?, "Hello World");
/// # Ok(())
/// # }
/// ```
pub struct FieldCipher<P: KeyProvider> {
    provider: Arc<P>,
    key_name: String,
}

impl<P: KeyProvider> FieldCipher<P> {
    /// Creates a cipher that uses the key registered as `"encrypt"`.
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_key_name(provider, ENCRYPTION_KEY_NAME)
    }

    /// Creates a cipher that uses the key registered under `key_name`.
    pub fn with_key_name(provider: Arc<P>, key_name: impl Into<String>) -> Self {
        Self { provider, key_name: key_name.into() }
    }

    /// Returns the name of the key this cipher uses.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Encrypts `plaintext`.
    ///
    /// # Returns
    ///
    /// `[version][nonce][ciphertext+tag]`, or an empty ciphertext for an
    /// empty plaintext.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The key is not registered or has an unusable length
    /// - The secure random source fails
    /// - Sealing fails
    pub fn encrypt(&self, plaintext: &str) -> Result<Ciphertext, Error> {
        if plaintext.is_empty() {
            return Ok(Ciphertext::empty());
        }

        let cipher = self.build_cipher()?;

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.try_fill_bytes(&mut nonce).map_err(|e| Error::Entropy(e.to_string()))?;

        let sealed = cipher
            .seal(&nonce, plaintext.as_bytes())
            .map_err(|e| Error::EncryptionFailed(format!("AES-GCM seal failed: {e}")))?;

        Ok(Ciphertext::from_bytes(assemble(FormatVersion::CURRENT, &nonce, &sealed)))
    }

    /// Decrypts a ciphertext produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The version byte is unsupported (`VersionMismatch`)
    /// - The ciphertext is shorter than its header (`ShortCipher`)
    /// - The key is not registered or has an unusable length
    /// - Authentication fails for any reason (`AuthenticationFailed`)
    /// - The plaintext is not UTF-8
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<String, Error> {
        if ciphertext.is_empty() {
            return Ok(String::new());
        }

        let parts = SealedParts::parse(ciphertext)?;

        let plaintext = match parts.version() {
            FormatVersion::V0 => self
                .build_cipher()?
                .open(parts.nonce(), parts.sealed())
                .map_err(|_| Error::AuthenticationFailed)?,
        };

        String::from_utf8(plaintext).map_err(|err| {
            err.into_bytes().zeroize();
            Error::InvalidUtf8
        })
    }

    fn build_cipher(&self) -> Result<AesGcmCipher, Error> {
        let key = self.provider.key(&self.key_name)?;
        AesGcmCipher::new(&self.key_name, key.expose_secret())
    }
}

impl<P: KeyProvider> Clone for FieldCipher<P> {
    fn clone(&self) -> Self {
        Self { provider: Arc::clone(&self.provider), key_name: self.key_name.clone() }
    }
}
