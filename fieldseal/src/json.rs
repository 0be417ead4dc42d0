//! `serde` support for encrypted fields and blind indexes.
//!
//! A [`Ciphertext`] serializes as a JSON string holding URL-safe base64 of its
//! bytes; a [`BlindIndex`] serializes as its text form.

use crate::blind_index::BlindIndex;
use crate::cipher::FieldCipher;
use crate::ciphertext::Ciphertext;
use crate::error::Error;
use crate::key_provider::KeyProvider;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for Ciphertext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Ciphertext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        URL_SAFE
            .decode(text)
            .map(Self::from_bytes)
            .map_err(|e| de::Error::custom(format!("invalid base64 ciphertext: {e}")))
    }
}

impl Serialize for BlindIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<P: KeyProvider> FieldCipher<P> {
    /// Encrypts `plaintext` and renders it as a quoted JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if encryption fails.
    pub fn to_json(&self, plaintext: &str) -> Result<String, Error> {
        let ciphertext = self.encrypt(plaintext)?;
        serde_json::to_string(&ciphertext).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parses a quoted JSON string produced by [`to_json`](Self::to_json) and
    /// decrypts it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if `json` is not a string of valid
    /// base64, or any error from [`decrypt`](Self::decrypt).
    pub fn from_json(&self, json: &str) -> Result<String, Error> {
        let ciphertext: Ciphertext =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        self.decrypt(ciphertext.as_bytes())
    }
}
