//! Versioned ciphertext layout.
//!
//! Every non-empty ciphertext starts with a one byte format version followed by
//! the per-version header fields. For [`FormatVersion::V0`]:
//!
//! ```text
//! [version:1][nonce:12][sealed_data:N]
//! ```
//!
//! `sealed_data` is the AES-GCM output (ciphertext followed by the 16 byte tag).
//! An empty plaintext is stored as a zero-length byte sequence with no header.

use crate::error::Error;

/// Nonce size for AES-GCM (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size for AES-GCM (128 bits).
pub const TAG_SIZE: usize = 16;

/// Ciphertext format versions understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FormatVersion {
    /// AES-GCM with a random 96-bit nonce and no associated data.
    V0 = 0x00,
}

impl FormatVersion {
    /// Version written by new encryptions.
    pub const CURRENT: Self = Self::V0;

    /// Every version that can be decrypted.
    pub const SUPPORTED: &'static [Self] = &[Self::V0];

    /// Returns the version byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the nonce length used by this version.
    #[must_use]
    pub const fn nonce_len(self) -> usize {
        match self {
            Self::V0 => NONCE_SIZE,
        }
    }

    /// Returns the header length (version byte plus nonce).
    #[must_use]
    pub const fn header_len(self) -> usize {
        1 + self.nonce_len()
    }

    fn supported_list() -> String {
        Self::SUPPORTED.iter().map(|v| v.as_u8().to_string()).collect::<Vec<_>>().join(", ")
    }
}

impl TryFrom<u8> for FormatVersion {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::V0),
            version => Err(Error::VersionMismatch { version, supported: Self::supported_list() }),
        }
    }
}

/// Parsed view of a non-empty ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedParts<'a> {
    version: FormatVersion,
    nonce: &'a [u8],
    sealed: &'a [u8],
}

impl<'a> SealedParts<'a> {
    /// Splits a ciphertext into version, nonce and sealed data.
    ///
    /// The version byte is checked before the length, so a truncated
    /// ciphertext from an unknown version reports the version problem.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `Error::ShortCipher` if `data` is empty or shorter than the header
    /// - `Error::VersionMismatch` if the version byte is not supported
    pub fn parse(data: &'a [u8]) -> Result<Self, Error> {
        let Some(&first) = data.first() else {
            return Err(Error::ShortCipher);
        };

        let version = match FormatVersion::try_from(first) {
            Ok(version) => version,
            Err(err) => {
                tracing::warn!(version = first, "ciphertext format version mismatch");
                return Err(err);
            }
        };

        let header_len = version.header_len();
        if data.len() < header_len {
            return Err(Error::ShortCipher);
        }

        Ok(Self { version, nonce: &data[1..header_len], sealed: &data[header_len..] })
    }

    /// Returns the format version.
    #[must_use]
    pub const fn version(&self) -> FormatVersion {
        self.version
    }

    /// Returns the nonce bytes.
    #[must_use]
    pub const fn nonce(&self) -> &'a [u8] {
        self.nonce
    }

    /// Returns the sealed data (ciphertext and tag).
    #[must_use]
    pub const fn sealed(&self) -> &'a [u8] {
        self.sealed
    }
}

/// Assembles `version || nonce || sealed` into a single buffer.
#[must_use]
pub fn assemble(version: FormatVersion, nonce: &[u8], sealed: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + nonce.len() + sealed.len());
    bytes.push(version.as_u8());
    bytes.extend_from_slice(nonce);
    bytes.extend_from_slice(sealed);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    // Records the `version` field of every WARN event.
    #[derive(Clone, Default)]
    struct WarnCapture {
        versions: Arc<Mutex<Vec<Option<u64>>>>,
    }

    struct VersionField(Option<u64>);

    impl Visit for VersionField {
        fn record_u64(&mut self, field: &Field, value: u64) {
            if field.name() == "version" {
                self.0 = Some(value);
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
    }

    impl<S: Subscriber> Layer<S> for WarnCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != Level::WARN {
                return;
            }
            let mut field = VersionField(None);
            event.record(&mut field);
            self.versions.lock().unwrap().push(field.0);
        }
    }

    fn warnings_while_parsing(data: &[u8]) -> Vec<Option<u64>> {
        let capture = WarnCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, || {
            let _ = SealedParts::parse(data);
        });
        let versions = capture.versions.lock().unwrap().clone();
        versions
    }

    #[test]
    fn test_current_version_is_zero() {
        assert_eq!(FormatVersion::CURRENT.as_u8(), 0x00);
        assert_eq!(FormatVersion::CURRENT.header_len(), 13);
    }

    #[test]
    fn test_parse_splits_fields() {
        let bytes = assemble(FormatVersion::V0, &[7u8; NONCE_SIZE], &[1, 2, 3]);
        let parts = SealedParts::parse(&bytes).expect("Failed to parse ciphertext");

        assert_eq!(parts.version(), FormatVersion::V0);
        assert_eq!(parts.nonce(), &[7u8; NONCE_SIZE]);
        assert_eq!(parts.sealed(), &[1, 2, 3]);
    }

    #[test]
    fn test_parse_header_only() {
        let bytes = assemble(FormatVersion::V0, &[0u8; NONCE_SIZE], &[]);
        let parts = SealedParts::parse(&bytes).unwrap();
        assert!(parts.sealed().is_empty());
    }

    #[test]
    fn test_parse_unsupported_version() {
        let mut bytes = vec![0x01];
        bytes.extend_from_slice(&[0u8; 40]);

        let result = SealedParts::parse(&bytes);
        assert!(matches!(result, Err(Error::VersionMismatch { version: 1, .. })));
    }

    #[test]
    fn test_version_checked_before_length() {
        let result = SealedParts::parse(&[0xFF]);
        assert!(matches!(result, Err(Error::VersionMismatch { version: 0xFF, .. })));
    }

    #[test]
    fn test_parse_truncated_data() {
        let bytes = vec![0x00, 1, 2, 3];
        let result = SealedParts::parse(&bytes);
        assert!(matches!(result, Err(Error::ShortCipher)));
    }

    #[test]
    fn test_parse_empty_data() {
        assert!(matches!(SealedParts::parse(&[]), Err(Error::ShortCipher)));
    }

    #[test]
    fn test_version_mismatch_emits_warning() {
        let mut bytes = vec![0x05];
        bytes.extend_from_slice(&[0u8; 40]);

        assert_eq!(warnings_while_parsing(&bytes), vec![Some(5)]);
    }

    #[test]
    fn test_short_cipher_emits_no_warning() {
        assert!(warnings_while_parsing(&[0x00]).is_empty());
        assert!(warnings_while_parsing(&[]).is_empty());

        let valid = assemble(FormatVersion::V0, &[0u8; NONCE_SIZE], &[1, 2, 3]);
        assert!(warnings_while_parsing(&valid).is_empty());
    }

    #[test]
    fn test_version_mismatch_lists_supported() {
        let err = FormatVersion::try_from(9).unwrap_err();
        assert_eq!(err.to_string(), "version mismatch: 9 (supported: 0)");
    }
}
