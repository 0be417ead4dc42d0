//! # `fieldseal`
//!
//! Versioned field-level encryption with keyed blind indexes, for storing
//! application values encrypted at rest while keeping them retrievable by
//! exact-match lookup.
//!
//! ## Features
//!
//! - AES-GCM encryption with a fresh random nonce per value
//! - Self-describing ciphertext layout: `[version:1][nonce:12][ciphertext+tag]`
//! - HMAC-SHA-512 blind indexes for equality queries
//! - Append-only key registry injected into every cipher and indexer
//! - `rusqlite` bindings (feature `sqlite`) and `serde` support (feature `serde`)
//!
//! ## Example
//!
//! ```rust
//! use fieldseal::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = KeyRegistry::new();
//! registry.register(ENCRYPTION_KEY_NAME, vec![7u8; 32])?;
//! registry.register(BLIND_INDEX_KEY_NAME, vec![9u8; 64])?;
//! let registry = Arc::new(registry);
//!
//! let cipher = FieldCipher::new(Arc::clone(&registry));
//! let indexer = BlindIndexer::new(registry);
//!
//! let ciphertext = cipher.encrypt("alice@example.com")?;
//! let index = indexer.hash("alice@example.com")?;
//!
//! assert_eq!(cipher.decrypt(ciphertext.as_bytes())?, "alice@example.com");
//! assert_eq!(index, indexer.hash("alice@example.com")?);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod blind_index;
pub mod cipher;
pub mod ciphertext;
pub mod error;
pub mod format;
#[cfg(feature = "serde")]
pub mod json;
pub mod key_provider;
pub mod key_registry;
#[cfg(feature = "sqlite")]
pub mod sql;

pub mod prelude {
    //! Convenience re-exports for common use.
    pub use crate::blind_index::{BlindIndex, BlindIndexer};
    pub use crate::cipher::FieldCipher;
    pub use crate::ciphertext::Ciphertext;
    pub use crate::error::{Error, KeyError};
    pub use crate::format::FormatVersion;
    pub use crate::key_provider::{KeyProvider, BLIND_INDEX_KEY_NAME, ENCRYPTION_KEY_NAME};
    pub use crate::key_registry::KeyRegistry;
}
