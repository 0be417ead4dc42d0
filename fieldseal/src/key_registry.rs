//! Append-only registry of named keys.
//!
//! The registry is populated once at startup through `&mut self` and then
//! shared read-only (typically inside an `Arc`) by every
//! [`FieldCipher`](crate::cipher::FieldCipher) and
//! [`BlindIndexer`](crate::blind_index::BlindIndexer). Entries are never
//! replaced or removed.

use crate::error::KeyError;
use crate::key_provider::KeyProvider;
use secrecy::{ExposeSecret, SecretVec};
use std::collections::BTreeMap;
use std::fmt;

/// Named key store.
///
/// # Example
///
/// ```
/// use fieldseal::key_registry::KeyRegistry;
///
/// let mut registry = KeyRegistry::new();
/// registry.register("encrypt", vec![7u8; 32]).unwrap();
/// assert!(registry.register("encrypt", vec![8u8; 32]).is_err());
/// assert!(registry.lookup("blindIndex").is_err());
/// ```
#[derive(Default)]
pub struct KeyRegistry {
    keys: BTreeMap<String, SecretVec<u8>>,
}

impl KeyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::KeyAlreadyExists` if `name` is already registered.
    /// The existing entry is left untouched.
    pub fn register(&mut self, name: impl Into<String>, key: Vec<u8>) -> Result<(), KeyError> {
        let name = name.into();
        if self.keys.contains_key(&name) {
            return Err(KeyError::KeyAlreadyExists(name));
        }

        tracing::debug!(key_name = %name, key_len = key.len(), "registered key");
        self.keys.insert(name, SecretVec::new(key));
        Ok(())
    }

    /// Returns the key registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::NoSuchKey` if `name` is not registered.
    pub fn lookup(&self, name: &str) -> Result<&SecretVec<u8>, KeyError> {
        self.keys.get(name).ok_or_else(|| KeyError::NoSuchKey(name.to_string()))
    }

    /// Returns `true` if a key is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyProvider for KeyRegistry {
    fn key(&self, name: &str) -> Result<&SecretVec<u8>, KeyError> {
        self.lookup(name)
    }
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names and lengths only; key bytes never leave the registry through Debug.
        let mut map = f.debug_map();
        for (name, key) in &self.keys {
            map.entry(name, &format_args!("[REDACTED; {}]", key.expose_secret().len()));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = KeyRegistry::new();
        registry.register("encrypt", vec![1u8; 32]).unwrap();

        let key = registry.lookup("encrypt").unwrap();
        assert_eq!(key.expose_secret(), &vec![1u8; 32]);
        assert!(registry.contains("encrypt"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = KeyRegistry::new();
        registry.register("encrypt", vec![1u8; 32]).unwrap();

        let result = registry.register("encrypt", vec![2u8; 32]);
        assert!(matches!(result, Err(KeyError::KeyAlreadyExists(ref name)) if name == "encrypt"));

        // Original key must survive the rejected registration
        assert_eq!(registry.lookup("encrypt").unwrap().expose_secret(), &vec![1u8; 32]);
    }

    #[test]
    fn test_lookup_missing_key() {
        let registry = KeyRegistry::new();
        let result = registry.lookup("blindIndex");
        assert!(matches!(result, Err(KeyError::NoSuchKey(ref name)) if name == "blindIndex"));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = KeyRegistry::new();
        registry.register("encrypt", vec![1u8; 32]).unwrap();
        registry.register("blindIndex", vec![2u8; 64]).unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["blindIndex", "encrypt"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = KeyRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let mut registry = KeyRegistry::new();
        registry.register("encrypt", b"Y53DIiG6XX7eguA0SOzK7p6EPV7wfRNe".to_vec()).unwrap();

        let debug = format!("{registry:?}");
        assert!(debug.contains("encrypt"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Y53DIiG6"));
    }

    #[test]
    fn test_provider_trait_delegates_to_lookup() {
        let mut registry = KeyRegistry::new();
        registry.register("encrypt", vec![3u8; 16]).unwrap();

        let provider: &dyn KeyProvider = &registry;
        assert_eq!(provider.key("encrypt").unwrap().expose_secret().len(), 16);
        assert!(provider.key("missing").is_err());
    }
}
