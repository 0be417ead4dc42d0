//! File-based key provisioning for `fieldseal`.
//!
//! Suitable for development and single-host deployments. Each key lives in
//! its own file named after the registry entry it provides.

#![warn(clippy::pedantic, clippy::nursery)]

use fieldseal::error::KeyError;
use fieldseal::key_provider::{BLIND_INDEX_KEY_NAME, ENCRYPTION_KEY_NAME};
use fieldseal::key_registry::KeyRegistry;
use rand::{rngs::OsRng, RngCore};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Extension of key files inside the key directory.
pub const KEY_FILE_EXTENSION: &str = "key";

/// Size of the generated encryption key (AES-256).
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// Size of the generated blind index key (one SHA-512 block).
pub const BLIND_INDEX_KEY_SIZE: usize = 64;

/// File-based key provider.
///
/// Keys are stored in the filesystem with the following structure:
/// ```text
/// keys/
/// ├── encrypt.key      (32 bytes, 0600 permissions)
/// └── blindIndex.key   (64 bytes, 0600 permissions)
/// ```
///
/// Every `*.key` file is registered under its file stem, so additional named
/// keys can be dropped into the directory.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    key_dir: PathBuf,
}

impl FileKeyProvider {
    /// Creates a new `FileKeyProvider`.
    ///
    /// # Arguments
    ///
    /// * `key_dir` - Directory containing key files
    ///
    /// # Errors
    ///
    /// Returns error if the directory doesn't exist.
    pub fn new(key_dir: impl Into<PathBuf>) -> Result<Self, KeyError> {
        let key_dir = key_dir.into();
        if !key_dir.is_dir() {
            return Err(KeyError::LoadFailed(format!(
                "Key directory does not exist: {}",
                key_dir.display()
            )));
        }
        Ok(Self { key_dir })
    }

    /// Initializes a key directory with a fresh encryption key and blind
    /// index key.
    ///
    /// # Errors
    ///
    /// Returns error if directory creation fails, if a key file already
    /// exists, or if the random source fails.
    pub fn init(key_dir: impl Into<PathBuf>) -> Result<Self, KeyError> {
        let key_dir = key_dir.into();
        fs::create_dir_all(&key_dir)?;

        for (name, size) in
            [(ENCRYPTION_KEY_NAME, ENCRYPTION_KEY_SIZE), (BLIND_INDEX_KEY_NAME, BLIND_INDEX_KEY_SIZE)]
        {
            let mut key = Zeroizing::new(vec![0u8; size]);
            OsRng
                .try_fill_bytes(&mut key)
                .map_err(|e| KeyError::LoadFailed(format!("random source failed: {e}")))?;
            write_key_file(&key_path(&key_dir, name), &key)?;
            tracing::debug!(key_name = name, key_len = size, "generated key file");
        }

        Ok(Self { key_dir })
    }

    /// Returns the key directory.
    #[must_use]
    pub fn key_dir(&self) -> &Path {
        &self.key_dir
    }

    /// Reads every key file into a new registry.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be read, a key file is empty,
    /// or a file name is not valid UTF-8.
    pub fn load_registry(&self) -> Result<KeyRegistry, KeyError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.key_dir)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(KEY_FILE_EXTENSION)
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = KeyRegistry::new();
        for path in paths {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| {
                    KeyError::LoadFailed(format!("Invalid key file name: {}", path.display()))
                })?
                .to_string();

            let key = fs::read(&path)?;
            if key.is_empty() {
                return Err(KeyError::LoadFailed(format!("Key file is empty: {}", path.display())));
            }

            registry.register(name, key)?;
        }

        tracing::debug!(dir = %self.key_dir.display(), keys = registry.len(), "loaded key directory");
        Ok(registry)
    }
}

fn key_path(key_dir: &Path, name: &str) -> PathBuf {
    key_dir.join(format!("{name}.{KEY_FILE_EXTENSION}"))
}

fn write_key_file(path: &Path, key: &[u8]) -> Result<(), KeyError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            KeyError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("key file already exists: {}", path.display()),
            ))
        } else {
            KeyError::Io(e)
        }
    })?;
    file.write_all(key)?;
    file.sync_all()?;
    Ok(())
}
