//! Basic usage example for `fieldseal`.

use fieldseal::prelude::*;
use fieldseal_key_file::FileKeyProvider;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("fieldseal Basic Usage Example");
    println!("=============================\n");

    // Setup: initialize the key directory if it doesn't exist
    let key_dir = PathBuf::from("./example_keys");
    let provider = if key_dir.exists() {
        FileKeyProvider::new(&key_dir)?
    } else {
        println!("Initializing key directory at {}...", key_dir.display());
        FileKeyProvider::init(&key_dir)?
    };

    // Load every key once; the registry is read-only from here on
    let registry = Arc::new(provider.load_registry()?);
    println!("✓ Loaded keys: {:?}\n", registry.names().collect::<Vec<_>>());

    let cipher = FieldCipher::new(Arc::clone(&registry));
    let indexer = BlindIndexer::new(registry);

    let plaintext = "alice@example.com";
    println!("Plaintext: {plaintext}");

    // Encrypt the value
    let ciphertext = cipher.encrypt(plaintext)?;
    println!("✓ Encrypted ({} bytes): {}", ciphertext.len(), ciphertext.to_text());

    // Decrypt the value
    let decrypted = cipher.decrypt(ciphertext.as_bytes())?;
    println!("✓ Decrypted: {decrypted}");
    assert_eq!(plaintext, decrypted);

    // Encrypting again uses a fresh nonce
    let again = cipher.encrypt(plaintext)?;
    assert_ne!(ciphertext, again);
    println!("✓ Re-encryption produced a different ciphertext\n");

    // Blind index for equality lookup
    let index = indexer.hash(plaintext)?;
    println!("Blind Index (hex): {}", hex::encode(index.as_bytes()));
    println!("Blind Index (text): {index}");
    assert_eq!(index, indexer.hash(plaintext)?);
    assert_ne!(index, indexer.hash("bob@example.com")?);
    println!("✓ Deterministic indexing verified\n");

    println!("Note: Key directory at {} can be deleted manually", key_dir.display());

    Ok(())
}
