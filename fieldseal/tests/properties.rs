//! Property tests for the ciphertext format and blind indexes.

use fieldseal::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn test_registry() -> Arc<KeyRegistry> {
    let mut registry = KeyRegistry::new();
    registry.register(ENCRYPTION_KEY_NAME, b"Y53DIiG6XX7eguA0SOzK7p6EPV7wfRNe".to_vec()).unwrap();
    registry.register(BLIND_INDEX_KEY_NAME, vec![42u8; 64]).unwrap();
    Arc::new(registry)
}

proptest! {
    #[test]
    fn prop_round_trip(plaintext in ".*") {
        let cipher = FieldCipher::new(test_registry());

        let ciphertext = cipher.encrypt(&plaintext).unwrap();
        prop_assert_eq!(cipher.decrypt(ciphertext.as_bytes()).unwrap(), plaintext);
    }

    #[test]
    fn prop_fresh_nonce_per_encryption(plaintext in ".+") {
        let cipher = FieldCipher::new(test_registry());

        let ciphertext1 = cipher.encrypt(&plaintext).unwrap();
        let ciphertext2 = cipher.encrypt(&plaintext).unwrap();
        prop_assert_ne!(&ciphertext1, &ciphertext2);
        prop_assert_eq!(cipher.decrypt(ciphertext2.as_bytes()).unwrap(), plaintext);
    }

    #[test]
    fn prop_bit_flip_in_sealed_region_fails(
        plaintext in ".+",
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let cipher = FieldCipher::new(test_registry());
        let mut ciphertext = cipher.encrypt(&plaintext).unwrap().into_bytes();

        let sealed_len = ciphertext.len() - FormatVersion::CURRENT.header_len();
        let index = FormatVersion::CURRENT.header_len() + position.index(sealed_len);
        ciphertext[index] ^= 1 << bit;

        prop_assert!(matches!(cipher.decrypt(&ciphertext), Err(Error::AuthenticationFailed)));
    }

    #[test]
    fn prop_unknown_version_rejected(plaintext in ".+", version in 1u8..=255) {
        let cipher = FieldCipher::new(test_registry());
        let mut ciphertext = cipher.encrypt(&plaintext).unwrap().into_bytes();

        ciphertext[0] = version;
        let result = cipher.decrypt(&ciphertext);
        let rejected = matches!(result, Err(Error::VersionMismatch { version: v, .. }) if v == version);
        prop_assert!(rejected, "version {} was not rejected", version);
    }

    #[test]
    fn prop_truncation_below_header_rejected(plaintext in ".+", len in 1usize..13) {
        let cipher = FieldCipher::new(test_registry());
        let ciphertext = cipher.encrypt(&plaintext).unwrap();

        let result = cipher.decrypt(&ciphertext.as_bytes()[..len]);
        prop_assert!(matches!(result, Err(Error::ShortCipher)));
    }

    #[test]
    fn prop_blind_index_deterministic(a in ".+", b in ".+") {
        let indexer = BlindIndexer::new(test_registry());

        prop_assert_eq!(indexer.hash(&a).unwrap(), indexer.hash(&a).unwrap());
        if a != b {
            prop_assert_ne!(indexer.hash(&a).unwrap(), indexer.hash(&b).unwrap());
        }
    }
}
