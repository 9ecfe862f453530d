//! Property tests for content hashing
//!
//! The hash is the catalog's identity key: identical bytes must always
//! collapse to the same digest no matter where the file lives, and any
//! content change must move the digest.

use proptest::prelude::*;
use shellac_scanner::hash_file;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn identical_bytes_hash_identically_across_paths(
        data in proptest::collection::vec(any::<u8>(), 0..4096)
    ) {
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a.mp3");
        let nested = temp.path().join("deeply").join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        let b = nested.join("other name.flac");

        std::fs::write(&a, &data).unwrap();
        std::fs::write(&b, &data).unwrap();

        prop_assert_eq!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn appending_a_byte_moves_the_hash(
        data in proptest::collection::vec(any::<u8>(), 0..2048)
    ) {
        let temp = tempfile::tempdir().unwrap();
        let a = temp.path().join("a.bin");
        let b = temp.path().join("b.bin");

        let mut longer = data.clone();
        longer.push(0x00);
        std::fs::write(&a, &data).unwrap();
        std::fs::write(&b, &longer).unwrap();

        prop_assert_ne!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }
}
