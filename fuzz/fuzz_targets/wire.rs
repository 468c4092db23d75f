#![no_main]

use libfuzzer_sys::fuzz_target;
use paillier::{Ciphertext, Error, PrivateKey};

use std::sync::OnceLock;

static KEY: OnceLock<PrivateKey> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let key = KEY.get_or_init(|| PrivateKey::generate(512).unwrap());

    // Arbitrary bytes must either be rejected or decode to an in-range value
    let Ok(ciphertext) = Ciphertext::from_bytes(key.public_key().clone(), data) else {
        return;
    };
    assert!(ciphertext.value() < key.public_key().n_squared());

    let reencoded = ciphertext.to_bytes();
    let decoded = Ciphertext::from_bytes(key.public_key().clone(), &reencoded).unwrap();
    assert_eq!(decoded, ciphertext);

    // Decryption of garbage may fail, but only with the consistency fault
    match ciphertext.decrypt(key) {
        Ok(m) => assert!(&m < key.public_key().n()),
        Err(Error::DecryptionFailed(_)) => {}
        Err(e) => panic!("unexpected error for {data:?}: {e}"),
    }
});
