#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::{BigInt, Sign};
use paillier::{Ciphertext, PrivateKey};

use std::sync::OnceLock;

static KEY: OnceLock<PrivateKey> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let key = KEY.get_or_init(|| PrivateKey::generate(512).unwrap());
    let public_key = key.public_key();

    // Interpret the first byte as the sign so negative plaintexts get covered too
    let (sign, magnitude) = match data.split_first() {
        Some((s, rest)) if s & 1 == 1 => (Sign::Minus, rest),
        Some((_, rest)) => (Sign::Plus, rest),
        None => (Sign::Plus, data),
    };
    let m = BigInt::from_bytes_be(sign, magnitude);

    let ciphertext = Ciphertext::encrypt(public_key, &m);
    let decrypted = match ciphertext.decrypt(key) {
        Ok(pt) => pt,
        Err(e) => panic!("Decryption failed for valid ciphertext: {e}. Input was: {data:?}"),
    };

    let n = BigInt::from_biguint(Sign::Plus, public_key.n().clone());
    let expected = ((&m % &n) + &n) % &n;
    assert_eq!(
        BigInt::from_biguint(Sign::Plus, decrypted),
        expected,
        "Plaintext mismatch for input {data:?}"
    );
});
