#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::{BigInt, BigUint, Sign};
use paillier::{Ciphertext, PrivateKey};

use std::sync::OnceLock;

static KEY: OnceLock<PrivateKey> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let key = KEY.get_or_init(|| PrivateKey::generate(512).unwrap());
    let public_key = key.public_key();
    let n = public_key.n();

    let (m1_bytes, rest) = data.split_at(data.len() / 2);
    let (m2_bytes, k_bytes) = rest.split_at(rest.len() / 2);
    let m1 = BigUint::from_bytes_be(m1_bytes) % n;
    let m2 = BigUint::from_bytes_be(m2_bytes) % n;
    let k = BigUint::from_bytes_be(k_bytes);

    let c1 = Ciphertext::encrypt(public_key, &BigInt::from_biguint(Sign::Plus, m1.clone()));
    let c2 = Ciphertext::encrypt(public_key, &BigInt::from_biguint(Sign::Plus, m2.clone()));
    let k_signed = BigInt::from_biguint(Sign::Plus, k.clone());

    let sum = c1.add(&c2).unwrap();
    assert_eq!(sum.decrypt(key).unwrap(), (&m1 + &m2) % n);

    let shifted = c1.add_plain(&k_signed);
    assert_eq!(shifted.decrypt(key).unwrap(), (&m1 + &k) % n);

    let scaled = c1.mul_plain(&k_signed).unwrap();
    assert_eq!(scaled.decrypt(key).unwrap(), (&m1 * &k) % n);

    let mut rerandomized = sum.clone();
    rerandomized.randomize();
    assert_eq!(rerandomized.decrypt(key).unwrap(), sum.decrypt(key).unwrap());
});
