// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem
//!
//! Probabilistic public-key encryption with additive homomorphism, based on
//! the decisional composite residuosity assumption over n = pq.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! Ciphertexts under the same public key can be combined without the
//! private key:
//!
//! - `E(a) · E(b) = E(a + b)`: [`Ciphertext::add`]
//! - `E(a) · g^k = E(a + k)`: [`Ciphertext::add_plain`]
//! - `E(a)^k = E(a · k)`: [`Ciphertext::mul_plain`]
//!
//! All plaintext arithmetic is modulo n. Use [`PublicKey::to_signed`] or
//! [`Ciphertext::decrypt_signed`] to read results as signed integers.
//!
//! ## Security
//!
//! `λ` and `μ` are zeroized on drop, and the primes are wiped as soon as they
//! have been used. Big-integer arithmetic is not constant time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use num_bigint_dig::{BigInt, BigUint};
//! use paillier::{Ciphertext, PrivateKey};
//!
//! let private_key = PrivateKey::generate(2048).expect("key generation failed");
//! let public_key = private_key.public_key();
//!
//! let a = Ciphertext::encrypt(public_key, &BigInt::from(2000));
//! let b = Ciphertext::encrypt(public_key, &BigInt::from(3000));
//!
//! let sum = a.add(&b).expect("same public key");
//! assert_eq!(sum.decrypt(&private_key).unwrap(), BigUint::from(5000u32));
//!
//! let diff = a.sub(&b).expect("same public key");
//! assert_eq!(diff.decrypt_signed(&private_key).unwrap(), BigInt::from(-1000));
//! ```

mod ciphertext;
mod error;
mod key;
#[cfg(feature = "serde")]
mod serde;
mod util;

pub use ciphertext::*;
pub use error::*;
pub use key::*;
