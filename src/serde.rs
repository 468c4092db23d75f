// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serde support for public keys and ciphertexts.
//!
//! Only the independent parameters travel on the wire. Derived values (`n²`,
//! `g`) are recomputed and every invariant is re-checked on deserialize.
//! Private keys are deliberately not serializable.

use num_bigint_dig::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Ciphertext, PublicKey};

#[derive(Serialize)]
struct PublicKeyRef<'a> {
    bit_length: usize,
    n: &'a BigUint,
}

#[derive(Deserialize)]
struct PublicKeyRepr {
    bit_length: usize,
    n: BigUint,
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PublicKeyRef {
            bit_length: self.bit_length,
            n: &self.n,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = PublicKeyRepr::deserialize(deserializer)?;
        PublicKey::new(repr.bit_length, repr.n).map_err(D::Error::custom)
    }
}

#[derive(Serialize)]
struct CiphertextRef<'a> {
    public_key: &'a PublicKey,
    value: &'a BigUint,
}

#[derive(Deserialize)]
struct CiphertextRepr {
    public_key: PublicKey,
    value: BigUint,
}

impl Serialize for Ciphertext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CiphertextRef {
            public_key: self.public_key().as_ref(),
            value: self.value(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ciphertext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = CiphertextRepr::deserialize(deserializer)?;
        Ciphertext::new(repr.public_key, repr.value).map_err(D::Error::custom)
    }
}
