// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    /// Two ciphertexts (or a ciphertext and a private key) belong to
    /// different moduli.
    #[error("public keys do not share the same modulus")]
    KeyMismatch,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Randomness must be a unit modulo n")]
    InvalidRandomness,

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The ciphertext was not produced under the key used to open it.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
