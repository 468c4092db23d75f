// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::{debug, error, warn};
use num_bigint_dig::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::util;
use crate::{Error, Result};

/// Public parameters of the cryptosystem.
///
/// Only `n` is independent: `n²` and `g = n + 1` are derived from it once at
/// construction and never change. Two keys compare equal iff their moduli are
/// equal.
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) n_squared: BigUint,
    pub(crate) g: BigUint,
    pub(crate) bit_length: usize,
}

impl PublicKey {
    /// Rebuild a public key from its modulus.
    ///
    /// `n` must be odd and greater than 2.
    pub fn new(bit_length: usize, n: BigUint) -> Result<Self> {
        if n <= BigUint::from(2u32) || (&n % 2u32).is_zero() {
            return Err(Error::InvalidPublicKey);
        }

        let n_squared = &n * &n;
        let g = &n + BigUint::one();

        Ok(Self {
            n,
            n_squared,
            g,
            bit_length,
        })
    }

    /// Return the public modulus `n`.
    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the cached `n²`.
    #[inline]
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Return the generator `g = n + 1`.
    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return the configured bit length of the modulus.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Map a decrypted plaintext from `[0, n)` onto the symmetric range
    /// `(-n/2, n/2]`.
    pub fn to_signed(&self, plaintext: &BigUint) -> BigInt {
        let m = BigInt::from_biguint(Sign::Plus, plaintext.clone());
        if plaintext << 1 > self.n {
            m - BigInt::from_biguint(Sign::Plus, self.n.clone())
        } else {
            m
        }
    }

    /// g^k mod n² for `k` already reduced mod n.
    ///
    /// With g = 1 + n, the binomial theorem gives g^k ≡ 1 + kn (mod n²).
    #[inline]
    pub(crate) fn g_pow(&self, k: &BigUint) -> BigUint {
        (BigUint::one() + k * &self.n) % &self.n_squared
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.n.hash(state);
    }
}

/// Secret key material.
///
/// Holds `λ = (p-1)(q-1)` and `μ = λ⁻¹ mod n`; the primes themselves are
/// wiped as soon as these are derived. `λ` and `μ` are zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    public_key: Arc<PublicKey>,
    lambda: BigUint,
    mu: BigUint,
}

impl PrivateKey {
    /// Generate a private key (and its public key) with a `bit_length`-bit
    /// modulus and default primality certainty.
    pub fn generate(bit_length: usize) -> Result<Self> {
        PrivateKeyBuilder::new().bit_length(bit_length).build()
    }

    /// Start configuring key generation.
    pub fn builder() -> PrivateKeyBuilder {
        PrivateKeyBuilder::new()
    }

    /// Derive a private key from two distinct primes.
    ///
    /// `p` and `q` are consumed and zeroized once `λ` and `μ` are computed.
    pub fn from_primes(mut p: BigUint, mut q: BigUint, bit_length: usize) -> Result<Self> {
        let two = BigUint::from(2u32);
        if p <= two || q <= two {
            return Err(Error::InvalidPrivateKey);
        }

        if p == q {
            error!("refusing to build a key from identical primes");
            return Err(Error::KeyGenerationFailed("Primes must be distinct".into()));
        }

        let n = &p * &q;
        let lambda = (&p - BigUint::one()) * (&q - BigUint::one());
        p.zeroize();
        q.zeroize();

        // Invertible whenever p and q are genuinely distinct primes.
        let Some(mu) = util::mod_inverse(&lambda, &n) else {
            error!("lambda is not invertible modulo a {}-bit n", n.bits());
            return Err(Error::KeyGenerationFailed(
                "lambda is not invertible modulo n".into(),
            ));
        };

        let public_key = Arc::new(PublicKey::new(bit_length, n)?);
        debug!("derived {}-bit Paillier modulus", public_key.n.bits());

        Ok(Self {
            public_key,
            lambda,
            mu,
        })
    }

    /// Rebuild a private key from exported `(λ, μ)` and its public key.
    ///
    /// Validates `μ·λ ≡ 1 (mod n)`.
    pub fn from_components(
        lambda: BigUint,
        mu: BigUint,
        public_key: impl Into<Arc<PublicKey>>,
    ) -> Result<Self> {
        let public_key = public_key.into();
        if lambda.is_zero() || mu.is_zero() {
            return Err(Error::InvalidPrivateKey);
        }
        if (&mu * &lambda) % &public_key.n != BigUint::one() {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self {
            public_key,
            lambda,
            mu,
        })
    }

    /// Return a reference to the associated public key.
    #[inline]
    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.public_key
    }

    /// Return `λ = (p-1)(q-1)`.
    #[inline]
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    /// Return `μ = λ⁻¹ mod n`.
    #[inline]
    pub fn mu(&self) -> &BigUint {
        &self.mu
    }

    /// n⁻¹ mod λ, the exponent that inverts the n-th power map on ℤ*_n.
    pub(crate) fn n_inverse_mod_lambda(&self) -> Result<BigUint> {
        util::mod_inverse(&self.public_key.n, &self.lambda).ok_or(Error::InvalidPrivateKey)
    }
}

#[cfg(not(feature = "expose-secret"))]
impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Builder for generating private keys with configurable parameters.
#[derive(Debug, Clone)]
pub struct PrivateKeyBuilder {
    bit_length: usize,
    certainty: u32,
}

impl PrivateKeyBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: Self::DEFAULT_BIT_LENGTH,
            certainty: Self::DEFAULT_CERTAINTY,
        }
    }

    pub const DEFAULT_BIT_LENGTH: usize = 2048;

    /// Primality error probability is bounded by 2^-certainty.
    pub const DEFAULT_CERTAINTY: u32 = 40;

    /// Minimum recommended for production (NIST/ENISA standard)
    pub const MIN_SECURE_BITS: usize = 2048;

    /// Absolute minimum enforced in production builds
    /// Can be bypassed with `allow-weak-keys` feature flag
    #[cfg(not(feature = "allow-weak-keys"))]
    pub const ABSOLUTE_MIN_BITS: usize = 512;

    #[cfg(feature = "allow-weak-keys")]
    pub const ABSOLUTE_MIN_BITS: usize = 128;

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Set the primality certainty.
    pub fn certainty(mut self, certainty: u32) -> Self {
        self.certainty = certainty;
        self
    }

    /// Generate the key using the operating system RNG.
    pub fn build(self) -> Result<PrivateKey> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key drawing all randomness from `rng`.
    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<PrivateKey>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        // Hard block dangerously small keys
        if self.bit_length < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS,
                actual: self.bit_length,
            });
        }

        if self.bit_length < Self::MIN_SECURE_BITS {
            warn!(
                "{}-bit key is cryptographically weak, use {} bits minimum for production",
                self.bit_length,
                Self::MIN_SECURE_BITS
            );
        }

        debug!(
            "generating {}-bit Paillier key (certainty {})",
            self.bit_length, self.certainty
        );

        let prime_bits = self.bit_length / 2;
        let p = util::generate_prime(prime_bits, self.certainty, rng);
        let q = util::generate_prime(prime_bits, self.certainty, rng);

        PrivateKey::from_primes(p, q, self.bit_length)
    }
}

impl Default for PrivateKeyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
