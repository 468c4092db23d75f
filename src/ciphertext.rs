// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use log::debug;
use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::key::{PrivateKey, PublicKey};
use crate::util;
use crate::{Error, Result};

/// A Paillier ciphertext bound to the public key it was produced under.
///
/// The value always lies in `[0, n²)`. Many ciphertexts share one key through
/// the `Arc`; no randomness source is stored here, every randomized operation
/// takes one explicitly or falls back to `OsRng`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    public_key: Arc<PublicKey>,
    value: BigUint,
}

impl Ciphertext {
    /// Wrap a raw ciphertext integer received from storage or the network.
    pub fn new(public_key: impl Into<Arc<PublicKey>>, value: BigUint) -> Result<Self> {
        let public_key = public_key.into();
        if value >= public_key.n_squared {
            return Err(Error::InvalidCiphertext);
        }

        Ok(Self { public_key, value })
    }

    /// Encrypt `plaintext` with fresh randomness from the OS RNG.
    ///
    /// The plaintext is reduced modulo n, so negative values decrypt to
    /// their residue in `[0, n)`.
    pub fn encrypt(public_key: &Arc<PublicKey>, plaintext: &BigInt) -> Self {
        Self::encrypt_with_rng(public_key, plaintext, &mut OsRng)
    }

    /// Encrypt `plaintext` drawing the blinding factor from `rng`.
    pub fn encrypt_with_rng<R>(public_key: &Arc<PublicKey>, plaintext: &BigInt, rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let r = util::sample_unit(&public_key.n, rng);
        let m = util::reduce_signed(plaintext, &public_key.n);

        Self {
            public_key: Arc::clone(public_key),
            value: raw_encrypt(public_key, &m, &r),
        }
    }

    /// Encrypt with a caller-chosen blinding factor `r`.
    ///
    /// `r` must lie in `[1, n)` and be coprime with n. Intended for
    /// reproducible test vectors and protocols that fix `r` up front.
    pub fn encrypt_with_r(public_key: &Arc<PublicKey>, plaintext: &BigInt, r: &BigUint) -> Result<Self> {
        let n = &public_key.n;
        if r.is_zero() || r >= n || !r.gcd(n).is_one() {
            return Err(Error::InvalidRandomness);
        }

        let m = util::reduce_signed(plaintext, n);
        Ok(Self {
            public_key: Arc::clone(public_key),
            value: raw_encrypt(public_key, &m, r),
        })
    }

    /// Decrypt to the plaintext residue in `[0, n)`.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyMismatch`] if `private_key` belongs to a different modulus.
    /// - [`Error::DecryptionFailed`] if `c^λ mod n²` is not ≡ 1 (mod n), i.e.
    ///   the value was not produced under this key or was corrupted.
    pub fn decrypt(&self, private_key: &PrivateKey) -> Result<BigUint> {
        let pk = &self.public_key;
        if **private_key.public_key() != **pk {
            return Err(Error::KeyMismatch);
        }

        let u = self.value.modpow(private_key.lambda(), &pk.n_squared);
        let l = util::l_function(&u, &pk.n)?;

        Ok((l * private_key.mu()) % &pk.n)
    }

    /// Decrypt and map the result onto `(-n/2, n/2]`.
    pub fn decrypt_signed(&self, private_key: &PrivateKey) -> Result<BigInt> {
        let m = self.decrypt(private_key)?;
        Ok(self.public_key.to_signed(&m))
    }

    /// Homomorphic addition: D(a.add(b)) = (m_a + m_b) mod n.
    pub fn add(&self, other: &Ciphertext) -> Result<Ciphertext> {
        self.ensure_same_key(other)?;

        let value = (&self.value * &other.value) % &self.public_key.n_squared;
        Ok(self.with_value(value))
    }

    /// Homomorphic subtraction: D(a.sub(b)) = (m_a - m_b) mod n.
    pub fn sub(&self, other: &Ciphertext) -> Result<Ciphertext> {
        self.ensure_same_key(other)?;

        let negated = other.mul_plain(&BigInt::from(-1))?;
        self.add(&negated)
    }

    /// Add a plaintext constant: D(c.add_plain(k)) = (m + k) mod n.
    ///
    /// Negative `k` is accepted.
    pub fn add_plain(&self, k: &BigInt) -> Ciphertext {
        let pk = &self.public_key;
        let gk = pk.g_pow(&util::reduce_signed(k, &pk.n));

        self.with_value((&self.value * gk) % &pk.n_squared)
    }

    /// Multiply by a plaintext constant: D(c.mul_plain(k)) = (m · k) mod n.
    ///
    /// Negative `k` raises the inverse of the ciphertext mod n², which fails
    /// with [`Error::InvalidCiphertext`] when the value is not a unit.
    pub fn mul_plain(&self, k: &BigInt) -> Result<Ciphertext> {
        let value = util::mod_pow_signed(&self.value, k, &self.public_key.n_squared)
            .ok_or(Error::InvalidCiphertext)?;

        Ok(self.with_value(value))
    }

    /// Rerandomize in place with the OS RNG. The plaintext is unchanged.
    pub fn randomize(&mut self) {
        self.randomize_with_rng(&mut OsRng);
    }

    /// Multiply a fresh encryption of zero, `r^n mod n²`, into the value.
    pub fn randomize_with_rng<R>(&mut self, rng: &mut R)
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let pk = &self.public_key;
        let r = util::sample_unit(&pk.n, rng);
        let zero = r.modpow(&pk.n, &pk.n_squared);

        self.value = (&self.value * zero) % &pk.n_squared;
    }

    /// Return a rerandomized copy, leaving `self` untouched.
    pub fn rerandomize(&self) -> Ciphertext {
        self.rerandomize_with_rng(&mut OsRng)
    }

    pub fn rerandomize_with_rng<R>(&self, rng: &mut R) -> Ciphertext
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut fresh = self.clone();
        fresh.randomize_with_rng(rng);
        fresh
    }

    /// Recover the blinding factor `r` behind this ciphertext.
    ///
    /// Decrypts to `m`, strips `g^m` modulo n and inverts the n-th power map
    /// on ℤ*_n using `n⁻¹ mod λ`:
    ///
    /// `r = ((c mod n) · g^(-m) mod n)^(n⁻¹ mod λ) mod n`
    ///
    /// For a ciphertext from [`Ciphertext::encrypt_with_r`] this returns
    /// exactly that `r`. After homomorphic operations it returns the combined
    /// blinding factor of the result.
    pub fn recover_randomness(&self, private_key: &PrivateKey) -> Result<BigUint> {
        let m = self.decrypt(private_key)?;

        let pk = &self.public_key;
        let n = &pk.n;
        let neg_m = -BigInt::from_biguint(Sign::Plus, m);
        let g_inv_m =
            util::mod_pow_signed(&(&pk.g % n), &neg_m, n).ok_or(Error::InvalidCiphertext)?;

        let c = ((&self.value % n) * g_inv_m) % n;
        let exponent = private_key.n_inverse_mod_lambda()?;

        debug!("recovering ciphertext randomness under a {}-bit modulus", n.bits());
        Ok(c.modpow(&exponent, n))
    }

    /// Return the public key this ciphertext is valid under.
    #[inline]
    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.public_key
    }

    /// Return the ciphertext integer.
    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Big-endian minimal two's-complement encoding of the value.
    pub fn to_bytes(&self) -> Vec<u8> {
        util::to_signed_bytes_be(&self.value)
    }

    /// Decode a value produced by [`Ciphertext::to_bytes`] under `public_key`.
    pub fn from_bytes(public_key: impl Into<Arc<PublicKey>>, bytes: &[u8]) -> Result<Self> {
        let value = util::from_signed_bytes_be(bytes).ok_or(Error::InvalidCiphertext)?;
        Self::new(public_key, value)
    }

    fn ensure_same_key(&self, other: &Ciphertext) -> Result<()> {
        if self.public_key != other.public_key {
            return Err(Error::KeyMismatch);
        }
        Ok(())
    }

    fn with_value(&self, value: BigUint) -> Ciphertext {
        Ciphertext {
            public_key: Arc::clone(&self.public_key),
            value,
        }
    }
}

/// c = g^m · r^n mod n²
fn raw_encrypt(public_key: &PublicKey, m: &BigUint, r: &BigUint) -> BigUint {
    let gm = public_key.g_pow(m);
    let rn = r.modpow(&public_key.n, &public_key.n_squared);
    (gm * rn) % &public_key.n_squared
}
