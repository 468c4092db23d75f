// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod prime;

pub(crate) use prime::generate_prime;

use num_bigint_dig::{BigInt, BigUint, ModInverse, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// L(u) = (u - 1) / n
///
/// Only defined for u ≡ 1 (mod n), which holds for `c^λ mod n²` whenever `c`
/// was produced under the key that owns `λ`. Any other input is reported as a
/// decryption fault rather than truncated.
pub(crate) fn l_function(u: &BigUint, n: &BigUint) -> Result<BigUint> {
    if u.is_zero() {
        return Err(Error::DecryptionFailed("L-function input is zero".into()));
    }

    let (quotient, remainder) = (u - BigUint::one()).div_rem(n);
    if !remainder.is_zero() {
        return Err(Error::DecryptionFailed(
            "L-function input is not congruent to 1 mod n".into(),
        ));
    }

    Ok(quotient)
}

/// Reduce a signed integer into `[0, n)`.
pub(crate) fn reduce_signed(k: &BigInt, n: &BigUint) -> BigUint {
    let (sign, magnitude) = k.to_bytes_be();
    let r = BigUint::from_bytes_be(&magnitude) % n;

    if sign == Sign::Minus && !r.is_zero() {
        n - r
    } else {
        r
    }
}

/// Modular inverse of `a` mod `m`, if one exists.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    a.clone().mod_inverse(m)?.to_biguint()
}

/// `base^exp mod modulus` for a signed exponent. Negative exponents go
/// through the inverse of `base`, so `None` means `base` is not a unit.
pub(crate) fn mod_pow_signed(base: &BigUint, exp: &BigInt, modulus: &BigUint) -> Option<BigUint> {
    let (sign, magnitude) = exp.to_bytes_be();
    let e = BigUint::from_bytes_be(&magnitude);

    if sign == Sign::Minus {
        let inverse = mod_inverse(base, modulus)?;
        Some(inverse.modpow(&e, modulus))
    } else {
        Some(base.modpow(&e, modulus))
    }
}

/// Draw `r` uniformly from the units of ℤ_n by rejection sampling.
///
/// Candidates are drawn with the bit length of `n` and rejected when they
/// are zero, not below `n`, or share a factor with `n`.
pub(crate) fn sample_unit<R>(n: &BigUint, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    let bits = n.bits();
    loop {
        let r = rng.gen_biguint(bits);
        if r.is_zero() || &r >= n {
            continue;
        }
        if r.gcd(n).is_one() {
            return r;
        }
    }
}

/// Big-endian minimal two's-complement encoding of a non-negative integer.
///
/// A leading zero byte is inserted only when the top bit of the magnitude is
/// set, so the value never reads back as negative.
pub(crate) fn to_signed_bytes_be(value: &BigUint) -> Vec<u8> {
    let mut bytes = value.to_bytes_be();
    if bytes.is_empty() {
        bytes.push(0);
    } else if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0);
    }
    bytes
}

/// Inverse of [`to_signed_bytes_be`]. Returns `None` for empty input or a
/// negative two's-complement value.
pub(crate) fn from_signed_bytes_be(bytes: &[u8]) -> Option<BigUint> {
    match bytes.first() {
        None => None,
        Some(b) if b & 0x80 != 0 => None,
        Some(_) => Some(BigUint::from_bytes_be(bytes)),
    }
}
