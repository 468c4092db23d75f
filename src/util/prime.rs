// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probable-prime generation for Paillier moduli.
//!
//! Candidates are:
//! - exactly `bits` long with the two top bits set, so the product of two
//!   such primes has exactly `2 * bits` bits
//! - odd
//! - pre-sieved against small primes before any Miller-Rabin round

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Odd primes below 256 used to reject candidates cheaply.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Smallest prime size accepted; keeps every candidate above the sieve.
const MIN_PRIME_BITS: usize = 16;

/// Miller-Rabin rounds needed for an error probability of at most
/// `2^-certainty`. Each round errs with probability at most 1/4.
#[inline]
pub(crate) const fn miller_rabin_rounds(certainty: u32) -> usize {
    let rounds = certainty.div_ceil(2) as usize;
    if rounds == 0 { 1 } else { rounds }
}

/// Generate a probable prime of exactly `bits` bits.
///
/// # Panics
///
/// Panics if `bits < MIN_PRIME_BITS`; callers validate the key size first.
pub(crate) fn generate_prime<R>(bits: usize, certainty: u32, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    assert!(bits >= MIN_PRIME_BITS, "prime generation requires at least {MIN_PRIME_BITS} bits");

    let rounds = miller_rabin_rounds(certainty);
    loop {
        let candidate = generate_candidate(bits, rng);
        if divisible_by_small_prime(&candidate) {
            continue;
        }
        if probably_prime(&candidate, rounds) {
            return candidate;
        }
    }
}

#[inline]
fn generate_candidate<R>(bits: usize, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = rng.gen_biguint(bits);

    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one() << (bits - 2);
    candidate |= BigUint::one();

    candidate
}

#[inline]
fn divisible_by_small_prime(n: &BigUint) -> bool {
    SIEVE_PRIMES.iter().any(|&prime| (n % prime).is_zero())
}
