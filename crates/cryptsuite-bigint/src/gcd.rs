//! GCD, LCM and modular inverse operations.

use std::cmp::Ordering;
use std::mem;

use crate::bigint::BigInt;
use cryptsuite_types::CryptoError;

/// Signed intermediate for the extended Euclidean algorithm.
///
/// Bezout coefficients go negative, but `BigInt` is unsigned, so the sign is
/// tracked here and never leaks out of this module.
struct SignedBigInt {
    magnitude: BigInt,
    negative: bool,
}

impl SignedBigInt {
    fn from_digit(value: u32) -> Self {
        Self {
            magnitude: BigInt::from_digit(value),
            negative: false,
        }
    }

    /// Return `self - q * other`.
    fn sub_mul(&self, q: &BigInt, other: &SignedBigInt) -> Result<SignedBigInt, CryptoError> {
        let mut qx = BigInt::zero();
        q.mul(&other.magnitude, &mut qx)?;

        let mut magnitude = BigInt::zero();
        let negative = if self.negative != other.negative {
            self.magnitude.add(&qx, &mut magnitude)?;
            self.negative
        } else {
            self.magnitude.sub(&qx, &mut magnitude)?;
            match self.magnitude.cmp_ct(&qx) {
                Ordering::Greater => self.negative,
                _ => !self.negative,
            }
        };
        Ok(SignedBigInt {
            magnitude,
            negative,
        })
    }
}

impl BigInt {
    /// Greatest common divisor by the Euclidean algorithm.
    ///
    /// `gcd(a, 0) = a` and `gcd(0, 0) = 0`.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn gcd(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let mut a = self.try_clone()?;
        let mut b = other.try_clone()?;
        let mut r = BigInt::with_capacity(other.used_digits())?;

        while !b.is_zero() {
            a.mod_reduce(&b, &mut r)?;
            mem::swap(&mut a, &mut b);
            mem::swap(&mut b, &mut r);
        }

        out.copy_from(&a)
    }

    /// Least common multiple: `a * b / gcd(a, b)`.
    ///
    /// Fails with `BnDivisionByZero` when both operands are zero.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn lcm(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let mut prod = BigInt::with_capacity(self.used_digits() + other.used_digits())?;
        self.mul_karatsuba(other, &mut prod)?;
        let mut g = BigInt::zero();
        self.gcd(other, &mut g)?;
        let mut rem = BigInt::zero();
        prod.div_rem(&g, Some(out), &mut rem)
    }

    /// Compute the modular inverse: `self^(-1) mod modulus`.
    ///
    /// Returns `Err(BnNoInverse)` if `gcd(self, modulus) != 1` and
    /// `Err(BnDivisionByZero)` for a zero modulus. Every value is its own
    /// inverse modulo 1, and the result there is 0.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn mod_inv(&self, modulus: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        if modulus.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }
        let mut g = BigInt::zero();
        self.gcd(modulus, &mut g)?;
        if !g.is_one() {
            tracing::debug!(modulus_digits = modulus.used_digits(), "no modular inverse");
            return Err(CryptoError::BnNoInverse);
        }
        if modulus.is_one() {
            out.set_zero();
            return Ok(());
        }

        // Invariant: x1 * self = a and x0 * self = m (mod modulus).
        let mut a = self.try_clone()?;
        let mut m = modulus.try_clone()?;
        let mut x0 = SignedBigInt::from_digit(0);
        let mut x1 = SignedBigInt::from_digit(1);
        let mut q = BigInt::zero();
        let mut r = BigInt::zero();
        let one = BigInt::from_digit(1);

        while a.cmp_ct(&one) == Ordering::Greater {
            a.div_rem(&m, Some(&mut q), &mut r)?;
            mem::swap(&mut a, &mut m);
            mem::swap(&mut m, &mut r);
            let next = x1.sub_mul(&q, &x0)?;
            x1 = mem::replace(&mut x0, next);
        }

        let mut reduced = BigInt::zero();
        x1.magnitude.mod_reduce(modulus, &mut reduced)?;
        if x1.negative && !reduced.is_zero() {
            modulus.sub(&reduced, out)
        } else {
            out.copy_from(&reduced)
        }
    }
}
