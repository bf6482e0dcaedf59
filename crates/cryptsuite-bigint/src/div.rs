//! Division, modular reduction and modular exponentiation.

use std::cmp::Ordering;
use std::mem;

use crate::bigint::{BigInt, DIGIT_BITS};
use crate::ops::KARATSUBA_CUTOFF;
use cryptsuite_types::CryptoError;

impl BigInt {
    /// Division with remainder: `self = quotient * divisor + remainder`.
    ///
    /// Uses repeated doubling and halving of the divisor: each round
    /// scales the divisor by the largest power of two that does not exceed
    /// the running remainder, subtracts it, and adds that power of two to the
    /// quotient. The quotient is only accumulated when requested.
    #[tracing::instrument(skip_all, level = "trace")]
    pub fn div_rem(
        &self,
        divisor: &BigInt,
        quotient: Option<&mut BigInt>,
        remainder: &mut BigInt,
    ) -> Result<(), CryptoError> {
        if divisor.is_zero() {
            tracing::debug!(dividend_digits = self.used_digits(), "division by zero");
            return Err(CryptoError::BnDivisionByZero);
        }

        let want_quotient = quotient.is_some();
        let mut rem = self.try_clone()?;
        let mut quot = BigInt::with_capacity(self.used_digits())?;
        let mut shifted = BigInt::with_capacity(self.used_digits() + 1)?;
        let mut pow2 = BigInt::with_capacity(self.used_digits())?;
        let mut scratch = BigInt::with_capacity(self.used_digits() + 1)?;
        let divisor_bits = divisor.bit_len();

        while rem.cmp_ct(divisor) != Ordering::Less {
            // Double up to the remainder's bit length, then halve once if
            // that overshot.
            let mut count = rem.bit_len() - divisor_bits;
            divisor.mul_pow_2(count, &mut shifted)?;
            if rem.cmp_ct(&shifted) == Ordering::Less {
                shifted.shr1()?;
                count -= 1;
            }

            rem.sub(&shifted, &mut scratch)?;
            mem::swap(&mut rem, &mut scratch);

            if want_quotient {
                pow2.set_zero();
                pow2.set_bit(count)?;
                quot.add(&pow2, &mut scratch)?;
                mem::swap(&mut quot, &mut scratch);
            }
        }

        remainder.copy_from(&rem)?;
        if let Some(q) = quotient {
            q.copy_from(&quot)?;
        }
        Ok(())
    }

    /// Write `self mod modulus` into `out`.
    pub fn mod_reduce(&self, modulus: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        self.div_rem(modulus, None, out)
    }

    /// Write `self mod 2^bits` into `out` by truncating digits and masking.
    pub fn mod_pow_2(&self, bits: usize, out: &mut BigInt) -> Result<(), CryptoError> {
        let whole = bits / DIGIT_BITS;
        if whole >= self.used_digits() {
            return out.copy_from(self);
        }
        let mask: u32 = (1 << (bits % DIGIT_BITS)) - 1;
        out.expand(whole + 1)?;
        out.digits[..whole].copy_from_slice(&self.digits[..whole]);
        out.digits[whole] = self.digits[whole] & mask;
        out.msd = whole;
        out.clamp();
        Ok(())
    }

    /// Write `(self * other) mod modulus` into `out`.
    ///
    /// Operands of at least `KARATSUBA_CUTOFF` digits use `mul_karatsuba`.
    pub fn mul_mod(&self, other: &BigInt, modulus: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let mut prod = BigInt::with_capacity(self.used_digits() + other.used_digits())?;
        if self.used_digits().min(other.used_digits()) >= KARATSUBA_CUTOFF {
            self.mul_karatsuba(other, &mut prod)?;
        } else {
            self.mul(other, &mut prod)?;
        }
        prod.mod_reduce(modulus, out)
    }

    /// Write `self^2 mod modulus` into `out`.
    pub fn square_mod(&self, modulus: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let mut sq = BigInt::with_capacity(2 * self.used_digits())?;
        self.square(&mut sq)?;
        sq.mod_reduce(modulus, out)
    }

    /// Modular exponentiation: `self^exp mod modulus`.
    ///
    /// Right-to-left square-and-multiply. The multiply step is skipped for
    /// zero exponent bits, so timing depends on the exponent's Hamming
    /// weight; do not use with secret exponents.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn mod_exp(&self, exp: &BigInt, modulus: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        if modulus.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }
        if modulus.is_one() {
            out.set_zero();
            return Ok(());
        }
        tracing::debug!(
            base_digits = self.used_digits(),
            exp_digits = exp.used_digits(),
            modulus_digits = modulus.used_digits(),
            "modular exponentiation"
        );

        let mut base = BigInt::with_capacity(modulus.used_digits())?;
        self.mod_reduce(modulus, &mut base)?;
        let mut e = exp.try_clone()?;
        let mut acc = BigInt::from_digit(1);
        let mut tmp = BigInt::with_capacity(modulus.used_digits())?;

        while !e.is_zero() {
            if e.is_odd() {
                acc.mul_mod(&base, modulus, &mut tmp)?;
                mem::swap(&mut acc, &mut tmp);
            }
            e.shr1()?;
            base.square_mod(modulus, &mut tmp)?;
            mem::swap(&mut base, &mut tmp);
        }

        out.copy_from(&acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_rem() {
        let a = BigInt::from_u64(100);
        let b = BigInt::from_u64(7);
        let mut q = BigInt::zero();
        let mut r = BigInt::zero();
        a.div_rem(&b, Some(&mut q), &mut r).unwrap();
        assert_eq!(q, BigInt::from_u64(14));
        assert_eq!(r, BigInt::from_u64(2));
    }

    #[test]
    fn test_div_rem_multi_digit() {
        let a = BigInt::from_bytes(&[0xFF; 24]).unwrap();
        let b = BigInt::from_u64(0x1_0000_0001);
        let mut q = BigInt::zero();
        let mut r = BigInt::zero();
        a.div_rem(&b, Some(&mut q), &mut r).unwrap();

        assert_eq!(r.cmp_ct(&b), Ordering::Less);
        let mut back = BigInt::zero();
        let mut sum = BigInt::zero();
        q.mul(&b, &mut back).unwrap();
        back.add(&r, &mut sum).unwrap();
        assert_eq!(sum, a);
    }

    #[test]
    fn test_div_rem_small_dividend() {
        let a = BigInt::from_u64(5);
        let b = BigInt::from_u64(1 << 40);
        let mut q = BigInt::from_digit(99);
        let mut r = BigInt::zero();
        a.div_rem(&b, Some(&mut q), &mut r).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, a);
    }

    #[test]
    fn test_div_rem_exact_power_of_two() {
        let mut a = BigInt::zero();
        a.set_bit(100).unwrap();
        let b = BigInt::from_digit(2);
        let mut q = BigInt::zero();
        let mut r = BigInt::zero();
        a.div_rem(&b, Some(&mut q), &mut r).unwrap();
        assert!(r.is_zero());
        assert_eq!(q.bit_len(), 100);
    }

    #[test]
    fn test_div_by_zero() {
        let a = BigInt::from_u64(100);
        let mut r = BigInt::zero();
        assert_eq!(
            a.div_rem(&BigInt::zero(), None, &mut r),
            Err(CryptoError::BnDivisionByZero)
        );
        assert_eq!(
            a.mod_reduce(&BigInt::zero(), &mut r),
            Err(CryptoError::BnDivisionByZero)
        );
    }

    #[test]
    fn test_mod_pow_2() {
        let a = BigInt::from_u64(0xDEAD_BEEF_CAFE_BABE);
        let mut out = BigInt::zero();
        a.mod_pow_2(36, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0xF_CAFE_BABE));
        a.mod_pow_2(32, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0xCAFE_BABE));
        a.mod_pow_2(128, &mut out).unwrap();
        assert_eq!(out, a);
        a.mod_pow_2(0, &mut out).unwrap();
        assert!(out.is_zero());
    }

    #[test]
    fn test_mod_pow_2_clamps() {
        let a = BigInt::from_u64((1 << 40) | 5);
        let mut out = BigInt::zero();
        a.mod_pow_2(40, &mut out).unwrap();
        assert_eq!(out.msd(), 0);
        assert_eq!(out, BigInt::from_digit(5));
    }

    #[test]
    fn test_mul_mod() {
        let a = BigInt::from_u64(123_456_789);
        let b = BigInt::from_u64(987_654_321);
        let m = BigInt::from_u64(1_000_000_007);
        let mut out = BigInt::zero();
        a.mul_mod(&b, &m, &mut out).unwrap();
        let expect = (123_456_789u128 * 987_654_321) % 1_000_000_007;
        assert_eq!(out, BigInt::from_u64(expect as u64));
    }

    #[test]
    fn test_square_mod() {
        let a = BigInt::from_u64(0xFFFF_FFFF_FFFF);
        let m = BigInt::from_u64(0xFFFF_FFFB);
        let mut out = BigInt::zero();
        a.square_mod(&m, &mut out).unwrap();
        let expect = (0xFFFF_FFFF_FFFFu128 * 0xFFFF_FFFF_FFFF) % 0xFFFF_FFFB;
        assert_eq!(out, BigInt::from_u64(expect as u64));
    }

    #[test]
    fn test_mod_exp() {
        let base = BigInt::from_u64(4);
        let exp = BigInt::from_u64(13);
        let m = BigInt::from_u64(497);
        let mut out = BigInt::zero();
        base.mod_exp(&exp, &m, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(445));
    }

    #[test]
    fn test_mod_exp_fermat() {
        // a^(p-1) = 1 mod p for prime p = 2^61 - 1
        let p = BigInt::from_u64((1 << 61) - 1);
        let e = BigInt::from_u64((1 << 61) - 2);
        let a = BigInt::from_u64(0x1234_5678_9ABC);
        let mut out = BigInt::zero();
        a.mod_exp(&e, &p, &mut out).unwrap();
        assert!(out.is_one());
    }

    #[test]
    fn test_mod_exp_edge_cases() {
        let a = BigInt::from_u64(10);
        let mut out = BigInt::from_digit(77);
        a.mod_exp(&BigInt::from_digit(3), &BigInt::from_digit(1), &mut out)
            .unwrap();
        assert!(out.is_zero());

        a.mod_exp(&BigInt::zero(), &BigInt::from_digit(7), &mut out)
            .unwrap();
        assert!(out.is_one());

        assert_eq!(
            a.mod_exp(&BigInt::from_digit(3), &BigInt::zero(), &mut out),
            Err(CryptoError::BnDivisionByZero)
        );
    }
}
