//! Addition, subtraction and multiplication.

use std::cmp::Ordering;

use crate::bigint::{alloc_digits, BigInt, Digit, DoubleDigit, BASE, DIGIT_BITS};
use cryptsuite_types::CryptoError;
use zeroize::Zeroizing;

/// Digit count at which `mul_mod` switches from schoolbook to Karatsuba.
pub const KARATSUBA_CUTOFF: usize = 16;

impl BigInt {
    /// Write `self + other` into `out`.
    pub fn add(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let (long, short) = if self.msd >= other.msd {
            (self, other)
        } else {
            (other, self)
        };
        out.expand(long.msd + 2)?;

        let mut carry: DoubleDigit = 0;
        for i in 0..=short.msd {
            let tmp = DoubleDigit::from(long.digits[i]) + DoubleDigit::from(short.digits[i]) + carry;
            out.digits[i] = (tmp & BASE) as Digit;
            carry = tmp >> DIGIT_BITS;
        }
        for i in short.msd + 1..=long.msd {
            let tmp = DoubleDigit::from(long.digits[i]) + carry;
            out.digits[i] = (tmp & BASE) as Digit;
            carry = tmp >> DIGIT_BITS;
        }

        out.msd = long.msd;
        if carry != 0 {
            out.msd += 1;
            out.digits[out.msd] = carry as Digit;
        }
        Ok(())
    }

    /// Write `|self - other|` into `out`.
    ///
    /// The operands are ordered with `cmp_ct` first, so the larger one is
    /// always the minuend and the result is never negative.
    pub fn sub(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let (big, small) = match self.cmp_ct(other) {
            Ordering::Less => (other, self),
            _ => (self, other),
        };
        out.expand(big.used_digits())?;

        let mut borrow: i64 = 0;
        for i in 0..=big.msd {
            let tmp = i64::from(big.digits[i]) - i64::from(small.digit_at(i)) - borrow;
            let negative = (tmp >> 63) & 1;
            out.digits[i] = ((tmp + (negative << DIGIT_BITS)) & BASE as i64) as Digit;
            borrow = negative;
        }

        out.msd = big.msd;
        out.clamp();
        Ok(())
    }

    /// Add one in place.
    ///
    /// The carry is propagated through every digit in use.
    pub fn inc(&mut self) -> Result<(), CryptoError> {
        self.expand(self.msd + 2)?;
        let mut carry: DoubleDigit = 1;
        for d in &mut self.digits[..=self.msd] {
            let tmp = DoubleDigit::from(*d) + carry;
            *d = (tmp & BASE) as Digit;
            carry = tmp >> DIGIT_BITS;
        }
        if carry != 0 {
            self.msd += 1;
            self.digits[self.msd] = carry as Digit;
        }
        Ok(())
    }

    /// Write `self + digit` into `out`.
    pub fn add_digit(&self, digit: Digit, out: &mut BigInt) -> Result<(), CryptoError> {
        self.add(&BigInt::from_digit(digit), out)
    }

    /// Write `|self - digit|` into `out`.
    pub fn sub_digit(&self, digit: Digit, out: &mut BigInt) -> Result<(), CryptoError> {
        self.sub(&BigInt::from_digit(digit), out)
    }

    /// Write `self * digit` into `out`.
    pub fn mul_digit(&self, digit: Digit, out: &mut BigInt) -> Result<(), CryptoError> {
        self.mul(&BigInt::from_digit(digit), out)
    }

    /// Write `self * other` into `out` (schoolbook).
    pub fn mul(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let a = self.digits();
        let b = other.digits();
        let mut acc = Zeroizing::new(alloc_digits(a.len() + b.len())?);

        for i in 0..a.len() {
            let mut carry: DoubleDigit = 0;
            for j in 0..b.len() {
                let tmp = DoubleDigit::from(a[i]) * DoubleDigit::from(b[j])
                    + DoubleDigit::from(acc[i + j])
                    + carry;
                acc[i + j] = (tmp & BASE) as Digit;
                carry = tmp >> DIGIT_BITS;
            }
            acc[i + b.len()] = carry as Digit;
        }

        out.load_digits(&acc)
    }

    /// Write `self * other` into `out` using one level of Karatsuba.
    ///
    /// Both operands are split at `min(len_a, len_b) / 2` digits and the
    /// three half-size products are formed with schoolbook `mul`. Operands
    /// too short to split fall back to `mul` directly.
    pub fn mul_karatsuba(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        let split = self.used_digits().min(other.used_digits()) / 2;
        if split == 0 {
            return self.mul(other, out);
        }

        let (x0, x1) = self.split_at_digit(split)?;
        let (y0, y1) = other.split_at_digit(split)?;

        let mut z0 = BigInt::zero();
        let mut z2 = BigInt::zero();
        x0.mul(&y0, &mut z0)?;
        x1.mul(&y1, &mut z2)?;

        let mut x_sum = BigInt::zero();
        let mut y_sum = BigInt::zero();
        x0.add(&x1, &mut x_sum)?;
        y0.add(&y1, &mut y_sum)?;

        // z1 = (x0 + x1)(y0 + y1) - z0 - z2, which is never negative.
        let mut z1 = BigInt::zero();
        let mut tmp = BigInt::zero();
        x_sum.mul(&y_sum, &mut z1)?;
        z1.sub(&z0, &mut tmp)?;
        tmp.sub(&z2, &mut z1)?;

        z1.shl_digits(split)?;
        z2.shl_digits(2 * split)?;
        z0.add(&z1, &mut tmp)?;
        tmp.add(&z2, out)?;
        out.clamp();
        Ok(())
    }

    /// Write `self * self` into `out`.
    pub fn square(&self, out: &mut BigInt) -> Result<(), CryptoError> {
        self.mul_karatsuba(self, out)
    }
}
