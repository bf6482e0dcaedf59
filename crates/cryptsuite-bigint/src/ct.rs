//! Constant-time comparison for big integers.
//!
//! `cmp_ct`, `ct_eq` and `is_nonzero_ct` visit every digit of both operands
//! regardless of their values, so the only timing signal is the digit count.

use std::cmp::Ordering;

use crate::bigint::{BigInt, Digit, DoubleDigit, DIGIT_BITS};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

/// 1 if `acc` is non-zero, else 0, for an accumulator of OR-ed digits.
fn nonzero_bit(acc: DoubleDigit) -> u8 {
    ((acc.wrapping_neg() >> DIGIT_BITS) & 1) as u8
}

impl BigInt {
    /// Constant-time non-zero test over every digit in use.
    pub fn is_nonzero_ct(&self) -> Choice {
        let acc = self
            .digits()
            .iter()
            .fold(0, |acc, &d| acc | DoubleDigit::from(d));
        Choice::from(nonzero_bit(acc))
    }

    /// Return true if this number is zero.
    pub fn is_zero(&self) -> bool {
        !bool::from(self.is_nonzero_ct())
    }

    /// Constant-time three-way comparison.
    ///
    /// Operands of different digit counts are compared as if the shorter one
    /// were zero-extended. Every digit pair is visited from the top; the first
    /// differing pair latches the less/greater flags and later pairs are
    /// masked out.
    pub fn cmp_ct(&self, other: &BigInt) -> Ordering {
        let len = self.used_digits().max(other.used_digits());
        let mut diff: DoubleDigit = 0;
        let mut lt = Choice::from(0u8);
        let mut gt = Choice::from(0u8);

        for i in (0..len).rev() {
            let a = self.digit_at(i);
            let b = other.digit_at(i);
            diff |= DoubleDigit::from(a ^ b);
            let undecided = !(lt | gt);
            lt |= a.ct_lt(&b) & undecided;
            gt |= a.ct_gt(&b) & undecided;
        }

        let mut res = 1i8;
        res.conditional_assign(&-1, lt);
        res.conditional_assign(&0, !Choice::from(nonzero_bit(diff)));
        res.cmp(&0)
    }

    /// Variable-time comparison on the significant digits.
    ///
    /// Only for public values such as moduli or loop counters.
    pub fn cmp_vartime(&self, other: &BigInt) -> Ordering {
        let a = self.significant_digits();
        let b = other.significant_digits();
        a.len()
            .cmp(&b.len())
            .then_with(|| a.iter().rev().cmp(b.iter().rev()))
    }

    fn significant_digits(&self) -> &[Digit] {
        let used = self
            .digits()
            .iter()
            .rposition(|&d| d != 0)
            .map_or(1, |i| i + 1);
        &self.digits[..used]
    }
}

impl ConstantTimeEq for BigInt {
    fn ct_eq(&self, other: &Self) -> Choice {
        let len = self.used_digits().max(other.used_digits());
        let diff = (0..len).fold(0, |acc, i| {
            acc | DoubleDigit::from(self.digit_at(i) ^ other.digit_at(i))
        });
        !Choice::from(nonzero_bit(diff))
    }
}
