//! Digit-wise AND, OR, XOR and NOT.

use crate::bigint::{BigInt, Digit};
use cryptsuite_types::CryptoError;

impl BigInt {
    fn zip_digits(
        &self,
        other: &BigInt,
        out: &mut BigInt,
        op: impl Fn(Digit, Digit) -> Digit,
    ) -> Result<(), CryptoError> {
        let used = self.used_digits().max(other.used_digits());
        out.expand(used)?;
        for i in 0..used {
            out.digits[i] = op(self.digit_at(i), other.digit_at(i));
        }
        out.msd = used - 1;
        out.clamp();
        Ok(())
    }

    /// Write `self & other` into `out`.
    pub fn bit_and(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        self.zip_digits(other, out, |a, b| a & b)
    }

    /// Write `self | other` into `out`.
    pub fn bit_or(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        self.zip_digits(other, out, |a, b| a | b)
    }

    /// Write `self ^ other` into `out`.
    pub fn bit_xor(&self, other: &BigInt, out: &mut BigInt) -> Result<(), CryptoError> {
        self.zip_digits(other, out, |a, b| a ^ b)
    }

    /// Write the complement of every digit in use into `out`.
    ///
    /// The width is `used_digits()` digits, so the complement of a value
    /// with a full top digit loses those high bits after clamping.
    pub fn bit_not(&self, out: &mut BigInt) -> Result<(), CryptoError> {
        let used = self.used_digits();
        out.expand(used)?;
        for (dst, &src) in out.digits[..used].iter_mut().zip(self.digits()) {
            *dst = !src;
        }
        out.msd = used - 1;
        out.clamp();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_or_xor() {
        let a = BigInt::from_u64(0xFF00_FF00_1234_5678);
        let b = BigInt::from_u64(0x0FF0_0FF0_FFFF_0000);
        let mut out = BigInt::zero();

        a.bit_and(&b, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0x0F00_0F00_1234_0000));
        a.bit_or(&b, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0xFFF0_FFF0_FFFF_5678));
        a.bit_xor(&b, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0xF0F0_F0F0_EDCB_5678));
    }

    #[test]
    fn test_mismatched_lengths() {
        let long = BigInt::from_u64(0xAAAA_AAAA_0000_000F);
        let short = BigInt::from_digit(0xFF);
        let mut out = BigInt::zero();

        long.bit_and(&short, &mut out).unwrap();
        assert_eq!(out, BigInt::from_digit(0xF));
        assert_eq!(out.msd(), 0);

        short.bit_or(&long, &mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0xAAAA_AAAA_0000_00FF));
    }

    #[test]
    fn test_xor_self_is_zero() {
        let a = BigInt::from_bytes(&[0x5A; 16]).unwrap();
        let mut out = BigInt::zero();
        a.bit_xor(&a.clone(), &mut out).unwrap();
        assert!(out.is_zero());
        assert_eq!(out.msd(), 0);
    }

    #[test]
    fn test_not() {
        let a = BigInt::from_u64(0x0000_FFFF_F0F0_F0F0);
        let mut out = BigInt::zero();
        a.bit_not(&mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0xFFFF_0000_0F0F_0F0F));

        // The top digit is all ones, so it vanishes after clamping.
        let b = BigInt::from_u64(0xFFFF_FFFF_0000_0001);
        b.bit_not(&mut out).unwrap();
        assert_eq!(out.msd(), 0);
        assert_eq!(out, BigInt::from_digit(0xFFFF_FFFE));
    }
}
