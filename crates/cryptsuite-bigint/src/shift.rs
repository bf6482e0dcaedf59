//! Bit and digit shifts.
//!
//! Right shifts clamp their result; left shifts grow the buffer as needed.

use crate::bigint::{BigInt, DIGIT_BITS};
use cryptsuite_types::CryptoError;

fn check_bit_shift(bits: usize) -> Result<(), CryptoError> {
    if bits >= DIGIT_BITS {
        return Err(CryptoError::BnInvalidShift { amount: bits });
    }
    Ok(())
}

impl BigInt {
    /// Shift left in place by `bits < 32`.
    pub fn shl_bits(&mut self, bits: usize) -> Result<(), CryptoError> {
        check_bit_shift(bits)?;
        if bits == 0 {
            return Ok(());
        }
        self.expand(self.msd + 2)?;
        let mut carry = 0;
        for d in &mut self.digits[..=self.msd] {
            let next = *d >> (DIGIT_BITS - bits);
            *d = (*d << bits) | carry;
            carry = next;
        }
        if carry != 0 {
            self.msd += 1;
            self.digits[self.msd] = carry;
        }
        Ok(())
    }

    /// Shift right in place by `bits < 32`.
    pub fn shr_bits(&mut self, bits: usize) -> Result<(), CryptoError> {
        check_bit_shift(bits)?;
        if bits == 0 {
            return Ok(());
        }
        let used = self.used_digits();
        for i in 0..used {
            let high = if i + 1 < used {
                self.digits[i + 1] << (DIGIT_BITS - bits)
            } else {
                0
            };
            self.digits[i] = (self.digits[i] >> bits) | high;
        }
        self.clamp();
        Ok(())
    }

    /// Shift left by one bit in place.
    pub fn shl1(&mut self) -> Result<(), CryptoError> {
        self.shl_bits(1)
    }

    /// Shift right by one bit in place.
    pub fn shr1(&mut self) -> Result<(), CryptoError> {
        self.shr_bits(1)
    }

    /// Write `2 * self` into `out`.
    pub fn double(&self, out: &mut BigInt) -> Result<(), CryptoError> {
        out.copy_from(self)?;
        out.shl1()
    }

    /// Write `self / 2` (truncated) into `out`.
    pub fn halve(&self, out: &mut BigInt) -> Result<(), CryptoError> {
        out.copy_from(self)?;
        out.shr1()
    }

    /// Multiply by 2^32 in place.
    pub fn shl_digit(&mut self) -> Result<(), CryptoError> {
        self.shl_digits(1)
    }

    /// Divide by 2^32 in place, discarding the lowest digit.
    pub fn shr_digit(&mut self) {
        self.shr_digits(1)
    }

    /// Multiply by 2^(32 * n) in place.
    pub fn shl_digits(&mut self, n: usize) -> Result<(), CryptoError> {
        if n == 0 {
            return Ok(());
        }
        let used = self.used_digits();
        let grown = used.checked_add(n).ok_or(CryptoError::MemAllocFail)?;
        self.expand(grown)?;
        self.digits.copy_within(0..used, n);
        self.digits[..n].fill(0);
        self.msd += n;
        self.clamp();
        Ok(())
    }

    /// Divide by 2^(32 * n) in place; shifting out every digit leaves zero.
    pub fn shr_digits(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let used = self.used_digits();
        if n >= used {
            self.digits[..used].fill(0);
            self.msd = 0;
            return;
        }
        self.digits.copy_within(n..used, 0);
        self.digits[used - n..used].fill(0);
        self.msd -= n;
        self.clamp();
    }

    /// Write `self * 2^bits` into `out`.
    pub fn mul_pow_2(&self, bits: usize, out: &mut BigInt) -> Result<(), CryptoError> {
        out.copy_from(self)?;
        out.shl_digits(bits / DIGIT_BITS)?;
        out.shl_bits(bits % DIGIT_BITS)
    }

    /// Write `self / 2^bits` (truncated) into `out`.
    pub fn div_pow_2(&self, bits: usize, out: &mut BigInt) -> Result<(), CryptoError> {
        out.copy_from(self)?;
        out.shr_digits(bits / DIGIT_BITS);
        out.shr_bits(bits % DIGIT_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shl1_carries_into_new_digit() {
        let mut n = BigInt::from_digit(0x8000_0001);
        n.shl1().unwrap();
        assert_eq!(n.digits(), &[2, 1]);
    }

    #[test]
    fn test_shr1_clamps() {
        let mut n = BigInt::from_u64(0x1_0000_0000);
        n.shr1().unwrap();
        assert_eq!(n.msd(), 0);
        assert_eq!(n, BigInt::from_digit(0x8000_0000));
    }

    #[test]
    fn test_double_and_halve() {
        let a = BigInt::from_u64(0x1234_5678_9ABC);
        let mut out = BigInt::zero();
        a.double(&mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0x2468_ACF1_3578));
        a.halve(&mut out).unwrap();
        assert_eq!(out, BigInt::from_u64(0x091A_2B3C_4D5E));
    }

    #[test]
    fn test_shift_bits_out_of_range() {
        let mut n = BigInt::from_digit(1);
        assert_eq!(n.shl_bits(32), Err(CryptoError::BnInvalidShift { amount: 32 }));
        assert_eq!(n.shr_bits(40), Err(CryptoError::BnInvalidShift { amount: 40 }));
        n.shl_bits(0).unwrap();
        assert_eq!(n, BigInt::from_digit(1));
    }

    #[test]
    fn test_shl_bits_across_digits() {
        let mut n = BigInt::from_u64(0xF000_0000_F000_0000);
        n.shl_bits(4).unwrap();
        assert_eq!(n.digits(), &[0, 0x0000_000F, 0xF]);
        n.shr_bits(4).unwrap();
        assert_eq!(n, BigInt::from_u64(0xF000_0000_F000_0000));
    }

    #[test]
    fn test_digit_shifts() {
        let mut n = BigInt::from_digit(5);
        n.shl_digit().unwrap();
        assert_eq!(n.digits(), &[0, 5]);
        n.shl_digits(2).unwrap();
        assert_eq!(n.digits(), &[0, 0, 0, 5]);
        n.shr_digits(3);
        assert_eq!(n.digits(), &[5]);
        n.shr_digit();
        assert!(n.is_zero());
        assert_eq!(n.msd(), 0);
    }

    #[test]
    fn test_shl_digit_of_zero_stays_canonical() {
        let mut z = BigInt::zero();
        z.shl_digits(3).unwrap();
        assert_eq!(z.msd(), 0);
        assert!(z.is_zero());
    }

    #[test]
    fn test_shr_digits_past_end() {
        let mut n = BigInt::from_u64(u64::MAX);
        n.shr_digits(5);
        assert!(n.is_zero());
        assert_eq!(n.msd(), 0);
    }

    #[test]
    fn test_pow_2() {
        let a = BigInt::from_digit(3);
        let mut out = BigInt::zero();
        a.mul_pow_2(70, &mut out).unwrap();
        assert_eq!(out.bit_len(), 72);
        assert!(out.bit(70) && out.bit(71));

        let mut back = BigInt::zero();
        out.div_pow_2(70, &mut back).unwrap();
        assert_eq!(back, a);

        out.div_pow_2(71, &mut back).unwrap();
        assert_eq!(back, BigInt::from_digit(1));
    }

    #[test]
    fn test_shl_digits_overflow() {
        let mut n = BigInt::from_digit(5);
        assert_eq!(n.shl_digits(usize::MAX), Err(CryptoError::MemAllocFail));
        assert_eq!(n, BigInt::from_digit(5));
    }
}
