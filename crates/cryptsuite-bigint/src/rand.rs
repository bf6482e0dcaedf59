//! Random big integer generation using OS randomness.

use std::cmp::Ordering;

use crate::bigint::BigInt;
use cryptsuite_types::CryptoError;
use zeroize::Zeroizing;

/// Fill `bits.div_ceil(8)` bytes from the OS and mask the top byte to `bits`.
fn random_bytes(bits: usize) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let num_bytes = bits.div_ceil(8);
    let mut buf = Zeroizing::new(Vec::new());
    buf.try_reserve_exact(num_bytes)
        .map_err(|_| CryptoError::MemAllocFail)?;
    buf.resize(num_bytes, 0);
    getrandom::getrandom(&mut buf).map_err(|_| CryptoError::BnRandGenFail)?;

    let excess = num_bytes * 8 - bits;
    if excess > 0 {
        buf[0] &= 0xFF >> excess;
    }
    Ok(buf)
}

impl BigInt {
    /// Generate a random BigInt with exactly `bits` bits.
    ///
    /// If `odd` is true, the least significant bit is forced to 1.
    pub fn random(bits: usize, odd: bool) -> Result<BigInt, CryptoError> {
        if bits == 0 {
            return Ok(BigInt::zero());
        }

        let mut buf = random_bytes(bits)?;
        // Byte 0 is the most significant in big-endian layout.
        buf[0] |= 1u8 << ((bits - 1) % 8);

        let mut result = BigInt::from_bytes(&buf)?;
        if odd {
            result.digits[0] |= 1;
        }
        Ok(result)
    }

    /// Generate a random BigInt uniformly in `[1, upper)` by rejection sampling.
    pub fn random_range(upper: &BigInt) -> Result<BigInt, CryptoError> {
        if upper.cmp_vartime(&BigInt::from_digit(1)) != Ordering::Greater {
            return Err(CryptoError::InvalidArg);
        }

        let bits = upper.bit_len();
        loop {
            let buf = random_bytes(bits)?;
            let candidate = BigInt::from_bytes(&buf)?;
            if !candidate.is_zero() && candidate.cmp_ct(upper) == Ordering::Less {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bits() {
        let r = BigInt::random(128, false).unwrap();
        assert_eq!(r.bit_len(), 128);
    }

    #[test]
    fn test_random_odd() {
        let r = BigInt::random(128, true).unwrap();
        assert!(r.is_odd());
        assert_eq!(r.bit_len(), 128);
    }

    #[test]
    fn test_random_zero_bits() {
        assert!(BigInt::random(0, false).unwrap().is_zero());
    }

    #[test]
    fn test_random_range() {
        let upper = BigInt::from_u64(1000);
        for _ in 0..50 {
            let r = BigInt::random_range(&upper).unwrap();
            assert!(!r.is_zero());
            assert_eq!(r.cmp_ct(&upper), Ordering::Less);
        }
    }

    #[test]
    fn test_random_range_rejects_tiny_bounds() {
        assert_eq!(
            BigInt::random_range(&BigInt::zero()),
            Err(CryptoError::InvalidArg)
        );
        assert_eq!(
            BigInt::random_range(&BigInt::from_digit(1)),
            Err(CryptoError::InvalidArg)
        );
    }

    #[test]
    fn test_random_various_sizes() {
        for bits in [1, 7, 8, 15, 16, 31, 32, 63, 64, 65, 127, 128, 256] {
            let r = BigInt::random(bits, false).unwrap();
            assert_eq!(r.bit_len(), bits, "random({bits}) produced wrong bit_len");
        }
    }

    #[test]
    fn test_random_huge_bits_fails_cleanly() {
        assert_eq!(
            BigInt::random(usize::MAX, false).err(),
            Some(CryptoError::MemAllocFail)
        );
    }
}
