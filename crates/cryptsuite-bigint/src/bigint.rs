//! Big integer type, storage management and byte conversion.

use cryptsuite_types::CryptoError;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Digit type for the base-2^32 representation.
pub type Digit = u32;
/// Double-width accumulator for carries, borrows and products.
pub type DoubleDigit = u64;

/// Bits per digit.
pub const DIGIT_BITS: usize = 32;
/// Bytes per digit.
pub const DIGIT_BYTES: usize = 4;
/// Largest digit value; every digit is masked with it after arithmetic.
pub const BASE: DoubleDigit = 0xFFFF_FFFF;

/// A heap-allocated, non-negative big integer that is zeroized on drop.
///
/// Internally represented as a little-endian array of `u32` digits
/// (`digits[0]` is the least significant). Only `digits[..=msd]` carry the
/// value; slots above `msd` are spare capacity and may hold stale data.
#[derive(Clone)]
pub struct BigInt {
    /// Allocated digit slots; `digits.len()` is the capacity.
    pub(crate) digits: Vec<Digit>,
    /// Index of the most significant digit in logical use.
    pub(crate) msd: usize,
}

/// Allocate `len` zero-filled digits, reporting allocator failure.
pub(crate) fn alloc_digits(len: usize) -> Result<Vec<Digit>, CryptoError> {
    let mut digits = Vec::new();
    digits
        .try_reserve_exact(len)
        .map_err(|_| CryptoError::MemAllocFail)?;
    digits.resize(len, 0);
    Ok(digits)
}

impl BigInt {
    /// Create a zero-valued BigInt with a single digit of capacity.
    pub fn zero() -> Self {
        Self {
            digits: vec![0],
            msd: 0,
        }
    }

    /// Create a zero-valued BigInt with room for `capacity` digits.
    ///
    /// A capacity of zero is rounded up to one so that `msd < capacity`.
    pub fn with_capacity(capacity: usize) -> Result<Self, CryptoError> {
        Ok(Self {
            digits: alloc_digits(capacity.max(1))?,
            msd: 0,
        })
    }

    /// Create a BigInt holding a single digit.
    pub fn from_digit(value: Digit) -> Self {
        Self {
            digits: vec![value],
            msd: 0,
        }
    }

    /// Create a BigInt from a `u64` value.
    pub fn from_u64(value: u64) -> Self {
        let mut bn = Self {
            digits: vec![value as Digit, (value >> DIGIT_BITS) as Digit],
            msd: 1,
        };
        bn.clamp();
        bn
    }

    /// Create a BigInt from big-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut bn = Self::with_capacity(bytes.len().div_ceil(DIGIT_BYTES))?;
        bn.set_bytes(bytes)?;
        Ok(bn)
    }

    /// Wipe and release the digit buffer.
    ///
    /// Dropping a BigInt does the same; this spells the release point out.
    pub fn free(mut self) {
        self.zeroize();
    }

    /// Grow the digit buffer to at least `min_capacity` digits.
    ///
    /// Capacity never shrinks. The old buffer is wiped after its digits
    /// have been copied into the new one.
    pub fn expand(&mut self, min_capacity: usize) -> Result<(), CryptoError> {
        if self.digits.len() >= min_capacity {
            return Ok(());
        }
        let mut grown = alloc_digits(min_capacity)?;
        grown[..self.digits.len()].copy_from_slice(&self.digits);
        self.digits.zeroize();
        self.digits = grown;
        Ok(())
    }

    /// Copy the value of `src` into `self`, growing `self` if needed.
    pub fn copy_from(&mut self, src: &BigInt) -> Result<(), CryptoError> {
        let used = src.used_digits();
        self.expand(used)?;
        self.digits[..used].copy_from_slice(&src.digits[..used]);
        self.msd = src.msd;
        Ok(())
    }

    /// Fallible clone that only allocates the digits in use.
    pub fn try_clone(&self) -> Result<BigInt, CryptoError> {
        let mut bn = Self::with_capacity(self.used_digits())?;
        bn.copy_from(self)?;
        Ok(bn)
    }

    /// Lower `msd` past high-order zero digits.
    ///
    /// Runs in time that depends only on `msd`, not on where the highest
    /// non-zero digit sits: every position is visited and the decrement is
    /// masked once a non-zero digit has been seen.
    pub fn clamp(&mut self) {
        let mut found = Choice::from(0u8);
        let mut msd = self.msd;
        for i in (1..=self.msd).rev() {
            found |= !self.digits[i].ct_eq(&0);
            msd -= usize::from((!found).unwrap_u8());
        }
        self.msd = msd;
    }

    /// Clear every allocated digit and reset to zero.
    pub fn set_zero(&mut self) {
        self.zeroize();
    }

    /// Reset to zero, then store `value` in the lowest digit.
    pub fn set_digit(&mut self, value: Digit) {
        self.set_zero();
        self.digits[0] = value;
    }

    /// Zero-extend so that `msd` becomes at least `msd`.
    pub fn pad_zero(&mut self, msd: usize) -> Result<(), CryptoError> {
        if self.msd >= msd {
            return Ok(());
        }
        self.expand(msd + 1)?;
        self.digits[self.msd + 1..=msd].fill(0);
        self.msd = msd;
        Ok(())
    }

    /// Number of allocated digit slots.
    pub fn capacity(&self) -> usize {
        self.digits.len()
    }

    /// Index of the most significant digit in use.
    pub fn msd(&self) -> usize {
        self.msd
    }

    /// Number of digits in use (`msd + 1`).
    pub fn used_digits(&self) -> usize {
        self.msd + 1
    }

    /// The digits in use, least significant first.
    pub fn digits(&self) -> &[Digit] {
        &self.digits[..=self.msd]
    }

    /// Digit `i` of the value, or zero past `msd`.
    pub(crate) fn digit_at(&self, i: usize) -> Digit {
        if i <= self.msd {
            self.digits[i]
        } else {
            0
        }
    }

    /// Replace the value with `src` (least significant first) and clamp.
    pub(crate) fn load_digits(&mut self, src: &[Digit]) -> Result<(), CryptoError> {
        if src.is_empty() {
            self.set_zero();
            return Ok(());
        }
        self.expand(src.len())?;
        self.digits[..src.len()].copy_from_slice(src);
        self.msd = src.len() - 1;
        self.clamp();
        Ok(())
    }

    /// Split into `(low, high)` at digit index `at`.
    pub(crate) fn split_at_digit(&self, at: usize) -> Result<(BigInt, BigInt), CryptoError> {
        let used = self.digits();
        let at = at.min(used.len());
        let mut low = BigInt::with_capacity(at)?;
        low.load_digits(&used[..at])?;
        let mut high = BigInt::with_capacity(used.len() - at)?;
        high.load_digits(&used[at..])?;
        Ok((low, high))
    }

    /// Return the number of significant bits (not constant-time).
    pub fn bit_len(&self) -> usize {
        for i in (0..=self.msd).rev() {
            if self.digits[i] != 0 {
                return i * DIGIT_BITS + (DIGIT_BITS - self.digits[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Return true if bit `idx` (0 = least significant) is set.
    pub fn bit(&self, idx: usize) -> bool {
        (self.digit_at(idx / DIGIT_BITS) >> (idx % DIGIT_BITS)) & 1 == 1
    }

    /// Set bit `idx`, growing the value if needed.
    pub fn set_bit(&mut self, idx: usize) -> Result<(), CryptoError> {
        let digit_idx = idx / DIGIT_BITS;
        self.pad_zero(digit_idx)?;
        self.digits[digit_idx] |= 1 << (idx % DIGIT_BITS);
        Ok(())
    }

    /// Return true if this number is odd.
    pub fn is_odd(&self) -> bool {
        self.digits[0] & 1 == 1
    }

    /// Return true if this number equals 1 (constant-time in the digits).
    pub fn is_one(&self) -> bool {
        bool::from(self.ct_eq(&BigInt::from_digit(1)))
    }

    /// Load big-endian bytes, replacing the current value.
    ///
    /// Bytes are packed four per digit from the right, so a leading
    /// remainder shorter than a digit ends up in the most significant digit.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<(), CryptoError> {
        let used = bytes.len().div_ceil(DIGIT_BYTES).max(1);
        self.expand(used)?;
        self.set_zero();
        for (i, chunk) in bytes.rchunks(DIGIT_BYTES).enumerate() {
            self.digits[i] = chunk.iter().fold(0, |d, &b| (d << 8) | Digit::from(b));
        }
        self.msd = used - 1;
        self.clamp();
        Ok(())
    }

    /// Write the value as big-endian bytes into `out`.
    ///
    /// `out` must hold at least `used_digits() * 4` bytes. The value is
    /// right-aligned and zero-padded on the left, and the full length is
    /// returned. With `ignore_leading_zero`, leading zero bytes are dropped
    /// instead: the significant bytes start at `out[0]`, the tail is zeroed
    /// and the shorter length is returned (at least 1).
    pub fn to_bytes(&self, out: &mut [u8], ignore_leading_zero: bool) -> Result<usize, CryptoError> {
        let need = self.used_digits() * DIGIT_BYTES;
        if out.len() < need {
            return Err(CryptoError::BufferTooSmall {
                need,
                got: out.len(),
            });
        }

        out.fill(0);
        let pad = out.len() - need;
        for (i, d) in self.digits().iter().rev().enumerate() {
            let pos = pad + i * DIGIT_BYTES;
            out[pos..pos + DIGIT_BYTES].copy_from_slice(&d.to_be_bytes());
        }

        if !ignore_leading_zero {
            return Ok(out.len());
        }
        let skip = out
            .iter()
            .take_while(|&&b| b == 0)
            .count()
            .min(out.len() - 1);
        out.copy_within(skip.., 0);
        let len = out.len() - skip;
        out[len..].fill(0);
        Ok(len)
    }

    /// Export to minimal big-endian bytes (a single zero byte for zero).
    pub fn to_bytes_vec(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .digits()
            .iter()
            .rev()
            .flat_map(|d| d.to_be_bytes())
            .collect();
        let skip = bytes
            .iter()
            .take_while(|&&b| b == 0)
            .count()
            .min(bytes.len() - 1);
        bytes.drain(..skip);
        bytes
    }
}

/// Wipes every digit slot but keeps the allocation, so the value stays a
/// usable zero.
impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.digits.as_mut_slice().zeroize();
        self.msd = 0;
    }
}

impl Drop for BigInt {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for BigInt {}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Digit> for BigInt {
    fn from(value: Digit) -> Self {
        Self::from_digit(value)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl std::fmt::Debug for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex = self
            .to_bytes_vec()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>();
        write!(f, "BigInt(0x{hex})")
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for BigInt {}
