//! GF(2^128) multiplication and GHASH (NIST SP 800-38D) on big integers.
//!
//! Blocks are imported big-endian, so GCM bit `i` of a block (bit 0 is the
//! leftmost) is integer bit `127 - i`.

use std::mem;

use cryptsuite_bigint::BigInt;
use cryptsuite_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::provider::Mac;

/// GHASH block and tag size in bytes.
pub const GCM_BLOCK_SIZE: usize = 16;

const BLOCK_BITS: usize = 8 * GCM_BLOCK_SIZE;

/// Reduction constant `R = 0xE1 || 0^120`.
const R: [u8; GCM_BLOCK_SIZE] = [0xE1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Multiply two field elements: `x * y` in GF(2^128) with the GCM polynomial.
///
/// Bit-serial: for each bit of `x`, conditionally XOR `V` into the product,
/// then shift `V` right and fold in `R` when a bit falls off. The loop
/// branches on the operand bits and is not constant-time.
pub fn gf128_mul(
    x: &[u8; GCM_BLOCK_SIZE],
    y: &[u8; GCM_BLOCK_SIZE],
) -> Result<[u8; GCM_BLOCK_SIZE], CryptoError> {
    let x = BigInt::from_bytes(x)?;
    let mut v = BigInt::from_bytes(y)?;
    let r = BigInt::from_bytes(&R)?;
    let mut z = BigInt::with_capacity(GCM_BLOCK_SIZE / 4)?;
    let mut tmp = BigInt::with_capacity(GCM_BLOCK_SIZE / 4)?;

    for i in 0..BLOCK_BITS {
        if x.bit(BLOCK_BITS - 1 - i) {
            z.bit_xor(&v, &mut tmp)?;
            mem::swap(&mut z, &mut tmp);
        }
        let carry = v.bit(0);
        v.shr1()?;
        if carry {
            v.bit_xor(&r, &mut tmp)?;
            mem::swap(&mut v, &mut tmp);
        }
    }

    let mut out = [0u8; GCM_BLOCK_SIZE];
    z.to_bytes(&mut out, false)?;
    Ok(out)
}

/// Streaming GHASH keyed by the hash subkey `H`.
///
/// Input is processed in 16-byte blocks; a trailing partial block is
/// zero-padded at `finish`.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Ghash {
    h: [u8; GCM_BLOCK_SIZE],
    state: [u8; GCM_BLOCK_SIZE],
    buf: [u8; GCM_BLOCK_SIZE],
    buf_len: usize,
    keyed: bool,
}

impl Ghash {
    /// Create a GHASH instance from the hash subkey `H`.
    pub fn new(h: &[u8; GCM_BLOCK_SIZE]) -> Self {
        Ghash {
            h: *h,
            state: [0; GCM_BLOCK_SIZE],
            buf: [0; GCM_BLOCK_SIZE],
            buf_len: 0,
            keyed: true,
        }
    }

    fn process_block(&mut self, block: &[u8; GCM_BLOCK_SIZE]) -> Result<(), CryptoError> {
        for (s, b) in self.state.iter_mut().zip(block) {
            *s ^= b;
        }
        self.state = gf128_mul(&self.state, &self.h)?;
        Ok(())
    }
}

impl Mac for Ghash {
    fn output_size(&self) -> usize {
        GCM_BLOCK_SIZE
    }

    fn init(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        let h: &[u8; GCM_BLOCK_SIZE] = key.try_into().map_err(|_| {
            tracing::debug!(got = key.len(), "rejected GHASH subkey");
            CryptoError::InvalidKeyLength {
                expected: GCM_BLOCK_SIZE,
                got: key.len(),
            }
        })?;
        *self = Ghash::new(h);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if !self.keyed {
            return Err(CryptoError::InvalidArg);
        }
        let mut pos = 0;

        if self.buf_len > 0 {
            let want = GCM_BLOCK_SIZE - self.buf_len;
            if data.len() < want {
                self.buf[self.buf_len..self.buf_len + data.len()].copy_from_slice(data);
                self.buf_len += data.len();
                return Ok(());
            }
            self.buf[self.buf_len..].copy_from_slice(&data[..want]);
            let block = self.buf;
            self.process_block(&block)?;
            self.buf_len = 0;
            pos = want;
        }

        for chunk in data[pos..].chunks(GCM_BLOCK_SIZE) {
            match <&[u8; GCM_BLOCK_SIZE]>::try_from(chunk) {
                Ok(block) => self.process_block(block)?,
                Err(_) => {
                    self.buf[..chunk.len()].copy_from_slice(chunk);
                    self.buf_len = chunk.len();
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        if !self.keyed {
            return Err(CryptoError::InvalidArg);
        }
        if out.len() != GCM_BLOCK_SIZE {
            return Err(CryptoError::InvalidTagLength);
        }
        if self.buf_len > 0 {
            let mut block = [0u8; GCM_BLOCK_SIZE];
            block[..self.buf_len].copy_from_slice(&self.buf[..self.buf_len]);
            self.process_block(&block)?;
            self.buf_len = 0;
        }
        out.copy_from_slice(&self.state);
        Ok(())
    }

    fn reset(&mut self) {
        self.state.zeroize();
        self.buf.zeroize();
        self.buf_len = 0;
    }
}
