//! Poly1305 one-time MAC (RFC 8439 §2.5) on big integers.
//!
//! Poly1305 is little-endian while the big integer engine imports and
//! exports big-endian, so every block and key half is byte-reversed at the
//! boundary.

use std::mem;

use cryptsuite_bigint::BigInt;
use cryptsuite_types::CryptoError;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::provider::Mac;

/// Poly1305 key size in bytes.
pub const POLY1305_KEY_SIZE: usize = 32;
/// Poly1305 tag size in bytes.
pub const POLY1305_TAG_SIZE: usize = 16;

const BLOCK_SIZE: usize = 16;

/// The prime 2^130 - 5, big-endian.
const P: [u8; 17] = [
    0x03, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfb,
];

/// Import little-endian bytes.
fn from_le(bytes: &[u8]) -> Result<BigInt, CryptoError> {
    let mut be = bytes.to_vec();
    be.reverse();
    let n = BigInt::from_bytes(&be);
    be.zeroize();
    n
}

/// Streaming Poly1305 state.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    r: BigInt,
    s: BigInt,
    p: BigInt,
    acc: BigInt,
    buf: [u8; BLOCK_SIZE],
    buf_len: usize,
    keyed: bool,
}

impl Poly1305 {
    /// Create a Poly1305 instance from a 32-byte one-time key.
    pub fn new(key: &[u8; POLY1305_KEY_SIZE]) -> Result<Self, CryptoError> {
        // Clamp r in byte space (RFC 8439 §2.5)
        let mut r_bytes = [0u8; BLOCK_SIZE];
        r_bytes.copy_from_slice(&key[..BLOCK_SIZE]);
        r_bytes[3] &= 15;
        r_bytes[7] &= 15;
        r_bytes[11] &= 15;
        r_bytes[15] &= 15;
        r_bytes[4] &= 252;
        r_bytes[8] &= 252;
        r_bytes[12] &= 252;

        let r = from_le(&r_bytes);
        r_bytes.zeroize();

        Ok(Poly1305 {
            r: r?,
            s: from_le(&key[BLOCK_SIZE..])?,
            p: BigInt::from_bytes(&P)?,
            acc: BigInt::zero(),
            buf: [0; BLOCK_SIZE],
            buf_len: 0,
            keyed: true,
        })
    }

    /// An instance with no key; `init` must be called before use.
    pub fn unkeyed() -> Self {
        Poly1305 {
            r: BigInt::zero(),
            s: BigInt::zero(),
            p: BigInt::zero(),
            acc: BigInt::zero(),
            buf: [0; BLOCK_SIZE],
            buf_len: 0,
            keyed: false,
        }
    }

    /// One-shot tag computation.
    pub fn mac(
        key: &[u8; POLY1305_KEY_SIZE],
        data: &[u8],
    ) -> Result<[u8; POLY1305_TAG_SIZE], CryptoError> {
        let mut poly = Poly1305::new(key)?;
        poly.update(data)?;
        let mut tag = [0u8; POLY1305_TAG_SIZE];
        poly.finish(&mut tag)?;
        Ok(tag)
    }

    /// Finish and compare against `expected` in constant time.
    pub fn verify(&mut self, expected: &[u8]) -> Result<bool, CryptoError> {
        if expected.len() != POLY1305_TAG_SIZE {
            return Err(CryptoError::InvalidTagLength);
        }
        let mut tag = [0u8; POLY1305_TAG_SIZE];
        self.finish(&mut tag)?;
        let ok: bool = tag.ct_eq(expected).into();
        tag.zeroize();
        Ok(ok)
    }

    /// Absorb one block of up to 16 bytes: `acc = (acc + n) * r mod p`,
    /// where `n` is the block with a 0x01 byte appended.
    fn process_block(&mut self, block: &[u8]) -> Result<(), CryptoError> {
        let mut padded = [0u8; BLOCK_SIZE + 1];
        padded[..block.len()].copy_from_slice(block);
        padded[block.len()] = 0x01;
        let n = from_le(&padded[..=block.len()]);
        padded.zeroize();
        let n = n?;

        let mut sum = BigInt::with_capacity(self.p.used_digits() + 1)?;
        let mut prod = BigInt::zero();
        self.acc.add(&n, &mut sum)?;
        sum.mul(&self.r, &mut prod)?;
        prod.mod_reduce(&self.p, &mut sum)?;
        mem::swap(&mut self.acc, &mut sum);
        Ok(())
    }
}

impl Mac for Poly1305 {
    fn output_size(&self) -> usize {
        POLY1305_TAG_SIZE
    }

    fn init(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        let key: &[u8; POLY1305_KEY_SIZE] = key.try_into().map_err(|_| {
            tracing::debug!(got = key.len(), "rejected Poly1305 key");
            CryptoError::InvalidKeyLength {
                expected: POLY1305_KEY_SIZE,
                got: key.len(),
            }
        })?;
        *self = Poly1305::new(key)?;
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if !self.keyed {
            return Err(CryptoError::InvalidArg);
        }
        let mut pos = 0;

        // Process buffered data first
        if self.buf_len > 0 {
            let want = BLOCK_SIZE - self.buf_len;
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

        // Process full 16-byte blocks
        while pos + BLOCK_SIZE <= data.len() {
            self.process_block(&data[pos..pos + BLOCK_SIZE])?;
            pos += BLOCK_SIZE;
        }

        // Buffer remainder
        if pos < data.len() {
            let remaining = data.len() - pos;
            self.buf[..remaining].copy_from_slice(&data[pos..]);
            self.buf_len = remaining;
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        if !self.keyed {
            return Err(CryptoError::InvalidArg);
        }
        if out.len() != POLY1305_TAG_SIZE {
            return Err(CryptoError::InvalidTagLength);
        }
        if self.buf_len > 0 {
            let block = self.buf;
            self.process_block(&block[..self.buf_len])?;
            self.buf_len = 0;
        }

        // tag = (acc + s) mod 2^128, little-endian
        let mut sum = BigInt::zero();
        let mut tag = BigInt::zero();
        self.acc.add(&self.s, &mut sum)?;
        sum.mod_pow_2(8 * POLY1305_TAG_SIZE, &mut tag)?;
        tag.to_bytes(out, false)?;
        out.reverse();
        Ok(())
    }

    fn reset(&mut self) {
        self.acc.set_zero();
        self.buf.zeroize();
        self.buf_len = 0;
    }
}
