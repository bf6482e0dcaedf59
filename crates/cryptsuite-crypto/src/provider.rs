//! Trait-based provider interface for MAC algorithms.

use cryptsuite_types::CryptoError;

/// A Message Authentication Code (MAC) algorithm.
pub trait Mac: Send + Sync {
    /// The output size of the MAC in bytes.
    fn output_size(&self) -> usize;

    /// Initialize the MAC with a key.
    fn init(&mut self, key: &[u8]) -> Result<(), CryptoError>;

    /// Feed data into the MAC computation.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Finalize and write the MAC value to `out`.
    /// The length of `out` must equal `output_size()`.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError>;

    /// Reset the MAC state for reuse with the same key.
    fn reset(&mut self);

    /// One-shot MAC computation.
    fn compute(&mut self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.init(key)?;
        self.update(data)?;
        let mut out = vec![0u8; self.output_size()];
        self.finish(&mut out)?;
        Ok(out)
    }
}
