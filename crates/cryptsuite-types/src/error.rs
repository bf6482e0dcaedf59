/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("memory allocation failed")]
    MemAllocFail,
    #[error("invalid argument")]
    InvalidArg,

    // Buffer errors
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    // BigInt errors
    #[error("big integer: invalid shift amount {amount}")]
    BnInvalidShift { amount: usize },
    #[error("big integer: division by zero")]
    BnDivisionByZero,
    #[error("big integer: no modular inverse")]
    BnNoInverse,
    #[error("big integer: random generation failed")]
    BnRandGenFail,

    // MAC errors
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("invalid tag length")]
    InvalidTagLength,
}
