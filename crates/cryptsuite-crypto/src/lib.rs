#![forbid(unsafe_code)]
#![doc = "MAC algorithms computed with the cryptsuite big integer engine."]

// Core traits
pub mod provider;

// MAC algorithms
#[cfg(feature = "gcm")]
pub mod gcm;
#[cfg(feature = "poly1305")]
pub mod poly1305;
