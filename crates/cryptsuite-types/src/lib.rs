#![forbid(unsafe_code)]
#![doc = "Common error codes shared by the cryptsuite crates."]

pub mod error;

pub use error::*;
