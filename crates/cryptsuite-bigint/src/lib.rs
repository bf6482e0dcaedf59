#![forbid(unsafe_code)]
#![doc = "Constant-time-aware multi-precision integer arithmetic for cryptsuite."]

mod bigint;
mod bitwise;
mod ct;
mod div;
mod gcd;
mod ops;
mod rand;
mod shift;

pub use bigint::{BigInt, Digit, DoubleDigit, BASE, DIGIT_BITS, DIGIT_BYTES};
pub use ops::KARATSUBA_CUTOFF;
