#![forbid(unsafe_code)]
#![doc = "Fixed-width big number arithmetic for the gamal-rs ElGamal implementation."]

mod fixed;
mod gcd;
mod modular;
mod ops;
mod prime;
mod rand;

pub use fixed::{FixedUint, Word, WORD_BITS};
