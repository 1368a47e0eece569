#![forbid(unsafe_code)]
#![doc = "ElGamal public-key encryption over fixed-width integers."]

pub mod elgamal;

pub use elgamal::{Ciphertext, ElGamalKeyPair, ElGamalParams};
