#![forbid(unsafe_code)]
#![doc = "Common error types shared across the gamal-rs crates."]

pub mod error;

pub use error::*;
