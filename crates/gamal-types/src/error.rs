/// Cryptographic operation errors.
///
/// Word-level primitives never produce these; they report carries, borrows,
/// and overflow words through their return values. Everything above that
/// level surfaces failures here and callers propagate them with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// An argument violated an operation's contract (e.g. a generator
    /// outside `[2, p)`, or a private exponent outside `[1, p-2]`).
    #[error("invalid argument")]
    InvalidArg,

    // Fixed-width big number errors
    /// A value needs more words than the configured fixed width provides
    /// and the operation defines no truncation semantics.
    #[error("big number: value exceeds the fixed width")]
    BnOverflow,
    /// A zero modulus was passed to a modular operation.
    #[error("big number: zero modulus in modular operation")]
    BnZeroModulus,
    /// No modular inverse exists (the operand shares a factor with the
    /// modulus).
    #[error("big number: no modular inverse")]
    BnNoInverse,
    /// The bounded search for a probable prime was exhausted.
    #[error("big number: prime generation failed")]
    BnPrimeGenFail,

    // ElGamal errors
    /// A plaintext message was not strictly less than the modulus.
    #[error("elgamal: message out of range")]
    MsgOutOfRange,
}
