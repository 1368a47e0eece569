//! Random fixed-width value generation.
//!
//! The randomness source is always injected: callers pass any
//! [`rand_core::RngCore`], an OS-backed generator in production or a
//! seeded one in tests. There is no process-wide generator here.

use crate::fixed::{FixedUint, WORD_BITS};
use gamal_types::CryptoError;
use rand_core::RngCore;

impl<const N: usize> FixedUint<N> {
    /// Random value with exactly `bits` significant bits.
    ///
    /// The most significant bit is forced so the bit length is exact; the
    /// least significant bit is forced when `odd`. Fails with `BnOverflow`
    /// when `bits` exceeds the fixed width.
    pub fn random<R: RngCore + ?Sized>(
        bits: usize,
        odd: bool,
        rng: &mut R,
    ) -> Result<Self, CryptoError> {
        if bits > N * WORD_BITS {
            return Err(CryptoError::BnOverflow);
        }
        if bits == 0 {
            return Ok(Self::zero());
        }

        let mut out = Self::zero();
        let whole_words = bits.div_ceil(WORD_BITS);
        for i in 0..whole_words {
            out.words_mut()[i] = rng.next_u64();
        }

        // Mask excess bits in the top word, then pin the MSB.
        let excess = whole_words * WORD_BITS - bits;
        if excess > 0 {
            out.words_mut()[whole_words - 1] &= u64::MAX >> excess;
        }
        out.set_bit(bits - 1);

        if odd {
            out.words_mut()[0] |= 1;
        }
        Ok(out)
    }

    /// Uniform random value in `[1, upper)`.
    ///
    /// Rejection sampling keeps the distribution uniform; `upper` must be
    /// at least 2.
    pub fn random_range<R: RngCore + ?Sized>(
        upper: &Self,
        rng: &mut R,
    ) -> Result<Self, CryptoError> {
        if upper.is_zero() || upper.is_one() {
            return Err(CryptoError::InvalidArg);
        }

        let bits = upper.bit_len();
        let whole_words = bits.div_ceil(WORD_BITS);
        let excess = whole_words * WORD_BITS - bits;

        loop {
            let mut candidate = Self::zero();
            for i in 0..whole_words {
                candidate.words_mut()[i] = rng.next_u64();
            }
            if excess > 0 {
                candidate.words_mut()[whole_words - 1] &= u64::MAX >> excess;
            }
            if !candidate.is_zero() && candidate < *upper {
                return Ok(candidate);
            }
        }
    }
}
