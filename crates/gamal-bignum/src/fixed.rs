//! Fixed-width unsigned integer type and basic accessors.

use gamal_types::CryptoError;
use zeroize::Zeroize;

/// Word type for the fixed-width representation (64-bit).
pub type Word = u64;
/// Double-width type for addition and multiplication intermediates.
pub(crate) type DoubleWord = u128;

/// Bits per word.
pub const WORD_BITS: usize = 64;

/// A nonnegative integer held as exactly `N` 64-bit words, least
/// significant word first.
///
/// The word count is a compile-time parameter and never changes: values in
/// `[0, 2^(64N))` are representable, there is no sign and no implicit
/// normalization, and conversions that would need more than `N` words fail
/// with [`CryptoError::BnOverflow`] instead of truncating. Storage is
/// zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct FixedUint<const N: usize> {
    /// Little-endian words (words[0] is the least significant).
    words: [Word; N],
}

impl<const N: usize> FixedUint<N> {
    /// The zero value.
    pub const fn zero() -> Self {
        Self { words: [0; N] }
    }

    /// Create a value from a `u64`.
    pub fn from_u64(value: u64) -> Self {
        let mut words = [0; N];
        words[0] = value;
        Self { words }
    }

    /// Create a value from a full little-endian word array.
    pub fn from_words(words: [Word; N]) -> Self {
        Self { words }
    }

    /// Create a value from big-endian bytes.
    ///
    /// Fails with `BnOverflow` if a nonzero byte falls beyond the fixed
    /// width; leading zero bytes are accepted.
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut words = [0; N];
        for (i, &byte) in bytes.iter().rev().enumerate() {
            let word_idx = i / 8;
            if word_idx >= N {
                if byte != 0 {
                    return Err(CryptoError::BnOverflow);
                }
                continue;
            }
            words[word_idx] |= (byte as Word) << ((i % 8) * 8);
        }
        Ok(Self { words })
    }

    /// Export to minimal-length big-endian bytes (a single zero byte for
    /// the zero value).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let bits = self.bit_len();
        if bits == 0 {
            return vec![0];
        }

        let num_bytes = bits.div_ceil(8);
        let mut bytes = vec![0u8; num_bytes];
        for i in 0..num_bytes {
            let word_idx = i / 8;
            let bit_pos = (i % 8) * 8;
            bytes[num_bytes - 1 - i] = (self.words[word_idx] >> bit_pos) as u8;
        }
        bytes
    }

    /// Return the number of significant bits; zero has bit length 0.
    pub fn bit_len(&self) -> usize {
        crate::ops::bit_len_words(&self.words)
    }

    /// Return the words as a slice.
    pub fn words(&self) -> &[Word; N] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [Word; N] {
        &mut self.words
    }

    /// Return true if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Return true if this value equals 1.
    pub fn is_one(&self) -> bool {
        self.words[0] == 1 && self.words[1..].iter().all(|&w| w == 0)
    }

    /// Return true if this value is odd.
    pub fn is_odd(&self) -> bool {
        self.words[0] & 1 == 1
    }

    /// Get bit `idx` (0-indexed from the LSB); bits beyond the width read
    /// as zero.
    pub fn bit(&self, idx: usize) -> bool {
        let word_idx = idx / WORD_BITS;
        if word_idx >= N {
            false
        } else {
            (self.words[word_idx] >> (idx % WORD_BITS)) & 1 == 1
        }
    }

    /// Set bit `idx` (0-indexed from the LSB).
    ///
    /// # Panics
    /// Panics if `idx` falls outside the fixed width.
    pub fn set_bit(&mut self, idx: usize) {
        assert!(idx < N * WORD_BITS, "bit index outside fixed width");
        self.words[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
    }
}

impl<const N: usize> std::fmt::Debug for FixedUint<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex = self
            .to_bytes_be()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>();
        write!(f, "FixedUint<{N}>(0x{hex})")
    }
}

impl<const N: usize> PartialOrd for FixedUint<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for FixedUint<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Most significant word down; widths always match.
        for i in (0..N).rev() {
            if self.words[i] != other.words[i] {
                return self.words[i].cmp(&other.words[i]);
            }
        }
        std::cmp::Ordering::Equal
    }
}
