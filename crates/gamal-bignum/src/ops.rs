//! Word-level arithmetic primitives.
//!
//! Nothing here returns a `Result`: carries, borrows, and overflow words
//! are reported through the return values and interpreted by the caller.

use crate::fixed::{DoubleWord, FixedUint, Word, WORD_BITS};

const HALF_MASK: Word = 0xFFFF_FFFF;

impl<const N: usize> FixedUint<N> {
    /// self + other, with the carry out of the fixed width.
    ///
    /// A true carry means the mathematical sum equals
    /// `result + 2^(64N)`.
    pub fn overflowing_add(&self, other: &Self) -> (Self, bool) {
        let mut out = Self::zero();
        let mut carry: Word = 0;
        for i in 0..N {
            let sum = self.words()[i] as DoubleWord
                + other.words()[i] as DoubleWord
                + carry as DoubleWord;
            out.words_mut()[i] = sum as Word;
            carry = (sum >> WORD_BITS) as Word;
        }
        (out, carry != 0)
    }

    /// self - other, with the final borrow.
    ///
    /// A true borrow means `self < other` and the result is the wrapped
    /// value `2^(64N) + (self - other)`, not the mathematical difference.
    pub fn overflowing_sub(&self, other: &Self) -> (Self, bool) {
        let mut out = Self::zero();
        let mut borrow: Word = 0;
        for i in 0..N {
            let (d1, b1) = self.words()[i].overflowing_sub(other.words()[i]);
            let (d2, b2) = d1.overflowing_sub(borrow);
            out.words_mut()[i] = d2;
            borrow = (b1 as Word) | (b2 as Word);
        }
        (out, borrow != 0)
    }

    /// self * s for a 32-bit scalar.
    ///
    /// The exact product occupies `N+1` words; the low `N` words come back
    /// as a value and the overflow word separately, so nothing is lost.
    /// Each word of `self` is split into 32-bit halves so no intermediate
    /// product can overflow a word.
    pub fn widening_mul_u32(&self, s: u32) -> (Self, Word) {
        let mut out = Self::zero();
        let mut carry: Word = 0;
        for i in 0..N {
            let w = self.words()[i];
            let lo = (w & HALF_MASK) * s as Word + carry;
            let hi = (w >> 32) * s as Word + (lo >> 32);
            out.words_mut()[i] = (hi << 32) | (lo & HALF_MASK);
            carry = hi >> 32;
        }
        (out, carry)
    }

    /// Logical shift left by an arbitrary bit count.
    ///
    /// Vacated low words and bits are zero-filled; bits pushed past the
    /// top of the fixed width are dropped.
    pub fn shl(&self, bits: usize) -> Self {
        if bits >= N * WORD_BITS {
            return Self::zero();
        }
        let mut out = self.clone();
        shl_in_place(out.words_mut(), bits);
        out
    }

    /// Logical shift right by an arbitrary bit count; vacated high words
    /// and bits are zero-filled.
    pub fn shr(&self, bits: usize) -> Self {
        if bits >= N * WORD_BITS {
            return Self::zero();
        }
        let word_shift = bits / WORD_BITS;
        let bit_shift = bits % WORD_BITS;

        let mut out = Self::zero();
        for i in 0..N - word_shift {
            out.words_mut()[i] = self.words()[i + word_shift];
        }
        if bit_shift > 0 {
            let mut carry: Word = 0;
            for i in (0..N).rev() {
                let w = out.words()[i];
                out.words_mut()[i] = (w >> bit_shift) | carry;
                carry = w << (WORD_BITS - bit_shift);
            }
        }
        out
    }
}

/// Bit length of a little-endian word slice; 0 for a zero value.
pub(crate) fn bit_len_words(words: &[Word]) -> usize {
    for i in (0..words.len()).rev() {
        if words[i] != 0 {
            return i * WORD_BITS + (WORD_BITS - words[i].leading_zeros() as usize);
        }
    }
    0
}

/// Compare two little-endian word slices; missing high words read as zero.
pub(crate) fn cmp_words(a: &[Word], b: &[Word]) -> std::cmp::Ordering {
    let max_len = a.len().max(b.len());
    for i in (0..max_len).rev() {
        let av = a.get(i).copied().unwrap_or(0);
        let bv = b.get(i).copied().unwrap_or(0);
        if av != bv {
            return av.cmp(&bv);
        }
    }
    std::cmp::Ordering::Equal
}

/// a += b in place, with `b.len() <= a.len()`. Returns the carry out of
/// `a`'s top word.
pub(crate) fn add_in_place(a: &mut [Word], b: &[Word]) -> bool {
    debug_assert!(b.len() <= a.len());
    let mut carry: Word = 0;
    for (i, word) in a.iter_mut().enumerate() {
        let bv = b.get(i).copied().unwrap_or(0);
        let sum = *word as DoubleWord + bv as DoubleWord + carry as DoubleWord;
        *word = sum as Word;
        carry = (sum >> WORD_BITS) as Word;
    }
    carry != 0
}

/// a -= b in place, with `b.len() <= a.len()`. Caller guarantees `a >= b`.
pub(crate) fn sub_in_place(a: &mut [Word], b: &[Word]) {
    debug_assert!(b.len() <= a.len());
    let mut borrow: Word = 0;
    for (i, word) in a.iter_mut().enumerate() {
        let bv = b.get(i).copied().unwrap_or(0);
        let (d1, b1) = word.overflowing_sub(bv);
        let (d2, b2) = d1.overflowing_sub(borrow);
        *word = d2;
        borrow = (b1 as Word) | (b2 as Word);
    }
    debug_assert_eq!(borrow, 0, "sub_in_place underflow");
}

/// Shift a word slice left in place by an arbitrary bit count; bits pushed
/// past the top word are dropped.
pub(crate) fn shl_in_place(v: &mut [Word], bits: usize) {
    let word_shift = bits / WORD_BITS;
    let bit_shift = bits % WORD_BITS;

    if word_shift >= v.len() {
        v.fill(0);
        return;
    }
    if word_shift > 0 {
        for i in (word_shift..v.len()).rev() {
            v[i] = v[i - word_shift];
        }
        v[..word_shift].fill(0);
    }
    if bit_shift > 0 {
        let mut carry: Word = 0;
        for word in v.iter_mut() {
            let w = *word;
            *word = (w << bit_shift) | carry;
            carry = w >> (WORD_BITS - bit_shift);
        }
    }
}

/// Shift a word slice right in place by one bit.
pub(crate) fn shr1_in_place(v: &mut [Word]) {
    let mut carry: Word = 0;
    for word in v.iter_mut().rev() {
        let w = *word;
        *word = (w >> 1) | (carry << (WORD_BITS - 1));
        carry = w & 1;
    }
}
