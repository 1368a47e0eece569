//! Modular reduction, multiplication, exponentiation, and division.
//!
//! Reduction is binary long division over word slices, so the same engine
//! handles `N`-word values and the double-width products produced by
//! modular multiplication.

use crate::fixed::{FixedUint, Word, WORD_BITS};
use crate::ops::{
    add_in_place, bit_len_words, cmp_words, shl_in_place, shr1_in_place, sub_in_place,
};
use gamal_types::CryptoError;

impl<const N: usize> FixedUint<N> {
    /// self mod m, with `0 <= result < m`. Errors with `BnZeroModulus`
    /// when `m` is zero.
    pub fn mod_reduce(&self, m: &Self) -> Result<Self, CryptoError> {
        if m.is_zero() {
            return Err(CryptoError::BnZeroModulus);
        }
        let mut r: Vec<Word> = self.words().to_vec();
        reduce_in_place(&mut r, m.words());
        let mut out = Self::zero();
        out.words_mut().copy_from_slice(&r);
        Ok(out)
    }

    /// (self * other) mod m.
    ///
    /// Word-by-word partial products (32-bit halves through
    /// [`widening_mul_u32`](Self::widening_mul_u32)) accumulate into a
    /// double-width running total, which is reduced once at the end.
    pub fn mod_mul(&self, other: &Self, m: &Self) -> Result<Self, CryptoError> {
        if m.is_zero() {
            return Err(CryptoError::BnZeroModulus);
        }
        let mut acc = self.mul_wide(other);
        reduce_in_place(&mut acc, m.words());
        let mut out = Self::zero();
        out.words_mut().copy_from_slice(&acc[..N]);
        Ok(out)
    }

    /// self^exp mod m by square-and-multiply, one modular multiplication
    /// per exponent bit plus one per set bit.
    pub fn mod_exp(&self, exp: &Self, m: &Self) -> Result<Self, CryptoError> {
        if m.is_zero() {
            return Err(CryptoError::BnZeroModulus);
        }
        let mut result = Self::from_u64(1).mod_reduce(m)?;
        let mut base = self.mod_reduce(m)?;
        let mut e = exp.clone();

        while e.bit_len() > 0 {
            if e.is_odd() {
                result = result.mod_mul(&base, m)?;
            }
            base = base.mod_mul(&base, m)?;
            e = e.shr(1);
        }
        Ok(result)
    }

    /// Binary long division: `(self / divisor, self mod divisor)`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), CryptoError> {
        if divisor.is_zero() {
            return Err(CryptoError::BnZeroModulus);
        }
        if self < divisor {
            return Ok((Self::zero(), self.clone()));
        }

        let bits = self.bit_len();
        let mut quotient = Self::zero();
        // One spare word: the remainder is < divisor before each shift but
        // may exceed the fixed width for one step afterwards.
        let mut rem: Vec<Word> = vec![0; N + 1];

        for i in (0..bits).rev() {
            shl_in_place(&mut rem, 1);
            rem[0] |= self.bit(i) as Word;
            if cmp_words(&rem, divisor.words()) != std::cmp::Ordering::Less {
                sub_in_place(&mut rem, divisor.words());
                quotient.set_bit(i);
            }
        }

        let mut r = Self::zero();
        r.words_mut().copy_from_slice(&rem[..N]);
        Ok((quotient, r))
    }

    /// Exact double-width product as a word vector of length `2N + 1`.
    ///
    /// This is the accumulation half of [`mod_mul`](Self::mod_mul): for
    /// each word of `other`, two half-word scalar products are combined,
    /// placed at the word's digit position, and summed.
    pub(crate) fn mul_wide(&self, other: &Self) -> Vec<Word> {
        let mut acc: Vec<Word> = vec![0; 2 * N + 1];
        let mut partial: Vec<Word> = vec![0; N + 2];
        let mut high_half: Vec<Word> = vec![0; N + 2];

        for i in 0..N {
            let w = other.words()[i];
            let (lo_prod, lo_carry) = self.widening_mul_u32((w & 0xFFFF_FFFF) as u32);
            let (hi_prod, hi_carry) = self.widening_mul_u32((w >> 32) as u32);

            partial[..N].copy_from_slice(lo_prod.words());
            partial[N] = lo_carry;
            partial[N + 1] = 0;

            high_half[..N].copy_from_slice(hi_prod.words());
            high_half[N] = hi_carry;
            high_half[N + 1] = 0;
            shl_in_place(&mut high_half, 32);

            let carry = add_in_place(&mut partial, &high_half);
            debug_assert!(!carry);

            // Adding at word offset i is the 64*i-bit digit shift.
            let carry = add_in_place(&mut acc[i..], &partial);
            debug_assert!(!carry);
        }
        acc
    }
}

/// Reduce `r` modulo `m` in place by binary long division.
///
/// `m` must be nonzero and occupy no more words than `r`. Align `m` to
/// `r`'s bit length, then walk the alignment back one bit at a time,
/// subtracting whenever the remainder is still >= the shifted modulus;
/// when the shift count reaches zero the remainder is < `m`.
pub(crate) fn reduce_in_place(r: &mut [Word], m: &[Word]) {
    let m_bits = bit_len_words(m);
    debug_assert!(m_bits > 0);
    let r_bits = bit_len_words(r);
    if r_bits < m_bits {
        return;
    }
    let diff = r_bits - m_bits;

    if diff == 0 {
        while cmp_words(r, m) != std::cmp::Ordering::Less {
            sub_in_place(r, m);
        }
        return;
    }

    debug_assert!(m.len() <= r.len());
    let mut aligned: Vec<Word> = vec![0; r.len()];
    aligned[..m.len()].copy_from_slice(m);
    shl_in_place(&mut aligned, diff);

    for _ in 0..diff {
        shr1_in_place(&mut aligned);
        while cmp_words(r, &aligned) != std::cmp::Ordering::Less {
            sub_in_place(r, &aligned);
        }
    }
}
