//! GCD and modular inverse over the full fixed width.

use crate::fixed::FixedUint;
use crate::ops::bit_len_words;
use gamal_types::CryptoError;

/// A Bézout coefficient tracked as sign and magnitude; the magnitudes in
/// the extended Euclidean recurrence never exceed the modulus, so they fit
/// the fixed width.
struct Coeff<const N: usize> {
    mag: FixedUint<N>,
    negative: bool,
}

impl<const N: usize> FixedUint<N> {
    /// Greatest common divisor (Euclidean algorithm).
    pub fn gcd(&self, other: &Self) -> Result<Self, CryptoError> {
        if self.is_zero() && other.is_zero() {
            return Err(CryptoError::InvalidArg);
        }
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }

        let (mut a, mut b) = if self >= other {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };
        loop {
            let (_, rem) = a.div_rem(&b)?;
            if rem.is_zero() {
                return Ok(b);
            }
            a = b;
            b = rem;
        }
    }

    /// self^(-1) mod m, via the extended Euclidean algorithm with
    /// multi-word division.
    ///
    /// Returns `BnNoInverse` when `gcd(self, m) != 1`; a negative Bézout
    /// coefficient is normalized by adding `m`.
    pub fn mod_inv(&self, m: &Self) -> Result<Self, CryptoError> {
        if m.is_zero() || m.is_one() {
            return Err(CryptoError::InvalidArg);
        }

        let mut old_r = self.mod_reduce(m)?;
        if old_r.is_zero() {
            return Err(CryptoError::BnNoInverse);
        }
        let mut r = m.clone();

        // old_r = old_s * self (mod m) is the loop invariant; only the
        // s-coefficients are tracked.
        let mut old_s = Coeff {
            mag: Self::from_u64(1),
            negative: false,
        };
        let mut s = Coeff {
            mag: Self::zero(),
            negative: false,
        };

        while !r.is_zero() {
            let (quotient, remainder) = old_r.div_rem(&r)?;
            old_r = r;
            r = remainder;

            let new_s = signed_sub(&old_s, &mul_coeff(&quotient, &s)?);
            old_s = s;
            s = new_s;
        }

        if !old_r.is_one() {
            return Err(CryptoError::BnNoInverse);
        }

        let inv = if old_s.negative {
            let (d, borrow) = m.overflowing_sub(&old_s.mag);
            debug_assert!(!borrow);
            d
        } else {
            old_s.mag
        };
        inv.mod_reduce(m)
    }
}

/// quotient * coeff, sign carried through from `coeff`.
///
/// The full product is formed double-width and checked back into the fixed
/// width; the Euclidean recurrence bounds it by the modulus, so overflow
/// here means a caller contract violation.
fn mul_coeff<const N: usize>(
    quotient: &FixedUint<N>,
    coeff: &Coeff<N>,
) -> Result<Coeff<N>, CryptoError> {
    let wide = quotient.mul_wide(&coeff.mag);
    if bit_len_words(&wide[N..]) != 0 {
        return Err(CryptoError::BnOverflow);
    }
    let mut mag = FixedUint::zero();
    mag.words_mut().copy_from_slice(&wide[..N]);
    Ok(Coeff {
        mag,
        negative: coeff.negative,
    })
}

/// a - b in sign-and-magnitude form.
fn signed_sub<const N: usize>(a: &Coeff<N>, b: &Coeff<N>) -> Coeff<N> {
    if a.negative == b.negative {
        if a.mag >= b.mag {
            let (mag, _) = a.mag.overflowing_sub(&b.mag);
            Coeff {
                mag,
                negative: a.negative,
            }
        } else {
            let (mag, _) = b.mag.overflowing_sub(&a.mag);
            Coeff {
                mag,
                negative: !a.negative,
            }
        }
    } else {
        let (mag, carry) = a.mag.overflowing_add(&b.mag);
        debug_assert!(!carry);
        Coeff {
            mag,
            negative: a.negative,
        }
    }
}
