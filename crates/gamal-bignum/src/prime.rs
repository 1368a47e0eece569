//! Probabilistic primality testing.

use crate::fixed::FixedUint;
use gamal_types::CryptoError;

/// Small primes for trial division and Miller-Rabin witness bases.
const SMALL_PRIMES: [u64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

impl<const N: usize> FixedUint<N> {
    /// Miller-Rabin probable-prime test with small-prime trial division
    /// up front.
    ///
    /// `rounds` is the number of Miller-Rabin rounds; each uses the next
    /// small prime as its witness base.
    pub fn is_probably_prime(&self, rounds: usize) -> Result<bool, CryptoError> {
        if self.is_zero() || self.is_one() {
            return Ok(false);
        }

        for &p in &SMALL_PRIMES {
            let p_val = Self::from_u64(p);
            if *self == p_val {
                return Ok(true);
            }
            let (_, rem) = self.div_rem(&p_val)?;
            if rem.is_zero() {
                return Ok(false);
            }
        }

        // Write self - 1 as 2^r * d with d odd.
        let one = Self::from_u64(1);
        let (n_minus_one, _) = self.overflowing_sub(&one);

        let mut d = n_minus_one.clone();
        let mut r = 0usize;
        while !d.is_odd() {
            d = d.shr(1);
            r += 1;
        }

        for &witness in SMALL_PRIMES.iter().take(rounds) {
            let a = Self::from_u64(witness);
            if a >= *self {
                continue;
            }

            let mut x = a.mod_exp(&d, self)?;
            if x.is_one() || x == n_minus_one {
                continue;
            }

            let mut composite = true;
            for _ in 0..r - 1 {
                x = x.mod_mul(&x, self)?;
                if x == n_minus_one {
                    composite = false;
                    break;
                }
            }
            if composite {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
