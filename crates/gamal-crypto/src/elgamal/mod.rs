//! ElGamal encryption over a fixed-width prime field.
//!
//! One generic implementation covers every configured width: the word
//! count `N` is a type parameter, so a 1024-bit deployment
//! (`FixedUint<16>`) and a small test width share the same key
//! generation, encryption, and decryption code.
//!
//! Every randomized operation takes an injected [`rand_core::RngCore`];
//! there is no process-wide generator. Encryption draws a fresh ephemeral
//! exponent on every call; reusing one across messages breaks semantic
//! security.

use gamal_bignum::FixedUint;
use gamal_types::CryptoError;
use rand_core::RngCore;

/// ElGamal domain parameters: prime modulus `p` and generator `g`.
///
/// Shared and immutable once created.
#[derive(Clone, Debug)]
pub struct ElGamalParams<const N: usize> {
    p: FixedUint<N>,
    g: FixedUint<N>,
}

impl<const N: usize> ElGamalParams<N> {
    /// Generate fresh parameters: a safe prime `p = 2q + 1` of exactly
    /// `bits` bits and `g = 4`, which generates the order-`q` subgroup of
    /// quadratic residues.
    ///
    /// Slow for large bit sizes; `bits` must lie in `[32, 64N]`.
    pub fn generate<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> Result<Self, CryptoError> {
        if !(32..=N * 64).contains(&bits) {
            return Err(CryptoError::InvalidArg);
        }
        let p = generate_safe_prime(bits, rng)?;
        Ok(Self {
            p,
            g: FixedUint::from_u64(4),
        })
    }

    /// Use externally supplied parameters.
    ///
    /// `p` must be odd and greater than 2, and `g` must lie in `[2, p)`;
    /// primality of `p` is the caller's responsibility.
    pub fn from_values(p: FixedUint<N>, g: FixedUint<N>) -> Result<Self, CryptoError> {
        if !p.is_odd() || p <= FixedUint::from_u64(2) {
            return Err(CryptoError::InvalidArg);
        }
        if g < FixedUint::from_u64(2) || g >= p {
            return Err(CryptoError::InvalidArg);
        }
        Ok(Self { p, g })
    }

    /// The prime modulus.
    pub fn p(&self) -> &FixedUint<N> {
        &self.p
    }

    /// The generator.
    pub fn g(&self) -> &FixedUint<N> {
        &self.g
    }
}

/// An ElGamal key pair: private exponent `x` and public value
/// `y = g^x mod p`.
///
/// Immutable after creation; generating again produces an entirely new
/// pair. The private exponent's storage is wiped on drop (every
/// `FixedUint` zeroizes itself).
pub struct ElGamalKeyPair<const N: usize> {
    params: ElGamalParams<N>,
    x: FixedUint<N>,
    y: FixedUint<N>,
}

impl<const N: usize> std::fmt::Debug for ElGamalKeyPair<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the private exponent.
        f.debug_struct("ElGamalKeyPair")
            .field("bits", &self.params.p.bit_len())
            .finish()
    }
}

/// An ElGamal ciphertext pair, each component in `[0, p-1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext<const N: usize> {
    pub c1: FixedUint<N>,
    pub c2: FixedUint<N>,
}

impl<const N: usize> ElGamalKeyPair<N> {
    /// Generate parameters and a key pair in one step.
    pub fn generate<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> Result<Self, CryptoError> {
        let params = ElGamalParams::generate(bits, rng)?;
        Self::from_params(&params, rng)
    }

    /// Generate a key pair for existing parameters: draw `x` uniformly
    /// from `[1, p-2]` and compute `y = g^x mod p`.
    pub fn from_params<R: RngCore + ?Sized>(
        params: &ElGamalParams<N>,
        rng: &mut R,
    ) -> Result<Self, CryptoError> {
        let one = FixedUint::from_u64(1);
        let (p_minus_1, _) = params.p.overflowing_sub(&one);
        // random_range is uniform on [1, p-1), i.e. [1, p-2].
        let x = FixedUint::random_range(&p_minus_1, rng)?;
        let y = params.g.mod_exp(&x, &params.p)?;
        Ok(Self {
            params: params.clone(),
            x,
            y,
        })
    }

    /// Build a key pair from a known private exponent, for deterministic
    /// known-answer tests. `x` must lie in `[1, p-2]`.
    pub fn from_private_exponent(
        params: &ElGamalParams<N>,
        x: FixedUint<N>,
    ) -> Result<Self, CryptoError> {
        let one = FixedUint::from_u64(1);
        let (p_minus_1, _) = params.p.overflowing_sub(&one);
        if x.is_zero() || x >= p_minus_1 {
            return Err(CryptoError::InvalidArg);
        }
        let y = params.g.mod_exp(&x, &params.p)?;
        Ok(Self {
            params: params.clone(),
            x,
            y,
        })
    }

    /// The domain parameters this pair was generated for.
    pub fn params(&self) -> &ElGamalParams<N> {
        &self.params
    }

    /// The public value `y = g^x mod p`.
    pub fn public_value(&self) -> &FixedUint<N> {
        &self.y
    }

    /// Encrypt a message `m` with `0 <= m < p` (zero is legal).
    ///
    /// A fresh ephemeral exponent `k` is drawn uniformly from `[1, p-2]`
    /// on every call; `c1 = g^k mod p`, `c2 = m * y^k mod p`.
    pub fn encrypt<R: RngCore + ?Sized>(
        &self,
        m: &FixedUint<N>,
        rng: &mut R,
    ) -> Result<Ciphertext<N>, CryptoError> {
        if *m >= self.params.p {
            return Err(CryptoError::MsgOutOfRange);
        }
        let one = FixedUint::from_u64(1);
        let (p_minus_1, _) = self.params.p.overflowing_sub(&one);
        let k = FixedUint::random_range(&p_minus_1, rng)?;
        self.encrypt_with_ephemeral(m, &k)
    }

    fn encrypt_with_ephemeral(
        &self,
        m: &FixedUint<N>,
        k: &FixedUint<N>,
    ) -> Result<Ciphertext<N>, CryptoError> {
        let c1 = self.params.g.mod_exp(k, &self.params.p)?;
        let shared = self.y.mod_exp(k, &self.params.p)?;
        let c2 = m.mod_mul(&shared, &self.params.p)?;
        Ok(Ciphertext { c1, c2 })
    }

    /// Decrypt a ciphertext: `s = c1^x mod p`, then
    /// `m = c2 * s^(-1) mod p`. Fails with `BnNoInverse` if the shared
    /// secret has no inverse (possible only for invalid parameters).
    pub fn decrypt(&self, ct: &Ciphertext<N>) -> Result<FixedUint<N>, CryptoError> {
        let s = ct.c1.mod_exp(&self.x, &self.params.p)?;
        let s_inv = s.mod_inv(&self.params.p)?;
        ct.c2.mod_mul(&s_inv, &self.params.p)
    }
}

/// Generate a safe prime `p = 2q + 1` with both halves Miller-Rabin
/// tested, exactly `bits` bits long.
fn generate_safe_prime<const N: usize, R: RngCore + ?Sized>(
    bits: usize,
    rng: &mut R,
) -> Result<FixedUint<N>, CryptoError> {
    let one = FixedUint::from_u64(1);
    let mr_rounds = if bits >= 512 { 5 } else { 10 };

    for _ in 0..10_000 {
        // random pins the top bit, so q has exactly bits-1 bits and
        // p = 2q + 1 exactly bits.
        let q = FixedUint::<N>::random(bits - 1, true, rng)?;

        if !q.is_probably_prime(mr_rounds)? {
            continue;
        }

        // p = 2q + 1
        let (p, carry) = q.shl(1).overflowing_add(&one);
        debug_assert!(!carry);
        if p.is_probably_prime(mr_rounds)? {
            return Ok(p);
        }
    }

    Err(CryptoError::BnPrimeGenFail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    type U256 = FixedUint<4>;

    fn small_params() -> ElGamalParams<4> {
        ElGamalParams::from_values(U256::from_u64(23), U256::from_u64(5)).unwrap()
    }

    /// 2^256 - 189, the largest 256-bit prime.
    fn wide_prime() -> U256 {
        let max = U256::from_words([u64::MAX; 4]);
        let (p, _) = max.overflowing_sub(&U256::from_u64(188));
        p
    }

    #[test]
    fn test_known_answer_scenario() {
        // p=23, g=5, x=6: y = 5^6 mod 23 = 8.
        let kp =
            ElGamalKeyPair::from_private_exponent(&small_params(), U256::from_u64(6)).unwrap();
        assert_eq!(*kp.public_value(), U256::from_u64(8));

        // m=10 with ephemeral k=3: c1 = 5^3 mod 23 = 10,
        // c2 = 10 * 8^3 mod 23 = 10 * 6 mod 23 = 14.
        let ct = kp
            .encrypt_with_ephemeral(&U256::from_u64(10), &U256::from_u64(3))
            .unwrap();
        assert_eq!(ct.c1, U256::from_u64(10));
        assert_eq!(ct.c2, U256::from_u64(14));

        assert_eq!(kp.decrypt(&ct).unwrap(), U256::from_u64(10));
    }

    #[test]
    fn test_roundtrip_small_modulus() {
        let mut rng = ChaCha20Rng::seed_from_u64(101);
        let kp = ElGamalKeyPair::from_params(&small_params(), &mut rng).unwrap();
        // Every legal message, zero included.
        for m in 0u64..23 {
            let m = U256::from_u64(m);
            let ct = kp.encrypt(&m, &mut rng).unwrap();
            assert_eq!(kp.decrypt(&ct).unwrap(), m);
        }
    }

    #[test]
    fn test_roundtrip_wide_modulus() {
        let mut rng = ChaCha20Rng::seed_from_u64(202);
        let params = ElGamalParams::from_values(wide_prime(), U256::from_u64(5)).unwrap();
        let kp = ElGamalKeyPair::from_params(&params, &mut rng).unwrap();

        for _ in 0..5 {
            let m = U256::random(255, false, &mut rng).unwrap();
            let ct = kp.encrypt(&m, &mut rng).unwrap();
            assert_eq!(kp.decrypt(&ct).unwrap(), m);
        }

        // Boundary message p - 1.
        let (m, _) = wide_prime().overflowing_sub(&U256::from_u64(1));
        let ct = kp.encrypt(&m, &mut rng).unwrap();
        assert_eq!(kp.decrypt(&ct).unwrap(), m);
    }

    #[test]
    fn test_message_out_of_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(303);
        let kp = ElGamalKeyPair::from_params(&small_params(), &mut rng).unwrap();
        for m in [23u64, 24, 1000] {
            assert!(matches!(
                kp.encrypt(&U256::from_u64(m), &mut rng),
                Err(CryptoError::MsgOutOfRange)
            ));
        }
    }

    #[test]
    fn test_fresh_ephemeral_every_call() {
        let mut rng = ChaCha20Rng::seed_from_u64(404);
        let params = ElGamalParams::from_values(wide_prime(), U256::from_u64(5)).unwrap();
        let kp = ElGamalKeyPair::from_params(&params, &mut rng).unwrap();

        let m = U256::from_u64(42);
        let ct1 = kp.encrypt(&m, &mut rng).unwrap();
        let ct2 = kp.encrypt(&m, &mut rng).unwrap();
        assert_ne!(ct1, ct2, "same message must not produce the same ciphertext");
        assert_eq!(kp.decrypt(&ct1).unwrap(), m);
        assert_eq!(kp.decrypt(&ct2).unwrap(), m);
    }

    #[test]
    fn test_regeneration_is_a_new_pair() {
        let mut rng = ChaCha20Rng::seed_from_u64(505);
        let params = ElGamalParams::from_values(wide_prime(), U256::from_u64(5)).unwrap();
        let kp1 = ElGamalKeyPair::from_params(&params, &mut rng).unwrap();
        let kp2 = ElGamalKeyPair::from_params(&params, &mut rng).unwrap();
        assert_ne!(kp1.public_value(), kp2.public_value());
    }

    #[test]
    fn test_from_values_validation() {
        // Even, too small, or misplaced generator
        assert!(ElGamalParams::from_values(U256::from_u64(24), U256::from_u64(5)).is_err());
        assert!(ElGamalParams::from_values(U256::from_u64(1), U256::from_u64(5)).is_err());
        assert!(ElGamalParams::from_values(U256::from_u64(23), U256::from_u64(1)).is_err());
        assert!(ElGamalParams::from_values(U256::from_u64(23), U256::from_u64(23)).is_err());
    }

    #[test]
    fn test_private_exponent_range() {
        let params = small_params();
        assert!(ElGamalKeyPair::from_private_exponent(&params, U256::zero()).is_err());
        // x = p - 2 is the last legal value; p - 1 is not.
        assert!(ElGamalKeyPair::from_private_exponent(&params, U256::from_u64(21)).is_ok());
        assert!(ElGamalKeyPair::from_private_exponent(&params, U256::from_u64(22)).is_err());
    }

    #[test]
    fn test_generated_safe_prime_params() {
        // 64-bit single-word width keeps generation fast in debug builds.
        let mut rng = ChaCha20Rng::seed_from_u64(606);
        let params = ElGamalParams::<1>::generate(64, &mut rng).unwrap();

        assert_eq!(params.p().bit_len(), 64);
        assert!(params.p().is_probably_prime(10).unwrap());
        // q = (p - 1) / 2 must also be prime, one bit narrower than p.
        let (p_minus_1, _) = params.p().overflowing_sub(&FixedUint::from_u64(1));
        let q = p_minus_1.shr(1);
        assert_eq!(q.bit_len(), 63);
        assert!(q.is_probably_prime(10).unwrap());

        let kp = ElGamalKeyPair::from_params(&params, &mut rng).unwrap();
        let m = FixedUint::<1>::from_u64(0x1234_5678);
        let ct = kp.encrypt(&m, &mut rng).unwrap();
        assert_eq!(kp.decrypt(&ct).unwrap(), m);
    }

    #[test]
    fn test_generate_rejects_bad_widths() {
        let mut rng = ChaCha20Rng::seed_from_u64(707);
        assert!(ElGamalParams::<4>::generate(16, &mut rng).is_err());
        assert!(ElGamalParams::<4>::generate(300, &mut rng).is_err());
    }

    #[test]
    #[ignore] // Slow in debug mode; run with: cargo test --release -- --ignored
    fn test_generate_256_bit_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(808);
        let kp = ElGamalKeyPair::<4>::generate(256, &mut rng).unwrap();
        let m = U256::from_u64(0xDEAD_BEEF);
        let ct = kp.encrypt(&m, &mut rng).unwrap();
        assert_eq!(kp.decrypt(&ct).unwrap(), m);
    }

    #[test]
    fn test_debug_hides_private_exponent() {
        let kp =
            ElGamalKeyPair::from_private_exponent(&small_params(), U256::from_u64(6)).unwrap();
        assert_eq!(format!("{kp:?}"), "ElGamalKeyPair { bits: 5 }");
    }
}
