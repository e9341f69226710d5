//! The prime field `F_p`, held in Montgomery form.
//!
//! Every [`Fp`] value stores `a * R mod p` where `R = 2^256`, so that
//! multiplication reduces through [`Fp::mont_mul`] instead of a full
//! division. Conversion in and out of this representation is explicit
//! ([`Fp::to_mont`], [`Fp::from_mont`]); nothing in this module silently
//! mixes Montgomery and plain values.

use crate::error::{Result, Sm9CoreError};
use crate::z256::Z256;
use std::ops::{Add, Mul, Neg, Sub};

/// `p`, the 256-bit BN field characteristic.
pub const P: Z256 = Z256::from_limbs([
    0xe56f9b27e351457d,
    0x21f2934b1a7aeedb,
    0xd603ab4ff58ec745,
    0xb640000002a3a6f1,
]);

/// `p - 2`, the exponent used for Fermat inversion.
const P_MINUS_TWO: Z256 = Z256::from_limbs([
    0xe56f9b27e351457b,
    0x21f2934b1a7aeedb,
    0xd603ab4ff58ec745,
    0xb640000002a3a6f1,
]);

/// `-p^-1 mod 2^256`, the full Montgomery reduction constant consumed by
/// the CIOS step.
const P_PRIME: Z256 = Z256::from_limbs([
    0x892bc42c2f2ee42b,
    0x181ae39613c8dbaf,
    0x966a4b291522b137,
    0xafd2bac5558a13b3,
]);

/// `2^512 mod p`, used to enter Montgomery form.
const MODP_2E512: Z256 = Z256::from_limbs([
    0x27dea312b417e2d2,
    0x88f8105fae1a5d3f,
    0xe479b522d6706e7b,
    0x2ea795a656f62fbd,
]);

/// `R mod p`, i.e. the Montgomery encoding of `1`. Also equals `2^256 - p`,
/// so it doubles as the "negated `p`" constant used in add/sub carry
/// correction.
const MODP_MONT_ONE: Z256 = Z256::from_limbs([
    0x1a9064d81caeba83,
    0xde0d6cb4e5851124,
    0x29fc54b00a7138ba,
    0x49bffffffd5c590e,
]);
const NEG_P: Z256 = MODP_MONT_ONE;

/// `5 * R mod p`, the Montgomery encoding of the curve coefficient `b = 5`.
pub(crate) const MODP_MONT_FIVE: Z256 = Z256::from_limbs([
    0xb9f2c1e8c8c71995,
    0x125df8f246a377fc,
    0x25e650d049188d1c,
    0x043fffffed866f63,
]);

/// An element of `F_p`, stored in Montgomery form and always `< p`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp(pub(crate) Z256);

impl Fp {
    /// The additive identity.
    pub const ZERO: Self = Fp(Z256::ZERO);
    /// The multiplicative identity, i.e. Montgomery-encoded `1`.
    pub const ONE: Self = Fp(MODP_MONT_ONE);
    /// Montgomery-encoded `5`, the curve coefficient `b`.
    pub const FIVE: Self = Fp(MODP_MONT_FIVE);

    /// Builds an `Fp` directly from an already-Montgomery-form `Z256`.
    /// Callers are responsible for the `< p` invariant.
    pub(crate) const fn from_mont_limbs(z: Z256) -> Self {
        Fp(z)
    }

    fn add_mod(a: &Z256, b: &Z256) -> Z256 {
        let (mut r, c) = a.add_c(b);
        if c != 0 {
            r = r.add_c(&NEG_P).0;
        } else if r.cmp(&P) != std::cmp::Ordering::Less {
            r = r.sub_c(&P).0;
        }
        r
    }

    fn sub_mod(a: &Z256, b: &Z256) -> Z256 {
        let (mut r, borrow) = a.sub_c(b);
        if borrow != 0 {
            r = r.sub_c(&NEG_P).0;
        }
        r
    }

    /// `self + other (mod p)`.
    pub fn add(&self, other: &Self) -> Self {
        Fp(Self::add_mod(&self.0, &other.0))
    }

    /// `self - other (mod p)`.
    pub fn sub(&self, other: &Self) -> Self {
        Fp(Self::sub_mod(&self.0, &other.0))
    }

    /// `2 * self (mod p)`.
    pub fn dbl(&self) -> Self {
        self.add(self)
    }

    /// `3 * self (mod p)`.
    pub fn tri(&self) -> Self {
        self.dbl().add(self)
    }

    /// `-self (mod p)`.
    pub fn neg(&self) -> Self {
        Fp(P.sub_c(&self.0).0)
    }

    /// `self / 2 (mod p)`, exploiting that `p` is odd.
    pub fn div2(&self) -> Self {
        let mut r = self.0;
        let mut top_in = 0u64;
        if self.0.limbs()[0] & 1 != 0 {
            let (sum, c) = self.0.add_c(&P);
            r = sum;
            top_in = c;
        }
        let limbs = r.limbs();
        let out = [
            (limbs[0] >> 1) | ((limbs[1] & 1) << 63),
            (limbs[1] >> 1) | ((limbs[2] & 1) << 63),
            (limbs[2] >> 1) | ((limbs[3] & 1) << 63),
            (limbs[3] >> 1) | ((top_in & 1) << 63),
        ];
        Fp(Z256::from_limbs(out))
    }

    /// Montgomery multiplication: `self * other * R^-1 (mod p)`, via the
    /// CIOS reduction `t = low(a*b) * p' ; r = high(a*b + t*p)`, corrected
    /// by at most one conditional add/sub.
    pub fn mont_mul(&self, other: &Self) -> Self {
        let z = self.0.mul_wide(&other.0);
        let low = Z256::from_limbs([z[0], z[1], z[2], z[3]]);
        let t = low.mul_low(&P_PRIME);
        let t_wide = t.mul_wide(&P);

        let (sum, carry) = crate::z256::add512_c(&z, &t_wide);
        let mut r = Z256::from_limbs([sum[4], sum[5], sum[6], sum[7]]);

        if carry != 0 {
            r = r.add_c(&MODP_MONT_ONE).0;
        } else if r.cmp(&P) != std::cmp::Ordering::Less {
            r = r.sub_c(&P).0;
        }
        Fp(r)
    }

    /// `self^2` in Montgomery form.
    pub fn sqr(&self) -> Self {
        self.mont_mul(self)
    }

    /// Enters Montgomery form: `self * R (mod p)`, where `self` is a
    /// plain (non-Montgomery) residue.
    pub fn to_mont(plain: &Z256) -> Self {
        Fp(*plain).mont_mul(&Fp(MODP_2E512))
    }

    /// Leaves Montgomery form: `self * R^-1 (mod p)`.
    pub fn from_mont(&self) -> Z256 {
        self.mont_mul(&Fp(Z256::ONE)).0
    }

    /// Exponentiation by a plain (non-Montgomery) exponent, MSB-to-LSB
    /// square-and-multiply.
    pub fn pow(&self, exponent: &Z256) -> Self {
        let mut t = Fp::ONE;
        for limb in exponent.limbs().iter().rev() {
            let mut w = *limb;
            for _ in 0..64 {
                t = t.sqr();
                if w & 0x8000_0000_0000_0000 != 0 {
                    t = t.mont_mul(self);
                }
                w <<= 1;
            }
        }
        t
    }

    /// Multiplicative inverse via Fermat's little theorem (`self^(p-2)`).
    /// Callers must not call this on zero; it returns zero in that case,
    /// matching the reference behavior, but treats it as degenerate where
    /// this crate surfaces errors (see [`crate::fp2::Fp2::inv`] and up).
    pub fn inv(&self) -> Self {
        self.pow(&P_MINUS_TWO)
    }

    /// Decodes a big-endian 32-byte plain encoding into Montgomery form,
    /// rejecting non-canonical input.
    pub fn from_bytes(buf: &[u8; 32]) -> Result<Self> {
        let plain = Z256::from_bytes(buf);
        let r = Self::to_mont(&plain);
        if r.0.cmp(&P) != std::cmp::Ordering::Less {
            return Err(Sm9CoreError::NotCanonical);
        }
        Ok(r)
    }

    /// Encodes as a big-endian 32-byte plain encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.from_mont().to_bytes()
    }

    /// Decodes a 64-character big-endian hex string into Montgomery form.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let plain = Z256::from_hex(hex)?;
        if plain.cmp(&P) != std::cmp::Ordering::Less {
            return Err(Sm9CoreError::NotCanonical);
        }
        Ok(Self::to_mont(&plain))
    }

    /// Encodes as a 64-character lowercase big-endian hex string.
    pub fn to_hex(&self) -> String {
        self.from_mont().to_hex()
    }
}

impl Add for Fp {
    type Output = Fp;
    fn add(self, rhs: Self) -> Self::Output {
        Fp::add(&self, &rhs)
    }
}

impl Sub for Fp {
    type Output = Fp;
    fn sub(self, rhs: Self) -> Self::Output {
        Fp::sub(&self, &rhs)
    }
}

impl Mul for Fp {
    type Output = Fp;
    fn mul(self, rhs: Self) -> Self::Output {
        self.mont_mul(&rhs)
    }
}

impl Neg for Fp {
    type Output = Fp;
    fn neg(self) -> Self::Output {
        Fp::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mont_round_trip() {
        let plain = Z256::from_limbs([12345, 0, 0, 0]);
        let a = Fp::to_mont(&plain);
        assert_eq!(a.from_mont(), plain);
    }

    #[test]
    fn one_is_neutral_for_mul() {
        let plain = Z256::from_limbs([987654321, 0, 0, 0]);
        let a = Fp::to_mont(&plain);
        assert_eq!((a * Fp::ONE).from_mont(), plain);
    }

    #[test]
    fn add_sub_inverse() {
        let a = Fp::to_mont(&Z256::from_limbs([10, 0, 0, 0]));
        let b = Fp::to_mont(&Z256::from_limbs([3, 0, 0, 0]));
        assert_eq!((a.add(&b)).sub(&b), a);
    }

    #[test]
    fn inv_roundtrip() {
        let a = Fp::to_mont(&Z256::from_limbs([7, 0, 0, 0]));
        let inv = a.inv();
        assert_eq!((a * inv), Fp::ONE);
    }

    #[test]
    fn dbl_matches_add_self() {
        let a = Fp::to_mont(&Z256::from_limbs([42, 0, 0, 0]));
        assert_eq!(a.dbl(), a.add(&a));
    }

    #[test]
    fn div2_matches_half() {
        let a = Fp::to_mont(&Z256::from_limbs([10, 0, 0, 0]));
        let half = a.div2();
        assert_eq!(half.dbl(), a);
    }
}
