//! The sextic twist `E'(F_{p^2}): y^2 = x^3 + 5u`, in Jacobian coordinates.

use crate::error::{Result, Sm9CoreError};
use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::z256::Z256;

/// The twist curve coefficient, `5u`.
const B: Fp2 = Fp2::new(Fp::ZERO, Fp::FIVE);

const PI1_C: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0x1a98dfbd4575299f,
    0x9ec8547b245c54fd,
    0xf51f5eac13df846c,
    0x9ef74015d5a16393,
]));
const PI2_C: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0xb626197dce4736ca,
    0x08296b3557ed0186,
    0x9c705db2fd91512a,
    0x1c753e748601c992,
]));

/// A point on `E'(F_{p^2})` in Jacobian coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwistPoint {
    pub x: Fp2,
    pub y: Fp2,
    pub z: Fp2,
}

/// The twist generator `P2`.
pub const P2: TwistPoint = TwistPoint {
    x: Fp2::new(
        Fp::from_mont_limbs(Z256::from_limbs([
            0x260226a68ce2da8f,
            0x7ee5645edbf6c06b,
            0xf8f57c82b1495444,
            0x61fcf018bc47c4d1,
        ])),
        Fp::from_mont_limbs(Z256::from_limbs([
            0xdb6db4822750a8a6,
            0x84c6135a5121f134,
            0x1874032f88791d41,
            0x905112f2b85f3a37,
        ])),
    ),
    y: Fp2::new(
        Fp::from_mont_limbs(Z256::from_limbs([
            0xc03f138f9171c24a,
            0x92fbab45a15a3ca7,
            0x2445561e2ff77cdb,
            0x108495e0c0f62ece,
        ])),
        Fp::from_mont_limbs(Z256::from_limbs([
            0xf7b82dac4c89bfbb,
            0x3706f3f6a49dc12f,
            0x1e29de93d3eef769,
            0x81e448c3c76a5d53,
        ])),
    ),
    z: Fp2::ONE,
};

impl TwistPoint {
    pub const INFINITY: Self = TwistPoint {
        x: Fp2::ONE,
        y: Fp2::ONE,
        z: Fp2::ZERO,
    };

    pub fn is_at_infinity(&self) -> bool {
        self.z == Fp2::ZERO
    }

    pub fn get_xy(&self) -> Result<(Fp2, Fp2)> {
        if self.is_at_infinity() {
            return Err(Sm9CoreError::DegenerateInput);
        }
        if self.z == Fp2::ONE {
            return Ok((self.x, self.y));
        }
        let z_inv = self.z.inv()?;
        let z_inv2 = z_inv.sqr();
        let x = self.x.mul(&z_inv2);
        let y = self.y.mul(&z_inv).mul(&z_inv2);
        Ok((x, y))
    }

    pub fn equ(&self, other: &Self) -> bool {
        let t1 = self.z.sqr();
        let t2 = other.z.sqr();
        let t3 = self.x.mul(&t2);
        let t4 = other.x.mul(&t1);
        if t3 != t4 {
            return false;
        }
        let t1 = t1.mul(&self.z);
        let t2 = t2.mul(&other.z);
        let t3 = self.y.mul(&t2);
        let t4 = other.y.mul(&t1);
        t3 == t4
    }

    pub fn is_on_curve(&self) -> bool {
        let (lhs, rhs) = if self.z == Fp2::ONE {
            let t0 = self.y.sqr();
            let t1 = self.x.sqr().mul(&self.x).add(&B);
            (t0, t1)
        } else {
            let t0 = self.x.sqr().mul(&self.x);
            let z2 = self.z.sqr();
            let z4 = z2.sqr();
            let t1 = z2.mul(&z4).mul(&B).add(&t0);
            (self.y.sqr(), t1)
        };
        lhs == rhs
    }

    pub fn neg(&self) -> Self {
        TwistPoint {
            x: self.x,
            y: self.y.neg(),
            z: self.z,
        }
    }

    pub fn dbl(&self) -> Self {
        if self.is_at_infinity() {
            return *self;
        }
        let t2 = self.x.sqr().tri();
        let mut y3 = self.y.dbl();
        let z3 = y3.mul(&self.z);
        y3 = y3.sqr();
        let t3 = y3.mul(&self.x);
        y3 = y3.sqr().div2();
        let mut x3 = t2.sqr();
        let t1 = t3.dbl();
        x3 = x3.sub(&t1);
        let t1 = t3.sub(&x3).mul(&t2);
        let y3 = t1.sub(&y3);
        TwistPoint { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition assuming `other` is affine (`Z == 1`).
    pub fn add(&self, other: &Self) -> Self {
        if other.is_at_infinity() {
            return *self;
        }
        if self.is_at_infinity() {
            return *other;
        }
        let x2 = other.x;
        let y2 = other.y;

        let t1 = self.z.sqr();
        let mut t2 = t1.mul(&self.z);
        let t1 = t1.mul(&x2);
        let t2 = t2.mul(&y2);
        let t1 = t1.sub(&self.x);
        let t2 = t2.sub(&self.y);

        if t1 == Fp2::ZERO {
            if t2 == Fp2::ZERO {
                return other.dbl();
            }
            return TwistPoint::INFINITY;
        }

        let z3 = self.z.mul(&t1);
        let t3 = t1.sqr();
        let t4 = t3.mul(&t1);
        let t3 = t3.mul(&self.x);
        let t1 = t3.dbl();
        let mut x3 = t2.sqr();
        x3 = x3.sub(&t1);
        x3 = x3.sub(&t4);
        let t3 = t3.sub(&x3);
        let t3 = t3.mul(&t2);
        let t4 = t4.mul(&self.y);
        let y3 = t3.sub(&t4);

        TwistPoint { x: x3, y: y3, z: z3 }
    }

    /// General (non-mixed) addition, for adding two points that can each
    /// carry an arbitrary `Z`.
    pub fn add_full(&self, other: &Self) -> Self {
        if other.is_at_infinity() {
            return *self;
        }
        if self.is_at_infinity() {
            return *other;
        }

        let t1 = self.z.sqr();
        let t2 = other.z.sqr();
        let t3 = other.x.mul(&t1);
        let t4 = self.x.mul(&t2);
        let t5 = t3.add(&t4);
        let t3 = t3.sub(&t4);
        let t1 = t1.mul(&self.z).mul(&other.y);
        let t2 = t2.mul(&other.z).mul(&self.y);
        let t6 = t1.add(&t2);
        let t1 = t1.sub(&t2);

        if t1 == Fp2::ZERO && t3 == Fp2::ZERO {
            return self.dbl();
        }
        if t1 == Fp2::ZERO && t6 == Fp2::ZERO {
            return TwistPoint::INFINITY;
        }

        let t6 = t1.sqr();
        let t7 = t3.mul(&self.z).mul(&other.z);
        let t8 = t3.sqr();
        let t5 = t5.mul(&t8);
        let t3 = t3.mul(&t8);
        let t4 = t4.mul(&t8);
        let t6 = t6.sub(&t5);
        let t4 = t4.sub(&t6);
        let t1 = t1.mul(&t4);
        let t2 = t2.mul(&t3);
        let t1 = t1.sub(&t2);

        TwistPoint { x: t6, y: t1, z: t7 }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add_full(&other.neg())
    }

    /// Unwindowed MSB-to-LSB double-and-add; the twist scalar multiplication
    /// sits off the hot path the base curve's Booth-windowed `mul` serves,
    /// so there is no precomputed table here.
    pub fn mul(&self, k: &Z256) -> Self {
        let mut q = TwistPoint::INFINITY;
        for bit in k.to_bits() {
            q = q.dbl();
            if bit == 1 {
                q = q.add_full(self);
            }
        }
        q
    }

    pub fn mul_generator(k: &Z256) -> Self {
        P2.mul(k)
    }

    /// The untwist-Frobenius-twist endomorphism `pi1 = pi`.
    pub fn pi1(&self) -> Self {
        TwistPoint {
            x: self.x.conjugate(),
            y: self.y.conjugate(),
            z: self.z.conjugate().mul_fp(&PI1_C),
        }
    }

    /// `pi^2`.
    pub fn pi2(&self) -> Self {
        TwistPoint {
            x: self.x,
            y: self.y,
            z: self.z.mul_fp(&PI2_C),
        }
    }

    /// `-pi^2`.
    pub fn neg_pi2(&self) -> Self {
        TwistPoint {
            x: self.x,
            y: self.y.neg(),
            z: self.z.mul_fp(&PI2_C),
        }
    }

    pub fn to_uncompressed_octets(&self) -> Result<[u8; 129]> {
        let (x, y) = self.get_xy()?;
        let mut out = [0u8; 129];
        out[0] = 0x04;
        out[1..65].copy_from_slice(&x.to_bytes());
        out[65..129].copy_from_slice(&y.to_bytes());
        Ok(out)
    }

    pub fn from_uncompressed_octets(octets: &[u8; 129]) -> Result<Self> {
        if octets[0] != 0x04 {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let x = Fp2::from_bytes(octets[1..65].try_into().unwrap())?;
        let y = Fp2::from_bytes(octets[65..129].try_into().unwrap())?;
        let p = TwistPoint { x, y, z: Fp2::ONE };
        if !p.is_on_curve() {
            return Err(Sm9CoreError::NotOnCurve);
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p2_is_on_curve() {
        assert!(P2.is_on_curve());
    }

    #[test]
    fn dbl_matches_add_self() {
        assert!(P2.dbl().equ(&P2.add_full(&P2)));
    }

    #[test]
    fn mul_two_matches_dbl() {
        let k = Z256::from_limbs([2, 0, 0, 0]);
        assert!(P2.mul(&k).equ(&P2.dbl()));
    }

    #[test]
    fn neg_sub_roundtrip() {
        let doubled = P2.dbl();
        assert!(doubled.sub(&P2).equ(&P2));
    }

    #[test]
    fn infinity_is_additive_identity() {
        assert!(P2.add_full(&TwistPoint::INFINITY).equ(&P2));
    }
}
