//! The full extension tower's top: `F_{p^12} = F_{p^4}[w] / (w^3 - v)`.
//!
//! An element `(c0, c1, c2)` represents `c0 + c1*w + c2*w^2`. This is the
//! field the optimal-ate pairing's output, and the Miller loop's running
//! value, both live in.

use crate::error::{Result, Sm9CoreError};
use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::fp4::Fp4;
use crate::z256::Z256;

/// `beta`, the `F_{p^2}` constant scaling the conjugated `v`-coefficient
/// in the degree-3 and degree-9 Frobenius maps.
const BETA: Fp2 = Fp2::new(
    Fp::from_mont_limbs(Z256::from_limbs([
        0x39b4ef0f3ee72529,
        0xdb043bf508582782,
        0xb8554ab054ac91e3,
        0x9848eec25498cab5,
    ])),
    Fp::ZERO,
);

const ALPHA1: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0x1a98dfbd4575299f,
    0x9ec8547b245c54fd,
    0xf51f5eac13df846c,
    0x9ef74015d5a16393,
]));
const ALPHA2: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0xb626197dce4736ca,
    0x08296b3557ed0186,
    0x9c705db2fd91512a,
    0x1c753e748601c992,
]));
const ALPHA3: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0x39b4ef0f3ee72529,
    0xdb043bf508582782,
    0xb8554ab054ac91e3,
    0x9848eec25498cab5,
]));
const ALPHA4: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0x81054fcd94e9c1c4,
    0x4c0e91cb8ce2df3e,
    0x4877b452e8aedfb4,
    0x88f53e748b491776,
]));
const ALPHA5: Fp = Fp::from_mont_limbs(Z256::from_limbs([
    0x048baa79dcc34107,
    0x5e2e7ac4fe76c161,
    0x99399754365bd4bc,
    0xaf91aeac819b0e13,
]));

/// An element of `F_{p^12}`: `c0 + c1*w + c2*w^2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp12 {
    pub c0: Fp4,
    pub c1: Fp4,
    pub c2: Fp4,
}

impl Fp12 {
    pub const ZERO: Self = Fp12 {
        c0: Fp4::ZERO,
        c1: Fp4::ZERO,
        c2: Fp4::ZERO,
    };
    pub const ONE: Self = Fp12 {
        c0: Fp4::ONE,
        c1: Fp4::ZERO,
        c2: Fp4::ZERO,
    };

    pub const fn new(c0: Fp4, c1: Fp4, c2: Fp4) -> Self {
        Fp12 { c0, c1, c2 }
    }

    pub fn add(&self, other: &Self) -> Self {
        Fp12::new(
            self.c0.add(&other.c0),
            self.c1.add(&other.c1),
            self.c2.add(&other.c2),
        )
    }

    pub fn sub(&self, other: &Self) -> Self {
        Fp12::new(
            self.c0.sub(&other.c0),
            self.c1.sub(&other.c1),
            self.c2.sub(&other.c2),
        )
    }

    pub fn dbl(&self) -> Self {
        Fp12::new(self.c0.dbl(), self.c1.dbl(), self.c2.dbl())
    }

    pub fn neg(&self) -> Self {
        Fp12::new(self.c0.neg(), self.c1.neg(), self.c2.neg())
    }

    /// Karatsuba-style product over three `F_{p^4}` limbs, reducing the
    /// `w^3` overflow terms through [`Fp4::a_mul_v`].
    pub fn mul(&self, other: &Self) -> Self {
        let m0 = self.c0.mul(&other.c0);
        let m1 = self.c1.mul(&other.c1);
        let m2 = self.c2.mul(&other.c2);

        let k0 = self.c1.add(&self.c2);
        let k1 = other.c1.add(&other.c2);
        let t = k0.mul(&k1).sub(&m1).sub(&m2).a_mul_v();
        let r0 = t.add(&m0);

        let k0 = self.c0.add(&self.c2);
        let k1 = other.c0.add(&other.c2);
        let t = k0.mul(&k1).sub(&m0).sub(&m2);
        let r2 = t.add(&m1);

        let k0 = self.c0.add(&self.c1);
        let k1 = other.c0.add(&other.c1);
        let t = k0.mul(&k1).sub(&m0).sub(&m1);
        let r1 = t.add(&m2.a_mul_v());

        Fp12::new(r0, r1, r2)
    }

    /// Chung-Hasan SQR3-style squaring, faster than the componentwise
    /// squares-and-cross-terms expansion.
    pub fn sqr(&self) -> Self {
        let h0 = self.c0.sqr();
        let h1 = self.c2.sqr();
        let s0 = self.c2.add(&self.c0);

        let t = s0.sub(&self.c1);
        let s1 = t.sqr();

        let t = s0.add(&self.c1);
        let s0 = t.sqr();

        let mut s2 = self.c1.mul(&self.c2);
        s2 = s2.dbl();

        let s3 = s0.add(&s1).div2();

        let t = s3.sub(&h1);
        let h2 = t.sub(&h0);

        let h1 = h1.a_mul_v();
        let h1 = h1.add(&s0).sub(&s2).sub(&s3);

        let h0 = h0.add(&s2.a_mul_v());

        Fp12::new(h0, h1, h2)
    }

    pub fn inv(&self) -> Result<Self> {
        if self.c2 == Fp4::ZERO {
            let mut k = self.c0.sqr().mul(&self.c0);
            let t = self.c1.sqr_v().mul(&self.c1);
            k = k.add(&t);
            let k = k.inv()?;

            let r2 = self.c1.sqr().mul(&k);
            let r1 = self.c0.mul(&self.c1).mul(&k).neg();
            let r0 = self.c0.sqr().mul(&k);
            return Ok(Fp12::new(r0, r1, r2));
        }

        let t0 = self.c1.sqr().sub(&self.c0.mul(&self.c2));
        let t1 = self.c0.mul(&self.c1).sub(&self.c2.sqr_v());
        let t2 = self.c0.sqr().sub(&self.c1.mul_v(&self.c2));

        let mut t3 = t1.sqr();
        let r0 = t0.mul(&t2);
        t3 = t3.sub(&r0);
        let t3 = t3.inv()?;
        let t3 = self.c2.mul(&t3);

        let r0 = t2.mul(&t3);
        let r1 = t1.mul(&t3).neg();
        let r2 = t0.mul(&t3);

        Ok(Fp12::new(r0, r1, r2))
    }

    /// Exponentiation by a plain (non-Montgomery) exponent strictly below
    /// the curve order minus one, MSB-to-LSB square-and-multiply.
    pub fn pow(&self, exponent: &Z256) -> Self {
        let mut t = Fp12::ONE;
        for limb in exponent.limbs().iter().rev() {
            let mut w = *limb;
            for _ in 0..64 {
                t = t.sqr();
                if w & 0x8000_0000_0000_0000 != 0 {
                    t = t.mul(self);
                }
                w <<= 1;
            }
        }
        t
    }

    /// The `p`-power Frobenius.
    pub fn frobenius(&self) -> Self {
        let ra0 = self.c0.b0.conjugate();
        let ra1 = self.c0.b1.conjugate().mul_fp(&ALPHA3);

        let rb0 = self.c1.b0.conjugate().mul_fp(&ALPHA1);
        let rb1 = self.c1.b1.conjugate().mul_fp(&ALPHA4);

        let rc0 = self.c2.b0.conjugate().mul_fp(&ALPHA2);
        let rc1 = self.c2.b1.conjugate().mul_fp(&ALPHA5);

        Fp12::new(Fp4::new(ra0, ra1), Fp4::new(rb0, rb1), Fp4::new(rc0, rc1))
    }

    /// The `p^2`-power Frobenius.
    pub fn frobenius2(&self) -> Self {
        let a = self.c0.frobenius2();
        let b = self.c1.frobenius2().mul_fp(&ALPHA2);
        let c = self.c2.frobenius2().mul_fp(&ALPHA4);
        Fp12::new(a, b, c)
    }

    /// The `p^3`-power Frobenius.
    pub fn frobenius3(&self) -> Self {
        let ra0 = self.c0.b0.conjugate();
        let ra1 = self.c0.b1.conjugate().mul(&BETA).neg();

        let rb0 = self.c1.b0.conjugate().mul(&BETA);
        let rb1 = self.c1.b1.conjugate();

        let rc0 = self.c2.b0.conjugate().neg();
        let rc1 = self.c2.b1.conjugate().mul(&BETA);

        Fp12::new(Fp4::new(ra0, ra1), Fp4::new(rb0, rb1), Fp4::new(rc0, rc1))
    }

    /// The `p^6`-power Frobenius.
    pub fn frobenius6(&self) -> Self {
        let a = self.c0.frobenius2();
        let b = self.c1.frobenius2().neg();
        let c = self.c2.frobenius2();
        Fp12::new(a, b, c)
    }

    pub fn to_bytes(&self) -> [u8; 384] {
        let mut out = [0u8; 384];
        out[0..128].copy_from_slice(&self.c2.to_bytes());
        out[128..256].copy_from_slice(&self.c1.to_bytes());
        out[256..384].copy_from_slice(&self.c0.to_bytes());
        out
    }

    pub fn from_bytes(buf: &[u8; 384]) -> Result<Self> {
        let c2 = Fp4::from_bytes(buf[0..128].try_into().unwrap())?;
        let c1 = Fp4::from_bytes(buf[128..256].try_into().unwrap())?;
        let c0 = Fp4::from_bytes(buf[256..384].try_into().unwrap())?;
        Ok(Fp12::new(c0, c1, c2))
    }

    /// Decodes `"<c2 hex>_<c1 hex>_<c0 hex>"`, 779 characters.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 779 {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let bytes = hex.as_bytes();
        let c2 = Fp4::from_hex(&hex[0..259])?;
        if bytes[259] != b'_' {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let c1 = Fp4::from_hex(&hex[260..519])?;
        if bytes[519] != b'_' {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let c0 = Fp4::from_hex(&hex[520..779])?;
        Ok(Fp12::new(c0, c1, c2))
    }

    pub fn to_hex(&self) -> String {
        format!("{}_{}_{}", self.c2.to_hex(), self.c1.to_hex(), self.c0.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::Fp;

    fn fp(v: u64) -> Fp {
        Fp::to_mont(&Z256::from_limbs([v, 0, 0, 0]))
    }

    fn fp4(a0: u64, a1: u64, b0: u64, b1: u64) -> Fp4 {
        Fp4::new(Fp2::new(fp(a0), fp(a1)), Fp2::new(fp(b0), fp(b1)))
    }

    fn sample() -> Fp12 {
        Fp12::new(
            fp4(1, 2, 3, 4),
            fp4(5, 6, 7, 8),
            fp4(9, 10, 11, 12),
        )
    }

    #[test]
    fn sqr_matches_mul_self() {
        let a = sample();
        assert_eq!(a.sqr(), a.mul(&a));
    }

    #[test]
    fn inv_roundtrip() {
        let a = sample();
        let inv = a.inv().unwrap();
        assert_eq!(a.mul(&inv), Fp12::ONE);
    }

    #[test]
    fn frobenius_six_times_is_frobenius_twelve_identity() {
        let a = sample();
        let got = a.frobenius().frobenius().frobenius().frobenius().frobenius().frobenius();
        assert_eq!(got, a.frobenius6());
    }

    #[test]
    fn frobenius3_matches_three_applications() {
        let a = sample();
        assert_eq!(a.frobenius().frobenius().frobenius(), a.frobenius3());
    }

    #[test]
    fn frobenius2_matches_two_applications() {
        let a = sample();
        assert_eq!(a.frobenius().frobenius(), a.frobenius2());
    }

    #[test]
    fn pow_one_is_identity() {
        let a = sample();
        assert_eq!(a.pow(&Z256::ONE), a);
    }
}
