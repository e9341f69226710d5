//! The quadratic extension `F_{p^2} = F_p[u] / (u^2 + 2)`.
//!
//! An element `(a0, a1)` represents `a0 + a1*u`. Every coefficient stays
//! in Montgomery form throughout, since [`Fp`] already enforces that.

use crate::error::{Result, Sm9CoreError};
use crate::fp::Fp;
use std::ops::{Add, Mul, Neg, Sub};

/// An element of `F_{p^2}`: `a0 + a1*u`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp2 {
    pub a0: Fp,
    pub a1: Fp,
}

impl Fp2 {
    pub const ZERO: Self = Fp2 {
        a0: Fp::ZERO,
        a1: Fp::ZERO,
    };
    pub const ONE: Self = Fp2 {
        a0: Fp::ONE,
        a1: Fp::ZERO,
    };
    /// The extension generator `u`.
    pub const U: Self = Fp2 {
        a0: Fp::ZERO,
        a1: Fp::ONE,
    };

    pub const fn new(a0: Fp, a1: Fp) -> Self {
        Fp2 { a0, a1 }
    }

    pub fn is_one(&self) -> bool {
        self.a0 == Fp::ONE && self.a1 == Fp::ZERO
    }

    pub fn add(&self, other: &Self) -> Self {
        Fp2::new(self.a0.add(&other.a0), self.a1.add(&other.a1))
    }

    pub fn sub(&self, other: &Self) -> Self {
        Fp2::new(self.a0.sub(&other.a0), self.a1.sub(&other.a1))
    }

    pub fn dbl(&self) -> Self {
        Fp2::new(self.a0.dbl(), self.a1.dbl())
    }

    pub fn tri(&self) -> Self {
        Fp2::new(self.a0.tri(), self.a1.tri())
    }

    pub fn neg(&self) -> Self {
        Fp2::new(self.a0.neg(), self.a1.neg())
    }

    pub fn div2(&self) -> Self {
        Fp2::new(self.a0.div2(), self.a1.div2())
    }

    /// Multiplies by the extension generator `u`: `(a0, a1)*u = (-2*a1, a0)`.
    pub fn a_mul_u(&self) -> Self {
        Fp2::new(self.a1.dbl().neg(), self.a0)
    }

    /// Karatsuba-style product: one cross term plus two half products.
    pub fn mul(&self, other: &Self) -> Self {
        let t2 = (self.a0.add(&self.a1)).mont_mul(&other.a0.add(&other.a1));
        let t0 = self.a0.mont_mul(&other.a0);
        let t1 = self.a1.mont_mul(&other.a1);

        let r1 = t2.sub(&t0).sub(&t1);
        let r0 = t0.sub(&t1.dbl());
        Fp2::new(r0, r1)
    }

    /// `self * other * u`, used where the tower needs an extra twist by `u`.
    pub fn mul_u(&self, other: &Self) -> Self {
        let t2 = (self.a0.add(&self.a1)).mont_mul(&other.a0.add(&other.a1));
        let t0 = self.a0.mont_mul(&other.a0);
        let t1 = self.a1.mont_mul(&other.a1);

        let r0 = t2.sub(&t0).sub(&t1).dbl().neg();
        let r1 = t0.sub(&t1.dbl());
        Fp2::new(r0, r1)
    }

    pub fn mul_fp(&self, k: &Fp) -> Self {
        Fp2::new(self.a0.mont_mul(k), self.a1.mont_mul(k))
    }

    pub fn sqr(&self) -> Self {
        let r1 = self.a0.mont_mul(&self.a1);
        let c0 = self.a0.add(&self.a1);
        let c1 = self.a0.sub(&self.a1.dbl());
        let r0 = c0.mont_mul(&c1).add(&r1);
        Fp2::new(r0, r1.dbl())
    }

    /// `self^2 * u`.
    pub fn sqr_u(&self) -> Self {
        let t0 = self.a0.mont_mul(&self.a1);
        let t1 = self.a0.add(&self.a1);
        let t2 = self.a0.sub(&self.a1).sub(&self.a1);
        let t2 = t2.mont_mul(&t1).add(&t0);
        let t0 = t0.dbl().dbl().neg();
        Fp2::new(t0, t2)
    }

    /// Multiplicative inverse; returns `Err(DegenerateInput)` for zero.
    pub fn inv(&self) -> Result<Self> {
        if self.a0 == Fp::ZERO && self.a1 == Fp::ZERO {
            return Err(Sm9CoreError::DegenerateInput);
        }
        if self.a0 == Fp::ZERO {
            let r1 = self.a1.dbl().inv().neg();
            return Ok(Fp2::new(Fp::ZERO, r1));
        }
        if self.a1 == Fp::ZERO {
            return Ok(Fp2::new(self.a0.inv(), Fp::ZERO));
        }
        let k = self.a0.sqr().add(&self.a1.sqr().dbl()).inv();
        let r0 = self.a0.mont_mul(&k);
        let r1 = self.a1.mont_mul(&k).neg();
        Ok(Fp2::new(r0, r1))
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        Ok(self.mul(&other.inv()?))
    }

    /// The `p`-power Frobenius on `F_{p^2}`: conjugation.
    pub fn conjugate(&self) -> Self {
        Fp2::new(self.a0, self.a1.neg())
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[0..32].copy_from_slice(&self.a1.to_bytes());
        out[32..64].copy_from_slice(&self.a0.to_bytes());
        out
    }

    pub fn from_bytes(buf: &[u8; 64]) -> Result<Self> {
        let a1 = Fp::from_bytes(buf[0..32].try_into().unwrap())?;
        let a0 = Fp::from_bytes(buf[32..64].try_into().unwrap())?;
        Ok(Fp2::new(a0, a1))
    }

    /// Decodes `"<a1 hex>_<a0 hex>"` (imaginary part first), 129 characters.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 129 {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let a1 = Fp::from_hex(&hex[0..64])?;
        let a0 = Fp::from_hex(&hex[65..129])?;
        Ok(Fp2::new(a0, a1))
    }

    pub fn to_hex(&self) -> String {
        format!("{}_{}", self.a1.to_hex(), self.a0.to_hex())
    }
}

impl Add for Fp2 {
    type Output = Fp2;
    fn add(self, rhs: Self) -> Self::Output {
        Fp2::add(&self, &rhs)
    }
}

impl Sub for Fp2 {
    type Output = Fp2;
    fn sub(self, rhs: Self) -> Self::Output {
        Fp2::sub(&self, &rhs)
    }
}

impl Mul for Fp2 {
    type Output = Fp2;
    fn mul(self, rhs: Self) -> Self::Output {
        Fp2::mul(&self, &rhs)
    }
}

impl Neg for Fp2 {
    type Output = Fp2;
    fn neg(self) -> Self::Output {
        Fp2::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::z256::Z256;

    fn fp(v: u64) -> Fp {
        Fp::to_mont(&Z256::from_limbs([v, 0, 0, 0]))
    }

    #[test]
    fn mul_matches_schoolbook() {
        let a = Fp2::new(fp(3), fp(5));
        let b = Fp2::new(fp(7), fp(11));
        // (3+5u)(7+11u) = 21 + 33u + 35u + 55u^2, u^2 = -2
        // = 21 - 110 + 68u = -89 + 68u
        let got = a.mul(&b);
        let expect_a0 = fp(89).neg();
        let expect_a1 = fp(68);
        assert_eq!(got.a0, expect_a0);
        assert_eq!(got.a1, expect_a1);
    }

    #[test]
    fn sqr_matches_mul_self() {
        let a = Fp2::new(fp(4), fp(9));
        assert_eq!(a.sqr(), a.mul(&a));
    }

    #[test]
    fn inv_roundtrip() {
        let a = Fp2::new(fp(4), fp(9));
        let inv = a.inv().unwrap();
        assert_eq!(a.mul(&inv), Fp2::ONE);
    }

    #[test]
    fn a_mul_u_matches_mul_by_u() {
        let a = Fp2::new(fp(4), fp(9));
        assert_eq!(a.a_mul_u(), a.mul(&Fp2::U));
    }

    #[test]
    fn zero_inversion_is_degenerate() {
        assert_eq!(Fp2::ZERO.inv(), Err(Sm9CoreError::DegenerateInput));
    }
}
