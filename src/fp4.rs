//! The quartic extension `F_{p^4} = F_{p^2}[v] / (v^2 - u)`.
//!
//! An element `(b0, b1)` represents `b0 + b1*v`.

use crate::error::{Result, Sm9CoreError};
use crate::fp2::Fp2;
use std::ops::{Add, Mul, Neg, Sub};

/// An element of `F_{p^4}`: `b0 + b1*v`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp4 {
    pub b0: Fp2,
    pub b1: Fp2,
}

impl Fp4 {
    pub const ZERO: Self = Fp4 {
        b0: Fp2::ZERO,
        b1: Fp2::ZERO,
    };
    pub const ONE: Self = Fp4 {
        b0: Fp2::ONE,
        b1: Fp2::ZERO,
    };

    pub const fn new(b0: Fp2, b1: Fp2) -> Self {
        Fp4 { b0, b1 }
    }

    pub fn add(&self, other: &Self) -> Self {
        Fp4::new(self.b0.add(&other.b0), self.b1.add(&other.b1))
    }

    pub fn sub(&self, other: &Self) -> Self {
        Fp4::new(self.b0.sub(&other.b0), self.b1.sub(&other.b1))
    }

    pub fn dbl(&self) -> Self {
        Fp4::new(self.b0.dbl(), self.b1.dbl())
    }

    pub fn neg(&self) -> Self {
        Fp4::new(self.b0.neg(), self.b1.neg())
    }

    pub fn div2(&self) -> Self {
        Fp4::new(self.b0.div2(), self.b1.div2())
    }

    /// Multiplies by the extension generator `v`: `(b0,b1)*v = (b1*u, b0)`.
    pub fn a_mul_v(&self) -> Self {
        Fp4::new(self.b1.a_mul_u(), self.b0)
    }

    pub fn mul(&self, other: &Self) -> Self {
        let r0_sum = self.b0.add(&self.b1);
        let t_sum = other.b0.add(&other.b1);
        let mut r1 = t_sum.mul(&r0_sum);

        let r0 = self.b0.mul(&other.b0);
        let t = self.b1.mul(&other.b1);

        r1 = r1.sub(&r0).sub(&t);
        let t_u = t.a_mul_u();
        let r0 = r0.add(&t_u);

        Fp4::new(r0, r1)
    }

    pub fn mul_fp(&self, k: &crate::fp::Fp) -> Self {
        Fp4::new(self.b0.mul_fp(k), self.b1.mul_fp(k))
    }

    pub fn mul_fp2(&self, b0: &Fp2) -> Self {
        Fp4::new(self.b0.mul(b0), self.b1.mul(b0))
    }

    /// `self * other * v`.
    pub fn mul_v(&self, other: &Self) -> Self {
        let r0 = self.b0.mul_u(&other.b1).add(&self.b1.mul_u(&other.b0));
        let r1 = self.b0.mul(&other.b0).add(&self.b1.mul_u(&other.b1));
        Fp4::new(r0, r1)
    }

    pub fn sqr(&self) -> Self {
        let mut r1 = self.b0.add(&self.b1).sqr();
        let r0 = self.b0.sqr();
        let t = self.b1.sqr();
        r1 = r1.sub(&r0).sub(&t);
        let r0 = r0.add(&t.a_mul_u());
        Fp4::new(r0, r1)
    }

    /// `self^2 * v`.
    pub fn sqr_v(&self) -> Self {
        let t = self.b0.mul_u(&self.b1);
        let r0 = t.dbl();
        let r1 = self.b0.sqr().add(&self.b1.sqr_u());
        Fp4::new(r0, r1)
    }

    pub fn inv(&self) -> Result<Self> {
        let k = self.b1.sqr_u().sub(&self.b0.sqr());
        let k = k.inv()?;
        let r0 = self.b0.mul(&k).neg();
        let r1 = self.b1.mul(&k);
        Ok(Fp4::new(r0, r1))
    }

    /// The `p`-power Frobenius: conjugate both halves, scale the `v`
    /// coefficient by the tower's `beta` constant.
    pub fn frobenius(&self, beta: &Fp2) -> Self {
        let b0 = self.b0.conjugate();
        let b1 = self.b1.conjugate().mul(beta);
        Fp4::new(b0, b1)
    }

    pub fn frobenius2(&self) -> Self {
        Fp4::new(self.b0, self.b1.neg())
    }

    pub fn frobenius3(&self, beta: &Fp2) -> Self {
        let b0 = self.b0.conjugate();
        let b1 = self.b1.conjugate().mul(beta).neg();
        Fp4::new(b0, b1)
    }

    pub fn to_bytes(&self) -> [u8; 128] {
        let mut out = [0u8; 128];
        out[0..64].copy_from_slice(&self.b1.to_bytes());
        out[64..128].copy_from_slice(&self.b0.to_bytes());
        out
    }

    pub fn from_bytes(buf: &[u8; 128]) -> Result<Self> {
        let b1 = Fp2::from_bytes(buf[0..64].try_into().unwrap())?;
        let b0 = Fp2::from_bytes(buf[64..128].try_into().unwrap())?;
        Ok(Fp4::new(b0, b1))
    }

    /// Decodes `"<b1 hex>_<b0 hex>"`, 259 characters.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 259 {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let b1 = Fp2::from_hex(&hex[0..129])?;
        if hex.as_bytes()[129] != b'_' {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let b0 = Fp2::from_hex(&hex[130..259])?;
        Ok(Fp4::new(b0, b1))
    }

    pub fn to_hex(&self) -> String {
        format!("{}_{}", self.b1.to_hex(), self.b0.to_hex())
    }
}

impl Add for Fp4 {
    type Output = Fp4;
    fn add(self, rhs: Self) -> Self::Output {
        Fp4::add(&self, &rhs)
    }
}

impl Sub for Fp4 {
    type Output = Fp4;
    fn sub(self, rhs: Self) -> Self::Output {
        Fp4::sub(&self, &rhs)
    }
}

impl Mul for Fp4 {
    type Output = Fp4;
    fn mul(self, rhs: Self) -> Self::Output {
        Fp4::mul(&self, &rhs)
    }
}

impl Neg for Fp4 {
    type Output = Fp4;
    fn neg(self) -> Self::Output {
        Fp4::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::Fp;
    use crate::z256::Z256;

    fn fp(v: u64) -> Fp {
        Fp::to_mont(&Z256::from_limbs([v, 0, 0, 0]))
    }

    fn fp2(a0: u64, a1: u64) -> Fp2 {
        Fp2::new(fp(a0), fp(a1))
    }

    #[test]
    fn sqr_matches_mul_self() {
        let a = Fp4::new(fp2(1, 2), fp2(3, 4));
        assert_eq!(a.sqr(), a.mul(&a));
    }

    #[test]
    fn inv_roundtrip() {
        let a = Fp4::new(fp2(1, 2), fp2(3, 4));
        let inv = a.inv().unwrap();
        assert_eq!(a.mul(&inv), Fp4::ONE);
    }

    #[test]
    fn mul_v_matches_a_mul_v_times_other() {
        let a = Fp4::new(fp2(1, 2), fp2(3, 4));
        let b = Fp4::new(fp2(5, 6), fp2(7, 8));
        assert_eq!(a.mul_v(&b), a.mul(&b).a_mul_v());
    }

    #[test]
    fn sqr_v_matches_square_times_v() {
        let a = Fp4::new(fp2(1, 2), fp2(3, 4));
        assert_eq!(a.sqr_v(), a.sqr().a_mul_v());
    }
}
