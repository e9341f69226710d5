//! The base curve `E(F_p): y^2 = x^3 + 5`, in Jacobian coordinates.

use crate::error::{Result, Sm9CoreError};
use crate::fp::Fp;
use crate::z256::Z256;
use std::sync::OnceLock;

/// A point on `E(F_p)` in Jacobian coordinates `(X, Y, Z)`, representing
/// the affine point `(X/Z^2, Y/Z^3)`. `Z == 0` is the point at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: Fp,
    pub y: Fp,
    pub z: Fp,
}

/// The generator `P1`.
pub const P1: Point = Point {
    x: Fp::from_mont_limbs(Z256::from_limbs([
        0x22e935e29860501b,
        0xa946fd5e0073282c,
        0xefd0cec817a649be,
        0x5129787c869140b5,
    ])),
    y: Fp::from_mont_limbs(Z256::from_limbs([
        0xee779649eb87f7c7,
        0x15563cbdec30a576,
        0x326353912824efbf,
        0x7215717763c39828,
    ])),
    z: Fp::ONE,
};

impl Point {
    pub const INFINITY: Self = Point {
        x: Fp::ONE,
        y: Fp::ONE,
        z: Fp::ZERO,
    };

    pub fn is_at_infinity(&self) -> bool {
        self.z == Fp::ZERO
    }

    /// Normalizes to affine `(x, y)`, both still in Montgomery form.
    pub fn get_xy(&self) -> (Fp, Fp) {
        if self.z == Fp::ONE {
            return (self.x, self.y);
        }
        let z_inv = self.z.inv();
        let z_inv2 = z_inv.sqr();
        let x = self.x.mont_mul(&z_inv2);
        let y = self.y.mont_mul(&z_inv).mont_mul(&z_inv2);
        (x, y)
    }

    pub fn equ(&self, other: &Self) -> bool {
        let t1 = self.z.sqr();
        let t2 = other.z.sqr();
        let t3 = self.x.mont_mul(&t2);
        let t4 = other.x.mont_mul(&t1);
        if t3 != t4 {
            return false;
        }
        let t1 = t1.mont_mul(&self.z);
        let t2 = t2.mont_mul(&other.z);
        let t3 = self.y.mont_mul(&t2);
        let t4 = other.y.mont_mul(&t1);
        t3 == t4
    }

    pub fn is_on_curve(&self) -> bool {
        let (lhs, rhs) = if self.z == Fp::ONE {
            let t0 = self.y.sqr();
            let t1 = self.x.sqr().mont_mul(&self.x).add(&Fp::FIVE);
            (t0, t1)
        } else {
            let t0 = self.x.sqr().mont_mul(&self.x);
            let z2 = self.z.sqr();
            let z4 = z2.sqr();
            let t1 = z2.mont_mul(&z4).mont_mul(&Fp::FIVE).add(&t0);
            (self.y.sqr(), t1)
        };
        lhs == rhs
    }

    pub fn dbl(&self) -> Self {
        if self.is_at_infinity() {
            return *self;
        }
        let t2 = self.x.sqr().tri();
        let mut y3 = self.y.dbl();
        let z3 = y3.mont_mul(&self.z);
        y3 = y3.sqr();
        let t3 = y3.mont_mul(&self.x);
        y3 = y3.sqr().div2();
        let mut x3 = t2.sqr();
        let t1 = t3.dbl();
        x3 = x3.sub(&t1);
        let t1 = t3.sub(&x3).mont_mul(&t2);
        let y3 = t1.sub(&y3);
        Point { x: x3, y: y3, z: z3 }
    }

    pub fn add(&self, other: &Self) -> Self {
        if other.is_at_infinity() {
            return *self;
        }
        if self.is_at_infinity() {
            return *other;
        }
        let (x2, y2) = other.get_xy();

        let t1 = self.z.sqr();
        let mut t2 = t1.mont_mul(&self.z);
        let t1 = t1.mont_mul(&x2);
        let t2 = t2.mont_mul(&y2);
        let t1 = t1.sub(&self.x);
        let t2 = t2.sub(&self.y);

        if t1 == Fp::ZERO {
            if t2 == Fp::ZERO {
                return other.dbl();
            }
            return Point::INFINITY;
        }

        let z3 = self.z.mont_mul(&t1);
        let t3 = t1.sqr();
        let t4 = t3.mont_mul(&t1);
        let t3 = t3.mont_mul(&self.x);
        let t1 = t3.dbl();
        let mut x3 = t2.sqr();
        x3 = x3.sub(&t1);
        x3 = x3.sub(&t4);
        let t3 = t3.sub(&x3);
        let t3 = t3.mont_mul(&t2);
        let t4 = t4.mont_mul(&self.y);
        let y3 = t3.sub(&t4);

        Point { x: x3, y: y3, z: z3 }
    }

    pub fn neg(&self) -> Self {
        Point {
            x: self.x,
            y: self.y.neg(),
            z: self.z,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    fn dbl_x5(&self) -> Self {
        let mut r = self.dbl();
        for _ in 0..4 {
            r = r.dbl();
        }
        r
    }

    /// Scalar multiplication via 5-bit signed Booth windowing, with a
    /// 16-entry precomputed addition chain over `P`.
    pub fn mul(&self, k: &Z256) -> Self {
        const WINDOW: u32 = 5;
        let n = (256 + WINDOW - 1) / WINDOW;

        let mut t = [Point::INFINITY; 16];
        t[0] = *self;
        t[1] = t[0].dbl();
        t[3] = t[1].dbl();
        t[7] = t[3].dbl();
        t[15] = t[7].dbl();
        t[2] = t[1].add(self);
        t[5] = t[2].dbl();
        t[11] = t[5].dbl();
        t[4] = t[2].add(&t[1]);
        t[9] = t[4].dbl();
        t[6] = t[3].add(&t[2]);
        t[13] = t[6].dbl();
        t[8] = t[3].add(&t[4]);
        t[10] = t[5].add(&t[4]);
        t[12] = t[6].add(&t[5]);
        t[14] = t[7].add(&t[6]);

        let mut r = Point::INFINITY;
        let mut r_infinity = true;

        for i in (0..n).rev() {
            let booth = k.get_booth(WINDOW, i);
            if r_infinity {
                if booth != 0 {
                    r = t[(booth.unsigned_abs() - 1) as usize];
                    if booth < 0 {
                        r = r.neg();
                    }
                    r_infinity = false;
                }
            } else {
                r = r.dbl_x5();
                if booth > 0 {
                    r = r.add(&t[(booth - 1) as usize]);
                } else if booth < 0 {
                    r = r.sub(&t[(-booth - 1) as usize]);
                }
            }
        }

        if r_infinity {
            Point::INFINITY
        } else {
            r
        }
    }

    /// Scalar multiplication against the fixed generator [`P1`], via a
    /// lazily built windowed affine table (window size 7, 37 windows).
    pub fn mul_generator(k: &Z256) -> Self {
        const WINDOW: u32 = 7;
        let n = (256 + WINDOW - 1) / WINDOW;
        let table = generator_table();

        let mut r = Point::INFINITY;
        let mut r_infinity = true;

        for i in (0..n).rev() {
            let booth = k.get_booth(WINDOW, i);
            if r_infinity {
                if booth != 0 {
                    let (x, y) = table[i as usize][(booth.unsigned_abs() - 1) as usize];
                    let mut p = Point { x, y, z: Fp::ONE };
                    if booth < 0 {
                        p = p.neg();
                    }
                    r = p;
                    r_infinity = false;
                }
            } else if booth > 0 {
                let (x, y) = table[i as usize][(booth - 1) as usize];
                r = r.add(&Point { x, y, z: Fp::ONE });
            } else if booth < 0 {
                let (x, y) = table[i as usize][(-booth - 1) as usize];
                r = r.sub(&Point { x, y, z: Fp::ONE });
            }
        }

        if r_infinity {
            Point::INFINITY
        } else {
            r
        }
    }

    pub fn to_uncompressed_octets(&self) -> [u8; 65] {
        let (x, y) = self.get_xy();
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&x.to_bytes());
        out[33..65].copy_from_slice(&y.to_bytes());
        out
    }

    pub fn from_uncompressed_octets(octets: &[u8; 65]) -> Result<Self> {
        if octets[0] != 0x04 {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let x = Fp::from_bytes(octets[1..33].try_into().unwrap())?;
        let y = Fp::from_bytes(octets[33..65].try_into().unwrap())?;
        let p = Point { x, y, z: Fp::ONE };
        if !p.is_on_curve() {
            return Err(Sm9CoreError::NotOnCurve);
        }
        Ok(p)
    }
}

/// Each of the 37 windows holds 64 precomputed affine multiples of `P1`,
/// `(i+1) * 128^w * P1` for `i` in `0..64`. Built once on first use: the
/// table is large (37*64 points) and every entry is a deterministic
/// function of the fixed generator, so there is nothing to gain from
/// baking it into the binary as a literal.
fn generator_table() -> &'static Vec<Vec<(Fp, Fp)>> {
    static TABLE: OnceLock<Vec<Vec<(Fp, Fp)>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        const WINDOW: u32 = 7;
        const WINDOWS: usize = 37;
        const ENTRIES: usize = 64;

        let mut base = P1;
        let mut rows = Vec::with_capacity(WINDOWS);
        for _ in 0..WINDOWS {
            let mut row = Vec::with_capacity(ENTRIES);
            let mut acc = base;
            row.push(acc.get_xy());
            for _ in 1..ENTRIES {
                acc = acc.add(&base);
                row.push(acc.get_xy());
            }
            rows.push(row);
            for _ in 0..WINDOW {
                base = base.dbl();
            }
        }
        rows
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p1_is_on_curve() {
        assert!(P1.is_on_curve());
    }

    #[test]
    fn dbl_matches_add_self() {
        assert!(P1.dbl().equ(&P1.add(&P1)));
    }

    #[test]
    fn mul_two_matches_dbl() {
        let k = Z256::from_limbs([2, 0, 0, 0]);
        assert!(P1.mul(&k).equ(&P1.dbl()));
    }

    #[test]
    fn mul_generator_matches_mul() {
        let k = Z256::from_limbs([12345, 0, 0, 0]);
        assert!(Point::mul_generator(&k).equ(&P1.mul(&k)));
    }

    #[test]
    fn neg_sub_roundtrip() {
        let doubled = P1.dbl();
        assert!(doubled.sub(&P1).equ(&P1));
    }

    #[test]
    fn infinity_is_additive_identity() {
        assert!(P1.add(&Point::INFINITY).equ(&P1));
    }
}
