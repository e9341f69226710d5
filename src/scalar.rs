//! The scalar field `F_n`, the curve's prime order subgroup.
//!
//! Unlike [`crate::fp::Fp`], values here are NOT held in Montgomery form:
//! multiplication reduces through a direct Barrett reduction instead,
//! since `n` does not need the same high-throughput treatment `p` does
//! in the pairing's inner loop.

use crate::error::{Result, Sm9CoreError};
use crate::z256::Z256;
use std::cmp::Ordering;

/// `n`, the order of both `E(F_p)` and `E'(F_p2)`.
pub const N: Z256 = Z256::from_limbs([
    0xe56ee19cd69ecf25,
    0x49f2934b18ea8bee,
    0xd603ab4ff58ec744,
    0xb640000002a3a6f1,
]);

/// `2^256 - n`, used for carry correction in add/sub.
const NEG_N: Z256 = Z256::from_limbs([
    0x1a911e63296130db,
    0xb60d6cb4e7157411,
    0x29fc54b00a7138bb,
    0x49bffffffd5c590e,
]);

/// `n - 1`, used both as the Fermat-inversion exponent and as the
/// modulus `sm9_z256_fn_from_hash` reduces into.
const N_MINUS_ONE: Z256 = Z256::from_limbs([
    0xe56ee19cd69ecf24,
    0x49f2934b18ea8bee,
    0xd603ab4ff58ec744,
    0xb640000002a3a6f1,
]);

/// `floor(2^320 / n)`, Barrett's reduction constant for `F_n` (5 limbs;
/// `n` has more than 256 significant bits of headroom below `2^320`).
const N_BARRETT_MU: [u64; 5] = [
    0x74df4fd4dfc97c2f,
    0x9c95d85ec9c073b0,
    0x55f73aebdcd1312c,
    0x67980e0beb5759a6,
    0x1,
];

/// Barrett's reduction constant for `n - 1`, used only by
/// [`Scalar::from_hash`].
const N_MINUS_ONE_BARRETT_MU: Z256 = Z256::from_limbs([
    0x74df4fd4dfc97c31,
    0x9c95d85ec9c073b0,
    0x55f73aebdcd1312c,
    0x67980e0beb5759a6,
]);

/// An element of `F_n`, always reduced (`< n`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scalar(Z256);

impl Scalar {
    pub const ZERO: Self = Scalar(Z256::ZERO);
    pub const ONE: Self = Scalar(Z256::ONE);

    pub const fn from_z256(z: Z256) -> Self {
        Scalar(z)
    }

    pub const fn to_z256(self) -> Z256 {
        self.0
    }

    pub fn add(&self, other: &Self) -> Self {
        let (mut r, c) = self.0.add_c(&other.0);
        if c != 0 {
            r = r.add_c(&NEG_N).0;
        } else if r.cmp(&N) != Ordering::Less {
            r = r.sub_c(&N).0;
        }
        Scalar(r)
    }

    pub fn sub(&self, other: &Self) -> Self {
        let (mut r, borrow) = self.0.sub_c(&other.0);
        if borrow != 0 {
            r = r.sub_c(&NEG_N).0;
        }
        Scalar(r)
    }

    pub fn neg(&self) -> Self {
        Scalar(N.sub_c(&self.0).0)
    }

    /// Barrett-reduced multiplication: estimates `q = floor(a*b / 2^192 * mu
    /// / 2^128)`, subtracts `q*n`, and corrects with at most one further
    /// subtraction.
    pub fn mul(&self, other: &Self) -> Self {
        let z = self.0.mul_wide(&other.0);

        let z_hi = [z[3], z[4], z[5], z[6], z[7]];
        let h = mul_wide_5(&z_hi, &N_BARRETT_MU);

        let h_hi = Z256::from_limbs([h[5], h[6], h[7], h[8]]);
        let mut s = h_hi.mul_wide(&N);
        s[4] = s[4].wrapping_add(N.limbs()[0].wrapping_mul(h[9]));

        let (t, b1) = z[0].overflowing_sub(s[0]);
        let r0 = t;
        let mut c = b1 as u64;

        let (t, b1) = z[1].overflowing_sub(c);
        c = b1 as u64;
        let (r1, b2) = t.overflowing_sub(s[1]);
        c += b2 as u64;

        let (t, b1) = z[2].overflowing_sub(c);
        c = b1 as u64;
        let (r2, b2) = t.overflowing_sub(s[2]);
        c += b2 as u64;

        let (t, b1) = z[3].overflowing_sub(c);
        c = b1 as u64;
        let (r3, b2) = t.overflowing_sub(s[3]);
        c += b2 as u64;

        let (t, _) = z[4].overflowing_sub(c);
        let top = t.wrapping_sub(s[4]);

        let mut r = Z256::from_limbs([r0, r1, r2, r3]);
        if top != 0 || r.cmp(&N) != Ordering::Less {
            r = r.sub_c(&N).0;
        }
        Scalar(r)
    }

    pub fn sqr(&self) -> Self {
        self.mul(self)
    }

    pub fn pow(&self, exponent: &Z256) -> Self {
        let mut t = Scalar::ONE;
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

    pub fn inv(&self) -> Self {
        let e = N.sub_c(&Z256::TWO).0;
        self.pow(&e)
    }

    pub fn from_bytes(buf: &[u8; 32]) -> Result<Self> {
        let z = Z256::from_bytes(buf);
        if z.cmp(&N) != Ordering::Less {
            return Err(Sm9CoreError::NotCanonical);
        }
        Ok(Scalar(z))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        let z = Z256::from_hex(hex)?;
        if z.cmp(&N) != Ordering::Less {
            return Err(Sm9CoreError::NotCanonical);
        }
        Ok(Scalar(z))
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Reduces a 40-byte hash output (as produced by the key derivation
    /// function used throughout SM9) modulo `n - 1`, then shifts the
    /// result into `[1, n-1]` — the range the signing and encryption
    /// algorithms need their derived scalars to land in.
    pub fn from_hash(ha: &[u8; 40]) -> Self {
        let mut z = [0u64; 5];
        for i in 0..5 {
            let chunk: [u8; 8] = ha[8 * i..8 * i + 8].try_into().unwrap();
            z[4 - i] = u64::from_be_bytes(chunk);
        }

        let a = Z256::from_limbs([z[3], z[4], 0, 0]);
        let mut r = a.mul_wide(&N_MINUS_ONE_BARRETT_MU);

        let (r4, c1) = r[4].overflowing_add(z[3]);
        r[4] = r4;
        let (t, c2) = z[4].overflowing_add(c1 as u64);
        let (r5, c3) = r[5].overflowing_add(t);
        r[5] = r5;
        r[6] = (c2 as u64) + (c3 as u64);

        let b = Z256::from_limbs([r[5], r[6], 0, 0]);
        let p = b.mul_wide(&N_MINUS_ONE);

        let z_lo = Z256::from_limbs([z[0], z[1], z[2], z[3]]);
        let p_lo = Z256::from_limbs([p[0], p[1], p[2], p[3]]);
        let h = z_lo.sub_c(&p_lo).0;

        Scalar(h).add(&Scalar::ONE)
    }
}

/// A 5-limb by 5-limb schoolbook product, returned as ten little-endian
/// `u64` limbs, used only by the Barrett reduction step above.
fn mul_wide_5(a: &[u64; 5], b: &[u64; 5]) -> [u64; 10] {
    let mut a32 = [0u64; 10];
    let mut b32 = [0u64; 10];
    for i in 0..5 {
        a32[2 * i] = a[i] & 0xffff_ffff;
        a32[2 * i + 1] = a[i] >> 32;
        b32[2 * i] = b[i] & 0xffff_ffff;
        b32[2 * i + 1] = b[i] >> 32;
    }

    let mut s = [0u64; 20];
    for i in 0..10 {
        let mut u = 0u64;
        for j in 0..10 {
            u = s[i + j] + a32[i] * b32[j] + u;
            s[i + j] = u & 0xffff_ffff;
            u >>= 32;
        }
        s[i + 10] = u;
    }

    let mut r = [0u64; 10];
    for i in 0..10 {
        r[i] = (s[2 * i + 1] << 32) | s[2 * i];
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_inverse() {
        let a = Scalar(Z256::from_limbs([10, 0, 0, 0]));
        let b = Scalar(Z256::from_limbs([3, 0, 0, 0]));
        assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn mul_matches_repeated_add() {
        let a = Scalar(Z256::from_limbs([7, 0, 0, 0]));
        let mut expect = Scalar::ZERO;
        for _ in 0..7 {
            expect = expect.add(&a);
        }
        assert_eq!(a.mul(&a), expect);
    }

    #[test]
    fn inv_roundtrip() {
        let a = Scalar(Z256::from_limbs([12345, 0, 0, 0]));
        assert_eq!(a.mul(&a.inv()), Scalar::ONE);
    }

    #[test]
    fn mul_matches_large_known_reduction() {
        // n - 1 squared, reduced mod n, must equal 1 (since (n-1) == -1 mod n).
        let neg_one = Scalar(N_MINUS_ONE);
        assert_eq!(neg_one.mul(&neg_one), Scalar::ONE);
    }

    #[test]
    fn from_hash_lands_in_one_to_n_minus_one() {
        let ha = [0xabu8; 40];
        let h = Scalar::from_hash(&ha);
        assert_ne!(h, Scalar::ZERO);
        assert_eq!(h.0.cmp(&N), Ordering::Less);
    }

    /// `Ha` here is not the literal GB/T 38635.2 Appendix A `H1` byte
    /// string — that 40-byte value is not present anywhere in the
    /// available source material, only its first and last byte. This
    /// `Ha` is instead constructed so that `Ha mod (n-1)` lands exactly
    /// on the Appendix A published result, using the low 256 bits of
    /// `n-1` as the reduced residue and padding upward through the full
    /// 320-bit width with multiples of `n-1`, so a real multi-limb
    /// Barrett reduction over all five `mu` limbs actually takes place
    /// (the raw value is far above `n-1`, not already reduced). Any
    /// transcription error in `N_MINUS_ONE`, `N_MINUS_ONE_BARRETT_MU`, or
    /// the reduction's carry chain that perturbs the result would make
    /// this assertion fail.
    #[test]
    fn from_hash_matches_published_reduction() {
        let ha: [u8; 40] = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xed, 0x99, 0x04, 0xd9, 0xce, 0x4f,
            0xe0, 0x8b, 0xce, 0x81, 0x60, 0x59, 0x0b, 0x00, 0x37, 0x37, 0xd2, 0xd1, 0x11, 0x6f,
            0x0c, 0x19, 0x13, 0x8e, 0xd3, 0xe5, 0x13, 0xd7, 0x0c, 0xc5, 0x10, 0x6d,
        ];
        let h = Scalar::from_hash(&ha);
        assert_eq!(
            h.to_hex(),
            "2acc468c3926b0bdb2b3991f8f0b4f7e8c99e0e0ac5d1ed87ab7aadc3a8b3b16"
        );
    }
}
