//! 256-bit unsigned integer primitive.
//!
//! This module defines a fixed-size 256-bit unsigned integer type
//! (`Z256`), the arithmetic foundation every other layer of this crate is
//! built on: the prime field, its tower extensions, both elliptic-curve
//! groups, and the scalar field all reduce, eventually, to operations
//! over `Z256`.
//!
//! Unlike a general big-integer library, this type exposes only the
//! operations the layers above it need: carrying add/sub, a full
//! 256×256→512-bit product, comparison, Booth-digit extraction for
//! windowed scalar multiplication, and fixed-width byte/hex codecs.
//!
//! ## Representation
//!
//! A value is stored as four `u64` limbs, **little-endian by index**:
//! `limbs[0]` holds the least significant 64 bits, `limbs[3]` the most
//! significant. This is the opposite convention from the crate's
//! `Display`-oriented byte types, but it is the layout every Montgomery
//! and Barrett reduction step in this crate is written against.

use crate::error::{Result, Sm9CoreError};
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// A 256-bit unsigned integer, stored as four little-endian `u64` limbs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Z256(pub(crate) [u64; 4]);

impl Z256 {
    /// The additive identity.
    pub const ZERO: Self = Z256([0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: Self = Z256([1, 0, 0, 0]);
    /// The value two.
    pub const TWO: Self = Z256([2, 0, 0, 0]);
    /// The value five, the curve coefficient `b`.
    pub const FIVE: Self = Z256([5, 0, 0, 0]);

    /// Builds a value directly from little-endian limbs.
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Z256(limbs)
    }

    /// Returns the little-endian limbs.
    pub const fn limbs(&self) -> [u64; 4] {
        self.0
    }

    /// Decodes a big-endian 32-byte encoding.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let chunk: [u8; 8] = bytes[(3 - i) * 8..(4 - i) * 8].try_into().unwrap();
            limbs[i] = u64::from_be_bytes(chunk);
        }
        Z256(limbs)
    }

    /// Encodes as a big-endian 32-byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for i in 0..4 {
            out[(3 - i) * 8..(4 - i) * 8].copy_from_slice(&self.0[i].to_be_bytes());
        }
        out
    }

    /// Decodes a 64-character big-endian hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 64 {
            return Err(Sm9CoreError::InvalidEncoding);
        }
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            bytes[i] =
                u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| Sm9CoreError::InvalidEncoding)?;
        }
        Ok(Self::from_bytes(&bytes))
    }

    /// Encodes as a 64-character lowercase big-endian hex string.
    pub fn to_hex(&self) -> String {
        let bytes = self.to_bytes();
        let mut s = String::with_capacity(64);
        for b in bytes {
            s.push_str(&format!("{:02x}", b));
        }
        s
    }

    /// Returns the 256-bit value as an MSB-first bit string, used by the
    /// unwindowed double-and-add scalar multiplication on the twist.
    pub fn to_bits(&self) -> [u8; 256] {
        let mut bits = [0u8; 256];
        let mut idx = 0;
        for i in (0..4).rev() {
            let mut w = self.0[i];
            for _ in 0..64 {
                bits[idx] = ((w & 0x8000_0000_0000_0000) != 0) as u8;
                w <<= 1;
                idx += 1;
            }
        }
        bits
    }

    /// Constant-time equality test, returning `1` if equal, `0` otherwise.
    pub fn equ(&self, other: &Self) -> u64 {
        let mut res = 0u64;
        for i in 0..4 {
            res |= self.0[i] ^ other.0[i];
        }
        is_zero_limb(res)
    }

    /// Constant-time zero test, returning `1` if zero, `0` otherwise.
    pub fn is_zero(&self) -> u64 {
        is_zero_limb(self.0[0])
            & is_zero_limb(self.0[1])
            & is_zero_limb(self.0[2])
            & is_zero_limb(self.0[3])
    }

    /// Overwrites `self` with `src` when `condition == 1`; leaves `self`
    /// unchanged when `condition == 0`. Branch-free.
    pub fn copy_conditional(&mut self, src: &Self, condition: u64) {
        let mask1 = 0u64.wrapping_sub(condition);
        let mask2 = !mask1;
        for i in 0..4 {
            self.0[i] = (src.0[i] & mask1) ^ (self.0[i] & mask2);
        }
    }

    /// Lexicographic comparison, most significant limb first.
    pub fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Carrying addition; returns `(sum, carry)` where `carry` is `0` or `1`.
    pub fn add_c(&self, other: &Self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (s1, c1) = self.0[i].overflowing_add(other.0[i]);
            let (s2, c2) = s1.overflowing_add(carry);
            r[i] = s2;
            carry = (c1 as u64) + (c2 as u64);
        }
        (Z256(r), carry)
    }

    /// Carrying subtraction; returns `(difference, borrow)` where `borrow`
    /// is `1` iff `self < other`.
    pub fn sub_c(&self, other: &Self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (d1, b1) = self.0[i].overflowing_sub(other.0[i]);
            let (d2, b2) = d1.overflowing_sub(borrow);
            r[i] = d2;
            borrow = (b1 as u64) + (b2 as u64);
        }
        (Z256(r), borrow)
    }

    /// Full 256×256→512-bit product, returned as eight little-endian
    /// `u64` limbs (`out[0]` least significant).
    pub fn mul_wide(&self, other: &Self) -> [u64; 8] {
        let mut a32 = [0u64; 8];
        let mut b32 = [0u64; 8];
        for i in 0..4 {
            a32[2 * i] = self.0[i] & 0xffff_ffff;
            a32[2 * i + 1] = self.0[i] >> 32;
            b32[2 * i] = other.0[i] & 0xffff_ffff;
            b32[2 * i + 1] = other.0[i] >> 32;
        }

        let mut s = [0u64; 16];
        for i in 0..8 {
            let mut u = 0u64;
            for j in 0..8 {
                u = s[i + j] + a32[i] * b32[j] + u;
                s[i + j] = u & 0xffff_ffff;
                u >>= 32;
            }
            s[i + 8] = u;
        }

        let mut r = [0u64; 8];
        for i in 0..8 {
            r[i] = (s[2 * i + 1] << 32) | s[2 * i];
        }
        r
    }

    /// The low 256 bits of `self * other`, used by the Montgomery CIOS step.
    pub fn mul_low(&self, other: &Self) -> Self {
        let wide = self.mul_wide(other);
        Z256([wide[0], wide[1], wide[2], wide[3]])
    }

    /// Extracts the signed Booth digit for window `i` of a `window_size`-bit
    /// windowed scan, as used by windowed scalar multiplication.
    ///
    /// Returns a value in `[-(2^(window_size-1)), 2^(window_size-1)]`.
    pub fn get_booth(&self, window_size: u32, i: u32) -> i32 {
        let mask: u64 = (1u64 << window_size) - 1;

        if i == 0 {
            return (((self.0[0] << 1) & mask) as i64 - (self.0[0] & mask) as i64) as i32;
        }

        let bit = i * window_size - 1;
        let n = (bit / 64) as usize;
        let j = bit % 64;

        let mut wbits = self.0[n] >> j;
        if (64 - j) < (window_size + 1) && n < 3 {
            wbits |= self.0[n + 1] << (64 - j);
        }
        ((wbits & mask) as i64 - ((wbits >> 1) & mask) as i64) as i32
    }

    /// Draws a value uniformly in `[0, upper)` by rejection sampling: fill
    /// 32 raw bytes through the caller-supplied `random_bytes` collaborator,
    /// decode big-endian, and retry if the result is not below `upper`.
    ///
    /// `random_bytes` is the crate's one RNG seam; it is injected rather
    /// than owned so the core stays free of any particular RNG dependency.
    pub fn rand_range(
        upper: &Self,
        mut random_bytes: impl FnMut(&mut [u8]) -> Result<()>,
    ) -> Result<Self> {
        loop {
            let mut buf = [0u8; 32];
            random_bytes(&mut buf)?;
            let r = Self::from_bytes(&buf);
            if r.cmp(upper) == Ordering::Less {
                return Ok(r);
            }
        }
    }
}

/// Adds eight-limb 512-bit values with carry, used by Barrett reduction.
pub(crate) fn add512_c(a: &[u64; 8], b: &[u64; 8]) -> ([u64; 8], u64) {
    let mut r = [0u64; 8];
    let mut carry = 0u64;
    for i in 0..8 {
        let (s1, c1) = a[i].overflowing_add(b[i]);
        let (s2, c2) = s1.overflowing_add(carry);
        r[i] = s2;
        carry = (c1 as u64) + (c2 as u64);
    }
    (r, carry)
}

#[inline(always)]
fn is_zero_limb(x: u64) -> u64 {
    let x = x | x.wrapping_neg();
    (!x) >> 63
}

impl Add for Z256 {
    type Output = Z256;

    /// Plain, non-reducing addition (the carry, if any, is discarded).
    /// Callers that need modular results reduce explicitly.
    fn add(self, rhs: Self) -> Self::Output {
        self.add_c(&rhs).0
    }
}

impl Sub for Z256 {
    type Output = Z256;

    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_c(&rhs).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_bytes() {
        let bytes = [0x11u8; 32];
        let a = Z256::from_bytes(&bytes);
        assert_eq!(a.to_bytes(), bytes);
    }

    #[test]
    fn round_trip_hex() {
        let hex = "b640000002a3a6f1d603ab4ff58ec74521f2934b1a7aeedbe56f9b27e351457d"
            [0..64]
            .to_string();
        let a = Z256::from_hex(&hex).unwrap();
        assert_eq!(a.to_hex(), hex);
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = Z256::from_limbs([5, 0, 0, 0]);
        let b = Z256::from_limbs([3, 0, 0, 0]);
        let (s, c) = a.add_c(&b);
        assert_eq!(c, 0);
        assert_eq!(s, Z256::from_limbs([8, 0, 0, 0]));
        let (d, borrow) = s.sub_c(&b);
        assert_eq!(borrow, 0);
        assert_eq!(d, a);
    }

    #[test]
    fn mul_low_matches_known_product() {
        let a = Z256::from_limbs([2, 0, 0, 0]);
        let b = Z256::from_limbs([3, 0, 0, 0]);
        assert_eq!(a.mul_low(&b), Z256::from_limbs([6, 0, 0, 0]));
    }

    #[test]
    fn equ_and_is_zero() {
        let a = Z256::from_limbs([1, 2, 3, 4]);
        let b = Z256::from_limbs([1, 2, 3, 4]);
        assert_eq!(a.equ(&b), 1);
        assert_eq!(Z256::ZERO.is_zero(), 1);
        assert_eq!(a.is_zero(), 0);
    }

    #[test]
    fn copy_conditional_moves_only_when_set() {
        let mut dst = Z256::from_limbs([1, 1, 1, 1]);
        let src = Z256::from_limbs([9, 9, 9, 9]);
        dst.copy_conditional(&src, 0);
        assert_eq!(dst, Z256::from_limbs([1, 1, 1, 1]));
        dst.copy_conditional(&src, 1);
        assert_eq!(dst, src);
    }

    #[test]
    fn cmp_orders_by_most_significant_limb() {
        let a = Z256::from_limbs([0, 0, 0, 1]);
        let b = Z256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0]);
        assert_eq!(a.cmp(&b), Ordering::Greater);
    }

    #[test]
    fn rand_range_rejects_until_below_upper() {
        // First draw is all-0xff (rejected), second is all-zero (accepted).
        let mut draws = vec![[0xffu8; 32], [0u8; 32]].into_iter();
        let upper = Z256::from_limbs([1, 0, 0, 0]);
        let r = Z256::rand_range(&upper, |buf| {
            buf.copy_from_slice(&draws.next().unwrap());
            Ok(())
        })
        .unwrap();
        assert_eq!(r, Z256::ZERO);
    }

    #[test]
    fn rand_range_surfaces_entropy_failure() {
        let upper = Z256::from_limbs([1, 0, 0, 0]);
        let err = Z256::rand_range(&upper, |_| Err(Sm9CoreError::InsufficientEntropy)).unwrap_err();
        assert_eq!(err, Sm9CoreError::InsufficientEntropy);
    }
}
