//! SM9 identity-based cryptography: the arithmetic core
//!
//! This crate implements the finite-field and elliptic-curve arithmetic
//! underlying SM9 (GB/T 38635.2), the Chinese national standard for
//! identity-based cryptography. It is a BN (Barreto-Naehrig) pairing
//! over a 256-bit prime field, with embedding degree 12.
//!
//! The focus is on **clarity, predictability, and auditability**, rather
//! than on providing a large or high-level cryptographic API. All
//! components are dependency-free, explicit in their semantics, and
//! suitable for security-critical code. This crate does not implement
//! the SM9 protocols themselves (key derivation, signing, encryption) —
//! only the arithmetic they are built from.
//!
//! # Module overview
//!
//! - `z256`
//!   The 256-bit unsigned integer primitive every layer above reduces to:
//!   carrying add/sub, a full 512-bit product, comparison, Booth-digit
//!   extraction for windowed scalar multiplication, and a
//!   rejection-sampled `rand_range` drawing randomness through an
//!   injected collaborator rather than an owned RNG.
//!
//! - `fp`
//!   The prime field `F_p`, held in Montgomery form, with CIOS reduction.
//!
//! - `fp2`, `fp4`, `fp12`
//!   The quadratic, quartic, and full degree-12 extensions of `F_p` that
//!   the pairing's target group and the twist curve's coordinate field
//!   live in.
//!
//! - `curve`
//!   `E(F_p): y^2 = x^3 + 5`, in Jacobian coordinates, with windowed
//!   scalar multiplication against both an arbitrary point and the fixed
//!   generator `P1`.
//!
//! - `twist`
//!   The sextic twist `E'(F_{p^2}): y^2 = x^3 + 5u`, in Jacobian
//!   coordinates, plus the Frobenius-based endomorphisms the pairing's
//!   final addition steps need.
//!
//! - `pairing`
//!   The optimal-ate pairing: a Miller loop over sparse line functions,
//!   followed by the BN-specific final exponentiation.
//!
//! - `scalar`
//!   The scalar field `F_n`, the curves' prime order, reduced via
//!   Barrett's algorithm rather than Montgomery form.
//!
//! - `error`
//!   The crate-wide fallible-operation error taxonomy.
//!
//! # Design goals
//!
//! - No heap allocations in the arithmetic core (the fixed generator
//!   table in `curve` is the one deliberate exception, built lazily)
//! - Minimal and explicit APIs
//! - Stable, well-defined semantics
//! - Clear separation between cryptographic code and supporting utilities
//!
//! This crate is not intended to replace full-featured, externally
//! audited cryptographic libraries.

pub mod curve;
pub mod error;
pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp4;
pub mod pairing;
pub mod scalar;
pub mod twist;
pub mod z256;
