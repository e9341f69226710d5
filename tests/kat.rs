use sm9_core::curve::{Point, P1};
use sm9_core::fp12::Fp12;
use sm9_core::pairing::pairing;
use sm9_core::scalar::N;
use sm9_core::twist::P2;
use sm9_core::z256::Z256;

/// S1: the base-curve generator is on-curve and matches the published
/// GB/T 38635.2 coordinates.
#[test]
fn s1_generator_sanity() {
    assert!(P1.is_on_curve());
    assert_eq!(
        P1.x.to_hex(),
        "93de051d62bf718ff5ed0704487d01d6e1e4086909dc3280e8c4e4817c66dddd"
    );
}

/// S2: the twist generator is on-curve.
#[test]
fn s2_twist_generator_sanity() {
    assert!(P2.is_on_curve());
}

/// S3: scalar multiplication at the group's boundary scalars.
#[test]
fn s3_scalar_times_identity() {
    assert!(P1.mul(&Z256::ZERO).is_at_infinity());
    assert!(P1.mul(&Z256::ONE).equ(&P1));

    let n_minus_one = N.sub_c(&Z256::ONE).0;
    assert!(P1.mul(&n_minus_one).equ(&P1.neg()));
}

/// S6: uncompressed octet encode/decode round-trips byte-identically.
#[test]
fn s6_octet_round_trip() {
    let octets = P1.to_uncompressed_octets();
    let decoded = Point::from_uncompressed_octets(&octets).unwrap();
    assert_eq!(decoded.to_uncompressed_octets(), octets);
}

/// The pairing of the published generators is non-degenerate and lands
/// in the target group (its own `n`-th power is 1 follows from the
/// bilinearity tests in `pairing.rs`, checked there against a small
/// scalar instead of the full group order to stay fast).
#[test]
fn pairing_of_generators_is_non_trivial() {
    let g = pairing(&P2, &P1);
    assert_ne!(g, Fp12::ONE);
}

/// S4: the pairing of the published generators pins to the GB/T 38635.2
/// Appendix A reference value `g = e(P1, P2)`. `Fp12::to_bytes` lays out
/// `c2` first (the topmost `fp4` component, §6), so the first four bytes
/// of the encoding are the standard's leading bytes for that component.
#[test]
fn s4_pairing_reference_value() {
    let g = pairing(&P2, &P1);
    assert_eq!(&g.to_bytes()[0..4], &[0x28, 0x54, 0x2C, 0x2C]);
}
