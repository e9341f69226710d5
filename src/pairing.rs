//! The optimal-ate pairing over the BN curve: Miller loop plus final
//! exponentiation.

use crate::curve::Point;
use crate::fp12::Fp12;
use crate::fp2::Fp2;
use crate::fp4::Fp4;
use crate::twist::TwistPoint;
use crate::z256::Z256;

/// Signed-ternary digits of `6u + 2` (`u` the BN curve parameter), MSB
/// first, driving the Miller loop's double-and-optionally-add schedule.
/// `'2'` means "subtract `Q`" (add `-Q`).
const MILLER_DIGITS: &str =
    "00100000000000000000000000000000000000010000101100020200101000020";

const HARD_PART_A2: Z256 = Z256::from_limbs([0x0000b98b0cb27659, 0xd8000000019062ed, 0, 0]);
const HARD_PART_A3: Z256 = Z256::from_limbs([0x400000000215d941, 0x2, 0, 0]);
const NINE: Z256 = Z256::from_limbs([9, 0, 0, 0]);

/// The line function evaluated at a doubling step, returned as the
/// sparse `(numerator, denominator)` pair the Miller loop accumulates.
/// Only three of the twelve `F_p` coordinates of each are ever nonzero;
/// they are still represented as full [`Fp12`]s to keep the loop's
/// multiply/square steps uniform.
fn eval_g_tangent(t: &TwistPoint, q: &Point) -> (Fp12, Fp12) {
    let (xq, yq) = q.get_xy();

    let t0 = t.z.sqr();
    let t1 = t0.mul(&t.z);
    let b1 = t1.mul(&t.y);

    let t2 = b1.mul_fp(&yq);
    let a1 = t2.neg();

    let t1 = t.x.sqr();
    let t0 = t0.mul(&t1);
    let t0 = t0.mul_fp(&xq);
    let t0 = t0.tri();
    let a4 = t0.div2();

    let t1 = t1.mul(&t.x);
    let t1 = t1.tri().div2();
    let t0 = t.y.sqr();
    let a0 = t0.sub(&t1);

    let num = Fp12::new(Fp4::new(a0, a1), Fp4::ZERO, Fp4::new(a4, Fp2::ZERO));
    let den = Fp12::new(Fp4::new(Fp2::ZERO, b1), Fp4::ZERO, Fp4::ZERO);
    (num, den)
}

/// The line function evaluated at an addition step `T + P` (`P` here is
/// the twist-side operand, conventionally named to match the addition
/// being folded into the tangent/line formula).
fn eval_g_line(t: &TwistPoint, p: &TwistPoint, q: &Point) -> (Fp12, Fp12) {
    let (xq, yq) = q.get_xy();

    let t0 = p.z.sqr();
    let t1 = t0.mul(&t.x);
    let t0 = t0.mul(&p.z);
    let t2 = t.z.sqr();
    let t3 = t2.mul(&p.x);
    let t2 = t2.mul(&t.z);
    let t2 = t2.mul(&p.y);
    let t1 = t1.sub(&t3);
    let t1 = t1.mul(&t.z);
    let t1 = t1.mul(&p.z);
    let t4 = t1.mul(&t0);
    let b1 = t4;
    let t1 = t1.mul(&p.y);
    let t3 = t0.mul(&t.y);
    let t3 = t3.sub(&t2);
    let t0 = t0.mul(&t3);
    let t0 = t0.mul_fp(&xq);
    let a4 = t0;
    let t3 = t3.mul(&p.x);
    let t3 = t3.mul(&p.z);
    let t1 = t1.sub(&t3);
    let a0 = t1;
    let t2 = t4.mul_fp(&yq);
    let a1 = t2.neg();

    let num = Fp12::new(Fp4::new(a0, a1), Fp4::ZERO, Fp4::new(a4, Fp2::ZERO));
    let den = Fp12::new(Fp4::new(Fp2::ZERO, b1), Fp4::ZERO, Fp4::ZERO);
    (num, den)
}

/// The BN-specific hard part of the final exponentiation, an addition
/// chain over the curve parameter that replaces a direct (and far more
/// expensive) exponentiation by `(p^4 - p^2 + 1) / n`.
fn final_exponent_hard_part(f: &Fp12) -> Fp12 {
    let t0 = f.pow(&HARD_PART_A3).inv().expect("easy part output is never zero");
    let t1 = t0.frobenius();
    let t1 = t0.mul(&t1);

    let t0 = t0.mul(&t1);
    let t2 = f.frobenius();
    let t3 = t2.mul(f);
    let t3 = t3.pow(&NINE);

    let t0 = t0.mul(&t3);
    let t3 = f.sqr();
    let t3 = t3.sqr();
    let t0 = t0.mul(&t3);
    let t2 = t2.sqr();
    let t2 = t2.mul(&t1);
    let t1 = f.frobenius2();
    let t1 = t1.mul(&t2);

    let t2 = t1.pow(&HARD_PART_A2);
    let t0 = t2.mul(&t0);
    let t1 = f.frobenius3();
    t1.mul(&t0)
}

/// The full final exponentiation, easy part (`(p^6-1)(p^2+1)`) followed
/// by the BN hard part.
pub fn final_exponent(f: &Fp12) -> Fp12 {
    let t0 = f.frobenius6();
    let t1 = f.inv().expect("pairing result before final exponentiation is never zero");
    let t0 = t0.mul(&t1);
    let t1 = t0.frobenius2();
    let t0 = t0.mul(&t1);
    final_exponent_hard_part(&t0)
}

/// The optimal-ate pairing `e(Q, P): E'(F_{p^2}) x E(F_p) -> F_{p^12}`.
pub fn pairing(q: &TwistPoint, p: &Point) -> Fp12 {
    let mut t = *q;
    let mut f_num = Fp12::ONE;
    let mut f_den = Fp12::ONE;

    for digit in MILLER_DIGITS.bytes() {
        f_num = f_num.sqr();
        f_den = f_den.sqr();
        let (g_num, g_den) = eval_g_tangent(&t, p);
        f_num = f_num.mul(&g_num);
        f_den = f_den.mul(&g_den);

        t = t.dbl();

        if digit == b'1' {
            let (g_num, g_den) = eval_g_line(&t, q, p);
            f_num = f_num.mul(&g_num);
            f_den = f_den.mul(&g_den);
            t = t.add_full(q);
        } else if digit == b'2' {
            let neg_q = q.neg();
            let (g_num, g_den) = eval_g_line(&t, &neg_q, p);
            f_num = f_num.mul(&g_num);
            f_den = f_den.mul(&g_den);
            t = t.add_full(&neg_q);
        }
    }

    let q1 = q.pi1();
    let q2 = q.neg_pi2();

    let (g_num, g_den) = eval_g_line(&t, &q1, p);
    f_num = f_num.mul(&g_num);
    f_den = f_den.mul(&g_den);
    t = t.add_full(&q1);

    let (g_num, g_den) = eval_g_line(&t, &q2, p);
    f_num = f_num.mul(&g_num);
    f_den = f_den.mul(&g_den);
    let _ = t.add_full(&q2);

    let f_den_inv = f_den.inv().expect("line-function denominator never vanishes on a valid pairing input");
    let r = f_num.mul(&f_den_inv);

    final_exponent(&r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::P1;
    use crate::twist::P2;

    #[test]
    fn pairing_of_generators_is_not_one() {
        let r = pairing(&P2, &P1);
        assert_ne!(r, Fp12::ONE);
    }

    #[test]
    fn bilinearity_in_first_argument() {
        let k = Z256::from_limbs([7, 0, 0, 0]);
        let lhs = pairing(&P2.mul(&k), &P1);
        let rhs = pairing(&P2, &P1).pow(&k);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn bilinearity_in_second_argument() {
        let k = Z256::from_limbs([7, 0, 0, 0]);
        let lhs = pairing(&P2, &P1.mul(&k));
        let rhs = pairing(&P2, &P1).pow(&k);
        assert_eq!(lhs, rhs);
    }
}
