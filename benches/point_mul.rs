use sm9_core::curve::{Point, P1};
use sm9_core::z256::Z256;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

pub fn bench_point_mul(c: &mut Criterion) {
    let k = Z256::from_limbs([0x1122_3344_5566_7788, 0x99aa_bbcc_ddee_ff00, 1, 2]);

    c.bench_function("point mul (Booth window)", |b| {
        b.iter(|| P1.mul(black_box(&k)))
    });

    c.bench_function("point mul_generator (precomputed table)", |b| {
        b.iter(|| Point::mul_generator(black_box(&k)))
    });
}

criterion_group!(benches, bench_point_mul);
criterion_main!(benches);
