use sm9_core::fp::Fp;
use sm9_core::z256::Z256;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

pub fn bench_mont_mul(c: &mut Criterion) {
    let a = Fp::to_mont(&Z256::from_limbs([0x1234_5678, 0x9abc_def0, 1, 2]));
    let b = Fp::to_mont(&Z256::from_limbs([0xfedc_ba98, 0x7654_3210, 3, 4]));

    c.bench_function("fp mont_mul", |bencher| {
        bencher.iter(|| black_box(a).mont_mul(black_box(&b)))
    });

    c.bench_function("fp inv", |bencher| bencher.iter(|| black_box(a).inv()));
}

criterion_group!(benches, bench_mont_mul);
criterion_main!(benches);
