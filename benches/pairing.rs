use sm9_core::curve::P1;
use sm9_core::pairing::pairing;
use sm9_core::twist::P2;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

pub fn bench_pairing(c: &mut Criterion) {
    c.bench_function("optimal-ate pairing of generators", |b| {
        b.iter(|| pairing(black_box(&P2), black_box(&P1)))
    });
}

criterion_group!(benches, bench_pairing);
criterion_main!(benches);
