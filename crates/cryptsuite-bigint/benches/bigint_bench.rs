//! Big integer arithmetic benchmarks.
//!
//! Run with: cargo bench -p cryptsuite-bigint

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cryptsuite_bigint::BigInt;

fn operand(bits: usize, fill: u8) -> BigInt {
    BigInt::from_bytes(&vec![fill; bits / 8]).unwrap()
}

fn bench_arith(c: &mut Criterion) {
    let mut group = c.benchmark_group("bigint");

    for size in [256, 512, 1024, 2048, 4096] {
        let a = operand(size, 0xFF);
        let b = operand(size, 0xA5);
        let mut out = BigInt::with_capacity(2 * size / 32 + 1).unwrap();

        group.bench_with_input(BenchmarkId::new("add", size), &size, |bench, _| {
            bench.iter(|| a.add(&b, &mut out).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("mul", size), &size, |bench, _| {
            bench.iter(|| a.mul(&b, &mut out).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("mul_karatsuba", size), &size, |bench, _| {
            bench.iter(|| a.mul_karatsuba(&b, &mut out).unwrap());
        });
    }

    group.finish();
}

fn bench_modular(c: &mut Criterion) {
    let mut group = c.benchmark_group("bigint_mod");
    group.sample_size(10);

    for size in [128, 256] {
        let m = operand(size, 0xC3);
        let a = operand(size, 0x5A);
        let e = operand(size, 0x81);
        let mut out = BigInt::zero();

        group.bench_with_input(BenchmarkId::new("mod_reduce", size), &size, |bench, _| {
            let mut wide = BigInt::zero();
            a.square(&mut wide).unwrap();
            bench.iter(|| wide.mod_reduce(&m, &mut out).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("mod_exp", size), &size, |bench, _| {
            bench.iter(|| a.mod_exp(&e, &m, &mut out).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_arith, bench_modular);
criterion_main!(benches);
