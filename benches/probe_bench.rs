use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prime_hash_table::probe::{hash, Probe, HASH_PRIME_A};

fn bench_hash(c: &mut Criterion) {
    let short = "k0000000000000001";
    let long = "x".repeat(1_024);
    c.bench_function("probe::hash_short", |b| {
        b.iter(|| black_box(hash(black_box(short), HASH_PRIME_A, 10_007)))
    });
    c.bench_function("probe::hash_1k", |b| {
        b.iter(|| black_box(hash(black_box(&long), HASH_PRIME_A, 10_007)))
    });
}

fn bench_probe_walk(c: &mut Criterion) {
    c.bench_function("probe::walk_first_8", |b| {
        b.iter(|| {
            let sum: usize = Probe::new(black_box("k0000000000000001"), 10_007)
                .take(8)
                .sum();
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_hash, bench_probe_walk);
criterion_main!(benches);
