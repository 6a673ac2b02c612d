use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drillbag_core::fingerprint::Fingerprint;
use drillbag_core::model::{Difficulty, PoolKey};
use drillbag_core::registry::PoolRegistry;
use std::collections::HashMap;

const SHORT_STEM: &str = "Solve 2x + 3 = 11 for x.";
const LONG_STEM: &str = "A rectangular garden is twice as long as it is wide. \
    The owner adds a path of uniform width 1 m around the garden, which \
    increases the total area by 58 square metres. Find the dimensions of \
    the original garden, giving both the width and the length in metres.";

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");

    group.bench_function("short_stem", |b| {
        b.iter(|| Fingerprint::of_stem(black_box(SHORT_STEM)))
    });

    group.bench_function("long_stem", |b| {
        b.iter(|| Fingerprint::of_stem(black_box(LONG_STEM)))
    });

    group.bench_function("messy_whitespace", |b| {
        let messy = format!("  {}  \n\n  {}  ", SHORT_STEM, LONG_STEM);
        b.iter(|| Fingerprint::of_stem(black_box(&messy)))
    });

    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    let key = PoolKey::new("quad.graph.vertex", Difficulty::Easy);

    group.bench_function("is_seen_hit_n=100", |b| {
        let mut registry = PoolRegistry::new(HashMap::new());
        let mut probe = None;
        for i in 0..100 {
            let fp = Fingerprint::of_stem(&format!("stem number {i}"));
            if i == 50 {
                probe = Some(fp.clone());
            }
            registry.mark_seen(&key, fp);
        }
        let probe = probe.unwrap();
        b.iter(|| registry.is_seen(black_box(&key), black_box(&probe)))
    });

    group.bench_function("mark_seen_duplicate", |b| {
        let mut registry = PoolRegistry::new(HashMap::new());
        let fp = Fingerprint::of_stem(SHORT_STEM);
        registry.mark_seen(&key, fp.clone());
        b.iter(|| registry.mark_seen(black_box(&key), black_box(fp.clone())))
    });

    group.finish();
}

criterion_group!(benches, bench_fingerprint, bench_registry);
criterion_main!(benches);
