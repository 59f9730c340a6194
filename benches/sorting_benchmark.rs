use casesort::prelude::*;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::Rng;
use std::hint::black_box;

fn random_names(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let len = rng.random_range(3..12);
            (0..len).map(|_| rng.random_range('A'..='z')).collect()
        })
        .collect()
}

fn bench_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("Name Sort");
    group.sample_size(10);

    let names = random_names(10_000);

    group.bench_function("quicksort_ci", |b| {
        b.iter_batched(
            || names.clone(),
            |mut data| quicksort_ci(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    // Std sort on a lowercase key, for reference
    group.bench_function("slice::sort_by_key (lowercase)", |b| {
        b.iter_batched(
            || names.clone(),
            |mut data| data.sort_by_key(|s| s.to_lowercase()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_by_cached_key (lowercase)", |b| {
        b.iter_batched(
            || names.clone(),
            |mut data| data.sort_by_cached_key(|s| s.to_lowercase()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("Many Duplicates");
    group.sample_size(10);

    let mut rng = rand::rng();
    let spellings = ["smith", "Smith", "SMITH", "jones", "Jones"];
    let names: Vec<String> = (0..10_000)
        .map(|_| spellings[rng.random_range(0..spellings.len())].to_string())
        .collect();

    group.bench_function("quicksort_ci", |b| {
        b.iter_batched(
            || names.clone(),
            |mut data| quicksort_ci(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_names, bench_duplicates);
criterion_main!(benches);
