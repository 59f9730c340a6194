use casesort::codec::{Format, decode, encode};
use casesort::prelude::*;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::Rng;
use std::hint::black_box;

fn random_table(rows: usize) -> Table {
    let mut rng = rand::rng();
    let cities = ["Oslo", "oslo", "Athens", "berlin", "Lima"];
    Table::from_records((0..rows).map(|i| {
        let name: String = (0..8).map(|_| rng.random_range('A'..='z')).collect();
        vec![
            ("id", Value::from(i as i64)),
            ("city", Value::from(cities[rng.random_range(0..cities.len())])),
            ("name", Value::from(name)),
            ("score", Value::from(rng.random_range(0.0..100.0))),
        ]
    }))
}

fn bench_table_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("Table Sort");
    group.sample_size(10);

    let table = random_table(50_000);
    let single = KeySpec::parse("name").unwrap();
    let multi = KeySpec::parse("city,name").unwrap();

    group.bench_function("single key", |b| {
        b.iter_batched(
            || table.clone(),
            |mut t| t.sort_by_columns(black_box(&single)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("two keys", |b| {
        b.iter_batched(
            || table.clone(),
            |mut t| t.sort_by_columns(black_box(&multi)),
            BatchSize::LargeInput,
        )
    });

    for format in [Format::Csv, Format::Xlsx] {
        let bytes = encode(format, &table).unwrap();
        group.bench_function(format!("{format} decode + sort + encode"), |b| {
            b.iter(|| {
                let mut t = decode(format, black_box(&bytes[..])).unwrap();
                t.sort_by_columns(&multi).unwrap();
                encode(format, &t).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table_sort);
criterion_main!(benches);
