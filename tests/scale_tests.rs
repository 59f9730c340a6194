use casesort::prelude::*;
use rand::Rng;
use std::time::Instant;

fn random_word<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(4..16);
    (0..len).map(|_| rng.random_range('A'..='z')).collect()
}

#[test]
fn test_sort_100k_names() {
    let count = 100_000;
    let mut rng = rand::rng();
    let mut input: Vec<String> = (0..count).map(|_| random_word(&mut rng)).collect();

    let start = Instant::now();
    quicksort_ci(&mut input);
    println!("Sorted {} names in {:?}", count, start.elapsed());

    assert_eq!(input.len(), count);
    assert!(is_sorted_ci(&input));
}

#[test]
fn test_sort_100k_rows_two_keys() {
    let count = 100_000;
    let mut rng = rand::rng();
    let records: Vec<Vec<(&str, Value)>> = (0..count)
        .map(|i| {
            vec![
                ("group", Value::from(rng.random_range(0..50) as i64)),
                ("name", Value::from(random_word(&mut rng))),
                ("seq", Value::from(i as i64)),
            ]
        })
        .collect();
    let mut table = Table::from_records(records);

    let start = Instant::now();
    table.sort_by_columns(&KeySpec::parse("group,name").unwrap()).unwrap();
    println!("Sorted {} rows in {:?}", count, start.elapsed());

    for i in 0..count - 1 {
        let a = (
            table.get(i, "group").unwrap().fold_key(),
            table.get(i, "name").unwrap().fold_key(),
        );
        let b = (
            table.get(i + 1, "group").unwrap().fold_key(),
            table.get(i + 1, "name").unwrap().fold_key(),
        );
        assert!(a <= b, "Sort failed at row {}", i);
    }
}

#[test]
#[ignore]
fn test_sort_10m_names() {
    // Needs a few GB of RAM.
    let count = 10_000_000;
    let mut rng = rand::rng();
    let mut input: Vec<String> = (0..count).map(|_| random_word(&mut rng)).collect();

    let start = Instant::now();
    quicksort_ci(&mut input);
    println!("Sorted {} names in {:?}", count, start.elapsed());

    for i in (0..count - 1).step_by(10_000) {
        assert!(input[i].to_lowercase() <= input[i + 1].to_lowercase(), "Sort failed at index {}", i);
    }
}
