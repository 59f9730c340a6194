//! Sequence sorting (case-insensitive randomized quicksort).
//!
//! This module implements the sorter used for short, user-supplied name lists:
//! - **Randomized pivot**: chosen uniformly from the current subrange, then moved to its end.
//! - **Lomuto partition**: a single pass that keeps every element whose folded key is
//!   `<=` the pivot's folded key to the left of a moving boundary.
//!
//! The sort is **not stable**: elements with equal folded keys may come out in any
//! relative order. Only the non-decreasing postcondition is guaranteed.
//!
//! The main entry points are [`quicksort_ci`] and [`quicksort_ci_with_rng`].

use crate::core::FoldKey;
use rand::Rng;

/// Sorts `data` in place by case-folded key, using the thread-local RNG for pivots.
///
/// # Examples
///
/// ```
/// use casesort::quicksort_ci;
///
/// let mut data = vec!["bob", "Alice", "charlie"];
/// quicksort_ci(&mut data);
///
/// assert_eq!(data, vec!["Alice", "bob", "charlie"]);
/// ```
pub fn quicksort_ci<T: FoldKey>(data: &mut [T]) {
    let mut rng = rand::rng();
    quicksort_ci_with_rng(data, &mut rng);
}

/// Sorts `data` in place by case-folded key, drawing pivots from `rng`.
///
/// Useful with a seeded generator when a reproducible pivot sequence matters.
///
/// # Examples
///
/// ```
/// use casesort::quicksort_ci_with_rng;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut data = vec!["delta".to_string(), "Bravo".to_string(), "alpha".to_string()];
/// quicksort_ci_with_rng(&mut data, &mut rng);
///
/// assert_eq!(data, vec!["alpha", "Bravo", "delta"]);
/// ```
pub fn quicksort_ci_with_rng<T: FoldKey, R: Rng + ?Sized>(data: &mut [T], rng: &mut R) {
    // 0 or 1 elements: nothing to do.
    if data.len() < 2 {
        return;
    }
    let high = data.len() - 1;
    quicksort_range(data, 0, high, rng);
}

/// Sorts the inclusive range `[low, high]`.
///
/// Recurses into the smaller side and loops on the larger one, so stack depth
/// stays logarithmic even on adversarial pivot sequences.
fn quicksort_range<T: FoldKey, R: Rng + ?Sized>(
    data: &mut [T],
    mut low: usize,
    mut high: usize,
    rng: &mut R,
) {
    while low < high {
        let p = randomized_partition(data, low, high, rng);

        if p - low < high - p {
            if p > low {
                quicksort_range(data, low, p - 1, rng);
            }
            low = p + 1;
        } else {
            if p < high {
                quicksort_range(data, p + 1, high, rng);
            }
            // p > low here, so this cannot underflow.
            high = p - 1;
        }
    }
}

/// Picks a pivot uniformly from `[low, high]`, swaps it to `high` and partitions.
///
/// Returns the pivot's final index.
///
/// # Panics
///
/// Panics if `low > high` or `high` is out of bounds.
pub fn randomized_partition<T: FoldKey, R: Rng + ?Sized>(
    data: &mut [T],
    low: usize,
    high: usize,
    rng: &mut R,
) -> usize {
    let r = rng.random_range(low..=high);
    data.swap(r, high);
    partition(data, low, high)
}

/// Partitions `[low, high]` around the element at `high`.
///
/// After the call, every element left of the returned index has a folded key
/// `<=` the pivot's, and every element right of it has a greater one.
///
/// # Panics
///
/// Panics if `low > high` or `high` is out of bounds.
pub fn partition<T: FoldKey>(data: &mut [T], low: usize, high: usize) -> usize {
    let pivot_key = data[high].fold_key().into_owned();

    // `store` is one past the last element known to be <= pivot.
    let mut store = low;
    for j in low..high {
        let le = *data[j].fold_key() <= *pivot_key;
        if le {
            data.swap(store, j);
            store += 1;
        }
    }

    data.swap(store, high);
    store
}

/// Returns `true` if `data` is non-decreasing by case-folded key.
pub fn is_sorted_ci<T: FoldKey>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0].fold_key() <= w[1].fold_key())
}

/// Reorders `data` so that position `i` receives the element previously at `indices[i]`.
///
/// `indices` must be a permutation of `0..data.len()`.
pub(crate) fn apply_permutation<T>(data: &mut [T], mut indices: Vec<usize>) {
    for i in 0..data.len() {
        let mut current = i;
        while indices[current] != i {
            let next = indices[current];
            data.swap(current, next);
            indices[current] = current; // placed
            current = next;
        }
        indices[current] = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn partition_places_pivot() {
        let mut data = vec!["d", "B", "a", "C"];
        // pivot is "C"
        let p = partition(&mut data, 0, 3);
        assert_eq!(p, 2);
        assert_eq!(data[p], "C");
        assert!(data[..p].iter().all(|s| s.to_lowercase().as_str() <= "c"));
        assert!(data[p + 1..].iter().all(|s| s.to_lowercase().as_str() > "c"));
    }

    #[test]
    fn partition_sends_equal_keys_left() {
        let mut data = vec!["b", "B", "a", "b"];
        let p = partition(&mut data, 0, 3);
        assert_eq!(p, 3);
    }

    #[test]
    fn randomized_partition_on_subrange() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut data = vec!["z", "c", "A", "b", "y"];
        let p = randomized_partition(&mut data, 1, 3, &mut rng);
        assert!((1..=3).contains(&p));
        assert_eq!(data[0], "z");
        assert_eq!(data[4], "y");
        let pivot = data[p].to_lowercase();
        assert!(data[1..p].iter().all(|s| s.to_lowercase() <= pivot));
        assert!(data[p + 1..4].iter().all(|s| s.to_lowercase() > pivot));
    }

    #[test]
    fn permutation_applies() {
        let mut data = vec!['a', 'b', 'c', 'd'];
        apply_permutation(&mut data, vec![2, 0, 3, 1]);
        assert_eq!(data, vec!['c', 'a', 'd', 'b']);
    }

    #[test]
    fn sorted_check() {
        assert!(is_sorted_ci::<&str>(&[]));
        assert!(is_sorted_ci(&["a", "B", "b", "c"]));
        assert!(!is_sorted_ci(&["B", "a"]));
    }
}
