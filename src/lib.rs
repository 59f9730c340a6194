//! # Casesort
//!
//! `casesort` sorts two kinds of input with case-insensitive ordering:
//! short delimited lists of names, and tabular data read from CSV or Excel files.
//!
//! Ordering always compares the **case-folded** text of a value (its lowercase
//! string form). The folded key is used only for comparison; stored values are
//! never changed.
//!
//! ## Key Features
//!
//! - **Randomized Quicksort**: [`quicksort_ci`] sorts any slice of [`FoldKey`] values in
//!   place with a uniformly random pivot. It is not stable: equal folded keys may
//!   come out in any order.
//! - **Stable Multi-Key Table Sort**: [`Table::sort_by_columns`] orders rows by one or more
//!   columns, first key first, and keeps the original order of rows with equal keys.
//! - **Validation Before Sorting**: unknown key columns are reported together with the
//!   available ones, and the table is left untouched.
//! - **Take-Once Downloads**: [`service::SortService`] stores each sorted file under its own
//!   id with a time limit, so concurrent requests never see each other's results.
//!
//! ## Usage
//!
//! ### Name Lists
//!
//! ```rust
//! use casesort::names::sort_names;
//!
//! assert_eq!(sort_names("bob, Charlie, alice"), "alice, bob, Charlie");
//! assert_eq!(sort_names(""), "No names provided to sort.");
//! ```
//!
//! ### Tables
//!
//! ```rust
//! use casesort::{KeySpec, Table, Value};
//!
//! let mut table = Table::from_records(vec![
//!     vec![("city", Value::from("Oslo")), ("name", Value::from("bob"))],
//!     vec![("city", Value::from("athens")), ("name", Value::from("Zoe"))],
//!     vec![("city", Value::from("oslo")), ("name", Value::from("Alice"))],
//! ]);
//!
//! table.sort_by_columns(&KeySpec::parse("city, name").unwrap()).unwrap();
//!
//! let names: Vec<_> = (0..table.len())
//!     .map(|i| table.get(i, "name").unwrap().to_string())
//!     .collect();
//! assert_eq!(names, vec!["Zoe", "Alice", "bob"]);
//! ```
//!
//! ## Known Quirk
//!
//! Every cell is compared as text, numbers included, so `10` sorts before `2`.
//! An empty cell compares as the text `nan`, so it lands between `m…` and `o…`
//! words instead of first.
//!
//! ## Performance Characteristics
//!
//! - **Sequences**: expected O(N log N), worst case O(N²) comparisons. Stack depth stays
//!   O(log N).
//! - **Tables**: O(N log N) comparisons of composite keys, plus one folded key per key
//!   cell (borrowed when the cell is already lowercase).

pub mod algo;
pub mod codec;
pub mod core;
pub mod error;
pub mod names;
pub mod service;
pub mod store;
pub mod table;

pub use algo::{is_sorted_ci, quicksort_ci, quicksort_ci_with_rng};
pub use crate::core::{FoldKey, Value};
pub use error::{MissingInput, SortError, SortResult};
pub use table::{KeySpec, Row, Table};

pub mod prelude {
    pub use crate::algo::{is_sorted_ci, quicksort_ci, quicksort_ci_with_rng};
    pub use crate::core::{FoldKey, Value};
    pub use crate::error::{MissingInput, SortError, SortResult};
    pub use crate::names::sort_names;
    pub use crate::service::SortService;
    pub use crate::table::{KeySpec, Row, Table};
}
