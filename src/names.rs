//! Sorting of comma-delimited name lists.

use tracing::debug;

use crate::algo::quicksort_ci;
use crate::error::{MissingInput, SortError, SortResult};

/// Shown instead of a result when the input holds no names.
pub const NO_NAMES_MESSAGE: &str = "No names provided to sort.";

/// Splits on commas, trims each entry and drops the empty ones.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins names back into a single display string.
pub fn render_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Parses and sorts a delimited name list.
///
/// Returns [`MissingInput::Names`] when the list is empty after parsing.
pub fn try_sort_names(input: &str) -> SortResult<Vec<String>> {
    let mut names = split_list(input);
    if names.is_empty() {
        return Err(SortError::MissingInput(MissingInput::Names));
    }
    debug!(count = names.len(), "sorting name list");
    quicksort_ci(&mut names);
    Ok(names)
}

/// Sorts a delimited name list and renders it for display.
///
/// Falls back to [`NO_NAMES_MESSAGE`] when there is nothing to sort.
///
/// ```
/// use casesort::names::sort_names;
///
/// assert_eq!(sort_names("charlie, Bob ,alice"), "alice, Bob, charlie");
/// assert_eq!(sort_names(" , "), "No names provided to sort.");
/// ```
pub fn sort_names(input: &str) -> String {
    match try_sort_names(input) {
        Ok(names) => render_names(&names),
        Err(_) => NO_NAMES_MESSAGE.to_string(),
    }
}
