//! Core traits and types for case-insensitive ordering.
//!
//! This module defines:
//! - [`FoldKey`]: The trait every sortable element implements to expose its comparison key.
//! - [`Value`]: A single table cell.

use std::borrow::Cow;
use std::fmt;

/// Lowercases `s`, borrowing when it is already in folded form.
///
/// Folding is plain Unicode lowercasing. There is no locale-aware collation.
#[inline]
pub fn fold_str(s: &str) -> Cow<'_, str> {
    let folded = s.chars().all(|c| {
        let mut lower = c.to_lowercase();
        lower.next() == Some(c) && lower.next().is_none()
    });
    if folded {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.to_lowercase())
    }
}

/// A trait for deriving the case-folded comparison key of a value.
///
/// The key is used only for comparison and never replaces the stored value.
/// Non-string values are rendered to text before folding, so every
/// implementor compares as a string.
///
/// # Examples
///
/// ```
/// use casesort::core::FoldKey;
///
/// struct Customer {
///     name: String,
/// }
///
/// impl FoldKey for Customer {
///     fn fold_key(&self) -> std::borrow::Cow<'_, str> {
///         self.name.fold_key()
///     }
/// }
///
/// let c = Customer { name: "ALICE".into() };
/// assert_eq!(c.fold_key(), "alice");
/// ```
pub trait FoldKey {
    /// Returns the lowercase form of this value's string representation.
    fn fold_key(&self) -> Cow<'_, str>;
}

impl FoldKey for str {
    fn fold_key(&self) -> Cow<'_, str> {
        fold_str(self)
    }
}

impl FoldKey for String {
    fn fold_key(&self) -> Cow<'_, str> {
        fold_str(self)
    }
}

impl<T: FoldKey + ?Sized> FoldKey for &T {
    fn fold_key(&self) -> Cow<'_, str> {
        (**self).fold_key()
    }
}

impl<T: FoldKey + ?Sized> FoldKey for Box<T> {
    fn fold_key(&self) -> Cow<'_, str> {
        (**self).fold_key()
    }
}

/// Comparison key of an empty cell. Missing cells compare as the text `nan`.
pub const EMPTY_KEY: &str = "nan";

/// A single table cell.
///
/// Cells keep their original type so that decoding and re-encoding a table
/// reproduces every cell exactly. For ordering, all variants fold to text,
/// which means numbers order as strings (`"10"` before `"2"`).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// An empty or missing cell. Renders as `""` but folds to [`EMPTY_KEY`],
    /// so it sorts between words starting with `m` and `o`.
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Classifies raw cell text.
    ///
    /// Numbers and booleans are only recognised when their canonical rendering
    /// equals `raw`, so `Value::infer(raw).to_string() == raw` always holds.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Empty;
        }
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            if n.to_string() == raw {
                return Self::Int(n);
            }
        }
        if let Ok(x) = raw.parse::<f64>() {
            if x.is_finite() && x.to_string() == raw {
                return Self::Float(x);
            }
        }
        Self::Text(raw.to_string())
    }

    /// Returns `true` for [`Value::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Borrows the text of a [`Value::Text`] cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FoldKey for Value {
    fn fold_key(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(EMPTY_KEY),
            Self::Text(s) => fold_str(s),
            other => Cow::Owned(other.to_string().to_lowercase()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_borrows_lowercase_input() {
        assert!(matches!(fold_str("alice"), Cow::Borrowed(_)));
        assert!(matches!(fold_str("Alice"), Cow::Owned(_)));
        assert_eq!(fold_str("ÀLICE"), "àlice");
    }

    #[test]
    fn infer_round_trips_text() {
        for raw in ["", "true", "false", "True", "42", "-7", "007", "+5", "1.5", "1.0", "1e3", "NaN", "Bob"] {
            assert_eq!(Value::infer(raw).to_string(), raw, "raw = {raw:?}");
        }
    }

    #[test]
    fn infer_classifies() {
        assert_eq!(Value::infer(""), Value::Empty);
        assert_eq!(Value::infer("true"), Value::Bool(true));
        assert_eq!(Value::infer("30"), Value::Int(30));
        assert_eq!(Value::infer("2.5"), Value::Float(2.5));
        assert_eq!(Value::infer("007"), Value::Text("007".into()));
        assert_eq!(Value::infer("TRUE"), Value::Text("TRUE".into()));
    }

    #[test]
    fn non_text_values_fold_to_text() {
        assert_eq!(Value::Int(10).fold_key(), "10");
        assert_eq!(Value::Bool(true).fold_key(), "true");
        assert_eq!(Value::Empty.fold_key(), "nan");
        assert_eq!(Value::Empty.to_string(), "");
        assert_eq!(Value::from("MiXeD").fold_key(), "mixed");
        // text ordering, not numeric
        assert!(Value::Int(10).fold_key() < Value::Int(2).fold_key());
    }
}
