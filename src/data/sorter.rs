use crate::data::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Primary collation key: decomposed, accents dropped, lower-cased.
/// `"Élodie"` and `"elodie"` share the key `"elodie"`.
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Human ordering for display strings. Base letters decide first, then
/// case-folded text with accents, then the raw text so the order stays
/// total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Compare two records on one column, missing values sorting as `""`
pub fn compare_records(a: &Record, b: &Record, column: &str) -> Ordering {
    compare_text(a.value(column), b.value(column))
}

/// Sorted copy of `records`. The sort is stable.
pub fn sort<'a>(records: &[&'a Record], column: &str, direction: SortDirection) -> Vec<&'a Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| direction.apply(compare_records(a, b, column)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Record> {
        ["carol", "Alice", "bob", "Dave"]
            .iter()
            .map(|n| Record::new().with("name", *n))
            .collect()
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        let records: Vec<Record> = ["Zoe", "Élodie", "Adam", "émile", "Tomás", "Tomas"]
            .iter()
            .map(|n| Record::new().with("name", *n))
            .collect();
        let refs: Vec<&Record> = records.iter().collect();
        let sorted = sort(&refs, "name", SortDirection::Ascending);
        let names: Vec<&str> = sorted.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Adam", "Élodie", "émile", "Tomas", "Tomás", "Zoe"]);
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("Élodie"), "elodie");
        assert_eq!(collation_key("TOMÁS"), "tomas");
        assert_eq!(compare_text("Élodie", "elodie"), compare_text("élodie", "elodie"));
        assert_ne!(compare_text("Élodie", "elodie"), Ordering::Equal);
    }

    #[test]
    fn test_case_folded_order() {
        let records = people();
        let refs: Vec<&Record> = records.iter().collect();
        let sorted = sort(&refs, "name", SortDirection::Ascending);
        let names: Vec<&str> = sorted.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Alice", "bob", "carol", "Dave"]);
    }

    #[test]
    fn test_descending_reverses_distinct_values() {
        let records = people();
        let refs: Vec<&Record> = records.iter().collect();
        let asc = sort(&refs, "name", SortDirection::Ascending);
        let mut desc = sort(&refs, "name", SortDirection::Descending);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_missing_column_sorts_first() {
        let records = vec![
            Record::new().with("name", "b").with("role", "Dev"),
            Record::new().with("name", "a"),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let sorted = sort(&refs, "role", SortDirection::Ascending);
        assert_eq!(sorted[0].name(), "a");
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
    }

    #[test]
    fn test_compare_text_tie_break() {
        assert_eq!(compare_text("abc", "ABC"), Ordering::Greater);
        assert_eq!(compare_text("abc", "abc"), Ordering::Equal);
    }
}
