use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known record keys (normalized header names)
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "role";
    pub const TEAM: &str = "team";
    pub const INSTITUTION: &str = "institution";
    pub const PROJECTS: &str = "projects";
    pub const DATA_SOURCES: &str = "data_sources";
    pub const SERVICES: &str = "services";
    pub const STATUS: &str = "status";
}

/// Columns every roster must provide
pub const REQUIRED_FIELDS: [&str; 4] = [fields::NAME, fields::EMAIL, fields::ROLE, fields::TEAM];

/// Column order used for export when the original headers are unknown
pub const DEFAULT_HEADERS: [&str; 9] = [
    fields::NAME,
    fields::EMAIL,
    fields::ROLE,
    fields::TEAM,
    fields::INSTITUTION,
    fields::PROJECTS,
    fields::DATA_SOURCES,
    fields::SERVICES,
    fields::STATUS,
];

/// Fields included in free-text search, in concatenation order
pub const SEARCH_FIELDS: [&str; 8] = [
    fields::NAME,
    fields::EMAIL,
    fields::ROLE,
    fields::TEAM,
    fields::INSTITUTION,
    fields::PROJECTS,
    fields::DATA_SOURCES,
    fields::SERVICES,
];

/// Separator inside multi-valued cells
pub const LIST_SEPARATOR: char = ';';

/// Named fallbacks for missing values
pub mod defaults {
    /// Status of a record whose `status` cell is absent or blank
    pub const STATUS: &str = "active";
    /// Bucket for records without an institution in per-project counts
    pub const INSTITUTION: &str = "Unknown";
    /// Bucket for records without a role in per-data-source counts
    pub const ROLE: &str = "Unknown";
}

/// Map a raw CSV header to a record key: trimmed, lower-cased, whitespace
/// runs collapsed to a single underscore.
pub fn normalize_field_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Split a multi-valued cell. Pieces are trimmed and blank pieces dropped,
/// so `"A;;B "` yields `["A", "B"]`.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

/// Stable identifier of a record: its position in the loaded roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One personnel entry. Keys keep header order so the record serializes
/// back to the same JSON object it was restored from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value of a field, `None` if the column does not exist
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw value of a field, empty if the column does not exist
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn name(&self) -> &str {
        self.value(fields::NAME)
    }

    pub fn email(&self) -> &str {
        self.value(fields::EMAIL)
    }

    pub fn role(&self) -> &str {
        self.value(fields::ROLE)
    }

    /// Institution, if present and non-blank
    pub fn institution(&self) -> Option<&str> {
        non_blank(self.value(fields::INSTITUTION))
    }

    /// Status with the `"active"` default applied
    pub fn status(&self) -> &str {
        non_blank(self.value(fields::STATUS)).unwrap_or(defaults::STATUS)
    }

    /// Split tokens of a multi-valued field
    pub fn list(&self, key: &str) -> Vec<&str> {
        split_list(self.value(key)).collect()
    }

    pub fn teams(&self) -> Vec<&str> {
        self.list(fields::TEAM)
    }

    pub fn projects(&self) -> Vec<&str> {
        self.list(fields::PROJECTS)
    }

    pub fn data_sources(&self) -> Vec<&str> {
        self.list(fields::DATA_SOURCES)
    }

    pub fn services(&self) -> Vec<&str> {
        self.list(fields::SERVICES)
    }

    /// Exact, case-sensitive membership test on a multi-valued field
    pub fn list_contains(&self, key: &str, token: &str) -> bool {
        split_list(self.value(key)).any(|piece| piece == token)
    }

    /// Space-joined text of the searchable fields, missing fields skipped
    pub fn search_text(&self) -> String {
        SEARCH_FIELDS
            .iter()
            .filter_map(|key| self.get(key))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_field_name() {
        assert_eq!(normalize_field_name("Data Sources"), "data_sources");
        assert_eq!(normalize_field_name("  E-mail  "), "e-mail");
        assert_eq!(normalize_field_name("Data \t  Sources"), "data_sources");
        assert_eq!(normalize_field_name("NAME"), "name");
    }

    #[test]
    fn test_split_list_drops_blank_pieces() {
        let pieces: Vec<&str> = split_list(" TeamA ;;TeamB; ").collect();
        assert_eq!(pieces, vec!["TeamA", "TeamB"]);
        assert_eq!(split_list("").count(), 0);
    }

    #[test]
    fn test_status_default() {
        let record = Record::new().with("name", "Ada");
        assert_eq!(record.status(), "active");

        let record = record.with("status", "  ");
        assert_eq!(record.status(), "active");

        let record = record.with("status", "inactive");
        assert_eq!(record.status(), "inactive");
    }

    #[test]
    fn test_list_contains_is_exact() {
        let record = Record::new().with("team", "Genomics; Translational TB");
        assert!(record.list_contains("team", "Translational TB"));
        assert!(!record.list_contains("team", "translational tb"));
        assert!(!record.list_contains("team", "Translational"));
    }

    #[test]
    fn test_search_text_skips_missing_fields() {
        let record = Record::new()
            .with("name", "Ada")
            .with("email", "ada@example.org")
            .with("status", "active");
        assert_eq!(record.search_text(), "Ada ada@example.org");
    }

    #[test]
    fn test_record_json_keeps_key_order() {
        let record = Record::new()
            .with("name", "Ada")
            .with("email", "ada@example.org")
            .with("role", "Engineer");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ada","email":"ada@example.org","role":"Engineer"}"#
        );
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
