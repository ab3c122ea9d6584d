//! Search and facet filtering
//!
//! A record passes when every active constraint passes. Constraints that
//! are `None` (or an empty search) do not narrow the result.

use crate::data::record::{fields, Record};
use serde::{Deserialize, Serialize};

/// Current search term and facet selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub team: Option<String>,
    pub institution: Option<String>,
    pub project: Option<String>,
    pub data_source: Option<String>,
    pub status: Option<String>,
}

/// One facet-equality selector, used to set or clear a single dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Team,
    Institution,
    Project,
    DataSource,
    Status,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Set or clear one selector. Blank values clear it.
    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Team => self.team.as_deref(),
            FilterField::Institution => self.institution.as_deref(),
            FilterField::Project => self.project.as_deref(),
            FilterField::DataSource => self.data_source.as_deref(),
            FilterField::Status => self.status.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Team => &mut self.team,
            FilterField::Institution => &mut self.institution,
            FilterField::Project => &mut self.project,
            FilterField::DataSource => &mut self.data_source,
            FilterField::Status => &mut self.status,
        }
    }

    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.team.is_none()
            && self.institution.is_none()
            && self.project.is_none()
            && self.data_source.is_none()
            && self.status.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Evaluate every active constraint against one record
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && list_matches(record, fields::TEAM, self.team.as_deref())
            && list_matches(record, fields::PROJECTS, self.project.as_deref())
            && list_matches(record, fields::DATA_SOURCES, self.data_source.as_deref())
            && self
                .institution
                .as_deref()
                .map_or(true, |wanted| record.value(fields::INSTITUTION) == wanted)
            && self
                .status
                .as_deref()
                .map_or(true, |wanted| record.status() == wanted)
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.search_text().to_lowercase().contains(&needle)
    }
}

fn list_matches(record: &Record, key: &str, wanted: Option<&str>) -> bool {
    wanted.map_or(true, |token| record.list_contains(key, token))
}

/// Order-preserving subset of `records` passing `filter`
pub fn apply<'a>(records: &'a [Record], filter: &FilterState) -> Vec<&'a Record> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
