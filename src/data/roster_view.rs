use crate::data::filter::FilterState;
use crate::data::paginator;
use crate::data::record::{Record, RecordId};
use crate::data::roster::Roster;
use crate::data::sorter::{compare_records, SortDirection};
use std::sync::Arc;
use tracing::debug;

/// A view over a Roster that can filter, sort, and page records
/// without copying or modifying the underlying data
#[derive(Debug, Clone)]
pub struct RosterView {
    /// The underlying immutable roster
    source: Arc<Roster>,

    /// Record ids that are visible (after filtering and sorting)
    visible: Vec<RecordId>,
}

impl RosterView {
    /// Create a new view showing every record in roster order
    pub fn new(source: Arc<Roster>) -> Self {
        let visible = source.ids().collect();
        Self { source, visible }
    }

    /// Keep the records passing `filter`, preserving order
    pub fn filter(mut self, filter: &FilterState) -> Self {
        let before = self.visible.len();
        let source = &self.source;
        self.visible
            .retain(|&id| source.get(id).is_some_and(|record| filter.matches(record)));
        debug!("Filter kept {} of {} records", self.visible.len(), before);
        self
    }

    /// Sort visible records by a column; stable, missing values as `""`
    pub fn sort_by(mut self, column: &str, direction: SortDirection) -> Self {
        let source = &self.source;
        self.visible.sort_by(|&a, &b| match (source.get(a), source.get(b)) {
            (Some(ra), Some(rb)) => direction.apply(compare_records(ra, rb, column)),
            _ => std::cmp::Ordering::Equal,
        });
        self
    }

    /// Get the number of visible records
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible ids in view order
    pub fn ids(&self) -> &[RecordId] {
        &self.visible
    }

    /// Visible records in view order
    pub fn records(&self) -> Vec<&Record> {
        self.visible
            .iter()
            .filter_map(|&id| self.source.get(id))
            .collect()
    }

    /// Visible records paired with their ids
    pub fn entries(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.visible
            .iter()
            .filter_map(|&id| self.source.get(id).map(|record| (id, record)))
    }

    /// Ids on a 1-based page
    pub fn page_ids(&self, page: usize, page_size: usize) -> &[RecordId] {
        paginator::paginate(&self.visible, page, page_size)
    }

    /// Records on a 1-based page
    pub fn page(&self, page: usize, page_size: usize) -> Vec<(RecordId, &Record)> {
        self.page_ids(page, page_size)
            .iter()
            .filter_map(|&id| self.source.get(id).map(|record| (id, record)))
            .collect()
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        paginator::page_count(self.visible.len(), page_size)
    }
}
