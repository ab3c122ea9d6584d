//! The dashboard session: one explicit context object holding the loaded
//! roster and everything derived from it.

use crate::data::aggregator::{self, AggregateDimension, AggregateGroup};
use crate::data::exporter::RosterExporter;
use crate::data::facets::{Facet, FacetUniverse};
use crate::data::filter::{FilterField, FilterState};
use crate::data::record::{Record, RecordId};
use crate::data::roster::Roster;
use crate::data::roster_view::RosterView;
use crate::data::stats::DashboardStats;
use crate::error::Result;
use crate::persistence::PersistedState;
use crate::state::{SortState, ViewMode, ViewState};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

pub struct RosterSession {
    roster: Arc<Roster>,
    universe: FacetUniverse,
    filter: FilterState,
    view_state: ViewState,
    /// Filtered records in roster order; aggregates read from here
    filtered: RosterView,
    /// `filtered` with the current sort applied; pages read from here
    display: RosterView,
}

impl RosterSession {
    pub fn new(mode: ViewMode, page_size: usize) -> Self {
        let roster = Arc::new(Roster::default());
        let filtered = RosterView::new(roster.clone());
        Self {
            roster,
            universe: FacetUniverse::default(),
            filter: FilterState::default(),
            view_state: ViewState::new(mode, page_size),
            display: filtered.clone(),
            filtered,
        }
    }

    /// Parse, validate and install a roster from CSV text. On error the
    /// current roster stays in place.
    pub fn load_csv(&mut self, text: &str) -> Result<usize> {
        let roster = Roster::from_csv(text)?;
        Ok(self.replace_roster(roster))
    }

    /// Install a previously saved snapshot, validated like a CSV load
    pub fn restore(&mut self, state: PersistedState) -> Result<usize> {
        let roster = state.into_roster()?;
        Ok(self.replace_roster(roster))
    }

    /// Swap in a new roster wholesale and reset derived state
    pub fn replace_roster(&mut self, roster: Roster) -> usize {
        let count = roster.len();
        self.roster = Arc::new(roster);
        self.universe = FacetUniverse::extract(self.roster.records());
        self.filter.clear();
        self.view_state.reset();
        self.refresh();

        info!(
            "Session roster replaced: {} records, {} teams",
            count,
            self.universe.count(Facet::Team)
        );
        count
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState::from_roster(&self.roster)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn universe(&self) -> &FacetUniverse {
        &self.universe
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        self.filter_changed();
    }

    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) {
        self.filter.set(field, value);
        self.filter_changed();
    }

    /// Replace every constraint at once
    pub fn apply_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.filter_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        self.view_state.reset_page();
        self.refresh();
    }

    /// Recompute the filtered and displayed views from current state
    fn refresh(&mut self) {
        self.filtered = RosterView::new(self.roster.clone()).filter(&self.filter);
        self.resort();
    }

    fn resort(&mut self) {
        self.display = match &self.view_state.sort {
            Some(sort) => self.filtered.clone().sort_by(&sort.column, sort.direction),
            None => self.filtered.clone(),
        };
    }

    /// Click on a column header: same column flips, new column ascends
    pub fn toggle_sort(&mut self, column: &str) -> SortState {
        let sort = self.view_state.toggle_sort(column).clone();
        self.resort();
        sort
    }

    /// Returns false, leaving the page unchanged, for pages that do not exist
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.view_state.go_to_page(page, self.display.len())
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.view_state.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.view_state.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        debug!("View mode: {} -> {}", self.view_state.mode, mode);
        self.view_state.mode = mode;
    }

    /// Filtered records in display order
    pub fn filtered_records(&self) -> Vec<&Record> {
        self.display.records()
    }

    pub fn filtered_count(&self) -> usize {
        self.display.len()
    }

    /// Records on the current page
    pub fn current_page(&self) -> Vec<(RecordId, &Record)> {
        self.display
            .page(self.view_state.current_page, self.view_state.page_size)
    }

    pub fn page_count(&self) -> usize {
        self.display.page_count(self.view_state.page_size)
    }

    /// Group the filtered records by one facet
    pub fn aggregate(&self, dimension: AggregateDimension) -> Vec<AggregateGroup> {
        let entries: Vec<(RecordId, &Record)> = self.filtered.entries().collect();
        aggregator::aggregate(&entries, &self.universe, dimension)
    }

    /// Groups for the current view mode, if it is a facet view
    pub fn current_aggregate(&self) -> Option<Vec<AggregateGroup>> {
        self.view_state.mode.dimension().map(|d| self.aggregate(d))
    }

    /// Detail lookup by identifier
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.roster.get(id)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.universe, self.roster.len(), self.filtered.len())
    }

    /// Sorted values for a filter drop-down
    pub fn facet_options(&self, facet: Facet) -> Vec<&str> {
        self.universe
            .values(facet)
            .iter()
            .map(String::as_str)
            .collect()
    }

    /// Distinct statuses present, defaults applied
    pub fn status_options(&self) -> Vec<&str> {
        self.roster
            .records()
            .iter()
            .map(Record::status)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// CSV of the filtered records in display order
    pub fn export_csv(&self) -> anyhow::Result<String> {
        RosterExporter::to_csv(self.roster.headers(), &self.filtered_records())
    }

    /// Pretty JSON of the filtered records in display order
    pub fn export_json(&self) -> anyhow::Result<String> {
        RosterExporter::to_json(&self.filtered_records())
    }
}

impl Default for RosterSession {
    fn default() -> Self {
        let view = ViewState::default();
        Self::new(view.mode, view.page_size)
    }
}
