use crate::data::facets::{Facet, FacetUniverse};
use serde::Serialize;

/// Headline numbers for the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_people: usize,
    pub filtered_people: usize,
    pub total_teams: usize,
    pub total_institutions: usize,
    pub total_projects: usize,
    pub total_data_sources: usize,
    pub total_services: usize,
}

impl DashboardStats {
    /// Facet totals describe the whole roster, not the filtered subset
    pub fn compute(universe: &FacetUniverse, total_people: usize, filtered_people: usize) -> Self {
        Self {
            total_people,
            filtered_people,
            total_teams: universe.count(Facet::Team),
            total_institutions: universe.count(Facet::Institution),
            total_projects: universe.count(Facet::Project),
            total_data_sources: universe.count(Facet::DataSource),
            total_services: universe.count(Facet::Service),
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered_people != self.total_people
    }
}
