//! Facet dimensions and the set of values observed for each

use crate::data::record::{fields, split_list, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A categorical dimension personnel can be grouped or filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Team,
    Institution,
    Project,
    DataSource,
    Service,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Team,
        Facet::Institution,
        Facet::Project,
        Facet::DataSource,
        Facet::Service,
    ];

    /// Record key holding this facet's values
    pub fn field(self) -> &'static str {
        match self {
            Facet::Team => fields::TEAM,
            Facet::Institution => fields::INSTITUTION,
            Facet::Project => fields::PROJECTS,
            Facet::DataSource => fields::DATA_SOURCES,
            Facet::Service => fields::SERVICES,
        }
    }

    /// Whether the field is a `;`-separated list
    pub fn is_multi_valued(self) -> bool {
        !matches!(self, Facet::Institution)
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::Team => "Team",
            Facet::Institution => "Institution",
            Facet::Project => "Project",
            Facet::DataSource => "Data Source",
            Facet::Service => "Service",
        }
    }

    /// Values a record contributes to this facet
    pub fn values_of(self, record: &Record) -> Vec<&str> {
        if self.is_multi_valued() {
            record.list(self.field())
        } else {
            record.institution().into_iter().collect()
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "team" | "teams" => Ok(Facet::Team),
            "institution" | "institutions" => Ok(Facet::Institution),
            "project" | "projects" => Ok(Facet::Project),
            "data_source" | "data_sources" => Ok(Facet::DataSource),
            "service" | "services" => Ok(Facet::Service),
            other => Err(format!("Unknown facet: {}", other)),
        }
    }
}

/// Unique values per facet across a record collection.
///
/// Sets are ordered, so iteration is alphabetical and deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetUniverse {
    pub teams: BTreeSet<String>,
    pub institutions: BTreeSet<String>,
    pub projects: BTreeSet<String>,
    pub data_sources: BTreeSet<String>,
    pub services: BTreeSet<String>,
}

impl FacetUniverse {
    /// Recompute every facet from scratch
    pub fn extract<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut universe = Self::default();

        for record in records {
            extend(&mut universe.teams, split_list(record.value(fields::TEAM)));
            extend(
                &mut universe.projects,
                split_list(record.value(fields::PROJECTS)),
            );
            extend(
                &mut universe.data_sources,
                split_list(record.value(fields::DATA_SOURCES)),
            );
            extend(
                &mut universe.services,
                split_list(record.value(fields::SERVICES)),
            );
            if let Some(institution) = record.institution() {
                universe.institutions.insert(institution.to_string());
            }
        }

        universe
    }

    pub fn values(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Team => &self.teams,
            Facet::Institution => &self.institutions,
            Facet::Project => &self.projects,
            Facet::DataSource => &self.data_sources,
            Facet::Service => &self.services,
        }
    }

    pub fn count(&self, facet: Facet) -> usize {
        self.values(facet).len()
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.values(facet).contains(value)
    }
}

fn extend<'a>(set: &mut BTreeSet<String>, values: impl Iterator<Item = &'a str>) {
    set.extend(values.map(str::to_string));
}
