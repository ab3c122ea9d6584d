//! Per-facet grouping for the team, project, data source and service views
//!
//! Groups are always computed over the records the caller passes in, which
//! for the dashboard is the currently filtered view.

use crate::data::facets::{Facet, FacetUniverse};
use crate::data::record::{defaults, fields, Record, RecordId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Facet views that group personnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateDimension {
    Team,
    Project,
    DataSource,
    Service,
}

/// How groups are ordered once built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    /// Largest group first, ties in facet-value order
    MemberCountDesc,
    /// Facet-value order
    FacetOrder,
}

impl AggregateDimension {
    pub const ALL: [AggregateDimension; 4] = [
        AggregateDimension::Team,
        AggregateDimension::Project,
        AggregateDimension::DataSource,
        AggregateDimension::Service,
    ];

    pub fn facet(self) -> Facet {
        match self {
            AggregateDimension::Team => Facet::Team,
            AggregateDimension::Project => Facet::Project,
            AggregateDimension::DataSource => Facet::DataSource,
            AggregateDimension::Service => Facet::Service,
        }
    }

    /// Field counted inside each group, with the bucket used when blank
    pub fn breakdown(self) -> Option<(&'static str, &'static str)> {
        match self {
            AggregateDimension::Project => Some((fields::INSTITUTION, defaults::INSTITUTION)),
            AggregateDimension::DataSource => Some((fields::ROLE, defaults::ROLE)),
            AggregateDimension::Team | AggregateDimension::Service => None,
        }
    }

    pub fn order(self) -> GroupOrder {
        match self {
            AggregateDimension::Service => GroupOrder::FacetOrder,
            _ => GroupOrder::MemberCountDesc,
        }
    }

    /// What the people in a group are called in this view
    pub fn member_label(self) -> &'static str {
        match self {
            AggregateDimension::Team | AggregateDimension::Project => "members",
            AggregateDimension::DataSource => "owners",
            AggregateDimension::Service => "admins",
        }
    }
}

impl fmt::Display for AggregateDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.facet(), f)
    }
}

impl FromStr for AggregateDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Facet>()? {
            Facet::Team => Ok(AggregateDimension::Team),
            Facet::Project => Ok(AggregateDimension::Project),
            Facet::DataSource => Ok(AggregateDimension::DataSource),
            Facet::Service => Ok(AggregateDimension::Service),
            Facet::Institution => Err("Institutions have no aggregate view".to_string()),
        }
    }
}

/// One facet value and the records carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub name: String,
    /// Members (teams, projects), owners (data sources) or admins (services)
    pub members: Vec<RecordId>,
    /// Institution counts for projects, role counts for data sources,
    /// empty otherwise
    pub counts: BTreeMap<String, usize>,
}

impl AggregateGroup {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Build one group per facet value in the universe, empty groups included
pub fn aggregate(
    records: &[(RecordId, &Record)],
    universe: &FacetUniverse,
    dimension: AggregateDimension,
) -> Vec<AggregateGroup> {
    let groups = universe
        .values(dimension.facet())
        .iter()
        .map(|value| build_group(records, value, dimension))
        .collect();

    finish(groups, dimension)
}

/// Same result as [`aggregate`], with groups built on the rayon pool.
///
/// The records are an immutable snapshot; the indexed collect keeps
/// facet-value order, so the final ordering matches the serial path.
pub fn aggregate_parallel(
    records: &[(RecordId, &Record)],
    universe: &FacetUniverse,
    dimension: AggregateDimension,
) -> Vec<AggregateGroup> {
    let values: Vec<&String> = universe.values(dimension.facet()).iter().collect();
    let groups = values
        .par_iter()
        .map(|value| build_group(records, value, dimension))
        .collect();

    finish(groups, dimension)
}

fn build_group(
    records: &[(RecordId, &Record)],
    value: &str,
    dimension: AggregateDimension,
) -> AggregateGroup {
    let field = dimension.facet().field();
    let mut members = Vec::new();
    let mut counts = BTreeMap::new();

    for (id, record) in records {
        if !record.list_contains(field, value) {
            continue;
        }
        members.push(*id);

        if let Some((key, fallback)) = dimension.breakdown() {
            let bucket = record.value(key).trim();
            let bucket = if bucket.is_empty() { fallback } else { bucket };
            *counts.entry(bucket.to_string()).or_insert(0) += 1;
        }
    }

    AggregateGroup {
        name: value.to_string(),
        members,
        counts,
    }
}

fn finish(mut groups: Vec<AggregateGroup>, dimension: AggregateDimension) -> Vec<AggregateGroup> {
    if dimension.order() == GroupOrder::MemberCountDesc {
        // stable: ties keep the universe's alphabetical order
        groups.sort_by(|a, b| b.member_count().cmp(&a.member_count()));
    }

    debug!(
        "Aggregated {} {} groups",
        groups.len(),
        dimension.facet().label()
    );
    groups
}
