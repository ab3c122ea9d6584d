//! Property-based tests over generated rosters
//!
//! Pagination coverage, filter narrowing, facet extraction and the
//! CSV export/import path.

use proptest::prelude::*;

use roster_view::data::exporter::RosterExporter;
use roster_view::data::facets::{Facet, FacetUniverse};
use roster_view::data::filter::{self, FilterField, FilterState};
use roster_view::data::paginator::{page_count, paginate};
use roster_view::data::record::{Record, DEFAULT_HEADERS};
use roster_view::data::roster::Roster;

const TEAMS: [&str; 4] = ["Core", "Genomics", "Imaging", "Platform"];
const STATUSES: [&str; 3] = ["active", "inactive", ""];

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,6}[A-Za-z]"
}

/// Free text that may need quoting: commas, quotes, inner spaces
fn cell_text() -> impl Strategy<Value = String> {
    "[A-Za-z,\" ]{0,10}".prop_map(|s| s.trim().to_string())
}

fn team_list() -> impl Strategy<Value = String> {
    proptest::sample::subsequence(TEAMS.to_vec(), 1..=3).prop_map(|teams| teams.join(";"))
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        token(),
        token(),
        cell_text(),
        team_list(),
        cell_text(),
        proptest::sample::select(STATUSES.to_vec()),
    )
        .prop_map(|(name, role, institution, team, projects, status)| {
            Record::new()
                .with("name", name.clone())
                .with("email", format!("{}@example.org", name.replace(' ', ".")))
                .with("role", role)
                .with("team", team)
                .with("institution", institution)
                .with("projects", projects)
                .with("data_sources", "")
                .with("services", "")
                .with("status", status)
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record_strategy(), 1..25)
}

proptest! {
    /// Concatenating every page reproduces the list exactly once
    #[test]
    fn prop_pages_cover_every_item(len in 0usize..60, size in 1usize..10) {
        let items: Vec<usize> = (0..len).collect();
        let pages = page_count(len, size);

        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, size);
            prop_assert!(!slice.is_empty());
            prop_assert!(slice.len() <= size);
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(&seen, &items);
        prop_assert!(paginate(&items, pages + 1, size).is_empty());
    }

    /// Adding a constraint never grows the result
    #[test]
    fn prop_extra_constraint_narrows(
        records in records_strategy(),
        team in proptest::sample::select(TEAMS.to_vec()),
        status in proptest::sample::select(vec!["active", "inactive"]),
    ) {
        let base = FilterState::new().with(FilterField::Team, team);
        let narrowed = base.clone().with(FilterField::Status, status);

        let wide = filter::apply(&records, &base);
        let narrow = filter::apply(&records, &narrowed);
        prop_assert!(narrow.len() <= wide.len());
        prop_assert!(narrow.iter().all(|r| wide.iter().any(|w| std::ptr::eq(*r, *w))));
    }

    /// A combined filter keeps exactly the records every single constraint keeps
    #[test]
    fn prop_filter_is_conjunction(
        records in records_strategy(),
        team in proptest::sample::select(TEAMS.to_vec()),
        search in "[a-z]{0,2}",
    ) {
        let combined = FilterState::new()
            .with_search(search.clone())
            .with(FilterField::Team, team);
        let by_search = FilterState::new().with_search(search);
        let by_team = FilterState::new().with(FilterField::Team, team);

        for record in &records {
            prop_assert_eq!(
                combined.matches(record),
                by_search.matches(record) && by_team.matches(record)
            );
        }
    }

    /// Extraction is deterministic and every team token is in the universe
    #[test]
    fn prop_facet_extraction_is_stable(records in records_strategy()) {
        let first = FacetUniverse::extract(&records);
        let second = FacetUniverse::extract(&records);
        prop_assert_eq!(&first, &second);

        for record in &records {
            for team in record.teams() {
                prop_assert!(first.contains(Facet::Team, team));
            }
        }
        prop_assert!(first.values(Facet::Team).iter().all(|t| !t.trim().is_empty()));
    }

    /// Exported CSV loads back into the same records
    #[test]
    fn prop_export_then_load(records in records_strategy()) {
        let headers: Vec<String> = DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect();
        let refs: Vec<&Record> = records.iter().collect();

        let csv = RosterExporter::to_csv(&headers, &refs).unwrap();
        let roster = Roster::from_csv(&csv).unwrap();
        prop_assert_eq!(roster.records(), records.as_slice());
    }
}
