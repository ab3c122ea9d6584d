#[cfg(test)]
mod tests {
    use roster_view::data::aggregator::AggregateDimension;
    use roster_view::data::facets::Facet;
    use roster_view::data::filter::{FilterField, FilterState};
    use roster_view::data::roster::Roster;
    use roster_view::data::roster_view::RosterView;
    use roster_view::data::sorter::SortDirection;
    use roster_view::services::SAMPLE_ROSTER;
    use roster_view::session::RosterSession;
    use roster_view::state::ViewMode;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn get_test_data_path(filename: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("data");
        path.push(filename);
        path
    }

    fn load_sample_roster() -> Roster {
        let path = get_test_data_path("sample_roster.csv");
        let text = std::fs::read_to_string(&path).expect("Failed to read sample_roster.csv");
        Roster::from_csv(&text).expect("sample roster should load")
    }

    fn sample_session() -> RosterSession {
        let mut session = RosterSession::new(ViewMode::Grid, 12);
        session.load_csv(SAMPLE_ROSTER).unwrap();
        session
    }

    #[test]
    fn test_bundled_sample_matches_data_file() {
        assert_eq!(load_sample_roster(), Roster::from_csv(SAMPLE_ROSTER).unwrap());
    }

    #[test]
    fn test_sample_loads_eight_people() {
        let roster = load_sample_roster();
        assert_eq!(roster.len(), 8);
        assert_eq!(roster.headers()[6], "Data Sources");

        let liu = &roster.records()[3];
        assert_eq!(liu.name(), "Liu, Wen");
        assert_eq!(liu.projects(), vec!["TB Biomarkers", "Vaccine Response"]);
        assert!(liu.services().is_empty());

        let sofia = &roster.records()[4];
        assert_eq!(sofia.institution(), None);
        assert_eq!(sofia.status(), "inactive");
    }

    #[test]
    fn test_sample_facet_universe() {
        let session = sample_session();
        let universe = session.universe();

        assert_eq!(
            session.facet_options(Facet::Team),
            vec![
                "Biostatistics",
                "Clinical Operations",
                "Data Platform",
                "Host Genomics",
                "Translational TB"
            ]
        );
        assert_eq!(universe.count(Facet::Institution), 3);
        assert_eq!(universe.count(Facet::Project), 3);
        assert_eq!(universe.count(Facet::DataSource), 4);
        assert_eq!(universe.count(Facet::Service), 3);

        let stats = session.stats();
        assert_eq!(stats.total_people, 8);
        assert_eq!(stats.total_teams, 5);
        assert!(!stats.is_filtered());
    }

    #[test]
    fn test_translational_tb_has_two_members() {
        let mut session = sample_session();
        session.set_filter(FilterField::Team, Some("Translational TB".to_string()));

        let names: Vec<&str> = session.filtered_records().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Amara Okafor", "Priya Natarajan"]);
        assert_eq!(session.stats().filtered_people, 2);
        assert!(session.stats().is_filtered());
    }

    #[test]
    fn test_team_aggregation_after_status_filter() {
        let mut session = sample_session();
        session.set_filter(FilterField::Status, Some("active".to_string()));
        assert_eq!(session.filtered_count(), 6);

        let groups = session.aggregate(AggregateDimension::Team);
        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|g| (g.name.as_str(), g.member_count()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Host Genomics", 3),
                ("Data Platform", 2),
                ("Translational TB", 2),
                ("Biostatistics", 1),
                ("Clinical Operations", 0),
            ]
        );
    }

    #[test]
    fn test_project_groups_count_institutions() {
        let session = sample_session();
        let groups = session.aggregate(AggregateDimension::Project);

        assert_eq!(groups[0].name, "Cohort Atlas");
        assert_eq!(groups[0].member_count(), 4);
        assert_eq!(groups[0].counts.get("Northbridge University"), Some(&3));
        assert_eq!(groups[0].counts.get("Eastfield Research Centre"), Some(&1));

        let vaccine = groups.iter().find(|g| g.name == "Vaccine Response").unwrap();
        assert_eq!(vaccine.counts.get("Unknown"), Some(&1));
    }

    #[test]
    fn test_service_groups_in_facet_order() {
        let session = sample_session();
        let names: Vec<String> = session
            .aggregate(AggregateDimension::Service)
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Compute Cluster", "Data Portal", "Object Storage"]);
    }

    #[test]
    fn test_data_source_groups_count_roles() {
        let session = sample_session();
        let registry = session
            .aggregate(AggregateDimension::DataSource)
            .into_iter()
            .find(|g| g.name == "Clinical Registry")
            .unwrap();
        assert_eq!(registry.member_count(), 4);
        assert_eq!(registry.counts.get("Biostatistician"), Some(&1));
        assert_eq!(registry.counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn test_search_matches_quoted_name_and_email() {
        let roster = Arc::new(load_sample_roster());
        let view = RosterView::new(roster).filter(&FilterState::new().with_search("LIU"));
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].email(), "wen.liu@example.org");
    }

    #[test]
    fn test_sort_by_name_descending() {
        let roster = Arc::new(load_sample_roster());
        let view = RosterView::new(roster).sort_by("name", SortDirection::Descending);
        let names: Vec<&str> = view.records().iter().map(|r| r.name()).collect();
        assert_eq!(names.first(), Some(&"Tomás Alvarez"));
        assert_eq!(names.last(), Some(&"Amara Okafor"));
    }

    #[test]
    fn test_export_quotes_name_with_comma() {
        let mut session = sample_session();
        session.set_search("wen.liu");
        let csv = session.export_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Email,Role,Team,Institution,Projects,Data Sources,Services,Status")
        );
        assert!(lines.next().unwrap().starts_with("\"Liu, Wen\",wen.liu@example.org"));
    }
}
