use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use roster_view::data::aggregator::{AggregateDimension, AggregateGroup};
use roster_view::data::record::{fields, Record, RecordId};
use roster_view::data::sorter::SortDirection;
use roster_view::data::stats::DashboardStats;
use roster_view::session::RosterSession;

/// Columns shown in the table view
const TABLE_COLUMNS: [(&str, &str); 6] = [
    (fields::NAME, "Name"),
    (fields::EMAIL, "Email"),
    (fields::ROLE, "Role"),
    (fields::TEAM, "Team"),
    (fields::INSTITUTION, "Institution"),
    (fields::STATUS, "Status"),
];

pub struct Display {
    pub use_colors: bool,
}

impl Display {
    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.use_colors {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn notice(&self, text: &str) {
        if self.use_colors {
            println!("{}", text.green());
        } else {
            println!("{}", text);
        }
    }

    pub fn warning(&self, text: &str) {
        if self.use_colors {
            eprintln!("{}", text.yellow());
        } else {
            eprintln!("{}", text);
        }
    }

    pub fn display_stats(&self, stats: &DashboardStats) {
        let people = if stats.is_filtered() {
            format!("{} of {}", stats.filtered_people, stats.total_people)
        } else {
            stats.total_people.to_string()
        };
        println!(
            "{}  people {} | teams {} | institutions {} | projects {} | data sources {} | services {}",
            self.heading("Roster"),
            people,
            stats.total_teams,
            stats.total_institutions,
            stats.total_projects,
            stats.total_data_sources,
            stats.total_services
        );
        println!();
    }

    /// Card grid: one block per record on the current page
    pub fn display_grid(&self, session: &RosterSession) {
        let page = session.current_page();
        if page.is_empty() {
            println!("{}", self.muted("No people match the current filters."));
            return;
        }

        for (id, record) in page {
            println!("{} {}", self.heading(record.name()), self.muted(&id.to_string()));
            println!("  {}  <{}>", record.role(), record.email());
            println!("  Team: {}", record.teams().join(", "));
            if let Some(institution) = record.institution() {
                println!("  Institution: {}", institution);
            }
            print_list("  Projects", &record.projects());
            print_list("  Data sources", &record.data_sources());
            print_list("  Services", &record.services());
            println!("  Status: {}", record.status());
            println!();
        }
        self.display_page_footer(session);
    }

    /// Paginated table with a sort marker on the active column
    pub fn display_table(&self, session: &RosterSession) {
        let page = session.current_page();
        if page.is_empty() {
            println!("{}", self.muted("No people match the current filters."));
            return;
        }

        let sort = session.view_state().sort.as_ref();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut headers = vec![Cell::new("#").add_attribute(Attribute::Bold)];
        headers.extend(TABLE_COLUMNS.iter().map(|(key, label)| {
            let marker = match sort {
                Some(s) if s.column == *key => match s.direction {
                    SortDirection::Ascending => " ▲",
                    SortDirection::Descending => " ▼",
                },
                _ => "",
            };
            Cell::new(format!("{}{}", label, marker)).add_attribute(Attribute::Bold)
        }));
        table.set_header(headers);

        for (id, record) in page {
            let mut row = vec![id.index().to_string()];
            row.extend(TABLE_COLUMNS.iter().map(|(key, _)| match *key {
                fields::TEAM => record.teams().join(", "),
                fields::STATUS => record.status().to_string(),
                _ => record.value(key).to_string(),
            }));
            table.add_row(row);
        }

        println!("{table}");
        self.display_page_footer(session);
    }

    fn display_page_footer(&self, session: &RosterSession) {
        let state = session.view_state();
        println!(
            "{}",
            self.muted(&format!(
                "Page {} of {} ({} people)",
                state.current_page,
                session.page_count().max(1),
                session.filtered_count()
            ))
        );
    }

    /// One row per facet value with its people and breakdown counts
    pub fn display_groups(
        &self,
        session: &RosterSession,
        dimension: AggregateDimension,
        groups: &[AggregateGroup],
    ) {
        if groups.is_empty() {
            println!("{}", self.muted("No values for this facet."));
            return;
        }

        let label = dimension.member_label();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut headers = vec![
            Cell::new(dimension.facet().label()).add_attribute(Attribute::Bold),
            Cell::new(capitalize(label)).add_attribute(Attribute::Bold),
            Cell::new("People").add_attribute(Attribute::Bold),
        ];
        if let Some((field, _)) = dimension.breakdown() {
            headers.push(Cell::new(format!("By {}", field)).add_attribute(Attribute::Bold));
        }
        table.set_header(headers);

        for group in groups {
            let people: Vec<&str> = group
                .members
                .iter()
                .filter_map(|&id| session.record(id).map(Record::name))
                .collect();
            let mut row = vec![
                group.name.clone(),
                group.member_count().to_string(),
                people.join(", "),
            ];
            if dimension.breakdown().is_some() {
                let counts: Vec<String> = group
                    .counts
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                row.push(counts.join(", "));
            }
            table.add_row(row);
        }

        println!("{table}");
    }

    /// Every field of a single record
    pub fn display_record(&self, id: RecordId, record: &Record) {
        println!("{} {}", self.heading(record.name()), self.muted(&id.to_string()));
        for (key, value) in record.iter() {
            println!("  {:<14} {}", key, value);
        }
    }
}

fn print_list(label: &str, values: &[&str]) {
    if !values.is_empty() {
        println!("{}: {}", label, values.join(", "));
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
