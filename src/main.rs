use crossterm::style::Stylize;
use roster_view::config::Config;
use roster_view::data::exporter::{ExportFormat, RosterExporter};
use roster_view::data::filter::{FilterField, FilterState};
use roster_view::data::record::{normalize_field_name, RecordId};
use roster_view::logging::init_tracing;
use roster_view::persistence::{FileStore, KeyValueStore};
use roster_view::services::{RosterLoaderService, RosterSource};
use roster_view::session::RosterSession;
use roster_view::state::ViewMode;
use roster_view::utils::app_paths::AppPaths;
use std::path::PathBuf;
use tracing::warn;

mod table_display;

use table_display::Display;

/// Flags that consume the following argument
const VALUE_FLAGS: [&str; 10] = [
    "--view",
    "--search",
    "--team",
    "--institution",
    "--project",
    "--data-source",
    "--status",
    "--sort",
    "--page",
    "--show",
];

fn print_help() {
    println!("{}", "roster-view - personnel roster dashboard".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  roster-view [OPTIONS] [FILE.csv|URL]");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {}   - grid, table, teams, projects, data-sources, services",
        "--view MODE".green()
    );
    println!("  {}  - Free-text search", "--search TEXT".green());
    println!("  {}       - Filter by team", "--team X".green());
    println!("  {} - Filter by institution", "--institution X".green());
    println!("  {}    - Filter by project", "--project X".green());
    println!("  {} - Filter by data source", "--data-source X".green());
    println!("  {}     - Filter by status", "--status X".green());
    println!("  {}  - Sort table by column", "--sort COLUMN".green());
    println!("  {}         - Sort descending", "--desc".green());
    println!("  {}       - Show page N", "--page N".green());
    println!("  {}      - Show every field of one person", "--show ID".green());
    println!("  {}   - Export filtered people to CSV", "--export-csv".green());
    println!("  {}  - Export filtered people to JSON", "--export-json".green());
    println!("  {}      - Use the last saved roster", "--restore".green());
    println!("  {}          - Print recent log entries", "--log".green());
    println!(
        "  {} - Generate config file with defaults",
        "--generate-config".green()
    );
    println!("  {}      - Debug logging", "--verbose".green());
    println!();
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(String::as_str)
}

/// First argument that is neither a flag nor a flag's value
fn positional(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            return Some(arg);
        }
    }
    None
}

fn filter_from_args(args: &[String]) -> FilterState {
    let mut filter = FilterState::new();
    if let Some(search) = flag_value(args, "--search") {
        filter.search = search.to_string();
    }
    for (flag, field) in [
        ("--team", FilterField::Team),
        ("--institution", FilterField::Institution),
        ("--project", FilterField::Project),
        ("--data-source", FilterField::DataSource),
        ("--status", FilterField::Status),
    ] {
        if let Some(value) = flag_value(args, flag) {
            filter.set(field, Some(value.to_string()));
        }
    }
    filter
}

fn generate_config() -> anyhow::Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    println!("Edit this file to customize roster-view.");
    Ok(())
}

fn open_store(config: &Config) -> Option<FileStore> {
    let dir = match &config.behavior.store_dir {
        Some(dir) => dir.clone(),
        None => match AppPaths::store_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!("No store directory: {}", e);
                return None;
            }
        },
    };
    match FileStore::new(dir) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Cannot open roster store: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        if let Err(e) = generate_config() {
            eprintln!("Error writing config file: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let log_buffer = init_tracing(args.contains(&"--verbose".to_string()));

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        Config::default()
    });
    let display = Display {
        use_colors: config.display.use_colors,
    };

    let mode = match flag_value(&args, "--view") {
        Some(view) => view.parse::<ViewMode>().map_err(anyhow::Error::msg)?,
        None => config.display.default_view,
    };

    let store = open_store(&config);
    let store_ref = store.as_ref().map(|s| s as &dyn KeyValueStore);
    let loader = RosterLoaderService::new(
        config.source.fallback_to_sample,
        config.behavior.persist_on_load,
    );
    let mut session = RosterSession::new(mode, config.display.page_size);

    let restored = if args.contains(&"--restore".to_string()) {
        match store_ref {
            Some(store) => loader.restore_into(&mut session, store)?,
            None => None,
        }
    } else {
        None
    };

    match restored {
        Some(message) => display.notice(&message),
        None => {
            let source = positional(&args)
                .map(RosterSource::parse)
                .or_else(|| config.source.default_source.as_deref().map(RosterSource::parse))
                .unwrap_or(RosterSource::Sample);
            match loader.load_into(&mut session, &source, store_ref).await {
                Ok(message) => display.notice(&message),
                Err(e) => {
                    eprintln!("{}", format!("Error loading roster: {}", e).red());
                    std::process::exit(1);
                }
            }
        }
    }

    session.apply_filter(filter_from_args(&args));

    if let Some(column) = flag_value(&args, "--sort") {
        let column = normalize_field_name(column);
        session.toggle_sort(&column);
        if args.contains(&"--desc".to_string()) {
            session.toggle_sort(&column);
        }
    }

    if let Some(page) = flag_value(&args, "--page") {
        let accepted = page
            .parse::<usize>()
            .map(|p| session.go_to_page(p))
            .unwrap_or(false);
        if !accepted {
            display.warning(&format!(
                "Page {} does not exist ({} pages)",
                page,
                session.page_count()
            ));
        }
    }

    display.display_stats(&session.stats());

    if let Some(id) = flag_value(&args, "--show") {
        let found = id
            .trim_start_matches('#')
            .parse::<usize>()
            .ok()
            .map(RecordId)
            .and_then(|id| session.record(id).map(|record| (id, record)));
        match found {
            Some((id, record)) => display.display_record(id, record),
            None => display.warning(&format!("No person with id {}", id)),
        }
    } else {
        match session.view_state().mode {
            ViewMode::Grid => display.display_grid(&session),
            ViewMode::Table => display.display_table(&session),
            mode => {
                if let Some(dimension) = mode.dimension() {
                    let groups = session.aggregate(dimension);
                    display.display_groups(&session, dimension, &groups);
                }
            }
        }
    }

    let export_dir = config
        .behavior
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    for (flag, format) in [
        ("--export-csv", ExportFormat::Csv),
        ("--export-json", ExportFormat::Json),
    ] {
        if !args.contains(&flag.to_string()) {
            continue;
        }
        let records = session.filtered_records();
        match RosterExporter::export_to_file(
            format,
            session.roster().headers(),
            &records,
            &export_dir,
        ) {
            Ok((_, message)) => display.notice(&message),
            Err(e) => display.warning(&format!("Export failed: {}", e)),
        }
    }

    if args.contains(&"--log".to_string()) {
        println!();
        for entry in log_buffer.recent(20) {
            println!("{}", entry);
        }
    }

    Ok(())
}
