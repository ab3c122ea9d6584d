use crate::data::aggregator::AggregateDimension;
use crate::data::paginator;
use crate::data::sorter::SortDirection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which dashboard view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Grid,
    Table,
    Teams,
    Projects,
    DataSources,
    Services,
}

impl ViewMode {
    pub const ALL: [ViewMode; 6] = [
        ViewMode::Grid,
        ViewMode::Table,
        ViewMode::Teams,
        ViewMode::Projects,
        ViewMode::DataSources,
        ViewMode::Services,
    ];

    /// The aggregate a facet view renders, `None` for record views
    pub fn dimension(self) -> Option<AggregateDimension> {
        match self {
            ViewMode::Grid | ViewMode::Table => None,
            ViewMode::Teams => Some(AggregateDimension::Team),
            ViewMode::Projects => Some(AggregateDimension::Project),
            ViewMode::DataSources => Some(AggregateDimension::DataSource),
            ViewMode::Services => Some(AggregateDimension::Service),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
            ViewMode::Teams => "teams",
            ViewMode::Projects => "projects",
            ViewMode::DataSources => "data-sources",
            ViewMode::Services => "services",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown view '{}'. Use one of: grid, table, teams, projects, data-sources, services",
                    s
                )
            })
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

/// Presentation state owned by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: ViewMode,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
    pub sort: Option<SortState>,
}

impl ViewState {
    pub fn new(mode: ViewMode, page_size: usize) -> Self {
        Self {
            mode,
            current_page: 1,
            page_size: page_size.max(1),
            sort: None,
        }
    }

    /// Same column flips direction; a new column starts ascending
    pub fn toggle_sort(&mut self, column: &str) -> &SortState {
        let next = match self.sort.take() {
            Some(current) if current.column == column => SortState {
                column: current.column,
                direction: current.direction.flipped(),
            },
            _ => SortState {
                column: column.to_string(),
                direction: SortDirection::Ascending,
            },
        };
        debug!("Sort by {} {}", next.column, next.direction);
        self.sort.insert(next)
    }

    /// Move to `page` if it exists for `total_items`; otherwise leave the
    /// current page unchanged and return false
    pub fn go_to_page(&mut self, page: usize, total_items: usize) -> bool {
        if paginator::is_valid_page(page, total_items, self.page_size) {
            self.current_page = page;
            true
        } else {
            debug!(
                "Ignoring page {} (have {} pages)",
                page,
                paginator::page_count(total_items, self.page_size)
            );
            false
        }
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Back to page 1 with no sort, keeping mode and page size
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.sort = None;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewMode::default(), 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sort() {
        let mut state = ViewState::default();
        assert_eq!(state.toggle_sort("name").direction, SortDirection::Ascending);
        assert_eq!(state.toggle_sort("name").direction, SortDirection::Descending);
        assert_eq!(state.toggle_sort("name").direction, SortDirection::Ascending);

        let sort = state.toggle_sort("email");
        assert_eq!(sort.column, "email");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_go_to_page_rejects_out_of_range() {
        let mut state = ViewState::new(ViewMode::Table, 10);
        assert!(state.go_to_page(3, 25));
        assert_eq!(state.current_page, 3);

        assert!(!state.go_to_page(4, 25));
        assert!(!state.go_to_page(0, 25));
        assert_eq!(state.current_page, 3);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("data-sources".parse::<ViewMode>(), Ok(ViewMode::DataSources));
        assert_eq!(" Table ".parse::<ViewMode>(), Ok(ViewMode::Table));
        assert!("cards".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Teams.dimension(), Some(AggregateDimension::Team));
        assert_eq!(ViewMode::Grid.dimension(), None);
    }

    #[test]
    fn test_page_size_is_never_zero() {
        assert_eq!(ViewState::new(ViewMode::Grid, 0).page_size, 1);
    }
}
