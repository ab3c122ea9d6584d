pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

pub use data::aggregator::{AggregateDimension, AggregateGroup};
pub use data::facets::{Facet, FacetUniverse};
pub use data::filter::{FilterField, FilterState};
pub use data::record::{Record, RecordId};
pub use data::roster::Roster;
pub use data::sorter::SortDirection;
pub use error::{FormatError, RosterError};
pub use session::RosterSession;
pub use state::{ViewMode, ViewState};
