//! Service layer: loading rosters from their sources into a session

pub mod loader_service;
pub mod source;

pub use loader_service::{RosterLoadResult, RosterLoaderService};
pub use source::{RosterSource, SAMPLE_ROSTER};
