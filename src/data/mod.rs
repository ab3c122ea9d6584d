//! Data layer for the roster engine
//!
//! Parsing and validation build an immutable [`roster::Roster`]; views,
//! filters, aggregates and exports read from it without copying records.

// Core data types
pub mod record;
pub mod roster;
pub mod roster_view;

// Loading
pub mod csv_parser;
pub mod validator;

// Derived views
pub mod aggregator;
pub mod facets;
pub mod filter;
pub mod paginator;
pub mod sorter;
pub mod stats;

// Output
pub mod exporter;
