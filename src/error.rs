//! Error taxonomy for the roster engine
//!
//! Core operations return [`RosterError`]; the binary and services wrap it
//! in `anyhow` at the edges.

use thiserror::Error;

/// Malformed roster input. Recoverable and shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("CSV must contain a header line and at least one data row (found {found} non-blank line(s))")]
    TooFewLines { found: usize },

    #[error("CSV contains no data rows")]
    NoRecords,

    #[error("missing required column(s): {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// `row` is 1-based and counts the header line as row 1
    #[error("row {row}: required field '{field}' is empty")]
    MissingField { row: usize, field: String },
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("input is empty")]
    EmptyInput,

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("roster source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("persisted roster state is invalid: {0}")]
    Persistence(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RosterError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        RosterError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the loader should fall back to the bundled sample roster
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, RosterError::SourceUnavailable { .. })
    }
}

pub type Result<T, E = RosterError> = std::result::Result<T, E>;
