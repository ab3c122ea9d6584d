use crate::data::csv_parser::{self, ParsedCsv};
use crate::data::record::{Record, RecordId};
use crate::data::validator;
use crate::error::Result;
use std::fmt::Write as _;
use tracing::info;

/// The loaded personnel collection.
///
/// A roster is built wholesale from CSV text or a persisted snapshot and
/// never mutated afterwards; replacing data means building a new roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Header texts of the source file, empty when unknown
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Roster {
    /// Parse and validate CSV text. Nothing is built unless the whole
    /// document passes validation.
    pub fn from_csv(text: &str) -> Result<Self> {
        let parsed = csv_parser::parse(text)?;
        Self::from_parsed(parsed)
    }

    pub fn from_parsed(parsed: ParsedCsv) -> Result<Self> {
        Self::from_records(parsed.headers, parsed.records)
    }

    pub fn from_records(headers: Vec<String>, records: Vec<Record>) -> Result<Self> {
        validator::validate(&records)?;

        info!(
            "Roster loaded: {} records, {} columns",
            records.len(),
            headers.len()
        );

        Ok(Self { headers, records })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> {
        (0..self.records.len()).map(RecordId)
    }

    /// Records paired with their identifiers
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (RecordId(i), record))
    }

    /// Generate a debug dump string for display
    pub fn debug_dump(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Roster: {} records", self.len());
        let _ = writeln!(output, "Headers: {}", self.headers.join(", "));

        let sample_size = 5.min(self.len());
        if sample_size > 0 {
            let _ = writeln!(output, "\nFirst {} records:", sample_size);
            for (id, record) in self.iter().take(sample_size) {
                let _ = writeln!(
                    output,
                    "  [{}]: {} <{}> {}",
                    id.index(),
                    record.name(),
                    record.email(),
                    record.role()
                );
            }
        }

        output
    }
}
