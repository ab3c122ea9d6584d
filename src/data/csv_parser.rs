//! Quote-aware CSV reader for roster files
//!
//! Each line is tokenized independently, so quoted fields cannot span
//! lines. That is a known limitation of the roster format.

use crate::data::record::{normalize_field_name, Record};
use crate::error::{FormatError, Result, RosterError};
use tracing::debug;

/// Headers and records read from one CSV document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    /// Header texts as written in the file (trimmed), in file order
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl ParsedCsv {
    /// Normalized record keys, one per header
    pub fn field_names(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| normalize_field_name(h))
            .collect()
    }
}

/// Parse roster CSV text into headers and records
pub fn parse(text: &str) -> Result<ParsedCsv> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(RosterError::EmptyInput);
    }

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(FormatError::TooFewLines { found: lines.len() }.into());
    }

    let headers = split_line(lines[0]);
    let keys: Vec<String> = headers.iter().map(|h| normalize_field_name(h)).collect();

    let records: Vec<Record> = lines[1..]
        .iter()
        .map(|line| {
            let values = split_line(line);
            keys.iter()
                .enumerate()
                .map(|(i, key)| (key.clone(), values.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect();

    debug!(
        "Parsed CSV: {} columns, {} data rows",
        headers.len(),
        records.len()
    );

    Ok(ParsedCsv { headers, records })
}

/// Split one CSV line into trimmed fields.
///
/// A `"` toggles quoting; `""` inside quotes is a literal quote; commas
/// only separate fields outside quotes.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
