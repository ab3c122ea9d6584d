use crate::data::record::{normalize_field_name, Record, DEFAULT_HEADERS};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Handles exporting roster records to CSV and JSON
pub struct RosterExporter;

impl RosterExporter {
    /// Header row for export: the file's own headers, or the canonical
    /// column order when none are known
    pub fn export_headers(headers: &[String]) -> Vec<String> {
        if headers.is_empty() {
            DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
        } else {
            headers.to_vec()
        }
    }

    /// Serialize records as CSV text. Values are looked up by the
    /// normalized form of each header; fields with commas or quotes are
    /// quoted.
    pub fn to_csv(headers: &[String], records: &[&Record]) -> Result<String> {
        let headers = Self::export_headers(headers);
        let keys: Vec<String> = headers.iter().map(|h| normalize_field_name(h)).collect();

        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(&headers)?;
        for record in records {
            writer.write_record(keys.iter().map(|key| record.value(key)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV output: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Pretty-printed JSON array of the records
    pub fn to_json(records: &[&Record]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }

    /// Write an export into `dir` under a timestamped file name and return
    /// a status message for the user
    pub fn export_to_file(
        format: ExportFormat,
        headers: &[String],
        records: &[&Record],
        dir: &Path,
    ) -> Result<(PathBuf, String)> {
        if records.is_empty() {
            return Err(anyhow!("No data to export"));
        }

        let contents = match format {
            ExportFormat::Csv => Self::to_csv(headers, records)?,
            ExportFormat::Json => Self::to_json(records)?,
        };

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("roster_export_{}.{}", timestamp, format.extension()));
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;

        info!("Exported {} records to {}", records.len(), path.display());

        let message = format!(
            "✓ Exported {} records to {} file: {}",
            records.len(),
            format,
            path.display()
        );
        Ok((path, message))
    }
}
