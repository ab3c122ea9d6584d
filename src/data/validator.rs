use crate::data::record::{fields, split_list, Record, REQUIRED_FIELDS};
use crate::error::FormatError;

/// Check that a parsed roster can be loaded.
///
/// The column check uses the keys of the first record. Row numbers in
/// errors count the header line as row 1.
pub fn validate(records: &[Record]) -> Result<(), FormatError> {
    let first = records.first().ok_or(FormatError::NoRecords)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !first.has_field(field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FormatError::MissingColumns { missing });
    }

    for (index, record) in records.iter().enumerate() {
        if let Some(field) = REQUIRED_FIELDS
            .iter()
            .find(|field| is_blank(record, field))
        {
            return Err(FormatError::MissingField {
                row: index + 2,
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

/// A team list of only separators names no team at all
fn is_blank(record: &Record, field: &str) -> bool {
    let value = record.value(field);
    if field == fields::TEAM {
        split_list(value).next().is_none()
    } else {
        value.trim().is_empty()
    }
}
