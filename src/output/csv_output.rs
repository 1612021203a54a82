//! CSV artifact writer
//!
//! One delimited file per run with a fixed header. The header is written even
//! when there are no data rows, so downstream consumers always see the same
//! column list.

use crate::output::OutputError;
use crate::record::ResultRow;
use std::path::Path;

/// Column order of the output artifact
pub const FIELD_NAMES: [&str; 7] = [
    "user_id",
    "user_name",
    "post_id",
    "post_title",
    "comment_id",
    "comment_body",
    "comment_email",
];

/// Writes the header and all rows, returning the number of data rows written
///
/// # Arguments
///
/// * `path` - Destination file; created or truncated
/// * `rows` - Flat records in final output order
pub fn write_rows(path: &Path, rows: &[ResultRow]) -> Result<usize, OutputError> {
    // The header is written explicitly rather than via serde so a zero-row
    // run still produces it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(FIELD_NAMES)?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(rows.len())
}
