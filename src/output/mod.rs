//! Output module - CSV artifact and run summary
//!
//! This module handles:
//! - Building flat rows from the result tree
//! - Writing the CSV output artifact
//! - Rendering the end-of-run summary

mod csv_output;
mod rows;
mod summary;

pub use csv_output::{write_rows, FIELD_NAMES};
pub use rows::{build_row, flatten_rows};
pub use summary::{print_summary, RunSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
