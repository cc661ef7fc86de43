//! Extraction Error Types

use thiserror::Error;

/// Errors during feature extraction and table handling
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// No input records were provided
    #[error("no records to extract features from")]
    NoRecords,

    /// Flat value buffer does not match the requested table shape
    #[error("table shape mismatch: {rows} rows x {cols} columns, {len} values")]
    TableShape { rows: usize, cols: usize, len: usize },

    /// Sample ids and rows disagree in count
    #[error("row mismatch: {ids} sample ids for {rows} rows")]
    RowMismatch { ids: usize, rows: usize },

    /// Two columns share a name
    #[error("duplicate feature column: {0}")]
    DuplicateColumn(String),

    /// A requested column is not in the table
    #[error("unknown feature column: {0}")]
    UnknownColumn(String),
}
