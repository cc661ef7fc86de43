//! Loader Error Types

use thiserror::Error;

/// Errors during dataset loading
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Cache artifact could not be read or written
    #[error("cache error: {0}")]
    Cache(#[from] serde_json::Error),

    /// A token could not be parsed as a number
    #[error("line {line}: cannot parse '{token}' as a number")]
    Parse { line: usize, token: String },

    /// A row has a different number of timesteps than the first row
    #[error("line {line}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// Recording and label files disagree on sample count
    #[error("recording has {samples} samples but label file has {labels} entries")]
    LabelMismatch { samples: usize, labels: usize },

    /// Activity code outside the known range
    #[error("line {line}: unknown activity code {code}")]
    UnknownActivityCode { line: usize, code: u8 },

    /// File extension not recognized
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// File contained no samples
    #[error("empty recording file: {0}")]
    EmptyFile(String),
}
