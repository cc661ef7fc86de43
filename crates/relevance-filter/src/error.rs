//! Selection Error Types

use thiserror::Error;

/// Errors raised by a relevance selector implementation
#[derive(Debug, Clone, Error)]
pub enum SelectorError {
    /// Numerical failure while scoring a column
    #[error("numerical failure: {0}")]
    Numerical(String),

    /// Input the selector cannot process
    #[error("unsupported input: {0}")]
    Unsupported(String),
}

/// Errors during one-vs-rest selection
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Feature table rows and label vector entries disagree
    #[error("input mismatch: {0}")]
    InputMismatch(String),

    /// A class's binary target is all-true or all-false
    #[error("degenerate binary target for class '{label}': {positives} of {total} samples are positive")]
    DegenerateTarget {
        label: String,
        positives: usize,
        total: usize,
    },

    /// The relevance selector failed for one class; never retried
    #[error("relevance selection failed for class '{label}'")]
    Upstream {
        label: String,
        #[source]
        source: SelectorError,
    },
}
