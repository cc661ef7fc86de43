//! Training Error Types

use thiserror::Error;

/// Errors during training, prediction, or splitting
#[derive(Debug, Clone, Error)]
pub enum TrainError {
    /// No samples to train on
    #[error("empty dataset")]
    EmptyDataset,

    /// Feature table and label vector disagree
    #[error("input mismatch: {0}")]
    InputMismatch(String),

    /// Prediction requested before fitting
    #[error("model is not fitted")]
    NotFitted,

    /// Prediction input columns differ from the fitted columns
    #[error("feature columns do not match the fitted model: {0}")]
    ColumnMismatch(String),

    /// Test ratio outside the open unit interval for this sample count
    #[error("test ratio {ratio} leaves an empty split for {samples} samples")]
    InvalidRatio { ratio: f64, samples: usize },
}
