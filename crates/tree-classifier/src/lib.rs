//! Decision Tree Classification
//!
//! Multiclass CART induction over a feature table, with evaluation metrics
//! and a seeded train/test split helper.

mod error;
mod metrics;
mod split;
mod tree;

pub use error::TrainError;
pub use metrics::{ClassMetrics, ClassificationReport};
pub use split::{train_test_split, TrainTestSplit};
pub use tree::{DecisionTree, TreeConfig};
