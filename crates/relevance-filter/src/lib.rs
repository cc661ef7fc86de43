//! Multiclass Feature Relevance Filtering
//!
//! Reduces K-class relevance selection to one binary one-vs-rest subproblem
//! per class: each distinct label gets a binary target, a relevance selector
//! picks the columns that separate that class from the rest, and the union of
//! the per-class selections is the final feature subset.

mod decompose;
mod error;
mod selector;
mod stats;
mod target;

pub use decompose::{
    ClassSelection, DegeneratePolicy, OneVsRestSelection, SelectionConfig, SelectionOutcome,
};
pub use error::{SelectionError, SelectorError};
pub use selector::{FeatureSet, RelevanceSelector, SignificanceConfig, SignificanceSelector};
pub use target::BinaryTarget;
