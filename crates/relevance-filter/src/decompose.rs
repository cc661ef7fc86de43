//! One-vs-Rest Decomposition
//!
//! Reduces K-class relevance selection to K binary subproblems and unions
//! the per-class selections. Single-pass, synchronous; the union only grows
//! as classes are processed.

use feature_extract::FeatureTable;
use har_dataset::LabelVector;
use tracing::{info, warn};

use crate::error::SelectionError;
use crate::selector::{FeatureSet, RelevanceSelector};
use crate::target::BinaryTarget;

/// What to do when a class's binary target is all-true or all-false
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail the whole selection
    #[default]
    Abort,
    /// Record the class as skipped; it contributes the empty set
    Skip,
}

/// Decomposition configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionConfig {
    /// Degenerate-target handling; an explicit choice, not an implicit default
    pub degenerate_policy: DegeneratePolicy,
}

/// Per-class diagnostic from one selection run
#[derive(Debug, Clone)]
pub struct ClassSelection {
    /// Class label
    pub label: String,
    /// Number of columns selected for this class
    pub selected: usize,
    /// True when the class was skipped under [`DegeneratePolicy::Skip`]
    pub skipped: bool,
}

/// Result of a one-vs-rest selection
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// Union of all per-class selected feature sets
    pub features: FeatureSet,
    /// Per-class diagnostics, in processing order
    pub per_class: Vec<ClassSelection>,
    /// True when at least one class was skipped and contributed nothing
    pub partial: bool,
}

/// Binary-decomposition feature selector
pub struct OneVsRestSelection<S> {
    selector: S,
    config: SelectionConfig,
}

impl<S: RelevanceSelector> OneVsRestSelection<S> {
    /// Create a decomposition with the default config (abort on degenerate)
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            config: SelectionConfig::default(),
        }
    }

    /// Create a decomposition with an explicit config
    pub fn with_config(selector: S, config: SelectionConfig) -> Self {
        Self { selector, config }
    }

    /// Select relevant features for every distinct label in `labels`.
    ///
    /// Labels are processed in sorted order so diagnostics are reproducible;
    /// the returned union is order-independent regardless.
    pub fn select(
        &self,
        table: &FeatureTable,
        labels: &LabelVector,
    ) -> Result<SelectionOutcome, SelectionError> {
        let classes = labels.distinct_labels();
        self.select_for_classes(table, labels, &classes)
    }

    /// Select relevant features for an explicit class list.
    ///
    /// A listed class with no occurrences yields an all-false target and is
    /// handled by the configured degenerate policy.
    pub fn select_for_classes(
        &self,
        table: &FeatureTable,
        labels: &LabelVector,
        classes: &[String],
    ) -> Result<SelectionOutcome, SelectionError> {
        validate_alignment(table, labels)?;

        let total = table.n_columns();
        let mut features = FeatureSet::new();
        let mut per_class = Vec::with_capacity(classes.len());
        let mut partial = false;

        for label in classes {
            let target = BinaryTarget::for_label(labels, label);

            if target.is_degenerate() {
                match self.config.degenerate_policy {
                    DegeneratePolicy::Abort => {
                        return Err(SelectionError::DegenerateTarget {
                            label: label.clone(),
                            positives: target.positives(),
                            total: target.len(),
                        });
                    }
                    DegeneratePolicy::Skip => {
                        warn!(
                            class = %label,
                            positives = target.positives(),
                            total = target.len(),
                            "skipping class with degenerate binary target"
                        );
                        per_class.push(ClassSelection {
                            label: label.clone(),
                            selected: 0,
                            skipped: true,
                        });
                        partial = true;
                        continue;
                    }
                }
            }

            let selected =
                self.selector
                    .select(table, &target)
                    .map_err(|source| SelectionError::Upstream {
                        label: label.clone(),
                        source,
                    })?;

            info!(
                class = %label,
                selected = selected.len(),
                total,
                "relevant features for class"
            );

            per_class.push(ClassSelection {
                label: label.clone(),
                selected: selected.len(),
                skipped: false,
            });
            features.extend(selected);
        }

        Ok(SelectionOutcome {
            features,
            per_class,
            partial,
        })
    }
}

fn validate_alignment(table: &FeatureTable, labels: &LabelVector) -> Result<(), SelectionError> {
    if table.n_rows() != labels.len() {
        return Err(SelectionError::InputMismatch(format!(
            "feature table has {} rows but label vector has {} entries",
            table.n_rows(),
            labels.len()
        )));
    }
    for (row, (table_id, label_id)) in table
        .sample_ids()
        .iter()
        .zip(labels.ids().iter())
        .enumerate()
    {
        if table_id != label_id {
            return Err(SelectionError::InputMismatch(format!(
                "sample id mismatch at row {row}: table has {table_id}, labels have {label_id}"
            )));
        }
    }
    Ok(())
}
