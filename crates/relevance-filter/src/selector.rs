//! Binary Relevance Selection

use std::collections::BTreeSet;

use feature_extract::FeatureTable;
use tracing::trace;

use crate::error::SelectorError;
use crate::stats::{benjamini_hochberg, mann_whitney_p};
use crate::target::BinaryTarget;

/// Set of selected column names
pub type FeatureSet = BTreeSet<String>;

/// Binary relevance selection capability: given a feature table and a
/// two-valued target, return the columns judged relevant.
///
/// This is the seam for swapping in a different selection criterion; the
/// one-vs-rest decomposition only depends on this trait.
pub trait RelevanceSelector {
    fn select(&self, table: &FeatureTable, target: &BinaryTarget)
        -> Result<FeatureSet, SelectorError>;
}

/// Significance-test selector configuration
#[derive(Debug, Clone, Copy)]
pub struct SignificanceConfig {
    /// False discovery rate for the Benjamini-Hochberg procedure
    pub fdr_level: f64,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self { fdr_level: 0.05 }
    }
}

/// Default selector: per-column Mann-Whitney U test against the binary
/// target, then Benjamini-Hochberg FDR control over the p-values.
#[derive(Debug, Clone, Default)]
pub struct SignificanceSelector {
    config: SignificanceConfig,
}

impl SignificanceSelector {
    /// Create a selector with the given config
    pub fn new(config: SignificanceConfig) -> Self {
        Self { config }
    }

    /// Create a selector with an explicit FDR level
    pub fn with_fdr(fdr_level: f64) -> Self {
        Self {
            config: SignificanceConfig { fdr_level },
        }
    }
}

impl RelevanceSelector for SignificanceSelector {
    fn select(
        &self,
        table: &FeatureTable,
        target: &BinaryTarget,
    ) -> Result<FeatureSet, SelectorError> {
        if target.len() != table.n_rows() {
            return Err(SelectorError::Unsupported(format!(
                "target has {} entries for {} table rows",
                target.len(),
                table.n_rows()
            )));
        }

        let mut p_values = Vec::with_capacity(table.n_columns());
        for (i, name) in table.columns().iter().enumerate() {
            let column: Vec<f64> = table.values().column(i).to_vec();
            let p = mann_whitney_p(&column, target.values())?;
            trace!(column = %name, p, "scored column");
            p_values.push(p);
        }

        let keep = benjamini_hochberg(&p_values, self.config.fdr_level);

        Ok(table
            .columns()
            .iter()
            .zip(keep)
            .filter(|(_, kept)| *kept)
            .map(|(name, _)| name.clone())
            .collect())
    }
}
