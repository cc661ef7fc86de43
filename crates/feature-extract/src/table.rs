//! Feature Table

use std::collections::{BTreeSet, HashSet};

use har_dataset::SampleId;
use ndarray::{Array2, ArrayView1, Axis};

use crate::error::ExtractError;

/// Feature table: one row per sample id, one column per feature name.
///
/// Rows keep the sample-id order they were built with, so the id-to-row
/// mapping is stable across the pipeline.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    sample_ids: Vec<SampleId>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    /// Build a table, validating shape and column uniqueness
    pub fn new(
        sample_ids: Vec<SampleId>,
        columns: Vec<String>,
        values: Array2<f64>,
    ) -> Result<Self, ExtractError> {
        if values.nrows() != sample_ids.len() {
            return Err(ExtractError::RowMismatch {
                ids: sample_ids.len(),
                rows: values.nrows(),
            });
        }
        if values.ncols() != columns.len() {
            return Err(ExtractError::TableShape {
                rows: values.nrows(),
                cols: columns.len(),
                len: values.len(),
            });
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ExtractError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            sample_ids,
            columns,
            values,
        })
    }

    /// Build a table from a row-major flat buffer
    pub fn from_flat(
        sample_ids: Vec<SampleId>,
        columns: Vec<String>,
        flat: Vec<f64>,
    ) -> Result<Self, ExtractError> {
        let rows = sample_ids.len();
        let cols = columns.len();
        let len = flat.len();
        let values = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|_| ExtractError::TableShape { rows, cols, len })?;
        Self::new(sample_ids, columns, values)
    }

    /// Number of rows (samples)
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (features)
    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    /// Sample ids, in row order
    pub fn sample_ids(&self) -> &[SampleId] {
        &self.sample_ids
    }

    /// Column names, in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The underlying value matrix
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Mutable access to the value matrix, for imputation
    pub(crate) fn values_mut(&mut self) -> &mut Array2<f64> {
        &mut self.values
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// View of one column by name
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.column_index(name)
            .map(|i| self.values.index_axis(Axis(1), i))
    }

    /// View of one row by position
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.index_axis(Axis(0), index)
    }

    /// Count of non-finite entries
    pub fn non_finite_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_finite()).count()
    }

    /// Restrict the table to the named columns, keeping this table's column
    /// order. Every requested name must exist.
    pub fn select_columns(&self, names: &BTreeSet<String>) -> Result<FeatureTable, ExtractError> {
        for name in names {
            if self.column_index(name).is_none() {
                return Err(ExtractError::UnknownColumn(name.clone()));
            }
        }

        let kept: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| names.contains(c.as_str()))
            .map(|(i, _)| i)
            .collect();

        let columns: Vec<String> = kept.iter().map(|&i| self.columns[i].clone()).collect();
        let values = self.values.select(Axis(1), &kept);

        Ok(FeatureTable {
            sample_ids: self.sample_ids.clone(),
            columns,
            values,
        })
    }

    /// Restrict the table to the rows at the given positions
    pub fn select_rows(&self, positions: &[usize]) -> FeatureTable {
        FeatureTable {
            sample_ids: positions.iter().map(|&i| self.sample_ids[i]).collect(),
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), positions),
        }
    }
}
