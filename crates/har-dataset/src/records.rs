//! Recording and Label Containers

use crate::error::LoaderError;
use serde::{Deserialize, Serialize};

/// Unique identifier grouping all observations of one recording window
pub type SampleId = u64;

/// Wide-format recording: one row per sample, one column per timestep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WideRecording {
    /// Channel name (e.g. "body_acc_x")
    pub channel: String,
    /// Sample ids, one per row
    pub sample_ids: Vec<SampleId>,
    /// Number of timesteps per row
    pub n_timesteps: usize,
    /// Readings, row-major
    pub rows: Vec<Vec<f64>>,
}

impl WideRecording {
    /// Number of samples (rows)
    pub fn n_samples(&self) -> usize {
        self.rows.len()
    }
}

/// One observation in long format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    /// Sample the observation belongs to
    pub sample_id: SampleId,
    /// Position within the window
    pub time: usize,
    /// Reading value
    pub value: f64,
}

/// Mapping from sample id to class label, aligned index-for-index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelVector {
    ids: Vec<SampleId>,
    labels: Vec<String>,
}

impl LabelVector {
    /// Create a label vector; ids and labels must have equal length
    pub fn new(ids: Vec<SampleId>, labels: Vec<String>) -> Result<Self, LoaderError> {
        if ids.len() != labels.len() {
            return Err(LoaderError::LabelMismatch {
                samples: ids.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { ids, labels })
    }

    /// Number of labeled samples
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the vector is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sample ids, in row order
    pub fn ids(&self) -> &[SampleId] {
        &self.ids
    }

    /// Labels, aligned with `ids()`
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct labels, sorted
    pub fn distinct_labels(&self) -> Vec<String> {
        let mut distinct: Vec<String> = self.labels.clone();
        distinct.sort();
        distinct.dedup();
        distinct
    }

    /// Restrict to the rows at the given positions
    pub fn subset(&self, positions: &[usize]) -> Self {
        Self {
            ids: positions.iter().map(|&i| self.ids[i]).collect(),
            labels: positions.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_vector_alignment() {
        let lv = LabelVector::new(vec![0, 1, 2], vec!["a".into(), "b".into(), "a".into()]).unwrap();
        assert_eq!(lv.len(), 3);
        assert_eq!(lv.distinct_labels(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_label_vector_mismatch() {
        let err = LabelVector::new(vec![0, 1], vec!["a".into()]);
        assert!(err.is_err());
    }

    #[test]
    fn test_subset() {
        let lv = LabelVector::new(vec![0, 1, 2], vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let sub = lv.subset(&[2, 0]);
        assert_eq!(sub.ids(), &[2, 0]);
        assert_eq!(sub.labels(), &["c".to_string(), "a".to_string()]);
    }
}
