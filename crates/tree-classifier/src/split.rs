//! Train/Test Splitting

use feature_extract::FeatureTable;
use har_dataset::LabelVector;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::TrainError;

/// A shuffled train/test partition of a table and its labels
pub struct TrainTestSplit {
    pub train_table: FeatureTable,
    pub train_labels: LabelVector,
    pub test_table: FeatureTable,
    pub test_labels: LabelVector,
}

/// Split rows into train and test sets with a seeded shuffle.
///
/// Both sides keep their table rows and labels aligned. The ratio must leave
/// at least one sample on each side.
pub fn train_test_split(
    table: &FeatureTable,
    labels: &LabelVector,
    test_ratio: f64,
    seed: u64,
) -> Result<TrainTestSplit, TrainError> {
    let n = table.n_rows();
    if n != labels.len() {
        return Err(TrainError::InputMismatch(format!(
            "feature table has {} rows but label vector has {} entries",
            n,
            labels.len()
        )));
    }

    let test_size = (test_ratio * n as f64).round() as usize;
    if test_size == 0 || test_size >= n {
        return Err(TrainError::InvalidRatio {
            ratio: test_ratio,
            samples: n,
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(test_size);

    Ok(TrainTestSplit {
        train_table: table.select_rows(train_idx),
        train_labels: labels.subset(train_idx),
        test_table: table.select_rows(test_idx),
        test_labels: labels.subset(test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn data(n: usize) -> (FeatureTable, LabelVector) {
        let table = FeatureTable::new(
            (0..n as u64).collect(),
            vec!["f1".to_string()],
            Array2::from_shape_fn((n, 1), |(i, _)| i as f64),
        )
        .unwrap();
        let labels = LabelVector::new(
            (0..n as u64).collect(),
            (0..n).map(|i| format!("c{}", i % 2)).collect(),
        )
        .unwrap();
        (table, labels)
    }

    #[test]
    fn test_split_sizes() {
        let (table, labels) = data(10);
        let split = train_test_split(&table, &labels, 0.3, 7).unwrap();

        assert_eq!(split.test_table.n_rows(), 3);
        assert_eq!(split.train_table.n_rows(), 7);
        assert_eq!(split.test_labels.len(), 3);
        assert_eq!(split.train_labels.len(), 7);
    }

    #[test]
    fn test_split_keeps_alignment() {
        let (table, labels) = data(10);
        let split = train_test_split(&table, &labels, 0.3, 7).unwrap();

        // Each row's single feature equals its original sample id
        for (row, &id) in split.train_table.sample_ids().iter().enumerate() {
            assert_eq!(split.train_table.values()[[row, 0]], id as f64);
            assert_eq!(split.train_labels.ids()[row], id);
        }
    }

    #[test]
    fn test_split_deterministic() {
        let (table, labels) = data(10);
        let first = train_test_split(&table, &labels, 0.3, 7).unwrap();
        let second = train_test_split(&table, &labels, 0.3, 7).unwrap();
        assert_eq!(first.test_table.sample_ids(), second.test_table.sample_ids());
    }

    #[test]
    fn test_degenerate_ratio_rejected() {
        let (table, labels) = data(10);
        assert!(matches!(
            train_test_split(&table, &labels, 0.0, 7),
            Err(TrainError::InvalidRatio { .. })
        ));
        assert!(matches!(
            train_test_split(&table, &labels, 1.0, 7),
            Err(TrainError::InvalidRatio { .. })
        ));
    }
}
