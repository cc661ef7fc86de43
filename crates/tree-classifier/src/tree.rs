//! Multiclass CART Induction

use feature_extract::FeatureTable;
use har_dataset::LabelVector;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::TrainError;

/// Decision tree configuration
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Maximum depth of the tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Number of features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// Tree node
#[derive(Debug, Clone)]
struct TreeNode {
    feature_idx: Option<usize>,
    threshold: Option<f64>,
    /// Samples per class index at this node
    class_counts: Vec<usize>,
    n_samples: usize,
    impurity: f64,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(class_counts: Vec<usize>, n_samples: usize, impurity: f64) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            class_counts,
            n_samples,
            impurity,
            left: None,
            right: None,
        }
    }

    fn majority_class(&self) -> usize {
        self.class_counts
            .iter()
            .enumerate()
            .max_by_key(|(_, &count)| count)
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Multiclass decision tree classifier
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    classes: Vec<String>,
    feature_names: Vec<String>,
    feature_importances: Vec<f64>,
}

impl DecisionTree {
    /// Create a tree with the given config
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            classes: Vec::new(),
            feature_names: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Distinct classes seen during fitting, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Train on a feature table and aligned labels
    pub fn fit(&mut self, table: &FeatureTable, labels: &LabelVector) -> Result<(), TrainError> {
        if table.n_rows() == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if table.n_rows() != labels.len() {
            return Err(TrainError::InputMismatch(format!(
                "feature table has {} rows but label vector has {} entries",
                table.n_rows(),
                labels.len()
            )));
        }
        if table.sample_ids() != labels.ids() {
            return Err(TrainError::InputMismatch(
                "feature table and label vector sample ids disagree".to_string(),
            ));
        }

        self.classes = labels.distinct_labels();
        self.feature_names = table.columns().to_vec();
        self.feature_importances = vec![0.0; table.n_columns()];

        let y: Vec<usize> = labels
            .labels()
            .iter()
            .map(|label| {
                self.classes
                    .iter()
                    .position(|c| c == label)
                    .unwrap_or_default()
            })
            .collect();

        let indices: Vec<usize> = (0..table.n_rows()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.root = Some(self.build_tree(table, &y, &indices, 0, &mut rng));

        // Normalize importances
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }

        debug!(
            samples = table.n_rows(),
            features = table.n_columns(),
            classes = self.classes.len(),
            "fitted decision tree"
        );

        Ok(())
    }

    fn build_tree(
        &mut self,
        table: &FeatureTable,
        y: &[usize],
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let counts = self.class_counts(y, indices);
        let impurity = gini(&counts, n);

        if depth >= self.config.max_depth || n < self.config.min_samples_split || impurity < 1e-10
        {
            return TreeNode::leaf(counts, n, impurity);
        }

        match self.find_best_split(table, y, indices, impurity, rng) {
            Some(split) => {
                if split.left.len() < self.config.min_samples_leaf
                    || split.right.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(counts, n, impurity);
                }

                self.feature_importances[split.feature_idx] += split.importance;

                let left = self.build_tree(table, y, &split.left, depth + 1, rng);
                let right = self.build_tree(table, y, &split.right, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(split.feature_idx),
                    threshold: Some(split.threshold),
                    class_counts: counts,
                    n_samples: n,
                    impurity,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(counts, n, impurity),
        }
    }

    fn class_counts(&self, y: &[usize], indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for &i in indices {
            counts[y[i]] += 1;
        }
        counts
    }

    fn find_best_split(
        &self,
        table: &FeatureTable,
        y: &[usize],
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n_features = table.n_columns();
        let max_features = self.config.max_features.unwrap_or(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let values = table.values();
        let mut best: Option<BestSplit> = None;
        let mut best_gain = 0.0;

        for &feature_idx in &feature_indices {
            let mut column: Vec<f64> = indices.iter().map(|&i| values[[i, feature_idx]]).collect();
            column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            column.dedup();

            for window in column.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| values[[i, feature_idx]] <= threshold);

                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let left_counts = self.class_counts(y, &left);
                let right_counts = self.class_counts(y, &right);

                let n_left = left.len() as f64;
                let n_right = right.len() as f64;
                let n_total = n_left + n_right;

                let weighted = (n_left * gini(&left_counts, left.len())
                    + n_right * gini(&right_counts, right.len()))
                    / n_total;
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some(BestSplit {
                        feature_idx,
                        threshold,
                        importance: gain * indices.len() as f64,
                        left,
                        right,
                    });
                }
            }
        }

        best
    }

    /// Predict the class for every row of a table
    pub fn predict(&self, table: &FeatureTable) -> Result<Vec<String>, TrainError> {
        let root = self.root.as_ref().ok_or(TrainError::NotFitted)?;

        if table.columns() != self.feature_names.as_slice() {
            return Err(TrainError::ColumnMismatch(format!(
                "fitted on {} columns, got {}",
                self.feature_names.len(),
                table.n_columns()
            )));
        }

        let values = table.values();
        let mut predictions = Vec::with_capacity(table.n_rows());
        for i in 0..table.n_rows() {
            let mut node = root;
            while let (Some(feature_idx), Some(threshold)) = (node.feature_idx, node.threshold) {
                let child = if values[[i, feature_idx]] <= threshold {
                    node.left.as_deref()
                } else {
                    node.right.as_deref()
                };
                match child {
                    Some(child) => node = child,
                    None => break,
                }
            }
            predictions.push(self.classes[node.majority_class()].clone());
        }

        Ok(predictions)
    }

    /// Accuracy against a label vector
    pub fn accuracy(&self, table: &FeatureTable, labels: &LabelVector) -> Result<f64, TrainError> {
        let predictions = self.predict(table)?;
        if predictions.is_empty() {
            return Ok(0.0);
        }
        let correct = predictions
            .iter()
            .zip(labels.labels().iter())
            .filter(|(p, l)| p == l)
            .count();
        Ok(correct as f64 / predictions.len() as f64)
    }

    /// Feature names with their normalized importances
    pub fn feature_importance_map(&self) -> Vec<(&str, f64)> {
        self.feature_names
            .iter()
            .zip(self.feature_importances.iter())
            .map(|(name, &imp)| (name.as_str(), imp))
            .collect()
    }
}

struct BestSplit {
    feature_idx: usize,
    threshold: f64,
    importance: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

/// Gini impurity over class counts: 1 - sum(p_k^2)
fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / nf;
            p * p
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn table_and_labels(samples: &[(f64, f64, &str)]) -> (FeatureTable, LabelVector) {
        let flat: Vec<f64> = samples.iter().flat_map(|&(a, b, _)| [a, b]).collect();
        let table = FeatureTable::new(
            (0..samples.len() as u64).collect(),
            vec!["f1".to_string(), "f2".to_string()],
            Array2::from_shape_vec((samples.len(), 2), flat).unwrap(),
        )
        .unwrap();
        let labels = LabelVector::new(
            (0..samples.len() as u64).collect(),
            samples.iter().map(|&(_, _, l)| l.to_string()).collect(),
        )
        .unwrap();
        (table, labels)
    }

    fn three_class_data() -> (FeatureTable, LabelVector) {
        let mut samples = Vec::new();
        for i in 0..10 {
            let jitter = (i % 3) as f64 * 0.01;
            samples.push((0.0 + jitter, 0.0 + jitter, "low"));
            samples.push((5.0 + jitter, 0.0 + jitter, "mid"));
            samples.push((5.0 + jitter, 5.0 + jitter, "high"));
        }
        table_and_labels(&samples)
    }

    #[test]
    fn test_gini() {
        assert!((gini(&[5, 5], 10) - 0.5).abs() < 1e-9);
        assert_eq!(gini(&[10, 0], 10), 0.0);
        assert!((gini(&[4, 4, 4], 12) - (1.0 - 3.0 * (1.0 / 9.0))).abs() < 1e-9);
    }

    #[test]
    fn test_fit_predict_multiclass() {
        let (table, labels) = three_class_data();

        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&table, &labels).unwrap();

        assert_eq!(tree.classes(), &["high", "low", "mid"]);
        let accuracy = tree.accuracy(&table, &labels).unwrap();
        assert!(accuracy > 0.95, "accuracy = {accuracy}");
    }

    #[test]
    fn test_importances_normalized() {
        let (table, labels) = three_class_data();

        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&table, &labels).unwrap();

        let total: f64 = tree.feature_importance_map().iter().map(|(_, i)| i).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_before_fit() {
        let (table, _) = three_class_data();
        let tree = DecisionTree::new(TreeConfig::default());
        assert!(matches!(tree.predict(&table), Err(TrainError::NotFitted)));
    }

    #[test]
    fn test_fit_rejects_misaligned_labels() {
        let (table, _) = three_class_data();
        let labels = LabelVector::new(vec![0, 1], vec!["a".into(), "b".into()]).unwrap();

        let mut tree = DecisionTree::new(TreeConfig::default());
        assert!(matches!(
            tree.fit(&table, &labels),
            Err(TrainError::InputMismatch(_))
        ));
    }

    #[test]
    fn test_predict_rejects_column_mismatch() {
        let (table, labels) = three_class_data();

        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(&table, &labels).unwrap();

        let narrowed = table
            .select_columns(&["f1".to_string()].into())
            .unwrap();
        assert!(matches!(
            tree.predict(&narrowed),
            Err(TrainError::ColumnMismatch(_))
        ));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let (table, labels) = three_class_data();

        let mut first = DecisionTree::new(TreeConfig {
            max_features: Some(1),
            ..Default::default()
        });
        first.fit(&table, &labels).unwrap();

        let mut second = DecisionTree::new(TreeConfig {
            max_features: Some(1),
            ..Default::default()
        });
        second.fit(&table, &labels).unwrap();

        assert_eq!(
            first.predict(&table).unwrap(),
            second.predict(&table).unwrap()
        );
    }
}
