//! Binary One-vs-Rest Targets

use har_dataset::LabelVector;

/// Boolean target vector for one class, aligned with the feature table rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTarget {
    values: Vec<bool>,
    positives: usize,
}

impl BinaryTarget {
    /// Derive the target for one class: true exactly where the label matches
    pub fn for_label(labels: &LabelVector, label: &str) -> Self {
        let values: Vec<bool> = labels.labels().iter().map(|l| l == label).collect();
        let positives = values.iter().filter(|&&v| v).count();
        Self { values, positives }
    }

    /// Build a target from raw booleans
    pub fn from_values(values: Vec<bool>) -> Self {
        let positives = values.iter().filter(|&&v| v).count();
        Self { values, positives }
    }

    /// Target values, in row order
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the target has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of true entries
    pub fn positives(&self) -> usize {
        self.positives
    }

    /// All-true or all-false targets make binary relevance undefined
    pub fn is_degenerate(&self) -> bool {
        self.positives == 0 || self.positives == self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelVector {
        LabelVector::new(
            vec![0, 1, 2, 3],
            vec!["a".into(), "b".into(), "a".into(), "c".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_target_matches_label_exactly() {
        let target = BinaryTarget::for_label(&labels(), "a");
        assert_eq!(target.values(), &[true, false, true, false]);
        assert_eq!(target.positives(), 2);
        assert!(!target.is_degenerate());
    }

    #[test]
    fn test_absent_label_is_degenerate() {
        let target = BinaryTarget::for_label(&labels(), "zzz");
        assert_eq!(target.positives(), 0);
        assert!(target.is_degenerate());
    }

    #[test]
    fn test_universal_label_is_degenerate() {
        let labels =
            LabelVector::new(vec![0, 1], vec!["a".into(), "a".into()]).unwrap();
        let target = BinaryTarget::for_label(&labels, "a");
        assert_eq!(target.positives(), 2);
        assert!(target.is_degenerate());
    }
}
