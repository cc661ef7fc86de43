//! Classification Metrics

use std::fmt;

/// Per-class precision, recall, and F1
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    /// Class label
    pub label: String,
    /// TP / (TP + FP)
    pub precision: f64,
    /// TP / (TP + FN)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Number of true instances of the class
    pub support: usize,
}

/// Multiclass classification report
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    /// Per-class metrics, sorted by label
    pub per_class: Vec<ClassMetrics>,
    /// Fraction of correct predictions
    pub accuracy: f64,
    /// Unweighted mean of per-class precision
    pub macro_precision: f64,
    /// Unweighted mean of per-class recall
    pub macro_recall: f64,
    /// Unweighted mean of per-class F1
    pub macro_f1: f64,
    /// Total number of samples
    pub total: usize,
}

impl ClassificationReport {
    /// Compute a report from aligned truth and prediction slices
    pub fn compute(y_true: &[String], y_pred: &[String]) -> Self {
        let total = y_true.len().min(y_pred.len());

        let mut classes: Vec<String> = y_true.iter().chain(y_pred.iter()).cloned().collect();
        classes.sort();
        classes.dedup();

        let mut per_class = Vec::with_capacity(classes.len());
        for class in &classes {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            let mut support = 0usize;

            for (truth, pred) in y_true.iter().zip(y_pred.iter()) {
                let is_true = truth == class;
                let is_pred = pred == class;
                if is_true {
                    support += 1;
                }
                match (is_true, is_pred) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }

            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            per_class.push(ClassMetrics {
                label: class.clone(),
                precision,
                recall,
                f1,
                support,
            });
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t == p)
            .count();
        let accuracy = if total > 0 {
            correct as f64 / total as f64
        } else {
            0.0
        };

        let k = per_class.len().max(1) as f64;
        let macro_precision = per_class.iter().map(|c| c.precision).sum::<f64>() / k;
        let macro_recall = per_class.iter().map(|c| c.recall).sum::<f64>() / k;
        let macro_f1 = per_class.iter().map(|c| c.f1).sum::<f64>() / k;

        Self {
            per_class,
            accuracy,
            macro_precision,
            macro_recall,
            macro_f1,
            total,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<22} {:>9} {:>9} {:>9} {:>8}",
            "", "precision", "recall", "f1", "support"
        )?;
        for class in &self.per_class {
            writeln!(
                f,
                "{:<22} {:>9.3} {:>9.3} {:>9.3} {:>8}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<22} {:>9.3} {:>9.3} {:>9.3} {:>8}",
            "macro avg", self.macro_precision, self.macro_recall, self.macro_f1, self.total
        )?;
        write!(f, "{:<22} {:>39.3}", "accuracy", self.accuracy)
    }
}
