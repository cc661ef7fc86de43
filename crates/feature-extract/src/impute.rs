//! Missing-Value Imputation

use ndarray::{Array2, Axis};

/// How to replace non-finite feature values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImputePolicy {
    /// Replace with 0.0
    Zero,
    /// Replace with the column's median over finite values
    #[default]
    ColumnMedian,
}

/// Replace non-finite entries in place; returns the number replaced.
///
/// A column with no finite values at all falls back to 0.0.
pub fn impute(values: &mut Array2<f64>, policy: ImputePolicy) -> usize {
    let mut replaced = 0;

    for mut column in values.axis_iter_mut(Axis(1)) {
        if column.iter().all(|v| v.is_finite()) {
            continue;
        }

        let fill = match policy {
            ImputePolicy::Zero => 0.0,
            ImputePolicy::ColumnMedian => finite_median(column.iter().copied()).unwrap_or(0.0),
        };

        for v in column.iter_mut() {
            if !v.is_finite() {
                *v = fill;
                replaced += 1;
            }
        }
    }

    replaced
}

fn finite_median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut finite: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = finite.len();
    Some(if n % 2 == 0 {
        (finite[n / 2 - 1] + finite[n / 2]) / 2.0
    } else {
        finite[n / 2]
    })
}
