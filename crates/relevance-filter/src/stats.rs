//! Rank Statistics for Relevance Scoring
//!
//! Mann-Whitney U with tie-corrected normal approximation, plus the
//! Benjamini-Hochberg procedure for false-discovery-rate control.

use crate::error::SelectorError;

/// Two-sided Mann-Whitney U p-value for one column against a binary target.
///
/// Returns 1.0 when every value is tied (zero rank variance), so constant
/// columns are never selected.
pub fn mann_whitney_p(values: &[f64], target: &[bool]) -> Result<f64, SelectorError> {
    if values.len() != target.len() {
        return Err(SelectorError::Unsupported(format!(
            "column has {} values for {} target entries",
            values.len(),
            target.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SelectorError::Numerical(
            "non-finite value in feature column".to_string(),
        ));
    }

    let n = values.len();
    let n1 = target.iter().filter(|&&t| t).count();
    let n0 = n - n1;
    if n1 == 0 || n0 == 0 {
        return Err(SelectorError::Unsupported(
            "binary target has only one group".to_string(),
        ));
    }

    let (ranks, tie_term) = average_ranks(values);

    let rank_sum_pos: f64 = ranks
        .iter()
        .zip(target.iter())
        .filter(|(_, &t)| t)
        .map(|(&r, _)| r)
        .sum();

    let n1f = n1 as f64;
    let n0f = n0 as f64;
    let nf = n as f64;

    let u = rank_sum_pos - n1f * (n1f + 1.0) / 2.0;
    let mu = n1f * n0f / 2.0;

    let variance = (n1f * n0f / 12.0) * ((nf + 1.0) - tie_term / (nf * (nf - 1.0)));
    if variance <= 0.0 {
        // Every value tied
        return Ok(1.0);
    }

    // Continuity correction toward the mean
    let diff = u - mu;
    let corrected = if diff == 0.0 {
        0.0
    } else {
        diff - 0.5 * diff.signum()
    };
    let z = corrected / variance.sqrt();

    let p = 2.0 * normal_sf(z.abs());
    Ok(p.min(1.0))
}

/// 1-based ranks with ties sharing the average rank; also returns the tie
/// correction term sum over groups of (t^3 - t).
fn average_ranks(values: &[f64]) -> (Vec<f64>, f64) {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }

        let count = (end - start) as f64;
        // Average of ranks start+1 ..= end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        tie_term += count * count * count - count;

        start = end;
    }

    (ranks, tie_term)
}

/// Standard normal survival function, 1 - Phi(z)
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

// Abramowitz & Stegun 7.1.26 rational approximation, |error| < 1.5e-7
fn erfc(x: f64) -> f64 {
    let sign = x.signum();
    let x = x.abs();

    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let erf = 1.0 - poly * (-x * x).exp();

    if sign < 0.0 {
        1.0 + erf
    } else {
        1.0 - erf
    }
}

/// Benjamini-Hochberg step-up procedure.
///
/// Returns a keep flag per input p-value: the i-th flag is true when that
/// p-value survives FDR control at `fdr_level`.
pub fn benjamini_hochberg(p_values: &[f64], fdr_level: f64) -> Vec<bool> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut cutoff_rank = None;
    for (rank, &idx) in order.iter().enumerate() {
        let threshold = fdr_level * (rank + 1) as f64 / m as f64;
        if p_values[idx] <= threshold {
            cutoff_rank = Some(rank);
        }
    }

    let mut keep = vec![false; m];
    if let Some(cutoff) = cutoff_rank {
        for &idx in &order[..=cutoff] {
            keep[idx] = true;
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_without_ties() {
        let (ranks, tie_term) = average_ranks(&[10.0, 30.0, 20.0]);
        assert_eq!(ranks, vec![1.0, 3.0, 2.0]);
        assert_eq!(tie_term, 0.0);
    }

    #[test]
    fn test_ranks_with_ties() {
        let (ranks, tie_term) = average_ranks(&[5.0, 5.0, 1.0]);
        assert_eq!(ranks, vec![2.5, 2.5, 1.0]);
        // One tie group of size 2: 2^3 - 2 = 6
        assert_eq!(tie_term, 6.0);
    }

    #[test]
    fn test_normal_sf() {
        assert!((normal_sf(0.0) - 0.5).abs() < 1e-6);
        assert!((normal_sf(1.96) - 0.025).abs() < 1e-3);
        assert!(normal_sf(6.0) < 1e-8);
    }

    #[test]
    fn test_separated_groups_score_low_p() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 101.0, 102.0, 103.0, 104.0];
        let target = vec![false, false, false, false, true, true, true, true];
        let p = mann_whitney_p(&values, &target).unwrap();
        assert!(p < 0.05, "p = {p}");
    }

    #[test]
    fn test_identical_groups_score_high_p() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0];
        let target = vec![false, false, false, false, true, true, true, true];
        let p = mann_whitney_p(&values, &target).unwrap();
        assert!(p > 0.5, "p = {p}");
    }

    #[test]
    fn test_constant_column_is_never_significant() {
        let values = vec![7.0; 10];
        let target: Vec<bool> = (0..10).map(|i| i < 5).collect();
        let p = mann_whitney_p(&values, &target).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_single_group_rejected() {
        let err = mann_whitney_p(&[1.0, 2.0], &[true, true]).unwrap_err();
        assert!(matches!(err, SelectorError::Unsupported(_)));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = mann_whitney_p(&[1.0, f64::NAN], &[true, false]).unwrap_err();
        assert!(matches!(err, SelectorError::Numerical(_)));
    }

    #[test]
    fn test_benjamini_hochberg_keeps_small_p() {
        let keep = benjamini_hochberg(&[0.001, 0.8, 0.002, 0.9], 0.05);
        assert_eq!(keep, vec![true, false, true, false]);
    }

    #[test]
    fn test_benjamini_hochberg_keeps_everything_below_cutoff() {
        // Step-up: once the largest qualifying rank is found, all smaller
        // ranks are kept even if an individual threshold was missed
        let keep = benjamini_hochberg(&[0.012, 0.035, 0.04], 0.05);
        assert_eq!(keep, vec![true, true, true]);
    }

    #[test]
    fn test_benjamini_hochberg_empty() {
        assert!(benjamini_hochberg(&[], 0.05).is_empty());
    }

    #[test]
    fn test_benjamini_hochberg_nothing_significant() {
        let keep = benjamini_hochberg(&[0.5, 0.6, 0.7], 0.05);
        assert_eq!(keep, vec![false, false, false]);
    }
}
