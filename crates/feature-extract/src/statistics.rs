//! Per-Series Statistical Features

/// Statistical features for one sample's series
#[derive(Debug, Clone, Default)]
pub struct SeriesStats {
    /// Mean value
    pub mean: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Kurtosis (excess)
    pub kurtosis: f64,
    /// Sum of squared values
    pub abs_energy: f64,
    /// Mean absolute difference between consecutive values
    pub mean_abs_change: f64,
    /// Sign changes relative to the mean
    pub zero_crossings: usize,
}

impl SeriesStats {
    /// Compute statistical features from a series of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let abs_energy = values.iter().map(|v| v * v).sum::<f64>();

        // Central moments in one pass
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;
        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
        }

        let variance = m2 / n;
        let std_dev = variance.sqrt();

        let skewness = if std_dev > 0.0 {
            (m3 / n) / (std_dev * std_dev * std_dev)
        } else {
            0.0
        };

        let kurtosis = if std_dev > 0.0 {
            (m4 / n) / (variance * variance) - 3.0
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if sorted.len() % 2 == 0 {
            (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
        } else {
            sorted[sorted.len() / 2]
        };

        let mean_abs_change = if values.len() >= 2 {
            values
                .windows(2)
                .map(|w| (w[1] - w[0]).abs())
                .sum::<f64>()
                / (values.len() - 1) as f64
        } else {
            0.0
        };

        // Crossings of the mean level
        let mut zero_crossings = 0;
        for w in values.windows(2) {
            let prev = w[0] - mean;
            let curr = w[1] - mean;
            if prev.signum() != curr.signum() && prev != 0.0 && curr != 0.0 {
                zero_crossings += 1;
            }
        }

        Self {
            mean,
            std_dev,
            min,
            max,
            median,
            skewness,
            kurtosis,
            abs_energy,
            mean_abs_change,
            zero_crossings,
        }
    }
}
