//! Feature Table Assembly

use std::collections::BTreeMap;

use har_dataset::{LongRecord, SampleId};
use tracing::debug;

use crate::error::ExtractError;
use crate::impute::{impute, ImputePolicy};
use crate::spectral::SpectralAnalyzer;
use crate::statistics::SeriesStats;
use crate::table::FeatureTable;

/// Feature names produced per channel, in column order
const FEATURE_NAMES: [&str; 13] = [
    "mean",
    "std_dev",
    "min",
    "max",
    "median",
    "skewness",
    "kurtosis",
    "abs_energy",
    "mean_abs_change",
    "zero_crossings",
    "band_power_low",
    "band_power_mid",
    "band_power_high",
];

/// Extractor configuration
#[derive(Debug, Clone, Copy)]
pub struct ExtractorConfig {
    /// Sampling rate of the recordings (Hz)
    pub sample_rate_hz: f64,
    /// Imputation policy applied after assembly
    pub impute: ImputePolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 50.0,
            impute: ImputePolicy::ColumnMedian,
        }
    }
}

/// Extracts a feature table from long-format records
pub struct FeatureExtractor {
    config: ExtractorConfig,
    analyzer: SpectralAnalyzer,
}

impl FeatureExtractor {
    /// Create an extractor with the given config
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            analyzer: SpectralAnalyzer::new(config.sample_rate_hz),
            config,
        }
    }

    /// Extract one row of features per sample id.
    ///
    /// Records are grouped by sample id and ordered by time within each
    /// group; rows come out in ascending sample-id order. The returned table
    /// contains no non-finite values.
    pub fn extract(
        &mut self,
        records: &[LongRecord],
        channel: &str,
    ) -> Result<FeatureTable, ExtractError> {
        if records.is_empty() {
            return Err(ExtractError::NoRecords);
        }

        let mut by_sample: BTreeMap<SampleId, Vec<(usize, f64)>> = BTreeMap::new();
        for record in records {
            by_sample
                .entry(record.sample_id)
                .or_default()
                .push((record.time, record.value));
        }

        let columns: Vec<String> = FEATURE_NAMES
            .iter()
            .map(|name| format!("{channel}__{name}"))
            .collect();

        let mut sample_ids = Vec::with_capacity(by_sample.len());
        let mut flat = Vec::with_capacity(by_sample.len() * FEATURE_NAMES.len());

        for (sample_id, mut series) in by_sample {
            series.sort_by_key(|&(time, _)| time);
            let values: Vec<f64> = series.into_iter().map(|(_, v)| v).collect();

            let stats = SeriesStats::compute(&values);
            let power = self.analyzer.analyze(&values);

            sample_ids.push(sample_id);
            flat.extend_from_slice(&[
                stats.mean,
                stats.std_dev,
                stats.min,
                stats.max,
                stats.median,
                stats.skewness,
                stats.kurtosis,
                stats.abs_energy,
                stats.mean_abs_change,
                stats.zero_crossings as f64,
                power.low,
                power.mid,
                power.high,
            ]);
        }

        let mut table = FeatureTable::from_flat(sample_ids, columns, flat)?;

        let replaced = impute(table.values_mut(), self.config.impute);
        debug!(
            channel,
            samples = table.n_rows(),
            features = table.n_columns(),
            imputed = replaced,
            "extracted feature table"
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_for(sample_id: SampleId, values: &[f64]) -> Vec<LongRecord> {
        values
            .iter()
            .enumerate()
            .map(|(time, &value)| LongRecord {
                sample_id,
                time,
                value,
            })
            .collect()
    }

    #[test]
    fn test_extract_rows_and_columns() {
        let mut records = records_for(3, &[1.0, 2.0, 3.0, 2.0]);
        records.extend(records_for(1, &[0.5, 0.5, 0.5, 0.5]));

        let mut extractor = FeatureExtractor::new(ExtractorConfig::default());
        let table = extractor.extract(&records, "body_acc_x").unwrap();

        // Rows sorted by sample id
        assert_eq!(table.sample_ids(), &[1, 3]);
        assert_eq!(table.n_columns(), FEATURE_NAMES.len());
        assert_eq!(table.columns()[0], "body_acc_x__mean");

        let mean = table.column("body_acc_x__mean").unwrap();
        assert!((mean[0] - 0.5).abs() < 1e-9);
        assert!((mean[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_no_non_finite() {
        // Constant series produce zero variance but never NaN columns
        let records = records_for(0, &[1.0; 16]);

        let mut extractor = FeatureExtractor::new(ExtractorConfig::default());
        let table = extractor.extract(&records, "body_acc_x").unwrap();

        assert_eq!(table.non_finite_count(), 0);
    }

    #[test]
    fn test_extract_out_of_order_times() {
        let shuffled = vec![
            LongRecord {
                sample_id: 0,
                time: 1,
                value: 5.0,
            },
            LongRecord {
                sample_id: 0,
                time: 0,
                value: 1.0,
            },
            LongRecord {
                sample_id: 0,
                time: 2,
                value: 1.0,
            },
        ];

        let mut extractor = FeatureExtractor::new(ExtractorConfig::default());
        let table = extractor.extract(&shuffled, "acc").unwrap();

        // mean_abs_change over [1, 5, 1] is 4, not the shuffled order's value
        let mac = table.column("acc__mean_abs_change").unwrap();
        assert!((mac[0] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_empty_input() {
        let mut extractor = FeatureExtractor::new(ExtractorConfig::default());
        let err = extractor.extract(&[], "acc").unwrap_err();
        assert!(matches!(err, ExtractError::NoRecords));
    }
}
