//! Feature Extraction Engine
//!
//! Turns long-format accelerometer records into a feature table: one row per
//! sample id, one column per statistical or spectral feature, no missing
//! values after imputation.

mod error;
mod extractor;
mod impute;
mod spectral;
mod statistics;
mod table;

pub use error::ExtractError;
pub use extractor::{ExtractorConfig, FeatureExtractor};
pub use impute::ImputePolicy;
pub use spectral::{BandPower, FrequencyBands, SpectralAnalyzer};
pub use statistics::SeriesStats;
pub use table::FeatureTable;
