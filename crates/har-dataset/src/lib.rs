//! Activity Recording Dataset
//!
//! Loads wide-format accelerometer recordings and activity labels, and
//! reshapes them into the long format consumed by feature extraction.

mod activity;
mod error;
mod loader;
mod records;
mod reshape;

pub use activity::Activity;
pub use error::LoaderError;
pub use loader::{DatasetLoader, LoaderConfig, RecordingSet};
pub use records::{LabelVector, LongRecord, SampleId, WideRecording};
pub use reshape::reshape_long;
