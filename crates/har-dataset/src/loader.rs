//! Recording and Label File Loading
//!
//! Wide-format readings come either as whitespace-delimited text (the UCI
//! inertial-signal layout) or as CSV, dispatched by extension. Labels are one
//! numeric activity code per line. On-disk caching of the parsed set is an
//! explicit opt-in via [`LoaderConfig`], never a default.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::activity::Activity;
use crate::error::LoaderError;
use crate::records::{LabelVector, SampleId, WideRecording};

/// Loader configuration
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Directory for the parsed-dataset cache; caching is off when unset
    pub cache_dir: Option<PathBuf>,
}

/// A recording together with its aligned labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSet {
    /// Wide-format readings
    pub recording: WideRecording,
    /// Label per sample, aligned with the recording's rows
    pub labels: LabelVector,
}

/// Loads recordings and labels from local files
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    /// Create a loader with the given config
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a wide-format recording, dispatching by file extension.
    ///
    /// Supported formats:
    /// * `.txt` – whitespace-delimited, one sample per line
    /// * `.csv` – comma-delimited, no header, one sample per line
    pub fn load_recording(
        &self,
        path: &Path,
        channel: &str,
    ) -> Result<WideRecording, LoaderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let rows = match ext.as_str() {
            "txt" => Self::read_whitespace_rows(path)?,
            "csv" => Self::read_csv_rows(path)?,
            other => return Err(LoaderError::UnsupportedFormat(other.to_string())),
        };

        if rows.is_empty() {
            return Err(LoaderError::EmptyFile(path.display().to_string()));
        }

        let n_timesteps = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_timesteps {
                return Err(LoaderError::ShapeMismatch {
                    line: i + 1,
                    expected: n_timesteps,
                    actual: row.len(),
                });
            }
        }

        let sample_ids: Vec<SampleId> = (0..rows.len() as SampleId).collect();
        debug!(
            channel,
            samples = rows.len(),
            timesteps = n_timesteps,
            "loaded recording"
        );

        Ok(WideRecording {
            channel: channel.to_string(),
            sample_ids,
            n_timesteps,
            rows,
        })
    }

    fn read_whitespace_rows(path: &Path) -> Result<Vec<Vec<f64>>, LoaderError> {
        let reader = BufReader::new(File::open(path)?);
        let mut rows = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| LoaderError::Parse {
                        line: i + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, LoaderError>>()?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn read_csv_rows(path: &Path) -> Result<Vec<Vec<f64>>, LoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        let mut rows = Vec::new();

        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .iter()
                .map(|token| {
                    token.trim().parse::<f64>().map_err(|_| LoaderError::Parse {
                        line: i + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, LoaderError>>()?;
            rows.push(row);
        }

        Ok(rows)
    }

    /// Load activity labels: one numeric code (1..=6) per line
    pub fn load_labels(&self, path: &Path) -> Result<LabelVector, LoaderError> {
        let reader = BufReader::new(File::open(path)?);
        let mut labels = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            let code = token.parse::<u8>().map_err(|_| LoaderError::Parse {
                line: i + 1,
                token: token.to_string(),
            })?;
            let activity = Activity::from_code(code, i + 1)?;
            labels.push(activity.as_str().to_string());
        }

        let ids: Vec<SampleId> = (0..labels.len() as SampleId).collect();
        LabelVector::new(ids, labels)
    }

    /// Load a recording and its labels, validating that they align.
    ///
    /// When a cache directory is configured, a previously parsed set for the
    /// same channel is reused and a fresh parse is written back otherwise.
    pub fn load_set(
        &self,
        data_path: &Path,
        labels_path: &Path,
        channel: &str,
    ) -> Result<RecordingSet, LoaderError> {
        if let Some(cache_path) = self.cache_path(channel) {
            if cache_path.exists() {
                let reader = BufReader::new(File::open(&cache_path)?);
                let set: RecordingSet = serde_json::from_reader(reader)?;
                info!(channel, cache = %cache_path.display(), "loaded recording set from cache");
                return Ok(set);
            }
        }

        let recording = self.load_recording(data_path, channel)?;
        let labels = self.load_labels(labels_path)?;

        if recording.n_samples() != labels.len() {
            return Err(LoaderError::LabelMismatch {
                samples: recording.n_samples(),
                labels: labels.len(),
            });
        }

        let set = RecordingSet { recording, labels };

        if let Some(cache_path) = self.cache_path(channel) {
            if let Some(parent) = cache_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let writer = BufWriter::new(File::create(&cache_path)?);
            serde_json::to_writer(writer, &set)?;
            info!(channel, cache = %cache_path.display(), "wrote recording set cache");
        }

        Ok(set)
    }

    fn cache_path(&self, channel: &str) -> Option<PathBuf> {
        self.config
            .cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{channel}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_whitespace_recording() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "acc.txt", "0.1 0.2 0.3\n0.4 0.5 0.6\n");

        let loader = DatasetLoader::new(LoaderConfig::default());
        let recording = loader.load_recording(&path, "body_acc_x").unwrap();

        assert_eq!(recording.n_samples(), 2);
        assert_eq!(recording.n_timesteps, 3);
        assert_eq!(recording.rows[1][2], 0.6);
        assert_eq!(recording.sample_ids, vec![0, 1]);
    }

    #[test]
    fn test_load_csv_recording() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "acc.csv", "0.1,0.2\n0.3,0.4\n");

        let loader = DatasetLoader::new(LoaderConfig::default());
        let recording = loader.load_recording(&path, "body_acc_x").unwrap();

        assert_eq!(recording.n_samples(), 2);
        assert_eq!(recording.n_timesteps, 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "acc.txt", "0.1 0.2 0.3\n0.4 0.5\n");

        let loader = DatasetLoader::new(LoaderConfig::default());
        let err = loader.load_recording(&path, "body_acc_x").unwrap_err();
        assert!(matches!(err, LoaderError::ShapeMismatch { line: 2, .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let loader = DatasetLoader::new(LoaderConfig::default());
        let err = loader
            .load_recording(Path::new("acc.parquet"), "body_acc_x")
            .unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "labels.txt", "1\n6\n4\n");

        let loader = DatasetLoader::new(LoaderConfig::default());
        let labels = loader.load_labels(&path).unwrap();

        assert_eq!(labels.len(), 3);
        assert_eq!(labels.labels()[0], "walking");
        assert_eq!(labels.labels()[1], "laying");
        assert_eq!(labels.labels()[2], "sitting");
    }

    #[test]
    fn test_load_set_label_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_file(dir.path(), "acc.txt", "0.1 0.2\n0.3 0.4\n");
        let labels = write_file(dir.path(), "labels.txt", "1\n2\n3\n");

        let loader = DatasetLoader::new(LoaderConfig::default());
        let err = loader.load_set(&data, &labels, "body_acc_x").unwrap_err();
        assert!(matches!(
            err,
            LoaderError::LabelMismatch {
                samples: 2,
                labels: 3
            }
        ));
    }

    #[test]
    fn test_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_file(dir.path(), "acc.txt", "0.1 0.2\n0.3 0.4\n");
        let labels = write_file(dir.path(), "labels.txt", "1\n2\n");
        let cache_dir = dir.path().join("cache");

        let loader = DatasetLoader::new(LoaderConfig {
            cache_dir: Some(cache_dir.clone()),
        });

        let first = loader.load_set(&data, &labels, "body_acc_x").unwrap();
        assert!(cache_dir.join("body_acc_x.json").exists());

        // Second load must come from the cache even if the sources vanish
        std::fs::remove_file(&data).unwrap();
        let second = loader.load_set(&data, &labels, "body_acc_x").unwrap();
        assert_eq!(second.recording.rows, first.recording.rows);
        assert_eq!(second.labels.labels(), first.labels.labels());
    }
}
