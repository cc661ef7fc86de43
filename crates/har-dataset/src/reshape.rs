//! Wide to Long Reshaping

use crate::records::{LongRecord, WideRecording};

/// Flatten a wide recording into long-format records.
///
/// Output is ordered by sample id, then time, so downstream grouping sees a
/// stable sample-id-to-row mapping.
pub fn reshape_long(recording: &WideRecording) -> Vec<LongRecord> {
    let mut records = Vec::with_capacity(recording.n_samples() * recording.n_timesteps);
    for (row, &sample_id) in recording.rows.iter().zip(recording.sample_ids.iter()) {
        for (time, &value) in row.iter().enumerate() {
            records.push(LongRecord {
                sample_id,
                time,
                value,
            });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_long() {
        let recording = WideRecording {
            channel: "body_acc_x".to_string(),
            sample_ids: vec![10, 20],
            n_timesteps: 3,
            rows: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        };

        let long = reshape_long(&recording);
        assert_eq!(long.len(), 6);
        assert_eq!(
            long[0],
            LongRecord {
                sample_id: 10,
                time: 0,
                value: 1.0
            }
        );
        assert_eq!(
            long[5],
            LongRecord {
                sample_id: 20,
                time: 2,
                value: 6.0
            }
        );
    }

    #[test]
    fn test_reshape_empty() {
        let recording = WideRecording {
            channel: "body_acc_x".to_string(),
            sample_ids: vec![],
            n_timesteps: 0,
            rows: vec![],
        };
        assert!(reshape_long(&recording).is_empty());
    }
}
