//! Activity Classes

use crate::error::LoaderError;
use serde::{Deserialize, Serialize};

/// Activity performed during a recording window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    /// Walking on level ground
    Walking,
    /// Walking upstairs
    WalkingUpstairs,
    /// Walking downstairs
    WalkingDownstairs,
    /// Sitting
    Sitting,
    /// Standing
    Standing,
    /// Laying down
    Laying,
}

impl Activity {
    /// All activities, in code order
    pub const ALL: [Activity; 6] = [
        Activity::Walking,
        Activity::WalkingUpstairs,
        Activity::WalkingDownstairs,
        Activity::Sitting,
        Activity::Standing,
        Activity::Laying,
    ];

    /// Map the dataset's numeric code (1..=6) to an activity
    pub fn from_code(code: u8, line: usize) -> Result<Self, LoaderError> {
        match code {
            1 => Ok(Activity::Walking),
            2 => Ok(Activity::WalkingUpstairs),
            3 => Ok(Activity::WalkingDownstairs),
            4 => Ok(Activity::Sitting),
            5 => Ok(Activity::Standing),
            6 => Ok(Activity::Laying),
            _ => Err(LoaderError::UnknownActivityCode { line, code }),
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Walking => "walking",
            Activity::WalkingUpstairs => "walking_upstairs",
            Activity::WalkingDownstairs => "walking_downstairs",
            Activity::Sitting => "sitting",
            Activity::Standing => "standing",
            Activity::Laying => "laying",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
