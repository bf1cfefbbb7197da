use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

/// How tracks are cut into fixed-length windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Items per window.
    pub window_length: usize,
    pub min_windows_per_track: usize,
    pub max_windows_per_track: usize,
}

impl WindowConfig {
    pub fn new(
        window_length: usize,
        min_windows_per_track: usize,
        max_windows_per_track: usize,
    ) -> Result<Self, SequenceError> {
        let config = Self {
            window_length,
            min_windows_per_track,
            max_windows_per_track,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that all fields are positive and the window count bounds are ordered.
    pub fn validate(&self) -> Result<(), SequenceError> {
        if self.window_length == 0 {
            return Err(SequenceError::InvalidConfig(
                "window_length must be at least 1".to_string(),
            ));
        }
        if self.min_windows_per_track == 0 {
            return Err(SequenceError::InvalidConfig(
                "min_windows_per_track must be at least 1".to_string(),
            ));
        }
        if self.min_windows_per_track > self.max_windows_per_track {
            return Err(SequenceError::InvalidConfig(format!(
                "min_windows_per_track ({}) exceeds max_windows_per_track ({})",
                self.min_windows_per_track, self.max_windows_per_track
            )));
        }
        Ok(())
    }

    /// Roughly one window per `window_length` items, clamped to the configured bounds.
    pub fn num_windows(&self, track_len: usize) -> usize {
        // min wins over max, so an unvalidated config still yields >= min windows
        (track_len / self.window_length.max(1) + 1)
            .min(self.max_windows_per_track)
            .max(self.min_windows_per_track)
    }
}
