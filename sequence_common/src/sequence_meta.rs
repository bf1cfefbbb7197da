use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Metadata shared by every track of one annotated video sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SequenceMeta {
    /// Folder of the sequence, relative to the dataset root.
    pub folder: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl SequenceMeta {
    pub fn new(folder: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            folder: folder.into(),
            width,
            height,
        }
    }

    /// Frame size as `[width, height]`.
    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}
