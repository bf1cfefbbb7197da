//! Persisting fixed-length windows as sequence records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;
use sequence_common::Window;
use serde::{Deserialize, Serialize};

use crate::annotation::AnnoObj;

/// Per-record constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub folder: String,
    /// `[width, height]`
    pub size: [u32; 2],
    pub length: usize,
}

/// Per-step features, one entry per window item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub filenames: Vec<String>,
    /// `[xmax, xmin, ymax, ymin]` per step.
    pub bndboxes: Vec<[i64; 4]>,
}

/// One training example built from a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub context: Context,
    pub sequence: Sequence,
}

impl SequenceRecord {
    pub fn from_window(window: &Window<AnnoObj>) -> Self {
        Self {
            context: Context {
                folder: window.meta.folder.to_string_lossy().into_owned(),
                size: window.meta.size(),
                length: window.len(),
            },
            sequence: Sequence {
                filenames: window.items.iter().map(|o| o.filename.clone()).collect(),
                bndboxes: window.items.iter().map(|o| o.bndbox.to_array()).collect(),
            },
        }
    }
}

/// Destination for finished windows. Windows may arrive in any order.
pub trait RecordSink {
    fn write(&mut self, window: &Window<AnnoObj>) -> anyhow::Result<()>;

    /// Flushes anything buffered. Called once after the last window.
    fn finish(&mut self) -> anyhow::Result<()>;
}

/// Writes one [`SequenceRecord`] per line as JSON.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create record file {path:?}"))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write(&mut self, window: &Window<AnnoObj>) -> anyhow::Result<()> {
        let record = SequenceRecord::from_window(window);
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
