use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context};
use ilsvrc_common::{window_folder, JsonLinesSink, RecordSink};
use sequence_common::{SequenceMeta, WindowConfig};

/// What one folder contributed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FolderSummary {
    pub frames: usize,
    pub tracks: usize,
    pub records: usize,
}

#[derive(Debug, Default)]
pub struct Totals {
    pub folders: usize,
    pub tracks: usize,
    pub records: usize,
    pub skipped: usize,
}

impl Totals {
    pub fn add(&mut self, summary: &FolderSummary) {
        self.folders += 1;
        self.tracks += summary.tracks;
        self.records += summary.records;
    }
}

/// Record files of one run inside `output_dir`. Each file is handed out once.
#[derive(Debug)]
pub struct OutputFiles {
    output_dir: PathBuf,
    claimed: BTreeSet<PathBuf>,
}

impl OutputFiles {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            claimed: BTreeSet::new(),
        }
    }

    /// Reserves the record file of `folder`, failing if another folder of this
    /// run already wrote to it.
    pub fn claim(&mut self, folder: &Path, meta: Option<&SequenceMeta>) -> anyhow::Result<PathBuf> {
        let output = output_path(folder, meta, &self.output_dir)?;
        if !self.claimed.insert(output.clone()) {
            bail!("Record file {output:?} for {folder:?} was already written in this run");
        }
        Ok(output)
    }
}

/// Record file name for a folder: its sequence folder from the annotations with
/// path separators flattened to `__`, or the folder's own name when it holds no
/// annotations.
pub fn output_path(
    folder: &Path,
    meta: Option<&SequenceMeta>,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let name = match meta {
        Some(meta) => meta
            .folder
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("__"),
        None => folder
            .file_name()
            .with_context(|| format!("Folder {folder:?} has no file name"))?
            .to_string_lossy()
            .into_owned(),
    };
    if name.is_empty() {
        bail!("Cannot derive a record file name for {folder:?}");
    }
    Ok(output_dir.join(format!("{name}.jsonl")))
}

/// Separates the tracks of one annotation folder, windows them, and writes
/// every window to one `.jsonl` file claimed from `outputs`.
#[tracing::instrument(skip(outputs, config))]
pub fn process_folder(
    folder: &Path,
    outputs: &mut OutputFiles,
    config: &WindowConfig,
) -> anyhow::Result<FolderSummary> {
    let folder_windows = window_folder(folder, config)?;
    let output = outputs.claim(folder, folder_windows.meta.as_deref())?;
    let mut sink = JsonLinesSink::create(&output)?;

    for window in &folder_windows.windows {
        sink.write(window)?;
    }
    sink.finish()?;

    let summary = FolderSummary {
        frames: folder_windows.num_frames,
        tracks: folder_windows.num_tracks,
        records: sink.written(),
    };
    log::info!(
        "{folder:?}: {} frames, {} tracks, {} records -> {output:?}",
        summary.frames,
        summary.tracks,
        summary.records
    );
    Ok(summary)
}
