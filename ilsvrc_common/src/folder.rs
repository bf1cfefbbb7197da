//! Reading one annotated video snippet, frame by frame.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use sequence_common::{
    FrameRecord, SequenceMeta, StreamSeparator, Track, Window, WindowConfig,
};

use crate::annotation::{parse_xml, AnnoMeta, AnnoObj};

/// Path of the annotation file for frame `index` inside `folder`.
pub fn annotation_path(folder: &Path, index: usize) -> PathBuf {
    folder.join(format!("{index:06}.xml"))
}

/// Number of `.xml` files directly inside `folder`.
pub fn count_annotation_files(folder: &Path) -> anyhow::Result<usize> {
    if !folder.is_dir() {
        bail!("Annotation folder {folder:?} is not a directory");
    }
    let mut count = 0;
    for entry in std::fs::read_dir(folder)
        .with_context(|| format!("Failed to list annotation folder {folder:?}"))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "xml") {
            count += 1;
        }
    }
    Ok(count)
}

fn sequence_meta(meta: &AnnoMeta) -> SequenceMeta {
    SequenceMeta::new(&meta.folder, meta.size.0, meta.size.1)
}

/// All object tracks of one annotation folder.
#[derive(Debug)]
pub struct FolderTracks {
    /// `None` when the folder holds no annotation files.
    pub meta: Option<Arc<SequenceMeta>>,
    pub num_frames: usize,
    pub tracks: Vec<Track<AnnoObj>>,
}

/// Feeds frames `000000.xml, 000001.xml, ..` of `folder` through a stream
/// separator keyed by track id, and returns the resulting tracks.
pub fn read_annotation_folder(folder: &Path) -> anyhow::Result<FolderTracks> {
    let num_frames = count_annotation_files(folder)?;
    let mut separator: StreamSeparator<String, AnnoObj> = StreamSeparator::new();
    let mut meta = None;

    for index in 0..num_frames {
        let (frame_meta, objs) = parse_xml(&annotation_path(folder, index))?;
        if meta.is_none() {
            meta = Some(Arc::new(sequence_meta(&frame_meta)));
        }
        separator.update(FrameRecord::from_objects(objs, |o| o.trackid.clone()));
    }

    let streams = separator.close();
    let tracks = match &meta {
        Some(meta) => streams
            .into_iter()
            .map(|objs| Track::new(Arc::clone(meta), objs))
            .collect(),
        None => Vec::new(),
    };
    log::debug!(
        "Read {num_frames} frames, {} tracks from {folder:?}",
        tracks.len()
    );

    Ok(FolderTracks {
        meta,
        num_frames,
        tracks,
    })
}

/// Every window cut from one annotation folder.
#[derive(Debug)]
pub struct FolderWindows {
    /// `None` when the folder holds no annotation files.
    pub meta: Option<Arc<SequenceMeta>>,
    pub num_frames: usize,
    pub num_tracks: usize,
    /// Windows of all tracks, in track order.
    pub windows: Vec<Window<AnnoObj>>,
}

/// Reads `folder` and cuts every track into fixed-length windows.
pub fn window_folder(folder: &Path, config: &WindowConfig) -> anyhow::Result<FolderWindows> {
    let folder_tracks = read_annotation_folder(folder)?;
    let mut windows = Vec::new();
    for track in &folder_tracks.tracks {
        let track_windows = track
            .windows(config)
            .with_context(|| format!("Failed to window a track of {folder:?}"))?;
        log::debug!("Track of {} frames -> {} windows", track.len(), track_windows.len());
        windows.extend(track_windows);
    }
    Ok(FolderWindows {
        meta: folder_tracks.meta,
        num_frames: folder_tracks.num_frames,
        num_tracks: folder_tracks.tracks.len(),
        windows,
    })
}
