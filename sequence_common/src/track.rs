use std::sync::Arc;

use serde::Serialize;

use crate::error::SequenceError;
use crate::sequence_meta::SequenceMeta;
use crate::slice::fixed_len_slice_edge_pad;
use crate::window::WindowConfig;

/// The per-frame values of one object over a contiguous run of frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track<V> {
    pub meta: Arc<SequenceMeta>,
    items: Vec<V>,
}

/// A fixed-length, edge-padded resampling of a [`Track`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window<V> {
    pub meta: Arc<SequenceMeta>,
    pub items: Vec<V>,
}

impl<V> Track<V> {
    pub fn new(meta: Arc<SequenceMeta>, items: Vec<V>) -> Self {
        Self { meta, items }
    }

    pub fn items(&self) -> &[V] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<V: Clone> Track<V> {
    /// Splits the track into `n` windows of `length` items with evenly spaced
    /// starts `0, i, 2i, ..` where `i = len / n`.
    ///
    /// Windows overlap when `i < length`, and each one is padded at its own
    /// edges when it runs past the end of the track.
    pub fn split(&self, n: usize, length: usize) -> Result<Vec<Window<V>>, SequenceError> {
        if self.items.is_empty() {
            return Err(SequenceError::EmptyTrack);
        }
        if n == 0 {
            return Err(SequenceError::NoWindows);
        }
        let interval = self.items.len() / n;
        (0..n)
            .map(|k| -> Result<Window<V>, SequenceError> {
                let start = (k * interval) as isize;
                let items = fixed_len_slice_edge_pad(&self.items, start, length)?;
                Ok(Window {
                    meta: Arc::clone(&self.meta),
                    items,
                })
            })
            .collect()
    }

    /// Splits the track into as many windows as `config` asks for its length.
    pub fn windows(&self, config: &WindowConfig) -> Result<Vec<Window<V>>, SequenceError> {
        self.split(config.num_windows(self.len()), config.window_length)
    }
}

impl<V> Window<V> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
