//! Splits a frame-ordered stream of identified objects into per-object tracks.

use std::collections::{BTreeMap, BTreeSet};

use crate::frame_record::FrameRecord;

/// Demultiplexes frames into contiguous single-identity streams.
///
/// Call [`StreamSeparator::update`] once per frame, in frame order. An identity
/// stays active while it appears in consecutive frames; the first frame it is
/// missing from finalizes its stream. An identity that shows up again later
/// starts a new stream.
///
/// Streams finalized in the same frame are kept in identity order.
#[derive(Debug)]
pub struct StreamSeparator<K: Ord, V> {
    active: BTreeMap<K, Vec<V>>,
    finished: Vec<Vec<V>>,
}

impl<K: Ord + Clone, V> StreamSeparator<K, V> {
    pub fn new() -> Self {
        Self {
            active: BTreeMap::new(),
            finished: Vec::new(),
        }
    }

    /// Folds one frame into the separator.
    ///
    /// Frames must be given in increasing time order. This is not checked; out
    /// of order frames silently produce wrong streams.
    pub fn update(&mut self, frame: FrameRecord<K, V>) {
        let present: BTreeSet<&K> = frame.objects.keys().collect();
        let active: BTreeSet<&K> = self.active.keys().collect();
        let appeared: Vec<K> = present.difference(&active).map(|&k| k.clone()).collect();
        let vanished: Vec<K> = active.difference(&present).map(|&k| k.clone()).collect();

        for identity in appeared {
            self.active.insert(identity, Vec::new());
        }
        for (identity, value) in frame {
            self.active.entry(identity).or_default().push(value);
        }
        for identity in vanished {
            if let Some(stream) = self.active.remove(&identity) {
                self.finished.push(stream);
            }
        }
    }

    /// Hands over the streams finalized so far, leaving active ones in place.
    pub fn drain_finished(&mut self) -> Vec<Vec<V>> {
        std::mem::take(&mut self.finished)
    }

    /// Finalizes every active stream and returns all finished streams.
    pub fn close(mut self) -> Vec<Vec<V>> {
        let active = std::mem::take(&mut self.active);
        self.finished.extend(active.into_values());
        log::debug!("Closed stream separator with {} streams", self.finished.len());
        self.finished
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn finished_len(&self) -> usize {
        self.finished.len()
    }
}

impl<K: Ord + Clone, V> Default for StreamSeparator<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(objs: &[(&'static str, &'static str)]) -> FrameRecord<&'static str, &'static str> {
        objs.iter().copied().collect()
    }

    #[test]
    fn test_gap_splits_identity_into_two_streams() {
        let mut separator = StreamSeparator::new();
        separator.update(frame(&[("A", "a0"), ("B", "b0")]));
        separator.update(frame(&[("A", "a1")]));
        separator.update(frame(&[("B", "b1")]));

        let mut streams = separator.close();
        streams.sort();
        assert_eq!(streams, vec![vec!["a0", "a1"], vec!["b0"], vec!["b1"]]);
    }

    #[test]
    fn test_single_frame_gives_length_one_stream() {
        let mut separator = StreamSeparator::new();
        separator.update(frame(&[("A", "a0")]));
        assert_eq!(separator.close(), vec![vec!["a0"]]);
    }

    #[test]
    fn test_empty_frame_finalizes_everything() {
        let mut separator = StreamSeparator::new();
        separator.update(frame(&[("A", "a0"), ("B", "b0")]));
        separator.update(frame(&[]));
        assert_eq!(separator.active_len(), 0);
        assert_eq!(separator.finished_len(), 2);
        // identity order within one frame
        assert_eq!(separator.close(), vec![vec!["a0"], vec!["b0"]]);
    }

    #[test]
    fn test_drain_then_close_partitions_streams() {
        let mut separator = StreamSeparator::new();
        separator.update(frame(&[("A", "a0"), ("B", "b0")]));
        separator.update(frame(&[("B", "b1")]));
        assert_eq!(separator.drain_finished(), vec![vec!["a0"]]);
        assert_eq!(separator.finished_len(), 0);
        separator.update(frame(&[("B", "b2"), ("C", "c0")]));
        assert_eq!(separator.close(), vec![vec!["b0", "b1", "b2"], vec!["c0"]]);
    }

    #[test]
    fn test_no_updates_closes_empty() {
        let separator: StreamSeparator<u32, u32> = StreamSeparator::default();
        assert!(separator.close().is_empty());
    }

    #[test]
    fn test_repeated_identity_in_frame_keeps_last() {
        let mut separator = StreamSeparator::new();
        separator.update(frame(&[("A", "first"), ("A", "second")]));
        assert_eq!(separator.close(), vec![vec!["second"]]);
    }
}
