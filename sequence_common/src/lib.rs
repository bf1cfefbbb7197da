//! Building blocks for turning per-frame object annotations into fixed-length
//! training sequences.
//!
//! Frames flow through a [`StreamSeparator`], which demultiplexes objects by
//! identity into contiguous tracks. Each [`Track`] is then resampled into
//! evenly spaced, edge-padded [`Window`]s.

pub mod error;
pub mod frame_record;
pub mod sequence_meta;
pub mod slice;
pub mod stream;
pub mod track;
pub mod window;

pub use error::{SequenceError, SliceError};
pub use frame_record::FrameRecord;
pub use sequence_meta::SequenceMeta;
pub use slice::fixed_len_slice_edge_pad;
pub use stream::StreamSeparator;
pub use track::{Track, Window};
pub use window::WindowConfig;
