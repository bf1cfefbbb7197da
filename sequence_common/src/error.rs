use thiserror::Error;

/// Errors from [`crate::slice::fixed_len_slice_edge_pad`].
///
/// Both range variants mean the requested slice has no overlap at all with the
/// source, which is always a logic error in the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    #[error("start {start} exceeds source length {len}")]
    StartOutOfRange { start: isize, len: usize },

    #[error("end {end} = start {start} + length {length} should be non-negative")]
    EndOutOfRange {
        start: isize,
        length: usize,
        end: isize,
    },

    #[error("cannot produce {length} elements starting at {start}")]
    LengthOverflow { start: isize, length: usize },

    #[error("cannot pad {length} elements from an empty source")]
    EmptySource { length: usize },
}

/// Errors from windowing tracks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error(transparent)]
    Slice(#[from] SliceError),

    #[error("cannot window a zero-length track")]
    EmptyTrack,

    #[error("window count must be at least 1")]
    NoWindows,

    #[error("invalid window config: {0}")]
    InvalidConfig(String),
}
