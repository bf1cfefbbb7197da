use crate::error::SliceError;

/// Extracts exactly `length` elements from `x` starting at `start`, filling
/// out-of-range positions with copies of the first or last element.
///
/// `start` may be negative, and `start + length` may run past the end of `x`,
/// but the requested range must overlap the source: `start > x.len()` and
/// `start + length < 0` are rejected.
///
/// ```
/// use sequence_common::fixed_len_slice_edge_pad;
///
/// let x = [0, 1, 2, 3, 4];
/// let sliced = fixed_len_slice_edge_pad(&x, -1, 7).unwrap();
/// assert_eq!(sliced, vec![0, 0, 1, 2, 3, 4, 4]);
/// ```
pub fn fixed_len_slice_edge_pad<T: Clone>(
    x: &[T],
    start: isize,
    length: usize,
) -> Result<Vec<T>, SliceError> {
    let lx = x.len();
    if start > lx as isize {
        return Err(SliceError::StartOutOfRange { start, len: lx });
    }
    let end = isize::try_from(length)
        .ok()
        .and_then(|l| start.checked_add(l))
        .ok_or(SliceError::LengthOverflow { start, length })?;
    if end < 0 {
        return Err(SliceError::EndOutOfRange { start, length, end });
    }
    if length == 0 {
        return Ok(Vec::new());
    }
    let (Some(first), Some(last)) = (x.first(), x.last()) else {
        return Err(SliceError::EmptySource { length });
    };

    let mut out = Vec::new();
    out.try_reserve_exact(length)
        .map_err(|_| SliceError::LengthOverflow { start, length })?;

    // Leading/trailing pad counts, with both ends clamped independently.
    let (start_pad, start) = if start < 0 {
        (start.unsigned_abs(), 0)
    } else {
        (0, start as usize)
    };
    let (end_pad, end) = if end as usize > lx {
        (end as usize - lx, lx)
    } else {
        (0, end as usize)
    };

    out.extend(std::iter::repeat(first).take(start_pad).cloned());
    out.extend_from_slice(&x[start..end]);
    out.extend(std::iter::repeat(last).take(end_pad).cloned());
    debug_assert_eq!(out.len(), length);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [i32; 5] = [0, 1, 2, 3, 4];

    #[test]
    fn test_pads_both_edges() {
        let sliced = fixed_len_slice_edge_pad(&X, -1, 7).unwrap();
        assert_eq!(sliced, vec![0, 0, 1, 2, 3, 4, 4]);
    }

    #[test]
    fn test_in_range_is_plain_slice() {
        for start in 0..=X.len() {
            for length in 0..=(X.len() - start) {
                let sliced = fixed_len_slice_edge_pad(&X, start as isize, length).unwrap();
                assert_eq!(sliced, X[start..start + length].to_vec());
            }
        }
    }

    #[test]
    fn test_length_is_always_exact() {
        for start in -8isize..=5 {
            for length in 0usize..12 {
                if start + (length as isize) < 0 {
                    continue;
                }
                let sliced = fixed_len_slice_edge_pad(&X, start, length).unwrap();
                assert_eq!(sliced.len(), length, "start={start} length={length}");
            }
        }
    }

    #[test]
    fn test_leading_pad_repeats_first() {
        let sliced = fixed_len_slice_edge_pad(&X, -3, 5).unwrap();
        assert_eq!(&sliced[..3], &[0, 0, 0]);
        assert_eq!(&sliced[3..], &[0, 1]);
    }

    #[test]
    fn test_trailing_pad_repeats_last() {
        let sliced = fixed_len_slice_edge_pad(&X, 3, 6).unwrap();
        // 3 + 6 - 5 = 4 trailing pads
        assert_eq!(sliced, vec![3, 4, 4, 4, 4, 4]);
    }

    #[test]
    fn test_start_at_len_is_all_trailing_pad() {
        let sliced = fixed_len_slice_edge_pad(&X, 5, 2).unwrap();
        assert_eq!(sliced, vec![4, 4]);
    }

    #[test]
    fn test_rejects_start_past_end() {
        assert_eq!(
            fixed_len_slice_edge_pad(&X, 6, 1),
            Err(SliceError::StartOutOfRange { start: 6, len: 5 })
        );
    }

    #[test]
    fn test_rejects_end_before_start_of_source() {
        assert_eq!(
            fixed_len_slice_edge_pad(&X, -4, 2),
            Err(SliceError::EndOutOfRange {
                start: -4,
                length: 2,
                end: -2
            })
        );
        // end == 0 still touches the left edge
        assert_eq!(fixed_len_slice_edge_pad(&X, -2, 2).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_rejects_unrepresentable_length() {
        assert_eq!(
            fixed_len_slice_edge_pad(&[0, 1, 2], 1, usize::MAX),
            Err(SliceError::LengthOverflow {
                start: 1,
                length: usize::MAX
            })
        );
        let max = isize::MAX as usize;
        assert_eq!(
            fixed_len_slice_edge_pad(&[0, 1, 2], 1, max),
            Err(SliceError::LengthOverflow { start: 1, length: max })
        );
        // representable end, but too many elements to allocate
        assert_eq!(
            fixed_len_slice_edge_pad(&[0, 1, 2], 0, max),
            Err(SliceError::LengthOverflow { start: 0, length: max })
        );
    }

    #[test]
    fn test_empty_source() {
        let empty: [i32; 0] = [];
        assert_eq!(fixed_len_slice_edge_pad(&empty, 0, 0).unwrap(), Vec::<i32>::new());
        assert_eq!(
            fixed_len_slice_edge_pad(&empty, 0, 3),
            Err(SliceError::EmptySource { length: 3 })
        );
    }
}
