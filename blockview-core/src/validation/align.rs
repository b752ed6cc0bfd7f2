//! Range alignment to chunk and block boundaries

/// Snap `[first, last)` outward to multiples of `interval`, clamped to `extent`
///
/// An `interval` of zero means there is nothing to align to and the range is
/// returned unchanged, as is a request for the whole axis.
pub const fn align_range(first: usize, last: usize, interval: usize, extent: usize) -> (usize, usize) {
    if interval == 0 || (first == 0 && last == extent) {
        return (first, last);
    }

    let new_first = (first / interval) * interval;
    let rounded_last = last.div_ceil(interval).saturating_mul(interval);
    let new_last = if rounded_last < extent { rounded_last } else { extent };
    (new_first, new_last)
}

/// Whether `[first, last)` is already aligned to `interval` within `extent`
pub const fn is_aligned(first: usize, last: usize, interval: usize, extent: usize) -> bool {
    let (new_first, new_last) = align_range(first, last, interval, extent);
    new_first == first && new_last == last
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_align_range() {
        assert_eq!(align_range(0, 1, 4, 10), (0, 4));
        assert_eq!(align_range(3, 4, 4, 10), (0, 4));
        assert_eq!(align_range(4, 5, 4, 10), (4, 8));
        // Last block is clamped to the extent
        assert_eq!(align_range(9, 10, 4, 10), (8, 10));
        assert_eq!(align_range(5, 7, 2, 10), (4, 8));
    }

    #[test]
    fn test_zero_interval_is_identity() {
        assert_eq!(align_range(3, 7, 0, 10), (3, 7));
        assert_eq!(align_range(0, 0, 0, 0), (0, 0));
    }

    #[test]
    fn test_full_axis_is_untouched() {
        assert_eq!(align_range(0, 5, 4, 5), (0, 5));
        assert_eq!(align_range(0, 0, 4, 0), (0, 0));
    }

    #[test]
    fn test_empty_range_at_zero() {
        // An empty range starting at zero stays empty rather than widening
        // to the whole axis
        assert_eq!(align_range(0, 0, 4, 10), (0, 0));
    }

    #[test]
    fn test_is_aligned() {
        assert!(is_aligned(4, 8, 4, 10));
        assert!(is_aligned(8, 10, 4, 10));
        assert!(!is_aligned(5, 8, 4, 10));
    }

    proptest! {
        #[test]
        fn prop_alignment_contains_original(
            extent in 0usize..500,
            a in 0usize..500,
            b in 0usize..500,
            interval in 0usize..64,
        ) {
            let first = a.min(b).min(extent);
            let last = a.max(b).min(extent);
            let (new_first, new_last) = align_range(first, last, interval, extent);
            prop_assert!(new_first <= first);
            prop_assert!(new_last >= last);
            prop_assert!(new_last <= extent);
            if interval != 0 {
                prop_assert_eq!(new_first % interval, 0);
            }
        }

        #[test]
        fn prop_alignment_is_idempotent(
            extent in 0usize..500,
            a in 0usize..500,
            b in 0usize..500,
            interval in 0usize..64,
        ) {
            let first = a.min(b).min(extent);
            let last = a.max(b).min(extent);
            let once = align_range(first, last, interval, extent);
            let twice = align_range(once.0, once.1, interval, extent);
            prop_assert_eq!(once, twice);
        }
    }
}
