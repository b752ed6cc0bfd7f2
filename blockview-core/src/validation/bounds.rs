//! Request bounds validation
//!
//! Nothing is clamped or truncated: any index or range outside the matrix
//! is rejected outright.

use crate::ViewError;

/// Validate a request for index `index` along an axis of length
/// `primary_extent`, restricted to `[first, last)` of the orthogonal axis
pub const fn validate_request(
    index: usize,
    first: usize,
    last: usize,
    primary_extent: usize,
    secondary_extent: usize,
) -> Result<(), ViewError> {
    if index >= primary_extent {
        return Err(ViewError::OutOfRange);
    }
    validate_range(first, last, secondary_extent)
}

/// Validate that `[first, last)` is a well-formed range within `extent`
pub const fn validate_range(first: usize, last: usize, extent: usize) -> Result<(), ViewError> {
    if first > last || last > extent {
        return Err(ViewError::OutOfRange);
    }
    Ok(())
}

/// Validate that a buffer of `buffer_len` elements can hold `[first, last)`
pub const fn validate_buffer(buffer_len: usize, first: usize, last: usize) -> Result<(), ViewError> {
    if buffer_len < last.saturating_sub(first) {
        return Err(ViewError::InsufficientBuffer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request() {
        assert_eq!(validate_request(0, 0, 5, 10, 5), Ok(()));
        assert_eq!(validate_request(9, 2, 2, 10, 5), Ok(()));

        // Index past the primary extent
        assert_eq!(validate_request(10, 0, 5, 10, 5), Err(ViewError::OutOfRange));
        // Range past the secondary extent
        assert_eq!(validate_request(0, 0, 6, 10, 5), Err(ViewError::OutOfRange));
        // Inverted range
        assert_eq!(validate_request(0, 3, 2, 10, 5), Err(ViewError::OutOfRange));
    }

    #[test]
    fn test_validate_buffer() {
        assert_eq!(validate_buffer(3, 2, 5), Ok(()));
        assert_eq!(validate_buffer(10, 0, 0), Ok(()));
        assert_eq!(validate_buffer(2, 2, 5), Err(ViewError::InsufficientBuffer));
    }
}
