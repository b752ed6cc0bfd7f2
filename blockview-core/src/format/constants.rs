//! Format constants for dense files and default block sizing

/// Alignment boundary for the payload of dense files
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Number of elements a default block is allowed to hold when a backend
/// does not suggest its own block spacing (100 MB of doubles)
pub const DEFAULT_BLOCK_ELEMENTS: usize = 12_500_000;

/// Dense file format constants
pub mod dense {
    /// Magic bytes at the start of every dense file
    pub const MAGIC: [u8; 4] = *b"BVDM";

    /// Current dense file version
    pub const VERSION: u8 = 1;

    /// Fixed size of the dense file header
    pub const HEADER_SIZE: usize = 64;
}

/// Header flag: the array reports itself as sparse
pub const FLAG_SPARSE: u8 = 1;
/// Header flag: the array carries native chunk dimensions
pub const FLAG_CHUNKED: u8 = 2;

/// Number of primary-axis indices per default block so that one block
/// stays within [`DEFAULT_BLOCK_ELEMENTS`]
pub const fn default_block_spacing(extent: usize, other_extent: usize) -> usize {
    let per_block = if other_extent == 0 {
        DEFAULT_BLOCK_ELEMENTS
    } else {
        DEFAULT_BLOCK_ELEMENTS / other_extent
    };
    let spacing = if per_block == 0 { 1 } else { per_block };
    if extent != 0 && spacing > extent {
        extent
    } else {
        spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_spacing() {
        assert_eq!(default_block_spacing(10, 5), 10);
        assert_eq!(default_block_spacing(100_000_000, 1000), 12_500);
        // One secondary extent larger than the budget still yields one index
        assert_eq!(default_block_spacing(10, 100_000_000), 1);
        assert_eq!(default_block_spacing(0, 0), DEFAULT_BLOCK_ELEMENTS);
    }
}
