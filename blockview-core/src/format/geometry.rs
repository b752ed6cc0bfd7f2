//! Backend geometry resolved once when a view is built

use super::element_type::ElementType;

/// Traversal direction of a workspace
///
/// `Row` iterates rows one at a time and requests column sub-ranges;
/// `Column` iterates columns and requests row sub-ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Row,
    Column,
}

impl Direction {
    /// Whether this is row-major traversal
    pub const fn is_row(self) -> bool {
        matches!(self, Direction::Row)
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Row => write!(f, "row"),
            Direction::Column => write!(f, "column"),
        }
    }
}

/// Native chunk dimensions of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkDims {
    /// Rows per chunk
    pub nrow: usize,
    /// Columns per chunk
    pub ncol: usize,
}

/// Everything a view learns about its backend at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub nrows: usize,
    pub ncols: usize,
    pub element_type: ElementType,
    pub sparse: bool,
    /// `None` when the backend has no native chunking
    pub chunks: Option<ChunkDims>,
    /// Rows per block of the default row-major grid
    pub row_block: usize,
    /// Columns per block of the default column-major grid
    pub col_block: usize,
}

impl Geometry {
    /// Extent of the axis iterated one index at a time
    pub const fn primary_extent(&self, direction: Direction) -> usize {
        match direction {
            Direction::Row => self.nrows,
            Direction::Column => self.ncols,
        }
    }

    /// Extent of the axis over which sub-ranges are requested
    pub const fn secondary_extent(&self, direction: Direction) -> usize {
        match direction {
            Direction::Row => self.ncols,
            Direction::Column => self.nrows,
        }
    }

    /// Default block spacing along the primary axis
    pub const fn primary_block(&self, direction: Direction) -> usize {
        match direction {
            Direction::Row => self.row_block,
            Direction::Column => self.col_block,
        }
    }

    /// Native chunk spacing along the secondary axis, if chunked
    pub const fn secondary_chunk(&self, direction: Direction) -> Option<usize> {
        match (self.chunks, direction) {
            (Some(chunks), Direction::Row) => Some(chunks.ncol),
            (Some(chunks), Direction::Column) => Some(chunks.nrow),
            (None, _) => None,
        }
    }
}
