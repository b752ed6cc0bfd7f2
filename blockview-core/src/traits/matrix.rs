//! Matrix interface exposed by views over backends

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::element::MatrixElement;
use crate::format::Direction;

/// Dense row/column access by range
///
/// Reads fill `buffer[..last - first]` and return that prefix. A workspace
/// created for one direction may be passed to reads in that direction to
/// reuse previously fetched data.
pub trait DenseMatrix {
    /// The element type written into buffers
    type Element: MatrixElement;

    /// Per-traversal cache state
    type Workspace;

    /// Error type for reads
    type Error;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Whether the underlying array is sparse
    fn is_sparse(&self) -> bool;

    /// Whether row access is cheaper than column access
    fn prefers_rows(&self) -> bool;

    /// Create a workspace for traversal in `direction`
    fn new_workspace(&self, direction: Direction) -> Self::Workspace;

    /// Read columns `[first, last)` of row `r`
    fn row<'b>(
        &self,
        r: usize,
        buffer: &'b mut [Self::Element],
        first: usize,
        last: usize,
        work: Option<&mut Self::Workspace>,
    ) -> Result<&'b [Self::Element], Self::Error>;

    /// Read rows `[first, last)` of column `c`
    fn column<'b>(
        &self,
        c: usize,
        buffer: &'b mut [Self::Element],
        first: usize,
        last: usize,
        work: Option<&mut Self::Workspace>,
    ) -> Result<&'b [Self::Element], Self::Error>;
}

/// Extension trait for whole-row/column reads (requires alloc feature)
#[cfg(feature = "alloc")]
pub trait MatrixOperations: DenseMatrix {
    /// Get every element of a row
    fn get_row(&self, row_index: usize) -> Result<Vec<Self::Element>, Self::Error> {
        let ncols = self.dimensions().1;
        let mut buffer = alloc::vec![Self::Element::zero(); ncols];
        self.row(row_index, &mut buffer, 0, ncols, None)?;
        Ok(buffer)
    }

    /// Get every element of a column
    fn get_col(&self, col_index: usize) -> Result<Vec<Self::Element>, Self::Error> {
        let nrows = self.dimensions().0;
        let mut buffer = alloc::vec![Self::Element::zero(); nrows];
        self.column(col_index, &mut buffer, 0, nrows, None)?;
        Ok(buffer)
    }
}

#[cfg(feature = "alloc")]
impl<M: DenseMatrix + ?Sized> MatrixOperations for M {}
