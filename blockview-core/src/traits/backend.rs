//! Capability contract for external array backends
//!
//! A backend owns the real storage and computation of an array and can only
//! be queried through geometry probes and bulk rectangular extraction. Probe
//! methods return raw values exactly as the backend reports them; the view
//! validates them once at construction.

use alloc::string::String;
use alloc::vec::Vec;

use crate::format::{DenseBlock, Direction, Selector, SparseBlock};

/// Trait for external arrays that can only be read in rectangular blocks
///
/// Calls may be expensive (crossing a process or language boundary, or
/// triggering lazy recomputation), so callers batch them.
pub trait ArrayBackend {
    /// Error type for backend calls
    type Error;

    /// Array dimensions; expected to be exactly `[rows, cols]`, both non-negative
    fn shape(&self) -> Result<Vec<i64>, Self::Error>;

    /// Element type tag(s); expected to hold exactly one tag
    fn element_type(&self) -> Result<Vec<String>, Self::Error>;

    /// Sparsity flag(s); expected to hold exactly one value
    fn is_sparse(&self) -> Result<Vec<bool>, Self::Error>;

    /// Native chunk dimensions `[rows_per_chunk, cols_per_chunk]`, or `None`
    /// when the array has no native chunking
    fn chunk_dims(&self) -> Result<Option<Vec<i64>>, Self::Error>;

    /// Spacings `[row_spacing, col_spacing]` of the default block grid used
    /// for traversal in `direction`
    fn default_block_spacing(&self, direction: Direction) -> Result<Vec<i64>, Self::Error>;

    /// Extract the dense block at the Cartesian product of two selectors
    ///
    /// The returned block has one row per selected row and one column per
    /// selected column, in column-major order.
    fn extract_dense(&self, rows: &Selector, cols: &Selector) -> Result<DenseBlock, Self::Error>;

    /// Extract the non-zero entries of the same region as [`Self::extract_dense`]
    fn extract_sparse(&self, rows: &Selector, cols: &Selector) -> Result<SparseBlock, Self::Error>;
}
