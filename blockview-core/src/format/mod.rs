//! Value types describing backend geometry, extracted blocks and the
//! dense file layout.
//!
//! Pure data definitions - no I/O.

#[cfg(feature = "alloc")]
pub mod block;
pub mod constants;
pub mod element_type;
pub mod geometry;
pub mod header;

#[cfg(feature = "alloc")]
pub use block::{gather_dense, BlockValues, DenseBlock, Selector, SparseBlock};
pub use element_type::ElementType;
pub use geometry::{ChunkDims, Direction, Geometry};
pub use header::DenseHeader;
