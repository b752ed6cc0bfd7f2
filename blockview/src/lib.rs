//! Blockview - block-cached dense access over chunked array backends
//!
//! This library exposes a dense row/column view over arrays that live behind
//! an expensive bulk-extraction interface: on-disk chunked stores, remote
//! services, anything where one call per element would be ruinous.
//!
//! ## Architecture
//!
//! Blockview separates contracts from implementations:
//!
//! - **blockview-core**: geometry, the backend capability contract, alignment
//!   and request validation (no I/O)
//! - **blockview**: the cached view, workspaces, coercion and concrete backends
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockview::{BlockedMatrix, Direction, MmapArray};
//!
//! fn example() -> blockview::Result<()> {
//!     let array = MmapArray::open("matrix.bvd")?;
//!     let matrix: BlockedMatrix<_, f64> = BlockedMatrix::new(array)?;
//!
//!     // consecutive rows are served from one fetched block
//!     let mut work = matrix.new_workspace(Direction::Row);
//!     let mut buffer = vec![0.0; matrix.ncols()];
//!     for r in 0..matrix.nrows() {
//!         let row = matrix.row(r, &mut buffer, 0, matrix.ncols(), Some(&mut work))?;
//!         println!("row {r}: {}", row.iter().sum::<f64>());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block caching**: one aligned backend call serves a whole run of rows or columns
//! - **Chunk alignment**: requests are widened to the backend's native chunks
//! - **Memory-mapped files**: dense column-major files via [`MmapArray`]
//! - **Parallel traversal**: rayon workers with one workspace each

pub use blockview_core::{
    // Backend and matrix contracts
    ArrayBackend, DenseMatrix, MatrixElement, MatrixOperations,
    // Geometry and block types
    BlockValues, ChunkDims, DenseBlock, DenseHeader, Direction, ElementType, Geometry, Selector,
    SparseBlock,
    // Error handling
    ErrorCategory, ViewError,
    // Alignment
    align_range,
};

pub mod coerce;
pub mod config;
pub mod error;
mod extract;
pub mod matrix;
pub mod memory_backend;
#[cfg(feature = "mmap")]
pub mod mmap_backend;
pub mod parallel;
pub mod probe;
pub mod snapshot;
pub mod workspace;

pub use config::ExtractionConfig;
pub use error::{Error, Result};
pub use matrix::BlockedMatrix;
pub use memory_backend::{InMemoryArray, InMemoryError, ProbeOverrides};
pub use parallel::SerializedBackend;
pub use workspace::Workspace;

#[cfg(feature = "mmap")]
pub use mmap_backend::{DenseFile, DenseFileOptions, MmapArray};
