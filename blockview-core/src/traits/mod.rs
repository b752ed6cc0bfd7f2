//! Abstract interfaces for blockview
//!
//! The backend contract, the matrix interface a view exposes, and the
//! element types a view can produce. Pure interfaces - no implementations.

#[cfg(feature = "alloc")]
pub mod backend;
pub mod element;
pub mod matrix;

#[cfg(feature = "alloc")]
pub use backend::ArrayBackend;
pub use element::MatrixElement;
#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
pub use matrix::DenseMatrix;
