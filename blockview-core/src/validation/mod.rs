//! Validation and alignment rules for blockview
//!
//! Pure functions with no I/O: range alignment, request bounds checks and
//! validation of raw backend probe outputs.

pub mod align;
pub mod bounds;
pub mod probe;

pub use align::{align_range, is_aligned};
pub use bounds::{validate_buffer, validate_range, validate_request};
pub use probe::{
    parse_block_spacing, parse_chunk_dims, parse_element_type, parse_shape, parse_sparsity,
};
