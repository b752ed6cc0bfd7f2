//! Error types for blockview operations

use crate::format::Direction;

/// Errors that can occur while probing a backend or serving a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// Backend shape is not a pair of non-negative integers
    Shape,
    /// Backend element type is not a single classification
    Type,
    /// Backend sparsity flag is not a single value
    Sparsity,
    /// Backend chunk geometry is malformed
    Chunk,
    /// Backend default block spacing is malformed
    Block,
    /// A workspace was used for the wrong traversal direction
    DirectionMismatch {
        workspace: Direction,
        request: Direction,
    },
    /// A workspace was passed to a view other than the one that created it
    ForeignWorkspace,
    /// Requested index or range lies outside the matrix
    OutOfRange,
    /// Output buffer is shorter than the requested range
    InsufficientBuffer,
    /// Invalid dense file header
    InvalidHeader,
    /// Unsupported dense file version
    UnsupportedFormat,
}

/// Broad classification of a [`ViewError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised while building a view; no usable view exists
    Construction,
    /// Raised by a single request; the view stays usable
    Request,
    /// Raised while decoding stored data
    Format,
}

impl ViewError {
    /// Category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            ViewError::Shape
            | ViewError::Type
            | ViewError::Sparsity
            | ViewError::Chunk
            | ViewError::Block => ErrorCategory::Construction,
            ViewError::DirectionMismatch { .. }
            | ViewError::ForeignWorkspace
            | ViewError::OutOfRange
            | ViewError::InsufficientBuffer => ErrorCategory::Request,
            ViewError::InvalidHeader | ViewError::UnsupportedFormat => ErrorCategory::Format,
        }
    }

    /// Whether the caller may retry with corrected arguments
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Request)
    }
}

impl core::fmt::Display for ViewError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ViewError::Shape => write!(f, "shape should contain two non-negative integers"),
            ViewError::Type => write!(f, "element type should be a single classification"),
            ViewError::Sparsity => write!(f, "sparsity should be a single boolean"),
            ViewError::Chunk => write!(f, "chunk dimensions should contain two non-negative integers"),
            ViewError::Block => write!(f, "block spacings should contain two non-negative integers"),
            ViewError::DirectionMismatch { workspace, request } => write!(
                f,
                "workspace was created for {workspace} access but received a {request} request"
            ),
            ViewError::ForeignWorkspace => write!(f, "workspace was created by a different view"),
            ViewError::OutOfRange => write!(f, "Index out of bounds"),
            ViewError::InsufficientBuffer => write!(f, "Insufficient buffer space"),
            ViewError::InvalidHeader => write!(f, "Invalid dense file header"),
            ViewError::UnsupportedFormat => write!(f, "Unsupported format version"),
        }
    }
}

impl core::error::Error for ViewError {}

/// Result type for blockview core operations
pub type Result<T> = core::result::Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ViewError::Shape.category(), ErrorCategory::Construction);
        assert_eq!(ViewError::Block.category(), ErrorCategory::Construction);
        assert_eq!(ViewError::OutOfRange.category(), ErrorCategory::Request);
        assert_eq!(ViewError::InvalidHeader.category(), ErrorCategory::Format);

        let mismatch = ViewError::DirectionMismatch {
            workspace: Direction::Row,
            request: Direction::Column,
        };
        assert!(mismatch.is_recoverable());
        assert_eq!(ViewError::ForeignWorkspace.category(), ErrorCategory::Request);
        assert!(!ViewError::Chunk.is_recoverable());
    }
}
