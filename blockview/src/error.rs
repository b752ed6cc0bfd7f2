//! Error types for blockview views and backends

use blockview_core::ViewError;
use thiserror::Error;

/// Error type for view construction, reads and bundled backends
#[derive(Error, Debug)]
pub enum Error {
    /// Probe, request or format error from the core rules
    #[error("{0}")]
    View(#[from] ViewError),

    /// The backend's own call failed; not retried
    #[error("backend call failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend returned a block that disagrees with what was requested
    #[error("malformed block from backend: {0}")]
    MalformedBlock(String),

    /// Configuration could not be parsed
    #[cfg(feature = "serde")]
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error from the file backend
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a backend error
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Backend(Box::new(error))
    }

    /// The core error, if this is one
    pub fn view_error(&self) -> Option<ViewError> {
        match self {
            Error::View(e) => Some(*e),
            _ => None,
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use blockview_core::ErrorCategory;

    #[test]
    fn test_view_error_passthrough() {
        let err: Error = ViewError::OutOfRange.into();
        assert_eq!(err.view_error(), Some(ViewError::OutOfRange));
        assert_eq!(
            err.view_error().map(|e| e.category()),
            Some(ErrorCategory::Request)
        );
        assert_eq!(err.to_string(), "Index out of bounds");
    }

    #[test]
    fn test_backend_error_is_opaque() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "session lost");
        let err = Error::backend(io);
        assert!(err.view_error().is_none());
        assert_eq!(err.to_string(), "backend call failed: session lost");
    }
}
