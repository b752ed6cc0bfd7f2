//! Per-traversal block cache
//!
//! A workspace belongs to one view and one traversal direction and holds at
//! most one aligned block. It is either empty or fully populated; a refresh replaces
//! the window and its snapshot together.

use std::ops::Range;

use blockview_core::{Direction, ViewError};

use crate::snapshot::DenseColumnBlock;

/// The cached window of a populated workspace
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CachedWindow<T> {
    /// Cached indices along the traversal axis
    pub(crate) primary: Range<usize>,
    /// Cached range along the orthogonal axis
    pub(crate) secondary: Range<usize>,
    pub(crate) block: DenseColumnBlock<T>,
}

impl<T> CachedWindow<T> {
    fn covers(&self, index: usize, first: usize, last: usize) -> bool {
        self.primary.contains(&index) && first >= self.secondary.start && last <= self.secondary.end
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CacheState<T> {
    Empty,
    Populated(CachedWindow<T>),
}

/// Cache state for one row-major or column-major traversal
///
/// Workspaces are never shared between traversals; create one per worker
/// with [`BlockedMatrix::new_workspace`](crate::BlockedMatrix::new_workspace).
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace<T> {
    view: u64,
    direction: Direction,
    state: CacheState<T>,
    refreshes: usize,
}

impl<T> Workspace<T> {
    /// Create an empty workspace bound to view `view`
    pub(crate) fn new(view: u64, direction: Direction) -> Self {
        Self {
            view,
            direction,
            state: CacheState::Empty,
            refreshes: 0,
        }
    }

    /// Traversal direction this workspace serves
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a block is currently cached
    pub fn is_populated(&self) -> bool {
        matches!(self.state, CacheState::Populated(_))
    }

    /// Cached `(primary, secondary)` ranges, if any
    pub fn cached_window(&self) -> Option<(Range<usize>, Range<usize>)> {
        match &self.state {
            CacheState::Populated(window) => Some((window.primary.clone(), window.secondary.clone())),
            CacheState::Empty => None,
        }
    }

    /// Number of times the cache has been refilled
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    /// Drop the cached block
    pub fn clear(&mut self) {
        self.state = CacheState::Empty;
    }

    /// Fail unless this workspace was created by `view` for `request`
    pub(crate) fn check_request(&self, view: u64, request: Direction) -> Result<(), ViewError> {
        if self.view != view {
            return Err(ViewError::ForeignWorkspace);
        }
        if self.direction != request {
            return Err(ViewError::DirectionMismatch {
                workspace: self.direction,
                request,
            });
        }
        Ok(())
    }

    /// The cached window if it covers the request
    pub(crate) fn lookup(&self, index: usize, first: usize, last: usize) -> Option<&CachedWindow<T>> {
        match &self.state {
            CacheState::Populated(window) if window.covers(index, first, last) => Some(window),
            _ => None,
        }
    }

    /// Replace the cached window wholesale
    pub(crate) fn replace(&mut self, window: CachedWindow<T>) {
        self.refreshes += 1;
        self.state = CacheState::Populated(window);
    }
}
