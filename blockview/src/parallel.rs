//! Concurrent traversal
//!
//! A [`Workspace`](crate::Workspace) is never shared between threads: each
//! rayon worker owns one for the lifetime of its split. Backends that are
//! not thread-safe can be wrapped in [`SerializedBackend`], which funnels
//! every call through a mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use blockview_core::{ArrayBackend, DenseBlock, Direction, Selector, SparseBlock};

/// Backend wrapper that serializes every call
#[derive(Debug, Default)]
pub struct SerializedBackend<B> {
    inner: Mutex<B>,
}

impl<B> SerializedBackend<B> {
    pub fn new(backend: B) -> Self {
        Self {
            inner: Mutex::new(backend),
        }
    }

    pub fn into_inner(self) -> B {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the wrapped backend
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, B> {
        // A panic inside a backend call leaves no partial state behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: ArrayBackend> ArrayBackend for SerializedBackend<B> {
    type Error = B::Error;

    fn shape(&self) -> Result<Vec<i64>, Self::Error> {
        self.lock().shape()
    }

    fn element_type(&self) -> Result<Vec<String>, Self::Error> {
        self.lock().element_type()
    }

    fn is_sparse(&self) -> Result<Vec<bool>, Self::Error> {
        self.lock().is_sparse()
    }

    fn chunk_dims(&self) -> Result<Option<Vec<i64>>, Self::Error> {
        self.lock().chunk_dims()
    }

    fn default_block_spacing(&self, direction: Direction) -> Result<Vec<i64>, Self::Error> {
        self.lock().default_block_spacing(direction)
    }

    fn extract_dense(&self, rows: &Selector, cols: &Selector) -> Result<DenseBlock, Self::Error> {
        self.lock().extract_dense(rows, cols)
    }

    fn extract_sparse(&self, rows: &Selector, cols: &Selector) -> Result<SparseBlock, Self::Error> {
        self.lock().extract_sparse(rows, cols)
    }
}

#[cfg(feature = "parallel")]
mod traverse {
    use std::ops::Range;

    use blockview_core::{validate_range, ArrayBackend, Direction, MatrixElement};
    use log::debug;
    use rayon::prelude::*;

    use crate::{BlockedMatrix, Result};

    impl<B, T> BlockedMatrix<B, T>
    where
        B: ArrayBackend + Sync,
        B::Error: std::error::Error + Send + Sync + 'static,
        T: MatrixElement + Send + Sync,
    {
        /// Read columns `[first, last)` of every row in `rows`, in parallel
        pub fn par_rows(&self, rows: Range<usize>, first: usize, last: usize) -> Result<Vec<Vec<T>>> {
            self.par_traverse(Direction::Row, rows, first, last)
        }

        /// Read rows `[first, last)` of every column in `cols`, in parallel
        pub fn par_columns(&self, cols: Range<usize>, first: usize, last: usize) -> Result<Vec<Vec<T>>> {
            self.par_traverse(Direction::Column, cols, first, last)
        }

        /// Parallel traversal with one workspace per worker
        ///
        /// Results come back in index order. The first failing read aborts
        /// the traversal.
        pub fn par_traverse(
            &self,
            direction: Direction,
            indices: Range<usize>,
            first: usize,
            last: usize,
        ) -> Result<Vec<Vec<T>>> {
            let geometry = self.geometry();
            validate_range(indices.start, indices.end, geometry.primary_extent(direction))?;
            validate_range(first, last, geometry.secondary_extent(direction))?;
            debug!(
                "parallel {direction} traversal of [{}, {}) over [{first}, {last})",
                indices.start, indices.end
            );

            indices
                .into_par_iter()
                .map_init(
                    || self.new_workspace(direction),
                    |work, index| -> Result<Vec<T>> {
                        let mut buffer = vec![T::zero(); last - first];
                        self.read(direction, index, &mut buffer, first, last, Some(work))?;
                        Ok(buffer)
                    },
                )
                .collect()
        }
    }
}
