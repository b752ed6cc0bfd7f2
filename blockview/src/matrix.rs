//! Matrix view over an external array backend

use std::sync::atomic::{AtomicU64, Ordering};

use blockview_core::{ArrayBackend, DenseMatrix, Direction, ElementType, Geometry, MatrixElement};

use crate::coerce::Coercion;
use crate::config::ExtractionConfig;
use crate::probe::probe;
use crate::workspace::Workspace;
use crate::Result;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Dense row/column view over a backend that only supports bulk extraction
///
/// Geometry is probed once at construction and never re-queried. Reads
/// without a workspace issue one exact backend call each; reads through a
/// [`Workspace`] fetch aligned blocks and serve later requests from them.
/// A workspace only serves the view that created it.
#[derive(Debug)]
pub struct BlockedMatrix<B, T = f64> {
    pub(crate) id: u64,
    backend: B,
    geometry: Geometry,
    config: ExtractionConfig,
    pub(crate) coercion: Coercion<T>,
}

impl<B, T> BlockedMatrix<B, T>
where
    B: ArrayBackend,
    B::Error: std::error::Error + Send + Sync + 'static,
    T: MatrixElement,
{
    /// Build a view with the default configuration
    pub fn new(backend: B) -> Result<Self> {
        Self::with_config(backend, ExtractionConfig::default())
    }

    /// Build a view with an explicit configuration
    pub fn with_config(backend: B, config: ExtractionConfig) -> Result<Self> {
        let geometry = probe(&backend)?;
        Ok(Self {
            id: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
            coercion: Coercion::for_type(geometry.element_type),
            backend,
            geometry,
            config,
        })
    }

    /// Read columns `[first, last)` of row `r` into `buffer`
    ///
    /// Returns `buffer[..last - first]`. With a workspace, the row is served
    /// from its cached block whenever possible.
    pub fn row<'b>(
        &self,
        r: usize,
        buffer: &'b mut [T],
        first: usize,
        last: usize,
        work: Option<&mut Workspace<T>>,
    ) -> Result<&'b [T]> {
        self.read(Direction::Row, r, buffer, first, last, work)
    }

    /// Read rows `[first, last)` of column `c` into `buffer`
    pub fn column<'b>(
        &self,
        c: usize,
        buffer: &'b mut [T],
        first: usize,
        last: usize,
        work: Option<&mut Workspace<T>>,
    ) -> Result<&'b [T]> {
        self.read(Direction::Column, c, buffer, first, last, work)
    }

    /// Non-zero entries of columns `[first, last)` of row `r`, uncached
    ///
    /// Returns column indices and values.
    pub fn sparse_row(&self, r: usize, first: usize, last: usize) -> Result<(Vec<usize>, Vec<T>)> {
        self.sparse_read(Direction::Row, r, first, last)
    }

    /// Non-zero entries of rows `[first, last)` of column `c`, uncached
    ///
    /// Returns row indices and values.
    pub fn sparse_column(&self, c: usize, first: usize, last: usize) -> Result<(Vec<usize>, Vec<T>)> {
        self.sparse_read(Direction::Column, c, first, last)
    }
}

impl<B, T> BlockedMatrix<B, T> {
    pub fn nrows(&self) -> usize {
        self.geometry.nrows
    }

    pub fn ncols(&self) -> usize {
        self.geometry.ncols
    }

    /// Get matrix dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.geometry.nrows, self.geometry.ncols)
    }

    pub fn is_sparse(&self) -> bool {
        self.geometry.sparse
    }

    /// Always false: backend extractions are column-major
    pub fn prefers_rows(&self) -> bool {
        false
    }

    pub fn element_type(&self) -> ElementType {
        self.geometry.element_type
    }

    /// Geometry probed at construction
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Release the view and return its backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Create a workspace for traversal in `direction`
    pub fn new_workspace(&self, direction: Direction) -> Workspace<T> {
        Workspace::new(self.id, direction)
    }

    /// Block spacing used along the traversal axis
    pub fn primary_block(&self, direction: Direction) -> usize {
        self.config
            .block_override(direction)
            .unwrap_or_else(|| self.geometry.primary_block(direction))
    }

    /// Chunk spacing used to widen the orthogonal axis, if any
    pub fn secondary_chunk(&self, direction: Direction) -> Option<usize> {
        if self.config.align_to_chunks {
            self.geometry.secondary_chunk(direction)
        } else {
            None
        }
    }
}

impl<B, T> DenseMatrix for BlockedMatrix<B, T>
where
    B: ArrayBackend,
    B::Error: std::error::Error + Send + Sync + 'static,
    T: MatrixElement,
{
    type Element = T;
    type Workspace = Workspace<T>;
    type Error = crate::Error;

    fn dimensions(&self) -> (usize, usize) {
        BlockedMatrix::dimensions(self)
    }

    fn is_sparse(&self) -> bool {
        BlockedMatrix::is_sparse(self)
    }

    fn prefers_rows(&self) -> bool {
        BlockedMatrix::prefers_rows(self)
    }

    fn new_workspace(&self, direction: Direction) -> Workspace<T> {
        BlockedMatrix::new_workspace(self, direction)
    }

    fn row<'b>(
        &self,
        r: usize,
        buffer: &'b mut [T],
        first: usize,
        last: usize,
        work: Option<&mut Workspace<T>>,
    ) -> Result<&'b [T]> {
        BlockedMatrix::row(self, r, buffer, first, last, work)
    }

    fn column<'b>(
        &self,
        c: usize,
        buffer: &'b mut [T],
        first: usize,
        last: usize,
        work: Option<&mut Workspace<T>>,
    ) -> Result<&'b [T]> {
        BlockedMatrix::column(self, c, buffer, first, last, work)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_backend::InMemoryArray;
    use blockview_core::MatrixOperations;

    fn matrix() -> BlockedMatrix<InMemoryArray> {
        // value at (r, c) is 10 * r + c
        let values = (0..5).flat_map(|c| (0..10).map(move |r| (10 * r + c) as f64)).collect();
        BlockedMatrix::new(InMemoryArray::from_f64(10, 5, values).with_block_spacing(4, 2)).unwrap()
    }

    #[test]
    fn test_accessors() {
        let matrix = matrix();
        assert_eq!(matrix.dimensions(), (10, 5));
        assert!(!matrix.is_sparse());
        assert!(!matrix.prefers_rows());
        assert_eq!(matrix.element_type(), ElementType::Float);
        assert_eq!(matrix.primary_block(Direction::Row), 4);
        assert_eq!(matrix.primary_block(Direction::Column), 2);
        assert_eq!(matrix.secondary_chunk(Direction::Row), None);
    }

    #[test]
    fn test_config_overrides() {
        let backend = InMemoryArray::from_f64(10, 5, vec![0.0; 50])
            .with_chunks(5, 5)
            .with_block_spacing(4, 2);
        let config = ExtractionConfig::default()
            .with_row_block(3)
            .with_chunk_alignment(false);
        let matrix: BlockedMatrix<_> = BlockedMatrix::with_config(backend, config).unwrap();
        assert_eq!(matrix.primary_block(Direction::Row), 3);
        assert_eq!(matrix.primary_block(Direction::Column), 2);
        assert_eq!(matrix.secondary_chunk(Direction::Row), None);
    }

    #[test]
    fn test_whole_row_and_column() {
        let matrix = matrix();
        assert_eq!(matrix.get_row(3).unwrap(), vec![30.0, 31.0, 32.0, 33.0, 34.0]);
        assert_eq!(
            matrix.get_col(4).unwrap(),
            (0..10).map(|r| (10 * r + 4) as f64).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_into_backend() {
        let matrix = matrix();
        let backend = matrix.into_backend();
        assert_eq!(backend.dense_call_count(), 0);
    }
}
