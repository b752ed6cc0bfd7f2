//! In-memory backend with call recording
//!
//! Holds a column-major array and answers the backend contract directly.
//! Every extraction is recorded, which makes the number and shape of
//! backend calls observable.

use std::sync::{Mutex, MutexGuard};

use blockview_core::{
    constants::default_block_spacing, ArrayBackend, BlockValues, DenseBlock, Direction, Selector,
    SparseBlock, ViewError,
};
use thiserror::Error;

/// Kind of extraction a backend received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Dense,
    Sparse,
}

/// One recorded extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractCall {
    pub kind: CallKind,
    pub rows: Selector,
    pub cols: Selector,
}

/// Raw probe answers that replace the computed ones
///
/// Lets callers simulate backends that report malformed geometry.
#[derive(Debug, Clone, Default)]
pub struct ProbeOverrides {
    pub shape: Option<Vec<i64>>,
    pub element_type: Option<Vec<String>>,
    pub sparse: Option<Vec<bool>>,
    pub chunk_dims: Option<Option<Vec<i64>>>,
    pub row_grid: Option<Vec<i64>>,
    pub col_grid: Option<Vec<i64>>,
}

/// Errors raised by [`InMemoryArray`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InMemoryError {
    /// Selector or stored values do not fit the array
    #[error("invalid selection: {0}")]
    Selection(#[from] ViewError),

    /// Failure configured with [`InMemoryArray::with_failure`]
    #[error("{0}")]
    Injected(String),
}

/// Column-major array held in memory
#[derive(Debug)]
pub struct InMemoryArray {
    nrow: usize,
    ncol: usize,
    values: BlockValues,
    sparse: bool,
    chunks: Option<(usize, usize)>,
    row_block: Option<usize>,
    col_block: Option<usize>,
    overrides: ProbeOverrides,
    failure: Mutex<Option<String>>,
    calls: Mutex<Vec<ExtractCall>>,
}

impl InMemoryArray {
    /// Create an array from column-major values
    ///
    /// A value count that does not match `nrow * ncol` is reported by the
    /// first extraction.
    pub fn new(nrow: usize, ncol: usize, values: BlockValues) -> Self {
        Self {
            nrow,
            ncol,
            values,
            sparse: false,
            chunks: None,
            row_block: None,
            col_block: None,
            overrides: ProbeOverrides::default(),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn from_f64(nrow: usize, ncol: usize, values: Vec<f64>) -> Self {
        Self::new(nrow, ncol, BlockValues::Float(values))
    }

    pub fn from_i32(nrow: usize, ncol: usize, values: Vec<i32>) -> Self {
        Self::new(nrow, ncol, BlockValues::Integer(values))
    }

    pub fn from_bool(nrow: usize, ncol: usize, values: Vec<bool>) -> Self {
        Self::new(nrow, ncol, BlockValues::Boolean(values))
    }

    /// Report native chunks of `nrow` x `ncol`
    pub fn with_chunks(mut self, nrow: usize, ncol: usize) -> Self {
        self.chunks = Some((nrow, ncol));
        self
    }

    /// Report default grids of `rows` rows (row traversal) and `cols`
    /// columns (column traversal) per block
    pub fn with_block_spacing(mut self, rows: usize, cols: usize) -> Self {
        self.row_block = Some(rows);
        self.col_block = Some(cols);
        self
    }

    /// Report the array as sparse
    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    /// Replace probe answers with raw values
    pub fn with_probe_overrides(mut self, overrides: ProbeOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Make every extraction fail with `message`
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.set_failure(Some(message.into()));
        self
    }

    /// Start or stop failing extractions on an array already in use
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = message;
    }

    fn call_log(&self) -> MutexGuard<'_, Vec<ExtractCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every extraction received so far, in order
    pub fn calls(&self) -> Vec<ExtractCall> {
        self.call_log().clone()
    }

    /// Number of dense extractions received so far
    pub fn dense_call_count(&self) -> usize {
        self.call_log().iter().filter(|c| c.kind == CallKind::Dense).count()
    }

    /// Number of sparse extractions received so far
    pub fn sparse_call_count(&self) -> usize {
        self.call_log().iter().filter(|c| c.kind == CallKind::Sparse).count()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.call_log().clear();
    }

    fn record(&self, kind: CallKind, rows: &Selector, cols: &Selector) -> Result<(), InMemoryError> {
        self.call_log().push(ExtractCall {
            kind,
            rows: rows.clone(),
            cols: cols.clone(),
        });
        match self.failure.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).as_ref() {
            Some(message) => Err(InMemoryError::Injected(message.clone())),
            None => Ok(()),
        }
    }

    fn gather(&self, rows: &Selector, cols: &Selector) -> Result<DenseBlock, InMemoryError> {
        let values = self.values.gather(self.nrow, self.ncol, rows, cols)?;
        Ok(DenseBlock::new(rows.len(self.nrow), cols.len(self.ncol), values)?)
    }
}

impl ArrayBackend for InMemoryArray {
    type Error = InMemoryError;

    fn shape(&self) -> Result<Vec<i64>, Self::Error> {
        Ok(self
            .overrides
            .shape
            .clone()
            .unwrap_or_else(|| vec![self.nrow as i64, self.ncol as i64]))
    }

    fn element_type(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .overrides
            .element_type
            .clone()
            .unwrap_or_else(|| vec![self.values.element_type().tag().to_string()]))
    }

    fn is_sparse(&self) -> Result<Vec<bool>, Self::Error> {
        Ok(self.overrides.sparse.clone().unwrap_or_else(|| vec![self.sparse]))
    }

    fn chunk_dims(&self) -> Result<Option<Vec<i64>>, Self::Error> {
        Ok(self.overrides.chunk_dims.clone().unwrap_or_else(|| {
            self.chunks
                .map(|(nrow, ncol)| vec![nrow as i64, ncol as i64])
        }))
    }

    fn default_block_spacing(&self, direction: Direction) -> Result<Vec<i64>, Self::Error> {
        let spacing = match direction {
            Direction::Row => self.overrides.row_grid.clone().unwrap_or_else(|| {
                let rows = self
                    .row_block
                    .unwrap_or_else(|| default_block_spacing(self.nrow, self.ncol));
                vec![rows as i64, self.ncol as i64]
            }),
            Direction::Column => self.overrides.col_grid.clone().unwrap_or_else(|| {
                let cols = self
                    .col_block
                    .unwrap_or_else(|| default_block_spacing(self.ncol, self.nrow));
                vec![self.nrow as i64, cols as i64]
            }),
        };
        Ok(spacing)
    }

    fn extract_dense(&self, rows: &Selector, cols: &Selector) -> Result<DenseBlock, Self::Error> {
        self.record(CallKind::Dense, rows, cols)?;
        self.gather(rows, cols)
    }

    fn extract_sparse(&self, rows: &Selector, cols: &Selector) -> Result<SparseBlock, Self::Error> {
        self.record(CallKind::Sparse, rows, cols)?;
        Ok(self.gather(rows, cols)?.to_sparse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dense_records_calls() {
        let array = InMemoryArray::from_i32(2, 3, vec![1, 2, 3, 4, 5, 6]);
        let block = array
            .extract_dense(&Selector::Indices(vec![2]), &Selector::All)
            .unwrap();
        assert_eq!(block.shape(), (1, 3));
        assert_eq!(block.values, BlockValues::Integer(vec![2, 4, 6]));

        assert_eq!(array.dense_call_count(), 1);
        assert_eq!(array.calls()[0].cols, Selector::All);
        array.reset_calls();
        assert!(array.calls().is_empty());
    }

    #[test]
    fn test_default_grids() {
        let array = InMemoryArray::from_f64(10, 5, vec![0.0; 50]);
        assert_eq!(array.default_block_spacing(Direction::Row).unwrap(), vec![10, 5]);
        assert_eq!(array.default_block_spacing(Direction::Column).unwrap(), vec![10, 5]);

        let array = array.with_block_spacing(4, 2);
        assert_eq!(array.default_block_spacing(Direction::Row).unwrap(), vec![4, 5]);
        assert_eq!(array.default_block_spacing(Direction::Column).unwrap(), vec![10, 2]);
    }

    #[test]
    fn test_bad_selection() {
        let array = InMemoryArray::from_f64(2, 2, vec![0.0; 4]);
        let err = array
            .extract_dense(&Selector::Indices(vec![3]), &Selector::All)
            .unwrap_err();
        assert_eq!(err, InMemoryError::Selection(ViewError::OutOfRange));
    }

    #[test]
    fn test_injected_failure() {
        let array = InMemoryArray::from_f64(2, 2, vec![0.0; 4]).with_failure("lost connection");
        let err = array.extract_dense(&Selector::All, &Selector::All).unwrap_err();
        assert_eq!(err, InMemoryError::Injected("lost connection".to_string()));
        assert_eq!(array.dense_call_count(), 1);

        array.set_failure(None);
        assert!(array.extract_dense(&Selector::All, &Selector::All).is_ok());
    }
}
