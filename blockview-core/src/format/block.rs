//! Selectors and the blocks backends return for them
//!
//! Backends extract rectangular regions described by one [`Selector`] per
//! axis. Explicit selectors hold 1-based positions; [`Selector::All`] spans
//! the full axis, which some backends special-case for speed.

use alloc::vec::Vec;

use super::element_type::ElementType;
use crate::{Result, ViewError};

/// Index selection along one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The whole axis
    All,
    /// Explicit 1-based positions in increasing order
    Indices(Vec<usize>),
}

impl Selector {
    /// Selector for the 0-based range `[first, last)` of an axis of length `extent`
    ///
    /// A range spanning the whole axis becomes [`Selector::All`].
    pub fn for_range(first: usize, last: usize, extent: usize) -> Self {
        if first != 0 || last != extent {
            Selector::Indices((first + 1..=last).collect())
        } else {
            Selector::All
        }
    }

    /// Selector for a single 0-based index
    pub fn single(index: usize) -> Self {
        Selector::Indices(alloc::vec![index + 1])
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    /// Number of positions selected on an axis of length `extent`
    pub fn len(&self, extent: usize) -> usize {
        match self {
            Selector::All => extent,
            Selector::Indices(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self, extent: usize) -> bool {
        self.len(extent) == 0
    }

    /// Resolve to 0-based positions, rejecting positions outside `1..=extent`
    pub fn resolve(&self, extent: usize) -> Result<Vec<usize>> {
        match self {
            Selector::All => Ok((0..extent).collect()),
            Selector::Indices(positions) => positions
                .iter()
                .map(|&p| {
                    if p == 0 || p > extent {
                        Err(ViewError::OutOfRange)
                    } else {
                        Ok(p - 1)
                    }
                })
                .collect(),
        }
    }
}

/// Typed contents of an extracted block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockValues {
    Boolean(Vec<bool>),
    Integer(Vec<i32>),
    Float(Vec<f64>),
}

impl BlockValues {
    pub fn len(&self) -> usize {
        match self {
            BlockValues::Boolean(v) => v.len(),
            BlockValues::Integer(v) => v.len(),
            BlockValues::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            BlockValues::Boolean(_) => ElementType::Boolean,
            BlockValues::Integer(_) => ElementType::Integer,
            BlockValues::Float(_) => ElementType::Float,
        }
    }

    /// Gather the Cartesian product of two selectors out of a column-major
    /// `nrow` x `ncol` array
    pub fn gather(&self, nrow: usize, ncol: usize, rows: &Selector, cols: &Selector) -> Result<Self> {
        Ok(match self {
            BlockValues::Boolean(v) => BlockValues::Boolean(gather_dense(v, nrow, ncol, rows, cols)?),
            BlockValues::Integer(v) => BlockValues::Integer(gather_dense(v, nrow, ncol, rows, cols)?),
            BlockValues::Float(v) => BlockValues::Float(gather_dense(v, nrow, ncol, rows, cols)?),
        })
    }
}

/// Gather the Cartesian product of two selectors out of a column-major
/// `nrow` x `ncol` slice, producing a column-major result
pub fn gather_dense<T: Copy>(
    values: &[T],
    nrow: usize,
    ncol: usize,
    rows: &Selector,
    cols: &Selector,
) -> Result<Vec<T>> {
    if values.len() != nrow * ncol {
        return Err(ViewError::InsufficientBuffer);
    }

    let row_positions = rows.resolve(nrow)?;
    let col_positions = cols.resolve(ncol)?;

    let mut output = Vec::with_capacity(row_positions.len() * col_positions.len());
    for &c in &col_positions {
        let column = &values[c * nrow..(c + 1) * nrow];
        if rows.is_all() {
            output.extend_from_slice(column);
        } else {
            output.extend(row_positions.iter().map(|&r| column[r]));
        }
    }
    Ok(output)
}

/// Dense rectangular block in column-major order
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBlock {
    pub nrow: usize,
    pub ncol: usize,
    pub values: BlockValues,
}

impl DenseBlock {
    /// Create a block, checking that the value count matches the shape
    pub fn new(nrow: usize, ncol: usize, values: BlockValues) -> Result<Self> {
        if values.len() != nrow * ncol {
            return Err(ViewError::InsufficientBuffer);
        }
        Ok(Self { nrow, ncol, values })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrow, self.ncol)
    }

    /// Keep only the non-zero entries of this block
    pub fn to_sparse(&self) -> SparseBlock {
        let mut rows = Vec::new();
        let mut cols = Vec::new();

        let values = match &self.values {
            BlockValues::Boolean(v) => {
                BlockValues::Boolean(keep_nonzero(v, self.nrow, |x| *x, &mut rows, &mut cols))
            }
            BlockValues::Integer(v) => {
                BlockValues::Integer(keep_nonzero(v, self.nrow, |x| *x != 0, &mut rows, &mut cols))
            }
            BlockValues::Float(v) => {
                BlockValues::Float(keep_nonzero(v, self.nrow, |x| *x != 0.0, &mut rows, &mut cols))
            }
        };

        SparseBlock {
            nrow: self.nrow,
            ncol: self.ncol,
            rows,
            cols,
            values,
        }
    }
}

fn keep_nonzero<T: Copy>(
    values: &[T],
    nrow: usize,
    is_nonzero: fn(&T) -> bool,
    rows: &mut Vec<usize>,
    cols: &mut Vec<usize>,
) -> Vec<T> {
    let mut kept = Vec::new();
    for (i, value) in values.iter().enumerate() {
        if is_nonzero(value) {
            rows.push(i % nrow);
            cols.push(i / nrow);
            kept.push(*value);
        }
    }
    kept
}

/// Sparse rectangular block in coordinate form
///
/// Coordinates are 0-based and relative to the extracted region, ordered
/// by column then row.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseBlock {
    pub nrow: usize,
    pub ncol: usize,
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub values: BlockValues,
}

impl SparseBlock {
    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_selector_for_range() {
        assert_eq!(Selector::for_range(0, 5, 5), Selector::All);
        assert_eq!(Selector::for_range(1, 4, 5), Selector::Indices(vec![2, 3, 4]));
        assert_eq!(Selector::for_range(0, 4, 5), Selector::Indices(vec![1, 2, 3, 4]));
        assert_eq!(Selector::for_range(2, 2, 5), Selector::Indices(vec![]));
        assert_eq!(Selector::single(0), Selector::Indices(vec![1]));
    }

    #[test]
    fn test_selector_resolve() {
        assert_eq!(Selector::All.resolve(3), Ok(vec![0, 1, 2]));
        assert_eq!(Selector::Indices(vec![2, 3]).resolve(3), Ok(vec![1, 2]));
        assert_eq!(
            Selector::Indices(vec![0]).resolve(3),
            Err(ViewError::OutOfRange)
        );
        assert_eq!(
            Selector::Indices(vec![4]).resolve(3),
            Err(ViewError::OutOfRange)
        );
    }

    #[test]
    fn test_gather_dense() {
        // 3 x 2 column-major: [[1, 4], [2, 5], [3, 6]]
        let values = [1, 2, 3, 4, 5, 6];
        let all = gather_dense(&values, 3, 2, &Selector::All, &Selector::All).unwrap();
        assert_eq!(all, values.to_vec());

        let rows = Selector::Indices(vec![1, 3]);
        let cols = Selector::Indices(vec![2]);
        assert_eq!(gather_dense(&values, 3, 2, &rows, &cols).unwrap(), vec![4, 6]);

        assert_eq!(
            gather_dense(&values, 2, 2, &Selector::All, &Selector::All),
            Err(ViewError::InsufficientBuffer)
        );
    }

    #[test]
    fn test_to_sparse() {
        let block = DenseBlock::new(2, 2, BlockValues::Float(vec![0.0, 1.5, 2.5, 0.0])).unwrap();
        let sparse = block.to_sparse();
        assert_eq!(sparse.nnz(), 2);
        assert_eq!(sparse.rows, vec![1, 0]);
        assert_eq!(sparse.cols, vec![0, 1]);
        assert_eq!(sparse.values, BlockValues::Float(vec![1.5, 2.5]));
    }
}
