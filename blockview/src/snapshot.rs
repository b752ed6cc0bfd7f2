//! Dense column-major snapshot of one extracted block

use blockview_core::{DenseBlock, MatrixElement};

use crate::coerce::Coercion;
use crate::{Error, Result};

/// Owned dense block, stored column-major like every backend extraction
#[derive(Debug, Clone, PartialEq)]
pub struct DenseColumnBlock<T> {
    nrow: usize,
    ncol: usize,
    values: Vec<T>,
}

impl<T: MatrixElement> DenseColumnBlock<T> {
    /// Coerce a backend block, checking it has the requested shape
    pub fn from_block(block: DenseBlock, expected: (usize, usize), coercion: &Coercion<T>) -> Result<Self> {
        if block.shape() != expected {
            return Err(Error::MalformedBlock(format!(
                "requested {}x{} block, received {}x{}",
                expected.0, expected.1, block.nrow, block.ncol
            )));
        }
        if block.values.len() != block.nrow * block.ncol {
            return Err(Error::MalformedBlock(format!(
                "{}x{} block holds {} values",
                block.nrow,
                block.ncol,
                block.values.len()
            )));
        }

        let values = coercion.apply(block.values)?;
        Ok(Self {
            nrow: block.nrow,
            ncol: block.ncol,
            values,
        })
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Copy columns `[first, last)` of local row `r` into `buffer` (strided read)
    pub fn row_copy(&self, r: usize, buffer: &mut [T], first: usize, last: usize) {
        let stride = self.nrow;
        for (out, c) in buffer.iter_mut().zip(first..last) {
            *out = self.values[c * stride + r];
        }
    }

    /// Copy rows `[first, last)` of local column `c` into `buffer` (contiguous read)
    pub fn column_copy(&self, c: usize, buffer: &mut [T], first: usize, last: usize) {
        let start = c * self.nrow;
        buffer[..last - first].copy_from_slice(&self.values[start + first..start + last]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockview_core::{BlockValues, ElementType};

    fn block() -> DenseColumnBlock<f64> {
        // 3 x 2: [[1, 4], [2, 5], [3, 6]]
        let raw = DenseBlock::new(3, 2, BlockValues::Float(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
        DenseColumnBlock::from_block(raw, (3, 2), &Coercion::for_type(ElementType::Float)).unwrap()
    }

    #[test]
    fn test_row_copy_is_strided() {
        let block = block();
        let mut buffer = [0.0; 2];
        block.row_copy(1, &mut buffer, 0, 2);
        assert_eq!(buffer, [2.0, 5.0]);

        let mut single = [0.0; 1];
        block.row_copy(2, &mut single, 1, 2);
        assert_eq!(single, [6.0]);
    }

    #[test]
    fn test_column_copy_is_contiguous() {
        let block = block();
        let mut buffer = [0.0; 2];
        block.column_copy(1, &mut buffer, 1, 3);
        assert_eq!(buffer, [5.0, 6.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let raw = DenseBlock::new(2, 1, BlockValues::Float(vec![1.0, 2.0])).unwrap();
        let result = DenseColumnBlock::<f64>::from_block(raw, (1, 2), &Coercion::for_type(ElementType::Float));
        assert!(matches!(result, Err(Error::MalformedBlock(_))));
    }
}
