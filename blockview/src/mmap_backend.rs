//! Memory-mapped dense file backend
//!
//! Dense files hold a [`DenseHeader`] followed by the array in column-major
//! order: one byte per boolean, little-endian `i32` per integer and
//! little-endian `f64` per double. Extraction gathers straight out of the
//! mapping.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use blockview_core::{
    constants::default_block_spacing, gather_dense, ArrayBackend, BlockValues, ChunkDims, DenseBlock,
    DenseHeader, Direction, ElementType, Geometry, Selector, SparseBlock, ViewError,
};
use log::debug;
use memmap2::Mmap;

use crate::Result;

/// Layout options for a dense file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenseFileOptions {
    /// Report the array as sparse
    pub sparse: bool,
    /// Native chunk dimensions to record
    pub chunks: Option<ChunkDims>,
    /// Rows per default row-traversal block; sized automatically when `None`
    pub row_block: Option<usize>,
    /// Columns per default column-traversal block; sized automatically when `None`
    pub col_block: Option<usize>,
}

impl DenseFileOptions {
    pub fn with_chunks(mut self, nrow: usize, ncol: usize) -> Self {
        self.chunks = Some(ChunkDims { nrow, ncol });
        self
    }

    pub fn with_block_spacing(mut self, rows: usize, cols: usize) -> Self {
        self.row_block = Some(rows);
        self.col_block = Some(cols);
        self
    }

    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }
}

/// Writer for dense files
pub struct DenseFile;

impl DenseFile {
    /// Write `block` to `path` and return the header that was written
    pub fn write<P: AsRef<Path>>(path: P, block: &DenseBlock, options: &DenseFileOptions) -> Result<DenseHeader> {
        let (nrows, ncols) = block.shape();
        if block.values.len() != nrows * ncols {
            return Err(ViewError::InsufficientBuffer.into());
        }

        let geometry = Geometry {
            nrows,
            ncols,
            element_type: block.values.element_type(),
            sparse: options.sparse,
            chunks: options.chunks,
            row_block: options
                .row_block
                .unwrap_or_else(|| default_block_spacing(nrows, ncols)),
            col_block: options
                .col_block
                .unwrap_or_else(|| default_block_spacing(ncols, nrows)),
        };
        let header = DenseHeader::for_geometry(&geometry)?;

        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        writer.write_all(&header.to_bytes())?;
        let padding = header.data_offset as usize - DenseHeader::SIZE;
        writer.write_all(&vec![0u8; padding])?;

        match &block.values {
            BlockValues::Boolean(v) => {
                let bytes: Vec<u8> = v.iter().map(|&b| u8::from(b)).collect();
                writer.write_all(&bytes)?;
            }
            BlockValues::Integer(v) => {
                for value in v {
                    writer.write_all(&value.to_le_bytes())?;
                }
            }
            BlockValues::Float(v) => {
                for value in v {
                    writer.write_all(&value.to_le_bytes())?;
                }
            }
        }
        writer.flush()?;

        debug!(
            "wrote {nrows}x{ncols} dense file to {}",
            path.as_ref().display()
        );
        Ok(header)
    }
}

/// Backend over a memory-mapped dense file
pub struct MmapArray {
    path: PathBuf,
    mmap: Mmap,
    header: DenseHeader,
    geometry: Geometry,
}

impl MmapArray {
    /// Map a dense file and validate its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the mapping is read-only and owned by this value; the file
        // is not expected to be modified while mapped.
        let mmap = unsafe { Mmap::map(&file)? };

        let header = DenseHeader::from_bytes(&mmap)?;
        let geometry = header.geometry()?;
        let range = header.data_range()?;

        let expected_size = geometry
            .nrows
            .checked_mul(geometry.ncols)
            .and_then(|n| n.checked_mul(geometry.element_type.size_bytes()))
            .ok_or(ViewError::InvalidHeader)?;
        if range.len() != expected_size || range.end > mmap.len() {
            return Err(ViewError::InvalidHeader.into());
        }

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            mmap,
            header,
            geometry,
        })
    }

    pub fn header(&self) -> &DenseHeader {
        &self.header
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn payload(&self) -> &[u8] {
        let start = self.header.data_offset as usize;
        &self.mmap[start..start + self.header.data_size as usize]
    }

    fn gather(&self, rows: &Selector, cols: &Selector) -> Result<DenseBlock> {
        let Geometry { nrows, ncols, .. } = self.geometry;
        let payload = self.payload();

        let values = match self.geometry.element_type {
            ElementType::Boolean => {
                let raw = gather_dense(payload, nrows, ncols, rows, cols)?;
                BlockValues::Boolean(raw.into_iter().map(|b| b != 0).collect())
            }
            ElementType::Integer => {
                let words: &[i32] = bytemuck::try_cast_slice(payload).map_err(|_| ViewError::InvalidHeader)?;
                let raw = gather_dense(words, nrows, ncols, rows, cols)?;
                BlockValues::Integer(raw.into_iter().map(i32::from_le).collect())
            }
            ElementType::Float => {
                let words: &[u64] = bytemuck::try_cast_slice(payload).map_err(|_| ViewError::InvalidHeader)?;
                let raw = gather_dense(words, nrows, ncols, rows, cols)?;
                BlockValues::Float(raw.into_iter().map(|w| f64::from_bits(u64::from_le(w))).collect())
            }
        };

        Ok(DenseBlock::new(rows.len(nrows), cols.len(ncols), values)?)
    }
}

impl ArrayBackend for MmapArray {
    type Error = crate::Error;

    fn shape(&self) -> Result<Vec<i64>> {
        Ok(vec![self.header.nrows as i64, self.header.ncols as i64])
    }

    fn element_type(&self) -> Result<Vec<String>> {
        Ok(vec![self.geometry.element_type.tag().to_string()])
    }

    fn is_sparse(&self) -> Result<Vec<bool>> {
        Ok(vec![self.geometry.sparse])
    }

    fn chunk_dims(&self) -> Result<Option<Vec<i64>>> {
        Ok(self
            .geometry
            .chunks
            .map(|c| vec![c.nrow as i64, c.ncol as i64]))
    }

    fn default_block_spacing(&self, direction: Direction) -> Result<Vec<i64>> {
        let Geometry { nrows, ncols, .. } = self.geometry;
        Ok(match direction {
            Direction::Row => vec![self.geometry.row_block as i64, ncols as i64],
            Direction::Column => vec![nrows as i64, self.geometry.col_block as i64],
        })
    }

    fn extract_dense(&self, rows: &Selector, cols: &Selector) -> Result<DenseBlock> {
        self.gather(rows, cols)
    }

    fn extract_sparse(&self, rows: &Selector, cols: &Selector) -> Result<SparseBlock> {
        Ok(self.gather(rows, cols)?.to_sparse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockedMatrix;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("blockview-{}-{id}-{name}.bvd", std::process::id()))
    }

    #[test]
    fn test_float_file_roundtrip() {
        let path = temp_path("float");
        // value at (r, c) is 10 * r + c
        let values = (0..4).flat_map(|c| (0..6).map(move |r| (10 * r + c) as f64)).collect();
        let block = DenseBlock::new(6, 4, BlockValues::Float(values)).unwrap();
        let options = DenseFileOptions::default()
            .with_chunks(3, 2)
            .with_block_spacing(2, 1);
        DenseFile::write(&path, &block, &options).unwrap();

        let array = MmapArray::open(&path).unwrap();
        assert_eq!(array.geometry().chunks, Some(ChunkDims { nrow: 3, ncol: 2 }));

        let sub = array
            .extract_dense(&Selector::Indices(vec![2, 5]), &Selector::Indices(vec![4]))
            .unwrap();
        assert_eq!(sub.values, BlockValues::Float(vec![13.0, 43.0]));
        assert_eq!(array.extract_dense(&Selector::All, &Selector::All).unwrap(), block);

        let matrix: BlockedMatrix<_> = BlockedMatrix::new(array).unwrap();
        let mut work = matrix.new_workspace(Direction::Row);
        let mut buffer = [0.0; 2];
        matrix.row(4, &mut buffer, 1, 3, Some(&mut work)).unwrap();
        assert_eq!(buffer, [41.0, 42.0]);
        assert_eq!(work.cached_window(), Some((4..6, 0..4)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_boolean_and_integer_files() {
        let path = temp_path("bool");
        let block = DenseBlock::new(2, 2, BlockValues::Boolean(vec![true, false, false, true])).unwrap();
        DenseFile::write(&path, &block, &DenseFileOptions::default().with_sparse(true)).unwrap();
        let array = MmapArray::open(&path).unwrap();
        assert_eq!(array.is_sparse().unwrap(), vec![true]);
        assert_eq!(array.element_type().unwrap(), vec!["boolean".to_string()]);
        let sparse = array.extract_sparse(&Selector::All, &Selector::All).unwrap();
        assert_eq!(sparse.nnz(), 2);
        std::fs::remove_file(&path).unwrap();

        let path = temp_path("int");
        let block = DenseBlock::new(3, 1, BlockValues::Integer(vec![-7, 0, 9])).unwrap();
        DenseFile::write(&path, &block, &DenseFileOptions::default()).unwrap();
        let array = MmapArray::open(&path).unwrap();
        assert_eq!(array.chunk_dims().unwrap(), None);
        assert_eq!(array.default_block_spacing(Direction::Column).unwrap(), vec![3, 1]);
        assert_eq!(
            array
                .extract_dense(&Selector::Indices(vec![1, 3]), &Selector::All)
                .unwrap()
                .values,
            BlockValues::Integer(vec![-7, 9])
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let path = temp_path("truncated");
        let block = DenseBlock::new(2, 2, BlockValues::Float(vec![1.0; 4])).unwrap();
        DenseFile::write(&path, &block, &DenseFileOptions::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 8]).unwrap();
        let err = MmapArray::open(&path).err().unwrap();
        assert_eq!(err.view_error(), Some(ViewError::InvalidHeader));

        std::fs::remove_file(&path).unwrap();
    }
}
