//! Dense file header format definitions
//!
//! A dense file is a fixed 64-byte little-endian header followed by the
//! array values in column-major order.

use super::constants::{dense, ALIGNMENT_BOUNDARY, FLAG_CHUNKED, FLAG_SPARSE};
use super::element_type::ElementType;
use super::geometry::{ChunkDims, Geometry};
use crate::{Result, ViewError};

/// Header of a dense column-major file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseHeader {
    /// Magic bytes: "BVDM"
    pub magic: [u8; 4],
    /// Format version
    pub version: u8,
    /// Element type code (boolean=0, integer=1, float=2)
    pub element_type: u8,
    /// Sparse and chunked flags
    pub flags: u8,
    /// Number of rows
    pub nrows: u64,
    /// Number of columns
    pub ncols: u64,
    /// Rows per native chunk (meaningful with the chunked flag)
    pub chunk_nrow: u32,
    /// Columns per native chunk (meaningful with the chunked flag)
    pub chunk_ncol: u32,
    /// Rows per block of the default row-major grid
    pub row_block: u32,
    /// Columns per block of the default column-major grid
    pub col_block: u32,
    /// Offset to the values from file start
    pub data_offset: u64,
    /// Size of the values in bytes
    pub data_size: u64,
}

impl DenseHeader {
    pub const MAGIC: [u8; 4] = dense::MAGIC;
    pub const VERSION: u8 = dense::VERSION;
    pub const SIZE: usize = dense::HEADER_SIZE;

    /// Build a header describing `geometry`, with the payload placed right
    /// after the header
    pub fn for_geometry(geometry: &Geometry) -> Result<Self> {
        let narrow = |v: usize| u32::try_from(v).map_err(|_| ViewError::InvalidHeader);

        let mut flags = 0;
        if geometry.sparse {
            flags |= FLAG_SPARSE;
        }
        let (chunk_nrow, chunk_ncol) = match geometry.chunks {
            Some(chunks) => {
                flags |= FLAG_CHUNKED;
                (narrow(chunks.nrow)?, narrow(chunks.ncol)?)
            }
            None => (0, 0),
        };

        let data_size = (geometry.nrows as u64)
            .checked_mul(geometry.ncols as u64)
            .and_then(|n| n.checked_mul(geometry.element_type.size_bytes() as u64))
            .ok_or(ViewError::InvalidHeader)?;

        Ok(Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            element_type: geometry.element_type.to_u8(),
            flags,
            nrows: geometry.nrows as u64,
            ncols: geometry.ncols as u64,
            chunk_nrow,
            chunk_ncol,
            row_block: narrow(geometry.row_block)?,
            col_block: narrow(geometry.col_block)?,
            data_offset: Self::SIZE.div_ceil(ALIGNMENT_BOUNDARY) as u64 * ALIGNMENT_BOUNDARY as u64,
            data_size,
        })
    }

    /// Geometry described by this header
    pub fn geometry(&self) -> Result<Geometry> {
        let element_type = ElementType::from_u8(self.element_type).ok_or(ViewError::InvalidHeader)?;
        let chunks = if self.flags & FLAG_CHUNKED != 0 {
            Some(ChunkDims {
                nrow: self.chunk_nrow as usize,
                ncol: self.chunk_ncol as usize,
            })
        } else {
            None
        };

        Ok(Geometry {
            nrows: usize::try_from(self.nrows).map_err(|_| ViewError::InvalidHeader)?,
            ncols: usize::try_from(self.ncols).map_err(|_| ViewError::InvalidHeader)?,
            element_type,
            sparse: self.flags & FLAG_SPARSE != 0,
            chunks,
            row_block: self.row_block as usize,
            col_block: self.col_block as usize,
        })
    }

    /// Parse a header from the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(ViewError::InvalidHeader);
        }
        if bytes[0..4] != Self::MAGIC {
            return Err(ViewError::InvalidHeader);
        }

        let version = bytes[4];
        if version > Self::VERSION {
            return Err(ViewError::UnsupportedFormat);
        }

        let u32_at = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let u64_at = |at: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[at..at + 8]);
            u64::from_le_bytes(raw)
        };

        let header = Self {
            magic: Self::MAGIC,
            version,
            element_type: bytes[5],
            flags: bytes[6],
            nrows: u64_at(8),
            ncols: u64_at(16),
            chunk_nrow: u32_at(24),
            chunk_ncol: u32_at(28),
            row_block: u32_at(32),
            col_block: u32_at(36),
            data_offset: u64_at(40),
            data_size: u64_at(48),
        };

        if ElementType::from_u8(header.element_type).is_none() {
            return Err(ViewError::InvalidHeader);
        }
        Ok(header)
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes[5] = self.element_type;
        bytes[6] = self.flags;
        // byte 7 and bytes 56..64 are reserved
        bytes[8..16].copy_from_slice(&self.nrows.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.ncols.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.chunk_nrow.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.chunk_ncol.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.row_block.to_le_bytes());
        bytes[36..40].copy_from_slice(&self.col_block.to_le_bytes());
        bytes[40..48].copy_from_slice(&self.data_offset.to_le_bytes());
        bytes[48..56].copy_from_slice(&self.data_size.to_le_bytes());
        bytes
    }

    /// Byte range of the values within the file
    pub fn data_range(&self) -> Result<core::ops::Range<usize>> {
        let start = usize::try_from(self.data_offset).map_err(|_| ViewError::InvalidHeader)?;
        let size = usize::try_from(self.data_size).map_err(|_| ViewError::InvalidHeader)?;
        let end = start.checked_add(size).ok_or(ViewError::InvalidHeader)?;
        Ok(start..end)
    }
}
