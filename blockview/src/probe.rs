//! Geometry probe run once when a view is built

use blockview_core::{
    parse_block_spacing, parse_chunk_dims, parse_element_type, parse_shape, parse_sparsity,
    ArrayBackend, Direction, Geometry,
};
use log::{info, warn};

use crate::{Error, Result};

/// Query every geometry property of `backend` and validate it
///
/// Any malformed answer aborts with the matching construction error; no
/// partially probed geometry is ever returned.
pub fn probe<B>(backend: &B) -> Result<Geometry>
where
    B: ArrayBackend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let (nrows, ncols) = parse_shape(&backend.shape().map_err(Error::backend)?)?;

    let tags = backend.element_type().map_err(Error::backend)?;
    let (element_type, unrecognised) = parse_element_type(&tags)?;
    if let Some(tag) = unrecognised {
        warn!("unrecognised element type {tag:?}, treating as {element_type}");
    }

    let sparse = parse_sparsity(&backend.is_sparse().map_err(Error::backend)?)?;

    let chunk_output = backend.chunk_dims().map_err(Error::backend)?;
    let chunks = parse_chunk_dims(chunk_output.as_deref())?;

    let (row_block, _) =
        parse_block_spacing(&backend.default_block_spacing(Direction::Row).map_err(Error::backend)?)?;
    let (_, col_block) =
        parse_block_spacing(&backend.default_block_spacing(Direction::Column).map_err(Error::backend)?)?;

    let geometry = Geometry {
        nrows,
        ncols,
        element_type,
        sparse,
        chunks,
        row_block,
        col_block,
    };
    info!(
        "probed {nrows}x{ncols} {element_type} array (sparse: {sparse}, chunks: {chunks:?}, blocks: {row_block} rows / {col_block} cols)"
    );
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_backend::{InMemoryArray, ProbeOverrides};
    use blockview_core::{ChunkDims, ElementType, ViewError};

    fn array() -> InMemoryArray {
        InMemoryArray::from_f64(10, 5, (0..50).map(f64::from).collect())
    }

    fn probe_error(overrides: ProbeOverrides) -> Option<ViewError> {
        probe(&array().with_probe_overrides(overrides))
            .unwrap_err()
            .view_error()
    }

    #[test]
    fn test_probe_geometry() {
        let geometry = probe(&array().with_chunks(3, 2).with_block_spacing(4, 1)).unwrap();
        assert_eq!(geometry.nrows, 10);
        assert_eq!(geometry.ncols, 5);
        assert_eq!(geometry.element_type, ElementType::Float);
        assert!(!geometry.sparse);
        assert_eq!(geometry.chunks, Some(ChunkDims { nrow: 3, ncol: 2 }));
        assert_eq!(geometry.row_block, 4);
        assert_eq!(geometry.col_block, 1);
    }

    #[test]
    fn test_unknown_type_collapses_to_float() {
        let overrides = ProbeOverrides {
            element_type: Some(vec!["complex".to_string()]),
            ..Default::default()
        };
        let geometry = probe(&array().with_probe_overrides(overrides)).unwrap();
        assert_eq!(geometry.element_type, ElementType::Float);
    }

    #[test]
    fn test_malformed_outputs() {
        assert_eq!(
            probe_error(ProbeOverrides {
                shape: Some(vec![10, -5]),
                ..Default::default()
            }),
            Some(ViewError::Shape)
        );
        assert_eq!(
            probe_error(ProbeOverrides {
                element_type: Some(vec![]),
                ..Default::default()
            }),
            Some(ViewError::Type)
        );
        assert_eq!(
            probe_error(ProbeOverrides {
                sparse: Some(vec![true, true]),
                ..Default::default()
            }),
            Some(ViewError::Sparsity)
        );
        assert_eq!(
            probe_error(ProbeOverrides {
                chunk_dims: Some(Some(vec![3])),
                ..Default::default()
            }),
            Some(ViewError::Chunk)
        );
        assert_eq!(
            probe_error(ProbeOverrides {
                col_grid: Some(vec![10, -1]),
                ..Default::default()
            }),
            Some(ViewError::Block)
        );
    }
}
