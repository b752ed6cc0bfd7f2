//! Validation of raw backend probe outputs
//!
//! Backends report geometry as loosely shaped values. Each parser accepts
//! exactly one well-formed shape and maps everything else to the matching
//! construction error.

use crate::format::{ChunkDims, ElementType};
use crate::ViewError;

fn non_negative_pair(values: &[i64], error: ViewError) -> Result<(usize, usize), ViewError> {
    match values {
        [a, b] if *a >= 0 && *b >= 0 => {
            let a = usize::try_from(*a).map_err(|_| error)?;
            let b = usize::try_from(*b).map_err(|_| error)?;
            Ok((a, b))
        }
        _ => Err(error),
    }
}

/// Parse `[rows, cols]`
pub fn parse_shape(values: &[i64]) -> Result<(usize, usize), ViewError> {
    non_negative_pair(values, ViewError::Shape)
}

/// Parse a single element type tag
///
/// Returns the classification, plus the tag itself when it was not
/// recognised; any unrecognised tag collapses to [`ElementType::Float`].
pub fn parse_element_type<S: AsRef<str>>(tags: &[S]) -> Result<(ElementType, Option<&str>), ViewError> {
    match tags {
        [tag] => match ElementType::from_tag(tag.as_ref()) {
            Some(ty) => Ok((ty, None)),
            None => Ok((ElementType::Float, Some(tag.as_ref()))),
        },
        _ => Err(ViewError::Type),
    }
}

/// Parse a single sparsity flag
pub fn parse_sparsity(flags: &[bool]) -> Result<bool, ViewError> {
    match flags {
        [flag] => Ok(*flag),
        _ => Err(ViewError::Sparsity),
    }
}

/// Parse optional `[rows_per_chunk, cols_per_chunk]`
pub fn parse_chunk_dims(values: Option<&[i64]>) -> Result<Option<ChunkDims>, ViewError> {
    match values {
        None => Ok(None),
        Some(values) => {
            let (nrow, ncol) = non_negative_pair(values, ViewError::Chunk)?;
            Ok(Some(ChunkDims { nrow, ncol }))
        }
    }
}

/// Parse `[row_spacing, col_spacing]` of a default block grid
pub fn parse_block_spacing(values: &[i64]) -> Result<(usize, usize), ViewError> {
    non_negative_pair(values, ViewError::Block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape() {
        assert_eq!(parse_shape(&[10, 5]), Ok((10, 5)));
        assert_eq!(parse_shape(&[0, 0]), Ok((0, 0)));
        assert_eq!(parse_shape(&[10]), Err(ViewError::Shape));
        assert_eq!(parse_shape(&[10, 5, 1]), Err(ViewError::Shape));
        assert_eq!(parse_shape(&[-1, 5]), Err(ViewError::Shape));
    }

    #[test]
    fn test_parse_element_type() {
        assert_eq!(parse_element_type(&["logical"]), Ok((ElementType::Boolean, None)));
        assert_eq!(parse_element_type(&["integer"]), Ok((ElementType::Integer, None)));
        assert_eq!(parse_element_type(&["complex"]), Ok((ElementType::Float, Some("complex"))));
        assert_eq!(parse_element_type::<&str>(&[]), Err(ViewError::Type));
        assert_eq!(parse_element_type(&["integer", "double"]), Err(ViewError::Type));
    }

    #[test]
    fn test_parse_sparsity() {
        assert_eq!(parse_sparsity(&[true]), Ok(true));
        assert_eq!(parse_sparsity(&[]), Err(ViewError::Sparsity));
        assert_eq!(parse_sparsity(&[true, false]), Err(ViewError::Sparsity));
    }

    #[test]
    fn test_parse_chunk_dims() {
        assert_eq!(parse_chunk_dims(None), Ok(None));
        assert_eq!(
            parse_chunk_dims(Some(&[3, 2])),
            Ok(Some(ChunkDims { nrow: 3, ncol: 2 }))
        );
        assert_eq!(parse_chunk_dims(Some(&[3])), Err(ViewError::Chunk));
        assert_eq!(parse_chunk_dims(Some(&[3, -2])), Err(ViewError::Chunk));
    }

    #[test]
    fn test_parse_block_spacing() {
        assert_eq!(parse_block_spacing(&[4, 5]), Ok((4, 5)));
        assert_eq!(parse_block_spacing(&[4]), Err(ViewError::Block));
        assert_eq!(parse_block_spacing(&[-4, 5]), Err(ViewError::Block));
    }
}
