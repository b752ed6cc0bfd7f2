//! Extraction dispatch: cached block reads and the uncached quick path
//!
//! A cached read first checks the workspace window. On a miss the traversal
//! index is widened to its block, the requested range to its chunks, and the
//! aligned region is fetched with a single backend call that replaces the
//! workspace contents.

use blockview_core::{
    align_range, validate_buffer, validate_request, ArrayBackend, Direction, MatrixElement,
    Selector,
};
use log::{debug, trace};

use crate::matrix::BlockedMatrix;
use crate::snapshot::DenseColumnBlock;
use crate::workspace::{CachedWindow, Workspace};
use crate::{Error, Result};

/// Order a (primary, secondary) pair as (rows, cols)
fn by_axis<V>(direction: Direction, primary: V, secondary: V) -> (V, V) {
    match direction {
        Direction::Row => (primary, secondary),
        Direction::Column => (secondary, primary),
    }
}

/// Copy `[first, last)` of `index` out of a window that covers it
fn copy_out<T: MatrixElement>(
    window: &CachedWindow<T>,
    direction: Direction,
    index: usize,
    first: usize,
    last: usize,
    buffer: &mut [T],
) {
    let local = index - window.primary.start;
    let local_first = first - window.secondary.start;
    let local_last = last - window.secondary.start;
    match direction {
        Direction::Row => window.block.row_copy(local, buffer, local_first, local_last),
        Direction::Column => window.block.column_copy(local, buffer, local_first, local_last),
    }
}

impl<B, T> BlockedMatrix<B, T>
where
    B: ArrayBackend,
    B::Error: std::error::Error + Send + Sync + 'static,
    T: MatrixElement,
{
    pub(crate) fn read<'b>(
        &self,
        direction: Direction,
        index: usize,
        buffer: &'b mut [T],
        first: usize,
        last: usize,
        work: Option<&mut Workspace<T>>,
    ) -> Result<&'b [T]> {
        if let Some(work) = work.as_deref() {
            work.check_request(self.id, direction)?;
        }

        let geometry = self.geometry();
        validate_request(
            index,
            first,
            last,
            geometry.primary_extent(direction),
            geometry.secondary_extent(direction),
        )?;
        validate_buffer(buffer.len(), first, last)?;

        let out = &mut buffer[..last - first];
        match work {
            Some(work) => self.buffered_dense(direction, index, first, last, out, work)?,
            None => self.quick_dense(direction, index, first, last, out)?,
        }
        Ok(out)
    }

    /// One exact backend call for one row or column
    fn quick_dense(
        &self,
        direction: Direction,
        index: usize,
        first: usize,
        last: usize,
        out: &mut [T],
    ) -> Result<()> {
        let secondary_extent = self.geometry().secondary_extent(direction);
        let (rows, cols) = by_axis(
            direction,
            Selector::single(index),
            Selector::for_range(first, last, secondary_extent),
        );
        trace!("quick {direction} read of {index} over [{first}, {last})");

        let raw = self.backend().extract_dense(&rows, &cols).map_err(Error::backend)?;
        let block = DenseColumnBlock::from_block(raw, by_axis(direction, 1, last - first), &self.coercion)?;
        match direction {
            Direction::Row => block.row_copy(0, out, 0, last - first),
            Direction::Column => block.column_copy(0, out, 0, last - first),
        }
        Ok(())
    }

    /// Serve from the workspace, refreshing it with one aligned call on a miss
    fn buffered_dense(
        &self,
        direction: Direction,
        index: usize,
        first: usize,
        last: usize,
        out: &mut [T],
        work: &mut Workspace<T>,
    ) -> Result<()> {
        if let Some(window) = work.lookup(index, first, last) {
            trace!("{direction} {index} served from cached block {:?}", window.primary);
            copy_out(window, direction, index, first, last, out);
            return Ok(());
        }

        let window = self.fetch_window(direction, index, first, last)?;
        copy_out(&window, direction, index, first, last, out);
        work.replace(window);
        Ok(())
    }

    /// Fetch the aligned window containing `index` and `[first, last)`
    fn fetch_window(
        &self,
        direction: Direction,
        index: usize,
        first: usize,
        last: usize,
    ) -> Result<CachedWindow<T>> {
        let geometry = self.geometry();
        let primary_extent = geometry.primary_extent(direction);
        let secondary_extent = geometry.secondary_extent(direction);

        let (primary_start, primary_end) =
            align_range(index, index + 1, self.primary_block(direction), primary_extent);
        let (secondary_start, secondary_end) = match self.secondary_chunk(direction) {
            Some(chunk) => align_range(first, last, chunk, secondary_extent),
            None => (first, last),
        };

        let (rows, cols) = by_axis(
            direction,
            Selector::for_range(primary_start, primary_end, primary_extent),
            Selector::for_range(secondary_start, secondary_end, secondary_extent),
        );
        debug!(
            "refreshing {direction} block: primary [{primary_start}, {primary_end}), secondary [{secondary_start}, {secondary_end}) (rows: {}, cols: {})",
            if rows.is_all() { "all" } else { "indexed" },
            if cols.is_all() { "all" } else { "indexed" },
        );

        let raw = self.backend().extract_dense(&rows, &cols).map_err(Error::backend)?;
        let expected = by_axis(
            direction,
            primary_end - primary_start,
            secondary_end - secondary_start,
        );
        let block = DenseColumnBlock::from_block(raw, expected, &self.coercion)?;

        Ok(CachedWindow {
            primary: primary_start..primary_end,
            secondary: secondary_start..secondary_end,
            block,
        })
    }

    /// One exact sparse backend call for one row or column
    pub(crate) fn sparse_read(
        &self,
        direction: Direction,
        index: usize,
        first: usize,
        last: usize,
    ) -> Result<(Vec<usize>, Vec<T>)> {
        let geometry = self.geometry();
        let secondary_extent = geometry.secondary_extent(direction);
        validate_request(index, first, last, geometry.primary_extent(direction), secondary_extent)?;

        let (rows, cols) = by_axis(
            direction,
            Selector::single(index),
            Selector::for_range(first, last, secondary_extent),
        );
        let block = self.backend().extract_sparse(&rows, &cols).map_err(Error::backend)?;

        let expected = by_axis(direction, 1, last - first);
        if (block.nrow, block.ncol) != expected {
            return Err(Error::MalformedBlock(format!(
                "requested {}x{} sparse block, received {}x{}",
                expected.0, expected.1, block.nrow, block.ncol
            )));
        }

        let positions = match direction {
            Direction::Row => &block.cols,
            Direction::Column => &block.rows,
        };
        if positions.len() != block.values.len() || positions.iter().any(|&p| p >= last - first) {
            return Err(Error::MalformedBlock(
                "sparse block coordinates do not match its values".to_string(),
            ));
        }
        let indices = positions.iter().map(|&p| p + first).collect();

        let values = self.coercion.apply(block.values)?;
        Ok((indices, values))
    }
}
