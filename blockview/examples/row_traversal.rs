//! Example showing block-cached traversal of a memory-mapped dense file
//!
//! This demonstrates how the workspace cuts down backend traffic by:
//! 1. Writing a chunked dense file
//! 2. Reading every row once without a workspace (one call per row)
//! 3. Reading every row again through a workspace (one call per block)

use blockview::{
    BlockValues, BlockedMatrix, DenseBlock, DenseFile, DenseFileOptions, Direction, MmapArray,
};
use std::time::Instant;

fn main() -> blockview::Result<()> {
    let path = std::env::temp_dir().join("row_traversal_example.bvd");
    let (nrow, ncol) = (5_000, 300);

    println!("=== Block-Cached Row Traversal Demo ===\n");

    println!("1. Writing {nrow} x {ncol} dense file...");
    let values = (0..nrow * ncol).map(|i| (i % 97) as f64).collect();
    let block = DenseBlock::new(nrow, ncol, BlockValues::Float(values))?;
    let options = DenseFileOptions::default()
        .with_chunks(250, 100)
        .with_block_spacing(250, 100);
    let header = DenseFile::write(&path, &block, &options)?;
    println!("   Wrote {} bytes of values to {}", header.data_size, path.display());

    let matrix: BlockedMatrix<_> = BlockedMatrix::new(MmapArray::open(&path)?)?;
    let mut buffer = vec![0.0; ncol];

    println!("\n2. Quick path, one extraction per row...");
    let start = Instant::now();
    let mut total = 0.0;
    for r in 0..nrow {
        total += matrix.row(r, &mut buffer, 0, ncol, None)?.iter().sum::<f64>();
    }
    println!(
        "   sum = {total}, {:.3}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    println!("\n3. Cached path, one extraction per block of rows...");
    let start = Instant::now();
    let mut work = matrix.new_workspace(Direction::Row);
    let mut total = 0.0;
    for r in 0..nrow {
        total += matrix
            .row(r, &mut buffer, 0, ncol, Some(&mut work))?
            .iter()
            .sum::<f64>();
    }
    println!(
        "   sum = {total}, {:.3}ms, {} block fetches",
        start.elapsed().as_secs_f64() * 1000.0,
        work.refreshes()
    );

    std::fs::remove_file(&path)?;
    Ok(())
}
