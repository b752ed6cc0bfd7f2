//! Shared fixtures for integration tests

#![allow(dead_code)]

use blockview::InMemoryArray;

/// Value stored at `(r, c)` in patterned arrays
pub fn value_at(r: usize, c: usize) -> f64 {
    (r * 1000 + c) as f64
}

/// Column-major values where every entry encodes its own position
pub fn patterned_values(nrow: usize, ncol: usize) -> Vec<f64> {
    (0..ncol)
        .flat_map(|c| (0..nrow).map(move |r| value_at(r, c)))
        .collect()
}

pub fn patterned(nrow: usize, ncol: usize) -> InMemoryArray {
    InMemoryArray::from_f64(nrow, ncol, patterned_values(nrow, ncol))
}

pub fn expected_row(r: usize, first: usize, last: usize) -> Vec<f64> {
    (first..last).map(|c| value_at(r, c)).collect()
}

pub fn expected_column(c: usize, first: usize, last: usize) -> Vec<f64> {
    (first..last).map(|r| value_at(r, c)).collect()
}
