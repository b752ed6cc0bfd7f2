#![cfg_attr(not(test), no_std)]

//! Blockview Core - geometry, backend contracts and alignment rules
//!
//! This crate provides the pure building blocks for block-cached matrix
//! views: the error taxonomy, backend geometry types, the capability
//! contract a backend has to satisfy, and the range alignment and request
//! validation rules. It performs no I/O.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::*;
