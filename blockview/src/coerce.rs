//! Element coercion resolved once per view
//!
//! The backend's element type is fixed when a view is built, so the
//! conversion from backend blocks to the caller's element type is chosen
//! once and applied without re-dispatching on every read.

use blockview_core::{BlockValues, ElementType, MatrixElement};

use crate::{Error, Result};

type ConvertFn<T> = fn(BlockValues) -> Result<Vec<T>>;

/// Conversion from backend blocks into `T`
pub struct Coercion<T> {
    element_type: ElementType,
    convert: ConvertFn<T>,
}

impl<T: MatrixElement> Coercion<T> {
    /// Pick the conversion for blocks of `element_type`
    pub fn for_type(element_type: ElementType) -> Self {
        let convert: ConvertFn<T> = match element_type {
            ElementType::Boolean => convert_boolean::<T>,
            ElementType::Integer => convert_integer::<T>,
            ElementType::Float => convert_float::<T>,
        };
        Self {
            element_type,
            convert,
        }
    }

    /// Element type this coercion accepts
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Convert a block's values
    ///
    /// Fails if the backend delivered values of a different type than it
    /// reported at construction.
    pub fn apply(&self, values: BlockValues) -> Result<Vec<T>> {
        (self.convert)(values)
    }
}

impl<T> Clone for Coercion<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Coercion<T> {}

impl<T> std::fmt::Debug for Coercion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coercion")
            .field("element_type", &self.element_type)
            .finish()
    }
}

fn mismatch(expected: ElementType, found: &BlockValues) -> Error {
    Error::MalformedBlock(format!(
        "expected {expected} values, found {}",
        found.element_type()
    ))
}

fn convert_boolean<T: MatrixElement>(values: BlockValues) -> Result<Vec<T>> {
    match values {
        BlockValues::Boolean(v) => Ok(v.into_iter().map(T::from_bool).collect()),
        other => Err(mismatch(ElementType::Boolean, &other)),
    }
}

fn convert_integer<T: MatrixElement>(values: BlockValues) -> Result<Vec<T>> {
    match values {
        BlockValues::Integer(v) => Ok(v.into_iter().map(T::from_i32).collect()),
        other => Err(mismatch(ElementType::Integer, &other)),
    }
}

fn convert_float<T: MatrixElement>(values: BlockValues) -> Result<Vec<T>> {
    match values {
        BlockValues::Float(v) => Ok(v.into_iter().map(T::from_f64).collect()),
        other => Err(mismatch(ElementType::Float, &other)),
    }
}
