//! Output element types for dense extraction
//!
//! Backends deliver boolean, integer or floating-point blocks; a view
//! converts them into one caller-chosen element type.

/// Trait for types a view can write into caller buffers
///
/// Booleans are converted through their 0/1 integer value, so boolean and
/// integer blocks take the same path.
pub trait MatrixElement: Copy + PartialEq + Sized {
    /// Convert from a backend integer
    fn from_i32(value: i32) -> Self;

    /// Convert from a backend double
    fn from_f64(value: f64) -> Self;

    /// Convert from a backend boolean
    fn from_bool(value: bool) -> Self {
        Self::from_i32(i32::from(value))
    }

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;

    /// Zero value used to initialise buffers
    fn zero() -> Self {
        Self::from_i32(0)
    }
}

macro_rules! impl_matrix_element {
    ($($type:ty),*) => {
        $(
            impl MatrixElement for $type {
                fn from_i32(value: i32) -> Self {
                    value as $type
                }

                fn from_f64(value: f64) -> Self {
                    value as $type
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_matrix_element!(f32, f64, i32, i64, u32, u64);
