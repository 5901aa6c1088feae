use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, FloatConst, FromPrimitive};

/// Marker trait for base floating-point types (`f32`, `f64`).
///
/// Bundles the numeric and utility traits needed throughout matexp.
/// Only primitive float types implement this; dual wrapper types do not.
pub trait Float:
    NumFloat + FloatConst + FromPrimitive + Copy + Send + Sync + Default + Debug + Display + 'static
{
    /// Convert an integer literal to this type.
    fn from_int(v: i32) -> Self;
}

impl Float for f32 {
    #[inline]
    fn from_int(v: i32) -> Self {
        v as f32
    }
}

impl Float for f64 {
    #[inline]
    fn from_int(v: i32) -> Self {
        f64::from(v)
    }
}
