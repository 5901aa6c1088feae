//! The [`Scalar`] trait for writing dual-generic matrix code.
//!
//! Functions written as `fn f<T: Scalar>(a: &SquareMatrix<T>)` work transparently with
//! plain `f64`, `Dual<f64, N>` and nested `Dual<Dual<f64, N>, M>`.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{FromPrimitive, One, Zero};

use crate::dual::Dual;
use crate::float::Float;

/// The central trait for dual-generic numeric code.
///
/// This is the capability set the exponential needs from its entries: ring
/// arithmetic with compound assignment, comparison on the primal value,
/// construction from a literal, and projection down to the primal value.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + FromPrimitive
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    /// The underlying primitive float type, reached through every nesting level.
    type Float: Float;

    /// Lift a plain float to this scalar (zero derivative at every level).
    fn from_f(val: Self::Float) -> Self;

    /// Extract the primal value, stripping all dual layers.
    fn value(&self) -> Self::Float;

    /// Multiply by a plain float without promoting it to a dual first.
    fn scale(self, k: Self::Float) -> Self;

    /// Elementwise exponential.
    fn exp(self) -> Self;
}

impl Scalar for f32 {
    type Float = f32;

    #[inline]
    fn from_f(val: f32) -> Self {
        val
    }

    #[inline]
    fn value(&self) -> f32 {
        *self
    }

    #[inline]
    fn scale(self, k: f32) -> Self {
        self * k
    }

    #[inline]
    fn exp(self) -> Self {
        f32::exp(self)
    }
}

impl Scalar for f64 {
    type Float = f64;

    #[inline]
    fn from_f(val: f64) -> Self {
        val
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn scale(self, k: f64) -> Self {
        self * k
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }
}

impl<T: Scalar, const N: usize> Scalar for Dual<T, N> {
    type Float = T::Float;

    #[inline]
    fn from_f(val: T::Float) -> Self {
        Dual::constant(T::from_f(val))
    }

    #[inline]
    fn value(&self) -> T::Float {
        self.re.value()
    }

    #[inline]
    fn scale(self, k: T::Float) -> Self {
        Dual {
            re: self.re.scale(k),
            eps: std::array::from_fn(|i| self.eps[i].scale(k)),
        }
    }

    #[inline]
    fn exp(self) -> Self {
        Dual::exp(self)
    }
}
