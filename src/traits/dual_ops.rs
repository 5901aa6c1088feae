use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::dual::Dual;
use crate::scalar::Scalar;

impl<T: Scalar, const N: usize> Add for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Dual {
            re: self.re + rhs.re,
            eps: std::array::from_fn(|k| self.eps[k] + rhs.eps[k]),
        }
    }
}

impl<T: Scalar, const N: usize> Sub for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Dual {
            re: self.re - rhs.re,
            eps: std::array::from_fn(|k| self.eps[k] - rhs.eps[k]),
        }
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<T: Scalar, const N: usize> Mul for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Dual {
            re: self.re * rhs.re,
            eps: std::array::from_fn(|k| self.re * rhs.eps[k] + self.eps[k] * rhs.re),
        }
    }
}

impl<T: Scalar, const N: usize> Div for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let inv = T::one() / rhs.re;
        Dual {
            re: self.re * inv,
            eps: std::array::from_fn(|k| (self.eps[k] * rhs.re - self.re * rhs.eps[k]) * inv * inv),
        }
    }
}

impl<T: Scalar, const N: usize> Neg for Dual<T, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Dual {
            re: -self.re,
            eps: std::array::from_fn(|k| -self.eps[k]),
        }
    }
}

impl<T: Scalar, const N: usize> AddAssign for Dual<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const N: usize> SubAssign for Dual<T, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const N: usize> MulAssign for Dual<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar, const N: usize> DivAssign for Dual<T, N> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// Equality and ordering look at the primal value only; the partials never
// influence branching.
impl<T: Scalar, const N: usize> PartialEq for Dual<T, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.re == other.re
    }
}

impl<T: Scalar, const N: usize> PartialOrd for Dual<T, N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

impl<T: Scalar, const N: usize> From<i32> for Dual<T, N> {
    #[inline]
    fn from(val: i32) -> Self {
        Scalar::from_f(<T::Float as crate::Float>::from_int(val))
    }
}

// Mixed ops: Dual<T, N> with the primitive float at the bottom of the nesting.
macro_rules! impl_dual_float_ops {
    ($f:ty) => {
        impl<T: Scalar<Float = $f>, const N: usize> From<$f> for Dual<T, N> {
            #[inline]
            fn from(val: $f) -> Self {
                Scalar::from_f(val)
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Add<$f> for Dual<T, N> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: $f) -> Self {
                Dual {
                    re: self.re + T::from_f(rhs),
                    eps: self.eps,
                }
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Add<Dual<T, N>> for $f {
            type Output = Dual<T, N>;
            #[inline]
            fn add(self, rhs: Dual<T, N>) -> Dual<T, N> {
                rhs + self
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Sub<$f> for Dual<T, N> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: $f) -> Self {
                Dual {
                    re: self.re - T::from_f(rhs),
                    eps: self.eps,
                }
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Sub<Dual<T, N>> for $f {
            type Output = Dual<T, N>;
            #[inline]
            fn sub(self, rhs: Dual<T, N>) -> Dual<T, N> {
                -rhs + self
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Mul<$f> for Dual<T, N> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $f) -> Self {
                self.scale(rhs)
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Mul<Dual<T, N>> for $f {
            type Output = Dual<T, N>;
            #[inline]
            fn mul(self, rhs: Dual<T, N>) -> Dual<T, N> {
                rhs.scale(self)
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Div<$f> for Dual<T, N> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $f) -> Self {
                self.scale(1.0 / rhs)
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> Div<Dual<T, N>> for $f {
            type Output = Dual<T, N>;
            #[inline]
            fn div(self, rhs: Dual<T, N>) -> Dual<T, N> {
                rhs.recip().scale(self)
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> AddAssign<$f> for Dual<T, N> {
            #[inline]
            fn add_assign(&mut self, rhs: $f) {
                self.re += T::from_f(rhs);
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> SubAssign<$f> for Dual<T, N> {
            #[inline]
            fn sub_assign(&mut self, rhs: $f) {
                self.re -= T::from_f(rhs);
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> MulAssign<$f> for Dual<T, N> {
            #[inline]
            fn mul_assign(&mut self, rhs: $f) {
                *self = self.scale(rhs);
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> DivAssign<$f> for Dual<T, N> {
            #[inline]
            fn div_assign(&mut self, rhs: $f) {
                *self = self.scale(1.0 / rhs);
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> PartialEq<$f> for Dual<T, N> {
            #[inline]
            fn eq(&self, other: &$f) -> bool {
                self.value() == *other
            }
        }

        impl<T: Scalar<Float = $f>, const N: usize> PartialOrd<$f> for Dual<T, N> {
            #[inline]
            fn partial_cmp(&self, other: &$f) -> Option<Ordering> {
                self.value().partial_cmp(other)
            }
        }
    };
}

impl_dual_float_ops!(f32);
impl_dual_float_ops!(f64);
