//! Forward-mode dual numbers with `N` tangent lanes over any [`Scalar`].
//!
//! Because the primal type is itself a [`Scalar`], duals nest:
//! `Dual<Dual<f64, M>, N>` carries N outer tangents, each of which carries M
//! inner tangents, which is enough to propagate second derivatives.

use std::fmt::{self, Display};

use crate::scalar::Scalar;

/// Forward-mode dual number: a primal value with `N` partial derivatives.
///
/// `Dual { re, eps }` represents `re + Σ eps[k]·ε_k` where `ε_j·ε_k = 0`.
/// The layout is `#[repr(C)]` so that arrays of duals can cross the C boundary.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct Dual<T: Scalar, const N: usize> {
    /// Primal value (itself possibly a dual).
    pub re: T,
    /// Partial derivatives, one per lane.
    pub eps: [T; N],
}

impl<T: Scalar, const N: usize> Default for Dual<T, N> {
    fn default() -> Self {
        Dual {
            re: T::zero(),
            eps: [T::zero(); N],
        }
    }
}

impl<T: Scalar, const N: usize> Display for Dual<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.re)?;
        for (i, e) in self.eps.iter().enumerate() {
            write!(f, " + ({})\u{03b5}{}", e, i)?;
        }
        Ok(())
    }
}

impl<T: Scalar, const N: usize> Dual<T, N> {
    /// Create a new dual number.
    #[inline]
    pub fn new(re: T, eps: [T; N]) -> Self {
        Dual { re, eps }
    }

    /// Create a constant (zero derivatives in all lanes).
    #[inline]
    pub fn constant(re: T) -> Self {
        Dual {
            re,
            eps: [T::zero(); N],
        }
    }

    /// Create a variable with unit derivative in the specified lane.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= N`.
    #[inline]
    pub fn with_tangent(re: T, lane: usize) -> Self {
        assert!(lane < N, "lane ({}) >= number of partials ({})", lane, N);
        Dual {
            re,
            eps: std::array::from_fn(|k| if k == lane { T::one() } else { T::zero() }),
        }
    }

    /// The partial derivatives, one level down.
    #[inline]
    pub fn gradient(&self) -> &[T; N] {
        &self.eps
    }

    /// Apply the chain rule: given `f(self.re)` and `f'(self.re)`, produce the dual result.
    #[inline(always)]
    fn chain(self, f_val: T, f_deriv: T) -> Self {
        Dual {
            re: f_val,
            eps: std::array::from_fn(|k| self.eps[k] * f_deriv),
        }
    }

    #[inline]
    pub fn recip(self) -> Self {
        let inv = T::one() / self.re;
        self.chain(inv, -(inv * inv))
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.re.value() < <T::Float as num_traits::Zero>::zero() {
            -self
        } else {
            self
        }
    }

    /// Integer power by repeated squaring.
    pub fn powi(self, n: i32) -> Self {
        let mut base = if n < 0 { self.recip() } else { self };
        let mut k = n.unsigned_abs();
        let mut acc = Dual::constant(T::one());
        while k > 0 {
            if k & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            k >>= 1;
        }
        acc
    }

    #[inline]
    pub fn exp(self) -> Self {
        let e = self.re.exp();
        self.chain(e, e)
    }
}
