//! Diagonal Padé approximants of `exp` and the polynomial evaluator behind them.
//!
//! The odd part `U` and even part `V` of the `(m, m)` approximant satisfy
//! `exp(A) ≈ (V + U)(V − U)⁻¹`. For `m ∈ {3, 5, 7, 9}` both are written as
//! polynomials in `A²` and evaluated by [`evalpoly_into`]; `m = 13` uses a fixed
//! power ladder in the driver.

use crate::bits::log2ceil;
use crate::matrix::{PingPong, SquareMatrix};
use crate::scalar::Scalar;

/// Upper norm bound of each low-order approximant.
pub const THETA_3: f64 = 0.015;
pub const THETA_5: f64 = 0.25;
pub const THETA_7: f64 = 0.95;
pub const THETA_9: f64 = 2.1;
/// Norm the degree-13 approximant tolerates before squaring kicks in.
pub const THETA_13: f64 = 5.4;

// Coefficients in A², highest power first. The `*_NUM` list builds the odd
// part (multiplied by A afterwards), the `*_DEN` list the even part.
const PADE3_NUM: [f64; 2] = [1.0, 60.0];
const PADE3_DEN: [f64; 2] = [12.0, 120.0];
const PADE5_NUM: [f64; 3] = [1.0, 420.0, 15120.0];
const PADE5_DEN: [f64; 3] = [30.0, 3360.0, 30240.0];
const PADE7_NUM: [f64; 4] = [1.0, 1512.0, 277200.0, 8.64864e6];
const PADE7_DEN: [f64; 4] = [56.0, 25200.0, 1.99584e6, 1.729728e7];
const PADE9_NUM: [f64; 5] = [1.0, 3960.0, 2162160.0, 302702400.0, 8821612800.0];
const PADE9_DEN: [f64; 5] = [90.0, 110880.0, 3.027024e7, 2.0756736e9, 1.76432256e10];

/// Odd part of the degree-13 approximant: `A6·(c0·A6 + c1·A4 + c2·A2) + c3·A6 + c4·A4 + c5·A2 + c6·I`,
/// multiplied by `A` afterwards.
pub(crate) const PADE13_ODD: [f64; 7] = [
    1.0,
    16380.0,
    40840800.0,
    33522128640.0,
    10559470521600.0,
    1187353796428800.0,
    32382376266240000.0,
];
/// Even part of the degree-13 approximant, same layout.
pub(crate) const PADE13_EVEN: [f64; 7] = [
    182.0,
    960960.0,
    1323241920.0,
    670442572800.0,
    129060195264000.0,
    7771770303897600.0,
    64764752532480000.0,
];

/// Approximant chosen for a given 1-norm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    Pade3,
    Pade5,
    Pade7,
    Pade9,
    /// Degree 13 on `A / 2^squarings`, followed by `squarings` squarings.
    Pade13 { squarings: u32 },
}

impl Regime {
    /// Pick the approximant for a matrix of 1-norm `norm`.
    ///
    /// A NaN norm falls through to `Pade13 { squarings: 0 }`.
    pub fn select(norm: f64) -> Self {
        if norm <= THETA_3 {
            Regime::Pade3
        } else if norm <= THETA_5 {
            Regime::Pade5
        } else if norm <= THETA_7 {
            Regime::Pade7
        } else if norm <= THETA_9 {
            Regime::Pade9
        } else {
            let squarings = if norm > THETA_13 {
                log2ceil(norm / THETA_13)
            } else {
                0
            };
            Regime::Pade13 { squarings }
        }
    }

    /// `(odd, even)` coefficient lists for the low-order approximants.
    pub fn coefficients(self) -> Option<(&'static [f64], &'static [f64])> {
        match self {
            Regime::Pade3 => Some((&PADE3_NUM, &PADE3_DEN)),
            Regime::Pade5 => Some((&PADE5_NUM, &PADE5_DEN)),
            Regime::Pade7 => Some((&PADE7_NUM, &PADE7_DEN)),
            Regime::Pade9 => Some((&PADE9_NUM, &PADE9_DEN)),
            Regime::Pade13 { .. } => None,
        }
    }

    #[inline]
    pub fn squarings(self) -> u32 {
        match self {
            Regime::Pade13 { squarings } => squarings,
            _ => 0,
        }
    }
}

/// Evaluate `p[0]·C^(k-1) + p[1]·C^(k-2) + … + p[k-1]·I` by Horner's rule.
///
/// The result is left in `buf.current()`; each step reads the current buffer,
/// writes the scratch one and swaps, so no allocation happens inside the loop.
///
/// # Panics
///
/// Panics if `p` is empty or `buf` and `c` differ in dimension.
pub fn evalpoly_into<T: Scalar>(buf: &mut PingPong<T>, c: &SquareMatrix<T>, p: &[T::Float]) {
    assert!(!p.is_empty(), "evalpoly needs at least one coefficient");
    assert_eq!(buf.dim(), c.dim(), "evalpoly dimension mismatch");

    if p.len() == 1 {
        buf.current_mut().assign_scaled_identity(p[0]);
        return;
    }
    {
        let b = buf.current_mut();
        b.assign_scaled(p[0], c);
        b.add_diag(p[1]);
    }
    for &pi in &p[2..] {
        let (prev, next) = buf.split_mut();
        next.matmul_into(prev, c);
        next.add_diag(pi);
        buf.swap();
    }
}

/// Allocating wrapper around [`evalpoly_into`].
pub fn evalpoly<T: Scalar>(c: &SquareMatrix<T>, p: &[T::Float]) -> SquareMatrix<T> {
    let mut buf = PingPong::new(c.dim());
    evalpoly_into(&mut buf, c, p);
    buf.into_current()
}
