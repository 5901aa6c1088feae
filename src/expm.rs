//! Matrix exponential by scaling and squaring with diagonal Padé approximants.
//!
//! The control flow (approximant choice, squaring count, pivot order) depends
//! only on primal values, so the same path is taken for `f64` and for every
//! dual instantiation, and derivatives flow through the arithmetic untouched.

use log::trace;

use crate::bits::exp2;
use crate::error::{check_dim, ExpmError, Result};
use crate::linalg::ldiv;
use crate::matrix::{PingPong, SquareMatrix};
use crate::norm::opnorm1;
use crate::pade::{evalpoly_into, Regime, PADE13_EVEN, PADE13_ODD};
use crate::scalar::Scalar;

/// `A6·(c0·A6 + c1·A4 + c2·A2) + c3·A6 + c4·A4 + c5·A2 + c6·I`, left in `buf.current()`.
fn pade13_part<T: Scalar<Float = f64>>(
    buf: &mut PingPong<T>,
    a2: &SquareMatrix<T>,
    a4: &SquareMatrix<T>,
    a6: &SquareMatrix<T>,
    c: &[f64; 7],
) {
    {
        let (_, inner) = buf.split_mut();
        inner.assign_scaled(c[0], a6);
        inner.axpy(c[1], a4);
        inner.axpy(c[2], a2);
    }
    buf.swap();
    let (inner, out) = buf.split_mut();
    out.matmul_into(a6, inner);
    out.axpy(c[3], a6);
    out.axpy(c[4], a4);
    out.axpy(c[5], a2);
    out.add_diag(c[6]);
    buf.swap();
}

/// Compute `exp(A)`, reporting singular Padé denominators instead of panicking.
///
/// ```
/// use matexp::{try_expm, SquareMatrix};
///
/// let a = SquareMatrix::<f64>::from_row_slice(2, &[0.0, 1.0, 0.0, 0.0]);
/// let e = try_expm(&a).unwrap();
/// assert!((e[(0, 1)] - 1.0).abs() < 1e-15);
/// assert!((e[(0, 0)] - 1.0).abs() < 1e-15);
/// ```
pub fn try_expm<T: Scalar<Float = f64>>(a: &SquareMatrix<T>) -> Result<SquareMatrix<T>> {
    let n = a.dim();
    let norm = opnorm1(a);
    let regime = Regime::select(norm);
    trace!("expm: n = {}, |A|_1 = {:e}, regime = {:?}", n, norm, regime);

    // `v` carries V, then the solved approximant, then each squaring.
    let mut v = PingPong::new(n);
    let mut u = SquareMatrix::zeros(n);

    match regime.coefficients() {
        Some((odd, even)) => {
            let a2 = a.matmul(a);
            evalpoly_into(&mut v, &a2, odd);
            u.matmul_into(a, v.current());
            evalpoly_into(&mut v, &a2, even);
        }
        None => {
            // Powers are formed from A / 2^s so that no intermediate exceeds
            // the magnitude of the scaled matrix.
            let s = regime.squarings();
            let mut scaled = a.clone();
            if s > 0 {
                scaled.scale_mut(exp2(-(s as i32)));
            }
            let a2 = scaled.matmul(&scaled);
            let a4 = a2.matmul(&a2);
            let a6 = a2.matmul(&a4);
            pade13_part(&mut v, &a2, &a4, &a6, &PADE13_ODD);
            u.matmul_into(&scaled, v.current());
            pade13_part(&mut v, &a2, &a4, &a6, &PADE13_EVEN);
        }
    }

    // V ← V + U, U ← V − U, then V ← U⁻¹V.
    for (vi, ui) in v
        .current_mut()
        .as_mut_slice()
        .iter_mut()
        .zip(u.as_mut_slice().iter_mut())
    {
        let d = *vi - *ui;
        *vi += *ui;
        *ui = d;
    }
    ldiv(u, v.current_mut())?;

    let s = regime.squarings();
    for _ in 0..s {
        let (cur, next) = v.split_mut();
        next.matmul_into(cur, cur);
        v.swap();
    }
    trace!("expm: {} squarings, {} buffer swaps", s, v.swaps());
    Ok(v.into_current())
}

/// Compute `exp(A)`.
///
/// # Panics
///
/// Panics if the Padé denominator turns out singular, which only happens for
/// non-finite input. Finite input never fails, but for very large non-normal
/// matrices the squaring phase can lose all relative accuracy.
pub fn expm<T: Scalar<Float = f64>>(a: &SquareMatrix<T>) -> SquareMatrix<T> {
    try_expm(a).unwrap_or_else(|e| panic!("expm: {}", e))
}

/// Write `exp(a)` into `out`; both must have the same dimension.
pub fn try_expm_assign<T: Scalar<Float = f64>>(
    out: &mut SquareMatrix<T>,
    a: &SquareMatrix<T>,
) -> Result<()> {
    if out.dim() != a.dim() {
        return Err(ExpmError::DimensionMismatch {
            expected: a.dim(),
            actual: out.dim(),
        });
    }
    *out = try_expm(a)?;
    Ok(())
}

fn check_len(len: usize, n: usize) -> Result<()> {
    if len != n * n {
        Err(ExpmError::BufferLength { len, n })
    } else {
        Ok(())
    }
}

/// Two-buffer form on row-major slices: `out ← exp(a)`.
pub fn try_expm_into<T: Scalar<Float = f64>>(out: &mut [T], a: &[T], n: usize) -> Result<()> {
    check_dim(n)?;
    check_len(a.len(), n)?;
    check_len(out.len(), n)?;
    let e = try_expm(&SquareMatrix::from_row_slice(n, a))?;
    e.copy_to_slice(out);
    Ok(())
}

/// In-place form on a row-major slice: `a ← exp(a)`.
pub fn try_expm_in_place<T: Scalar<Float = f64>>(a: &mut [T], n: usize) -> Result<()> {
    check_dim(n)?;
    check_len(a.len(), n)?;
    let e = try_expm(&SquareMatrix::from_row_slice(n, a))?;
    e.copy_to_slice(a);
    Ok(())
}

/// Panicking counterpart of [`try_expm_into`].
pub fn expm_into<T: Scalar<Float = f64>>(out: &mut [T], a: &[T], n: usize) {
    try_expm_into(out, a, n).unwrap_or_else(|e| panic!("expm_into: {}", e))
}

/// Panicking counterpart of [`try_expm_in_place`].
pub fn expm_in_place<T: Scalar<Float = f64>>(a: &mut [T], n: usize) {
    try_expm_in_place(a, n).unwrap_or_else(|e| panic!("expm_in_place: {}", e))
}
