//! C entry points, one pair per scalar instantiation.
//!
//! Naming: `expmf64` for plain doubles, `expmf64d{N}` for `Dual<f64, N>` and
//! `expmf64d{N}d{M}` for `Dual<Dual<f64, N>, M>`. The two-buffer form
//! `f(A, B, n)` writes `exp(B)` into `A` (the buffers may alias); the
//! `_inplace` form `f(A, n)` overwrites `A`.
//!
//! Storage is `n * n` contiguous elements. The result is layout-agnostic:
//! `exp(Aᵀ) = exp(A)ᵀ`, so row- and column-major callers both get the right answer.
//!
//! Precondition violations are fatal: the error is logged and the process aborts.

use std::process;

use log::error;

use crate::dual::Dual;
use crate::error::{check_signed_dim, ExpmError};
use crate::expm::try_expm;
use crate::matrix::SquareMatrix;
use crate::scalar::Scalar;

fn fatal(symbol: &str, err: ExpmError) -> ! {
    error!("{}: {}", symbol, err);
    process::abort()
}

fn dim_from_ffi(symbol: &str, n: isize) -> usize {
    check_signed_dim(n).unwrap_or_else(|e| fatal(symbol, e))
}

/// # Safety
///
/// `a` must point to `n * n` writable elements and `b` to `n * n` readable
/// elements. They may be the same pointer.
unsafe fn expm_raw<T: Scalar<Float = f64>>(symbol: &str, a: *mut T, b: *const T, n: isize) {
    let n = dim_from_ffi(symbol, n);
    if a.is_null() || b.is_null() {
        fatal(symbol, ExpmError::BufferLength { len: 0, n });
    }
    let len = n * n;
    // The input is copied out before the output slice is formed, so aliasing
    // `a == b` never produces overlapping shared and mutable borrows.
    let input = {
        // SAFETY: the caller guarantees `b` is valid for `len` reads.
        let src = unsafe { std::slice::from_raw_parts(b, len) };
        SquareMatrix::from_row_slice(n, src)
    };
    let result = try_expm(&input).unwrap_or_else(|e| fatal(symbol, e));
    // SAFETY: the caller guarantees `a` is valid for `len` writes; no other
    // borrow of that memory is live here.
    let dst = unsafe { std::slice::from_raw_parts_mut(a, len) };
    result.copy_to_slice(dst);
}

macro_rules! export_expm {
    ($($two:ident, $inplace:ident => $t:ty;)*) => {
        $(
            #[doc = concat!("Two-buffer matrix exponential over `", stringify!($t), "`.")]
            ///
            /// # Safety
            ///
            /// `a` must be valid for `n * n` writes and `b` for `n * n` reads.
            #[no_mangle]
            pub unsafe extern "C" fn $two(a: *mut $t, b: *const $t, n: isize) {
                // SAFETY: forwarded caller contract.
                unsafe { expm_raw::<$t>(stringify!($two), a, b, n) }
            }

            #[doc = concat!("In-place matrix exponential over `", stringify!($t), "`.")]
            ///
            /// # Safety
            ///
            /// `a` must be valid for `n * n` reads and writes.
            #[no_mangle]
            pub unsafe extern "C" fn $inplace(a: *mut $t, n: isize) {
                // SAFETY: forwarded caller contract; aliasing is handled by `expm_raw`.
                unsafe { expm_raw::<$t>(stringify!($inplace), a, a, n) }
            }
        )*
    };
}

export_expm! {
    expmf64, expmf64_inplace => f64;

    expmf64d1, expmf64d1_inplace => Dual<f64, 1>;
    expmf64d2, expmf64d2_inplace => Dual<f64, 2>;
    expmf64d3, expmf64d3_inplace => Dual<f64, 3>;
    expmf64d4, expmf64d4_inplace => Dual<f64, 4>;
    expmf64d5, expmf64d5_inplace => Dual<f64, 5>;
    expmf64d6, expmf64d6_inplace => Dual<f64, 6>;
    expmf64d7, expmf64d7_inplace => Dual<f64, 7>;
    expmf64d8, expmf64d8_inplace => Dual<f64, 8>;

    expmf64d1d1, expmf64d1d1_inplace => Dual<Dual<f64, 1>, 1>;
    expmf64d1d2, expmf64d1d2_inplace => Dual<Dual<f64, 1>, 2>;
    expmf64d2d1, expmf64d2d1_inplace => Dual<Dual<f64, 2>, 1>;
    expmf64d2d2, expmf64d2d2_inplace => Dual<Dual<f64, 2>, 2>;
    expmf64d3d1, expmf64d3d1_inplace => Dual<Dual<f64, 3>, 1>;
    expmf64d3d2, expmf64d3d2_inplace => Dual<Dual<f64, 3>, 2>;
    expmf64d4d1, expmf64d4d1_inplace => Dual<Dual<f64, 4>, 1>;
    expmf64d4d2, expmf64d4d2_inplace => Dual<Dual<f64, 4>, 2>;
    expmf64d5d1, expmf64d5d1_inplace => Dual<Dual<f64, 5>, 1>;
    expmf64d5d2, expmf64d5d2_inplace => Dual<Dual<f64, 5>, 2>;
    expmf64d6d1, expmf64d6d1_inplace => Dual<Dual<f64, 6>, 1>;
    expmf64d6d2, expmf64d6d2_inplace => Dual<Dual<f64, 6>, 2>;
    expmf64d7d1, expmf64d7d1_inplace => Dual<Dual<f64, 7>, 1>;
    expmf64d7d2, expmf64d7d2_inplace => Dual<Dual<f64, 7>, 2>;
    expmf64d8d1, expmf64d8d1_inplace => Dual<Dual<f64, 8>, 1>;
    expmf64d8d2, expmf64d8d2_inplace => Dual<Dual<f64, 8>, 2>;
}
