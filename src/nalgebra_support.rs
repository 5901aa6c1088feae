//! nalgebra adapters for matexp.
//!
//! Thin wrappers accepting and returning `DMatrix<T>` for any scalar that is
//! both a matexp [`Scalar`] and a nalgebra scalar (plain floats and duals alike).

use nalgebra::DMatrix;

use crate::error::{check_dim, ExpmError, Result};
use crate::matrix::SquareMatrix;
use crate::scalar::Scalar;

fn to_square<T>(m: &DMatrix<T>) -> Result<SquareMatrix<T>>
where
    T: Scalar<Float = f64> + nalgebra::Scalar,
{
    if m.nrows() != m.ncols() {
        return Err(ExpmError::DimensionMismatch {
            expected: m.nrows(),
            actual: m.ncols(),
        });
    }
    check_dim(m.nrows())?;
    Ok(SquareMatrix::from_fn(m.nrows(), |i, j| m[(i, j)]))
}

/// Matrix exponential of a `DMatrix`, reporting bad shapes as errors.
pub fn try_expm_nalgebra<T>(m: &DMatrix<T>) -> Result<DMatrix<T>>
where
    T: Scalar<Float = f64> + nalgebra::Scalar,
{
    let e = crate::expm::try_expm(&to_square(m)?)?;
    Ok(DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| e[(i, j)]))
}

/// Matrix exponential of a `DMatrix`.
///
/// # Panics
///
/// Panics if `m` is not square or its dimension is outside `1..=MAX_DIM`.
pub fn expm_nalgebra<T>(m: &DMatrix<T>) -> DMatrix<T>
where
    T: Scalar<Float = f64> + nalgebra::Scalar,
{
    try_expm_nalgebra(m).unwrap_or_else(|e| panic!("expm_nalgebra: {}", e))
}
