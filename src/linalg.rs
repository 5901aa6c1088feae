use num_traits::{Float as _, Zero};

use crate::error::{ExpmError, Result};
use crate::matrix::{SquareMatrix, MAX_DIM};
use crate::scalar::Scalar;

/// Result of LU factorization with partial pivoting.
///
/// Stores the combined L/U factors in a single matrix (L below diagonal,
/// U on and above diagonal) plus the pivot sequence.
pub struct LuFactors<T> {
    /// Combined L/U matrix: L is below the diagonal (unit diagonal implicit),
    /// U is on and above the diagonal.
    lu: SquareMatrix<T>,
    /// Row `col` was exchanged with row `pivots[col]` at elimination step `col`.
    pivots: [usize; MAX_DIM],
}

/// Factorize a square matrix in place via LU decomposition with partial pivoting.
///
/// Pivots are chosen by the magnitude of the primal value, so the pivot
/// sequence is the same for a dual matrix as for its primal part.
/// Returns `None` if a pivot column is entirely zero or non-finite.
// Explicit indexing is clearer for pivoted LU: row/col indices drive pivot search and elimination
#[allow(clippy::needless_range_loop)]
pub fn lu_factor<T: Scalar>(mut lu: SquareMatrix<T>) -> Option<LuFactors<T>> {
    let n = lu.dim();
    let mut pivots = [0; MAX_DIM];

    for col in 0..n {
        // Find pivot
        let mut max_val = lu[(col, col)].value().abs();
        let mut max_row = col;
        for row in (col + 1)..n {
            let v = lu[(row, col)].value().abs();
            if v > max_val {
                max_val = v;
                max_row = row;
            }
        }

        if !(max_val > T::Float::zero()) || !max_val.is_finite() {
            return None; // Singular
        }

        pivots[col] = max_row;
        lu.swap_rows(col, max_row);

        let pivot = lu[(col, col)];

        // Eliminate below, storing L factors in-place
        for row in (col + 1)..n {
            let factor = lu[(row, col)] / pivot;
            lu[(row, col)] = factor;
            for j in (col + 1)..n {
                let val = lu[(col, j)];
                lu[(row, j)] -= factor * val;
            }
        }
    }

    Some(LuFactors { lu, pivots })
}

impl<T: Scalar> LuFactors<T> {
    pub fn dim(&self) -> usize {
        self.lu.dim()
    }

    /// Overwrite `b` with `A⁻¹ b`, treating each column of `b` as a right-hand side.
    #[allow(clippy::needless_range_loop)]
    pub fn solve_in_place(&self, b: &mut SquareMatrix<T>) {
        let n = self.dim();
        assert_eq!(b.dim(), n, "right-hand side dimension mismatch");

        // Replay the row exchanges in elimination order
        for (col, &row) in self.pivots[..n].iter().enumerate() {
            b.swap_rows(col, row);
        }

        for c in 0..n {
            // Forward substitution, L has unit diagonal
            for i in 1..n {
                let mut sum = b[(i, c)];
                for j in 0..i {
                    sum -= self.lu[(i, j)] * b[(j, c)];
                }
                b[(i, c)] = sum;
            }
            // Back substitution
            for i in (0..n).rev() {
                let mut sum = b[(i, c)];
                for j in (i + 1)..n {
                    sum -= self.lu[(i, j)] * b[(j, c)];
                }
                b[(i, c)] = sum / self.lu[(i, i)];
            }
        }
    }
}

/// Left division: overwrite `v` with `u⁻¹ v`, consuming `u` as LU workspace.
pub fn ldiv<T: Scalar>(u: SquareMatrix<T>, v: &mut SquareMatrix<T>) -> Result<()> {
    if u.dim() != v.dim() {
        return Err(ExpmError::DimensionMismatch {
            expected: u.dim(),
            actual: v.dim(),
        });
    }
    let factors = lu_factor(u).ok_or(ExpmError::SingularDenominator)?;
    factors.solve_in_place(v);
    Ok(())
}
