use num_traits::{Float as _, Zero};

use crate::matrix::SquareMatrix;
use crate::scalar::Scalar;

/// Induced 1-norm (maximum absolute column sum) of the primal values.
///
/// Partials at every nesting level are ignored; the result is a plain float
/// usable for branching.
///
/// # Panics
///
/// Panics if the matrix is empty.
pub fn opnorm1<T: Scalar>(a: &SquareMatrix<T>) -> T::Float {
    let n = a.dim();
    assert!(n > 0, "opnorm1 of an empty matrix");
    let mut sums = [T::Float::zero(); crate::matrix::MAX_DIM];
    let data = a.as_slice();
    for row in data.chunks_exact(n) {
        for (s, x) in sums.iter_mut().zip(row.iter()) {
            *s = *s + x.value().abs();
        }
    }
    sums[..n]
        .iter()
        .copied()
        .fold(T::Float::zero(), |m, s| if s > m { s } else { m })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::Dual;

    #[test]
    fn column_sums_of_small_matrix() {
        let a = SquareMatrix::from_row_slice(2, &[1.0, -2.0, 3.0, 4.0]);
        assert_eq!(opnorm1(&a), 6.0);
    }

    #[test]
    fn single_entry() {
        let a = SquareMatrix::from_row_slice(1, &[-2.5_f64]);
        assert_eq!(opnorm1(&a), 2.5);
    }

    #[test]
    fn partials_do_not_contribute() {
        let a = SquareMatrix::from_row_slice(
            2,
            &[
                Dual::new(1.0, [100.0, -7.0]),
                Dual::new(-2.0, [0.0, 50.0]),
                Dual::new(3.0, [1e6, 1.0]),
                Dual::new(4.0, [-3.0, 3.0]),
            ],
        );
        assert_eq!(opnorm1(&a), 6.0);
    }

    #[test]
    fn nested_duals_reduce_to_f64() {
        type D = Dual<Dual<f64, 7>, 2>;
        let a = SquareMatrix::<D>::from_fn(3, |i, j| {
            let inner = Dual::new(i as f64 - j as f64, [9.0; 7]);
            Dual::new(inner, [Dual::constant(-4.0); 2])
        });
        let norm: f64 = opnorm1(&a);
        // columns: |0|+|1|+|2| = 3, |−1|+|0|+|1| = 2, |−2|+|−1|+|0| = 3
        assert_eq!(norm, 3.0);
    }
}
