use crate::dual::Dual;
use crate::expm::expm;
use crate::matrix::SquareMatrix;

/// Tangent lanes seeded per pass in [`expm_jacobian`].
const JACOBIAN_LANES: usize = 8;

/// Directional (Fréchet) derivative of the exponential: `(exp(A), L(A, E))`.
///
/// `L(A, E) = d/dt exp(A + tE)` at `t = 0`, computed in one forward pass.
///
/// ```
/// use matexp::{expm_frechet, SquareMatrix};
///
/// // For a 1x1 matrix L(a, e) = exp(a) · e.
/// let a = SquareMatrix::from_row_slice(1, &[0.5]);
/// let e = SquareMatrix::from_row_slice(1, &[2.0]);
/// let (value, tangent) = expm_frechet(&a, &e);
/// assert!((value[(0, 0)] - 0.5_f64.exp()).abs() < 1e-14);
/// assert!((tangent[(0, 0)] - 2.0 * 0.5_f64.exp()).abs() < 1e-14);
/// ```
pub fn expm_frechet(
    a: &SquareMatrix<f64>,
    e: &SquareMatrix<f64>,
) -> (SquareMatrix<f64>, SquareMatrix<f64>) {
    assert_eq!(a.dim(), e.dim(), "a and e must have the same dimension");
    let seeded = SquareMatrix::from_fn(a.dim(), |i, j| Dual::new(a[(i, j)], [e[(i, j)]]));
    let x = expm(&seeded);
    (x.map(|d| d.re), x.map(|d| d.eps[0]))
}

/// Compute `exp(A)` and its derivative with respect to every entry of `A`.
///
/// Returns `(exp(A), J)` where `J[i * n + j] = ∂exp(A)/∂a_ij`. Entries are
/// seeded eight at a time, so this takes `ceil(n² / 8)` forward passes.
pub fn expm_jacobian(a: &SquareMatrix<f64>) -> (SquareMatrix<f64>, Vec<SquareMatrix<f64>>) {
    let n = a.dim();
    let m = n * n;
    let mut value = SquareMatrix::zeros(n);
    let mut jac = Vec::with_capacity(m);

    for start in (0..m).step_by(JACOBIAN_LANES) {
        let seeded = SquareMatrix::from_fn(n, |i, j| {
            let k = i * n + j;
            if (start..start + JACOBIAN_LANES).contains(&k) {
                Dual::<f64, JACOBIAN_LANES>::with_tangent(a[(i, j)], k - start)
            } else {
                Dual::constant(a[(i, j)])
            }
        });
        let x = expm(&seeded);
        if start == 0 {
            value = x.map(|d| d.re);
        }
        for lane in 0..JACOBIAN_LANES.min(m - start) {
            jac.push(x.map(|d| d.eps[lane]));
        }
    }

    (value, jac)
}

/// Value, both first directional derivatives and the mixed second derivative
/// of `exp(A + sE₁ + tE₂)` at `s = t = 0`.
#[derive(Clone, Debug)]
pub struct SecondOrder {
    pub value: SquareMatrix<f64>,
    /// `∂/∂s`, i.e. `L(A, E₁)`.
    pub d1: SquareMatrix<f64>,
    /// `∂/∂t`, i.e. `L(A, E₂)`.
    pub d2: SquareMatrix<f64>,
    /// `∂²/∂s∂t`.
    pub d12: SquareMatrix<f64>,
}

/// Second-order directional derivatives through `Dual<Dual<f64, 1>, 1>`.
///
/// The outer lane carries `E₁`, the inner lane `E₂`.
pub fn expm_second_directional(
    a: &SquareMatrix<f64>,
    e1: &SquareMatrix<f64>,
    e2: &SquareMatrix<f64>,
) -> SecondOrder {
    assert_eq!(a.dim(), e1.dim(), "a and e1 must have the same dimension");
    assert_eq!(a.dim(), e2.dim(), "a and e2 must have the same dimension");
    let seeded = SquareMatrix::from_fn(a.dim(), |i, j| {
        Dual::new(
            Dual::new(a[(i, j)], [e2[(i, j)]]),
            [Dual::constant(e1[(i, j)])],
        )
    });
    let x = expm(&seeded);
    SecondOrder {
        value: x.map(|d| d.re.re),
        d1: x.map(|d| d.eps[0].re),
        d2: x.map(|d| d.re.eps[0]),
        d12: x.map(|d| d.eps[0].eps[0]),
    }
}
