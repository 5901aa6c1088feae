#![allow(dead_code)]

use matexp::{opnorm1, Dual, Scalar, SquareMatrix};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform [-2, 2] draws at every nesting level, partials included.
pub trait RandomScalar: Scalar<Float = f64> {
    fn random(rng: &mut StdRng) -> Self;
}

impl RandomScalar for f64 {
    fn random(rng: &mut StdRng) -> Self {
        rng.random_range(-2.0..2.0)
    }
}

impl<T: RandomScalar, const N: usize> RandomScalar for Dual<T, N> {
    fn random(rng: &mut StdRng) -> Self {
        let re = T::random(rng);
        Dual::new(re, std::array::from_fn(|_| T::random(rng)))
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_matrix<T: RandomScalar>(rng: &mut StdRng, n: usize) -> SquareMatrix<T> {
    SquareMatrix::from_fn(n, |_, _| T::random(rng))
}

/// Random `f64` matrix rescaled so that its 1-norm is exactly-ish `norm`.
pub fn random_with_norm(rng: &mut StdRng, n: usize, norm: f64) -> SquareMatrix<f64> {
    let mut a: SquareMatrix<f64> = random_matrix(rng, n);
    let current = opnorm1(&a);
    a.scale_mut(norm / current);
    a
}

/// Random skew-symmetric matrix scaled to the given 1-norm; its exponential is orthogonal.
pub fn random_skew(rng: &mut StdRng, n: usize, norm: f64) -> SquareMatrix<f64> {
    let m: SquareMatrix<f64> = random_matrix(rng, n);
    let mut s = SquareMatrix::from_fn(n, |i, j| m[(i, j)] - m[(j, i)]);
    let current = opnorm1(&s);
    s.scale_mut(norm / current);
    s
}

pub fn max_abs(a: &SquareMatrix<f64>) -> f64 {
    a.as_slice().iter().fold(0.0, |m, x| m.max(x.abs()))
}

pub fn max_abs_diff(a: &SquareMatrix<f64>, b: &SquareMatrix<f64>) -> f64 {
    assert_eq!(a.dim(), b.dim());
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .fold(0.0, |m, (x, y)| m.max((x - y).abs()))
}

pub fn transpose(a: &SquareMatrix<f64>) -> SquareMatrix<f64> {
    SquareMatrix::from_fn(a.dim(), |i, j| a[(j, i)])
}

/// Independent oracle: 30-term Taylor series on `A / 2^k` with `|A / 2^k|_1 <= 1/4`,
/// followed by `k` squarings.
pub fn reference_expm(a: &SquareMatrix<f64>) -> SquareMatrix<f64> {
    let n = a.dim();
    let norm = opnorm1(a);
    let mut scale = 1.0;
    let mut k = 0;
    while norm * scale > 0.25 {
        scale *= 0.5;
        k += 1;
    }
    let mut b = a.clone();
    b.scale_mut(scale);

    let mut term = SquareMatrix::identity(n);
    let mut sum = SquareMatrix::identity(n);
    for j in 1..=30 {
        term = term.matmul(&b);
        term.scale_mut(1.0 / j as f64);
        sum.axpy(1.0, &term);
    }
    for _ in 0..k {
        sum = sum.matmul(&sum);
    }
    sum
}

/// Perturb `a` by `t * e`.
pub fn shifted(a: &SquareMatrix<f64>, e: &SquareMatrix<f64>, t: f64) -> SquareMatrix<f64> {
    let mut out = a.clone();
    out.axpy(t, e);
    out
}
