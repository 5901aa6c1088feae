//! Small dense square matrices over any [`Scalar`].
//!
//! [`SquareMatrix`] is the storage the exponential works on: row-major, with a
//! runtime dimension bounded by [`MAX_DIM`]. [`PingPong`] pairs two of them for
//! the multiply-accumulate loops that alternate source and destination.

use std::ops::{Index, IndexMut, Mul};

use crate::scalar::Scalar;

/// Largest supported dimension.
pub const MAX_DIM: usize = 16;

#[inline]
fn assert_dim(n: usize) {
    assert!(n > 0, "matrix dimension must be positive");
    assert!(
        n <= MAX_DIM,
        "matrix dimension ({}) exceeds MAX_DIM ({})",
        n,
        MAX_DIM
    );
}

/// Dense `n x n` matrix stored row-major.
///
/// Equality is inherited from the entries, so for duals it compares primal values only.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T: Scalar> SquareMatrix<T> {
    /// The `n x n` zero matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0` or `n > MAX_DIM`.
    pub fn zeros(n: usize) -> Self {
        assert_dim(n);
        SquareMatrix {
            n,
            data: vec![T::zero(); n * n],
        }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        m.add_diag(<T::Float as num_traits::One>::one());
        m
    }

    /// Copy a row-major slice of length `n * n`.
    ///
    /// # Panics
    ///
    /// Panics if the slice length is not `n * n` or `n` is out of range.
    pub fn from_row_slice(n: usize, data: &[T]) -> Self {
        assert_dim(n);
        assert_eq!(
            data.len(),
            n * n,
            "slice of length {} does not hold a {}x{} matrix",
            data.len(),
            n,
            n
        );
        SquareMatrix {
            n,
            data: data.to_vec(),
        }
    }

    /// Build a matrix from `f(row, col)`.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert_dim(n);
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                data.push(f(i, j));
            }
        }
        SquareMatrix { n, data }
    }

    /// Logical dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Row-major entries.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Write the row-major entries into `out`, which must have length `n * n`.
    pub fn copy_to_slice(&self, out: &mut [T]) {
        assert_eq!(out.len(), self.data.len(), "output slice length mismatch");
        out.copy_from_slice(&self.data);
    }

    /// Apply `f` to every entry, producing a matrix over another scalar type.
    pub fn map<U: Scalar>(&self, f: impl FnMut(&T) -> U) -> SquareMatrix<U> {
        SquareMatrix {
            n: self.n,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// `self = a * b`.
    ///
    /// # Panics
    ///
    /// Panics if the three dimensions differ.
    pub fn matmul_into(&mut self, a: &Self, b: &Self) {
        let n = self.n;
        assert_eq!(a.n, n, "left operand dimension mismatch");
        assert_eq!(b.n, n, "right operand dimension mismatch");
        for i in 0..n {
            let a_row = &a.data[i * n..(i + 1) * n];
            for j in 0..n {
                let mut acc = T::zero();
                for (k, &a_ik) in a_row.iter().enumerate() {
                    acc += a_ik * b.data[k * n + j];
                }
                self.data[i * n + j] = acc;
            }
        }
    }

    /// `self * rhs` into a fresh matrix.
    pub fn matmul(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros(self.n);
        out.matmul_into(self, rhs);
        out
    }

    /// `self *= k`.
    pub fn scale_mut(&mut self, k: T::Float) {
        for x in &mut self.data {
            *x = x.scale(k);
        }
    }

    /// `self += k * I`.
    pub fn add_diag(&mut self, k: T::Float) {
        let c = T::from_f(k);
        for i in 0..self.n {
            self.data[i * self.n + i] += c;
        }
    }

    /// `self += k * x`.
    pub fn axpy(&mut self, k: T::Float, x: &Self) {
        assert_eq!(x.n, self.n, "axpy dimension mismatch");
        for (y, &xi) in self.data.iter_mut().zip(x.data.iter()) {
            *y += xi.scale(k);
        }
    }

    /// `self = k * x`.
    pub fn assign_scaled(&mut self, k: T::Float, x: &Self) {
        assert_eq!(x.n, self.n, "assign dimension mismatch");
        for (y, &xi) in self.data.iter_mut().zip(x.data.iter()) {
            *y = xi.scale(k);
        }
    }

    /// `self = k * I`.
    pub fn assign_scaled_identity(&mut self, k: T::Float) {
        self.data.fill(T::zero());
        self.add_diag(k);
    }

    /// Exchange rows `r1` and `r2`.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        let n = self.n;
        for j in 0..n {
            self.data.swap(r1 * n + j, r2 * n + j);
        }
    }
}

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.n && col < self.n, "index out of bounds");
        &self.data[row * self.n + col]
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.n && col < self.n, "index out of bounds");
        &mut self.data[row * self.n + col]
    }
}

impl<T: Scalar> Mul for &SquareMatrix<T> {
    type Output = SquareMatrix<T>;
    #[inline]
    fn mul(self, rhs: &SquareMatrix<T>) -> SquareMatrix<T> {
        self.matmul(rhs)
    }
}

/// Two equally sized buffers used as current result and scratch.
///
/// Which physical slot is current is determined solely by the parity of the
/// swap counter: slot `swaps % 2` holds the latest result.
#[derive(Clone, Debug)]
pub struct PingPong<T> {
    bufs: [SquareMatrix<T>; 2],
    swaps: u32,
}

impl<T: Scalar> PingPong<T> {
    pub fn new(n: usize) -> Self {
        PingPong {
            bufs: [SquareMatrix::zeros(n), SquareMatrix::zeros(n)],
            swaps: 0,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.bufs[0].n
    }

    #[inline]
    fn current_slot(&self) -> usize {
        (self.swaps & 1) as usize
    }

    /// Number of swaps performed so far.
    #[inline]
    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    #[inline]
    pub fn current(&self) -> &SquareMatrix<T> {
        &self.bufs[self.current_slot()]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut SquareMatrix<T> {
        let slot = self.current_slot();
        &mut self.bufs[slot]
    }

    /// Borrow the current buffer for reading and the scratch buffer for writing.
    #[inline]
    pub fn split_mut(&mut self) -> (&SquareMatrix<T>, &mut SquareMatrix<T>) {
        let (first, second) = self.bufs.split_at_mut(1);
        if self.swaps & 1 == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// Promote the scratch buffer to current.
    #[inline]
    pub fn swap(&mut self) {
        self.swaps += 1;
    }

    pub fn into_current(self) -> SquareMatrix<T> {
        let slot = self.current_slot();
        let [a, b] = self.bufs;
        if slot == 0 {
            a
        } else {
            b
        }
    }
}
