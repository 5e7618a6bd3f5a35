use alloc::vec;
use core::ops::{Mul, Sub};

use crate::traits::{LinalgScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        // Column-oriented: C[:, j] += A[:, k] * B[k, j]
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                let a_col = &self.data[k * m..(k + 1) * m];
                let c_col = &mut data[j * m..(j + 1) * m];
                for (c, &a) in c_col.iter_mut().zip(a_col) {
                    *c = *c + a * b_kj;
                }
            }
        }
        DynMatrix {
            data,
            nrows: m,
            ncols: p,
        }
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn sub(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch in subtraction",
        );
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(&a, &b)| a - b)
            .collect();
        DynMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T: Scalar> DynMatrix<T> {
    /// Matrix-vector product `A * x`.
    ///
    /// ```
    /// use qrupdate::{DynMatrix, DynVector};
    /// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// let y = a.vecmul(&DynVector::from_slice(&[1.0, 1.0]));
    /// assert_eq!(y.as_slice(), &[3.0, 7.0]);
    /// ```
    pub fn vecmul(&self, x: &DynVector<T>) -> DynVector<T> {
        assert_eq!(x.len(), self.ncols, "vector length mismatch");
        let mut y = vec![T::zero(); self.nrows];
        for j in 0..self.ncols {
            let xj = x[j];
            for (yi, &aij) in y.iter_mut().zip(&self.data[j * self.nrows..]) {
                *yi = *yi + aij * xj;
            }
        }
        DynVector::from_vec(y)
    }
}

impl<T: LinalgScalar> DynMatrix<T> {
    /// Conjugate transpose `Aᴴ` (plain transpose for reals).
    ///
    /// ```
    /// use qrupdate::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.conj_transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn conj_transpose(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }

    /// Gram matrix `AᴴA`.
    pub fn gram(&self) -> Self {
        &self.conj_transpose() * self
    }

    /// Largest element modulus, `max |aᵢⱼ|`.
    pub fn norm_max(&self) -> T::Real {
        let mut m = <T::Real as num_traits::Zero>::zero();
        for &x in &self.data {
            let a = x.modulus();
            if a > m {
                m = a;
            }
        }
        m
    }
}
