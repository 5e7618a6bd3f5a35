use alloc::vec;
use num_traits::Zero;

use crate::backend::nrm2;
use crate::dynmatrix::{DynMatrix, DynVector};
use crate::traits::LinalgScalar;

use super::{
    csne_in_place, qraddcol_in_place, qrdelcol_in_place, UpdateError, UpdateSettings, Workspace,
};

/// A factorization session: preallocated `A` (`m × n_max`), `R`
/// (`n_max × n_max`), the active column count and the workspace, bundled.
///
/// Checks its inputs and reports misuse as [`UpdateError`] instead of
/// panicking, then drives the in-place kernels. Never allocates after
/// construction except for the solution vector returned by [`solve`](Self::solve).
///
/// ```
/// use qrupdate::update::IncrementalQr;
///
/// let mut qr = IncrementalQr::with_capacity(3, 2, 0.0_f64);
/// qr.add_column(&[1.0, 1.0, 0.0]).unwrap();
/// qr.add_column(&[0.0, 1.0, 1.0]).unwrap();
///
/// let x = qr.solve(&[1.0, 2.0, 1.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
///
/// qr.delete_column(0).unwrap();
/// assert_eq!(qr.active_cols(), 1);
/// assert!((qr.r_active()[(0, 0)] - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalQr<T: LinalgScalar> {
    a: DynMatrix<T>,
    r: DynMatrix<T>,
    n: usize,
    ws: Workspace<T>,
    settings: UpdateSettings<T::Real>,
}

impl<T: LinalgScalar> IncrementalQr<T> {
    /// Empty session for `m`-row columns, up to `n_max` of them, default settings.
    ///
    /// The `zero` parameter only fixes the element type.
    pub fn with_capacity(m: usize, n_max: usize, zero: T) -> Self {
        Self::with_settings(m, n_max, zero, UpdateSettings::default())
    }

    /// Empty session with explicit settings.
    pub fn with_settings(m: usize, n_max: usize, zero: T, settings: UpdateSettings<T::Real>) -> Self {
        Self {
            a: DynMatrix::zeros(m, n_max, zero),
            r: DynMatrix::zeros(n_max, n_max, zero),
            n: 0,
            ws: Workspace::new(m, n_max, zero),
            settings,
        }
    }

    /// Append a column. Returns the refinement pass count.
    pub fn add_column(&mut self, col: &[T]) -> Result<usize, UpdateError> {
        if col.len() != self.nrows() {
            return Err(UpdateError::DimensionMismatch {
                expected: self.nrows(),
                got: col.len(),
            });
        }
        if self.n == self.capacity() {
            return Err(UpdateError::CapacityExceeded);
        }
        if nrm2(col) == <T::Real as Zero>::zero() {
            return Err(UpdateError::ZeroColumn);
        }

        let passes = qraddcol_in_place(
            &mut self.a,
            &mut self.r,
            col,
            self.n,
            &mut self.ws,
            &self.settings,
            true,
        );
        self.n += 1;
        Ok(passes)
    }

    /// Remove active column `k` (0-based); later columns move down by one.
    pub fn delete_column(&mut self, k: usize) -> Result<(), UpdateError> {
        if k >= self.n {
            return Err(UpdateError::IndexOutOfRange {
                index: k,
                len: self.n,
            });
        }
        qrdelcol_in_place(&mut self.a, &mut self.r, k, self.n);
        self.n -= 1;
        Ok(())
    }

    /// Least-squares solution over the active columns. The residual is
    /// available from [`residual`](Self::residual) afterwards.
    pub fn solve(&mut self, b: &[T]) -> Result<DynVector<T>, UpdateError> {
        if b.len() != self.nrows() {
            return Err(UpdateError::DimensionMismatch {
                expected: self.nrows(),
                got: b.len(),
            });
        }
        if self.n == 0 {
            return Err(UpdateError::Empty);
        }

        let mut x = vec![T::zero(); self.n];
        csne_in_place(
            &self.r,
            &self.a,
            b,
            self.n,
            &mut x,
            &mut self.ws,
            &self.settings,
        );
        Ok(DynVector::from_vec(x))
    }

    /// Residual `b − A·x` of the last [`solve`](Self::solve) or `a − A·z` of
    /// the last [`add_column`](Self::add_column).
    #[inline]
    pub fn residual(&self) -> &[T] {
        self.ws.residual()
    }

    /// Copy of the active `N×N` factor.
    pub fn r_active(&self) -> DynMatrix<T> {
        self.r.top_left(self.n, self.n)
    }

    /// Copy of the active `m×N` columns.
    pub fn a_active(&self) -> DynMatrix<T> {
        self.a.top_left(self.nrows(), self.n)
    }

    /// Full `n_max × n_max` factor buffer.
    #[inline]
    pub fn r(&self) -> &DynMatrix<T> {
        &self.r
    }

    #[inline]
    pub fn active_cols(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.r.ncols()
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.a.nrows()
    }

    #[inline]
    pub fn settings(&self) -> &UpdateSettings<T::Real> {
        &self.settings
    }

    /// Drop every column, keeping the allocations.
    pub fn clear(&mut self) {
        self.a.as_mut_slice().fill(T::zero());
        self.r.as_mut_slice().fill(T::zero());
        self.n = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors() {
        let mut qr = IncrementalQr::with_capacity(2, 1, 0.0_f64);
        assert_eq!(
            qr.add_column(&[1.0]),
            Err(UpdateError::DimensionMismatch { expected: 2, got: 1 })
        );
        assert_eq!(qr.add_column(&[0.0, 0.0]), Err(UpdateError::ZeroColumn));
        assert_eq!(qr.solve(&[1.0, 0.0]).unwrap_err(), UpdateError::Empty);
        assert_eq!(
            qr.delete_column(0),
            Err(UpdateError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(qr.add_column(&[1.0, 0.0]), Ok(0));
        assert_eq!(qr.add_column(&[0.0, 1.0]), Err(UpdateError::CapacityExceeded));
        assert_eq!(qr.active_cols(), 1);
    }

    #[test]
    fn clear_resets() {
        let mut qr = IncrementalQr::with_capacity(2, 2, 0.0_f64);
        qr.add_column(&[3.0, 4.0]).unwrap();
        qr.clear();
        assert_eq!(qr.active_cols(), 0);
        assert!(qr.r().as_slice().iter().all(|&v| v == 0.0));
        qr.add_column(&[0.0, 2.0]).unwrap();
        assert_eq!(qr.r_active()[(0, 0)], 2.0);
    }
}
