use alloc::vec;
use num_traits::Zero;

use crate::backend::{axpy, copy, gemv, gemv_h, nrm2, trsv_upper, trsv_upper_h};
use crate::dynmatrix::DynVector;
use crate::traits::{LinalgScalar, MatrixRef};

use super::{report_refinement, UpdateSettings, Workspace};

/// Least-squares solve `min ‖A·x − b‖` by corrected semi-normal equations.
///
/// `x = R⁻¹R⁻ᴴAᴴb` followed by exactly one correction from the residual.
/// Returns `(x, b − A·x)`. `R` is only the triangular factor of `A`; `Q` is
/// never needed.
///
/// # Panics
///
/// If `b.len() != a.nrows()` or `r` is not `a.ncols()` square.
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::csne;
///
/// // A = [1; 1], R = [√2]
/// let a = DynMatrix::from_rows(2, 1, &[1.0_f64, 1.0]);
/// let r = DynMatrix::from_rows(1, 1, &[2.0_f64.sqrt()]);
/// let (x, res) = csne(&r, &a, &[1.0, 3.0]);
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((res[0] + 1.0).abs() < 1e-12);
/// assert!((res[1] - 1.0).abs() < 1e-12);
/// ```
pub fn csne<T: LinalgScalar>(
    r: &impl MatrixRef<T>,
    a: &impl MatrixRef<T>,
    b: &[T],
) -> (DynVector<T>, DynVector<T>) {
    let m = a.nrows();
    let n = a.ncols();
    assert_eq!(b.len(), m, "b has length {}, A has {} rows", b.len(), m);
    assert!(
        r.nrows() == n && r.ncols() == n,
        "R is {}x{}, expected {}x{}",
        r.nrows(),
        r.ncols(),
        n,
        n
    );
    let minus_one = T::zero() - T::one();

    let mut x = vec![T::zero(); n];
    gemv_h(T::one(), a, n, b, T::zero(), &mut x);
    trsv_upper_h(r, &mut x);
    trsv_upper(r, &mut x);

    let mut res = b.to_vec();
    gemv(minus_one, a, n, &x, T::one(), &mut res);

    let mut dx = vec![T::zero(); n];
    gemv_h(T::one(), a, n, &res, T::zero(), &mut dx);
    trsv_upper_h(r, &mut dx);
    trsv_upper(r, &mut dx);
    axpy(T::one(), &dx, &mut x);

    copy(b, &mut res);
    gemv(minus_one, a, n, &x, T::one(), &mut res);

    (DynVector::from_vec(x), DynVector::from_vec(res))
}

/// CSNE over the leading `n` columns of preallocated `a` and `r`, writing the
/// solution into `x` (length `n`) and the residual into the workspace
/// ([`Workspace::residual`]).
///
/// Corrections repeat while `‖Aᴴr‖/‖b‖ ≥ ortho_tol`, at most `ortho_max_it`
/// times. Returns the number of corrections applied. A zero `b` gives
/// `x = 0` and a zero residual without any work.
///
/// # Panics
///
/// If `b`, `x`, or the workspace do not fit the active dimensions.
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::{csne_in_place, UpdateSettings, Workspace};
///
/// let mut a = DynMatrix::zeros(2, 3, 0.0_f64);
/// a[(0, 0)] = 1.0;
/// a[(1, 0)] = 1.0;
/// let mut r = DynMatrix::zeros(3, 3, 0.0_f64);
/// r[(0, 0)] = 2.0_f64.sqrt();
/// let mut ws = Workspace::new(2, 3, 0.0);
/// let mut x = [0.0];
///
/// csne_in_place(&r, &a, &[1.0, 3.0], 1, &mut x, &mut ws, &UpdateSettings::default());
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((ws.residual()[1] - 1.0).abs() < 1e-12);
/// ```
pub fn csne_in_place<T: LinalgScalar>(
    r: &impl MatrixRef<T>,
    a: &impl MatrixRef<T>,
    b: &[T],
    n: usize,
    x: &mut [T],
    ws: &mut Workspace<T>,
    settings: &UpdateSettings<T::Real>,
) -> usize {
    let m = a.nrows();
    assert_eq!(b.len(), m, "b has length {}, A has {} rows", b.len(), m);
    assert_eq!(x.len(), n, "x has length {}, {} active columns", x.len(), n);
    assert!(
        n <= a.ncols() && n <= r.nrows() && n <= r.ncols(),
        "{} active columns exceed A ({} cols) or R ({}x{})",
        n,
        a.ncols(),
        r.nrows(),
        r.ncols()
    );
    ws.ensure(m, n);

    let Workspace { work, r: res, .. } = ws;
    let q = &mut work[..n];
    let res = &mut res[..];

    let bnorm = nrm2(b);
    if bnorm == <T::Real as Zero>::zero() {
        x.fill(T::zero());
        res.fill(T::zero());
        return 0;
    }
    let minus_one = T::zero() - T::one();

    gemv_h(T::one(), a, n, b, T::zero(), x);
    trsv_upper_h(r, x);
    trsv_upper(r, x);
    copy(b, res);
    gemv(minus_one, a, n, x, T::one(), res);

    let mut passes = 0;
    let err = loop {
        gemv_h(T::one(), a, n, res, T::zero(), q);
        let err = nrm2(q) / bnorm;
        if err < settings.ortho_tol || passes == settings.ortho_max_it {
            break err;
        }
        passes += 1;
        trsv_upper_h(r, q);
        trsv_upper(r, q);
        axpy(T::one(), q, x);
        copy(b, res);
        gemv(minus_one, a, n, x, T::one(), res);
    };

    report_refinement(settings, "csne", n, passes, err);
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynMatrix;

    fn line_fit() -> (DynMatrix<f64>, DynMatrix<f64>, [f64; 4]) {
        // Columns [1, t] at t = 0..3; R from the Cholesky factor of AᵀA = [[4, 6], [6, 14]].
        let a = DynMatrix::from_rows(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let r = DynMatrix::from_rows(2, 2, &[2.0, 3.0, 0.0, 5.0_f64.sqrt()]);
        (a, r, [1.0, 2.9, 5.1, 7.0])
    }

    #[test]
    fn line_fit_normal_equations() {
        let (a, r, b) = line_fit();
        let (x, res) = csne(&r, &a, &b);
        // Intercept and slope of the ordinary least-squares line.
        assert!((x[0] - 0.97).abs() < 1e-12, "intercept {}", x[0]);
        assert!((x[1] - 2.02).abs() < 1e-12, "slope {}", x[1]);
        let at_r = a.conj_transpose().vecmul(&res);
        assert!(at_r.norm() < 1e-12);
    }

    #[test]
    fn in_place_agrees_with_value() {
        let (a, r, b) = line_fit();
        let (x_ref, res_ref) = csne(&r, &a, &b);

        let mut abuf = DynMatrix::zeros(4, 5, 0.0_f64);
        let mut rbuf = DynMatrix::zeros(5, 5, 0.0_f64);
        for j in 0..2 {
            abuf.set_col(j, a.col(j).as_slice());
            for i in 0..=j {
                rbuf[(i, j)] = r[(i, j)];
            }
        }
        let mut ws = Workspace::new(4, 5, 0.0);
        let mut x = [0.0; 2];
        csne_in_place(&rbuf, &abuf, &b, 2, &mut x, &mut ws, &UpdateSettings::default());
        for i in 0..2 {
            assert!((x[i] - x_ref[i]).abs() < 1e-12);
        }
        for i in 0..4 {
            assert!((ws.residual()[i] - res_ref[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_rhs() {
        let (a, r, _) = line_fit();
        let mut ws = Workspace::new(4, 2, 0.0);
        let mut x = [9.0; 2];
        let passes = csne_in_place(&r, &a, &[0.0; 4], 2, &mut x, &mut ws, &UpdateSettings::default());
        assert_eq!(passes, 0);
        assert_eq!(x, [0.0, 0.0]);
        assert!(ws.residual().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn refinement_cap_is_respected() {
        let (a, r, b) = line_fit();
        let mut ws = Workspace::new(4, 2, 0.0);
        let mut x = [0.0; 2];
        let settings = UpdateSettings { ortho_tol: 0.0, ortho_max_it: 4, ..UpdateSettings::default() };
        let passes = csne_in_place(&r, &a, &b, 2, &mut x, &mut ws, &settings);
        assert_eq!(passes, 4);
        assert!((x[1] - 2.02).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "workspace capacity")]
    fn workspace_too_small() {
        let (a, r, b) = line_fit();
        let mut ws = Workspace::new(4, 1, 0.0);
        let mut x = [0.0; 2];
        csne_in_place(&r, &a, &b, 2, &mut x, &mut ws, &UpdateSettings::default());
    }
}
