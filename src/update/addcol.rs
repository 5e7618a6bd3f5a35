use alloc::vec;
use num_traits::{Float, Zero};

use crate::backend::{axpy, copy, gemv, gemv_h, nrm2, trsv_upper, trsv_upper_h};
use crate::dynmatrix::DynMatrix;
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

use super::{report_refinement, UpdateSettings, Workspace};

/// Append column `col` to the factorization `RᴴR = AᴴA + β²I` and return the
/// enlarged `(n+1)×(n+1)` factor.
///
/// `a` is `m×n` and `r` its `n×n` upper-triangular factor (only the upper
/// triangle is read). Uses [`UpdateSettings::default`]; see [`qraddcol_with`].
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::qraddcol;
///
/// let a = DynMatrix::zeros(3, 0, 0.0_f64);
/// let r = DynMatrix::zeros(0, 0, 0.0_f64);
/// let r = qraddcol(&a, &r, &[3.0, 0.0, 4.0], 0.0);
/// assert_eq!(r.nrows(), 1);
/// assert!((r[(0, 0)] - 5.0).abs() < 1e-12);
/// ```
pub fn qraddcol<T: LinalgScalar>(
    a: &impl MatrixRef<T>,
    r: &impl MatrixRef<T>,
    col: &[T],
    beta: T::Real,
) -> DynMatrix<T> {
    qraddcol_with(a, r, col, beta, &UpdateSettings::default())
}

/// [`qraddcol`] with explicit settings.
///
/// The new column of `R` is `u = R⁻ᴴAᴴa` with diagonal
/// `γ = √(‖a‖² + β² − ‖u‖²)` when that difference exceeds
/// `independence_ratio · (‖a‖² + β²)`. Otherwise one step of
/// Björck-style refinement recomputes `γ` from the explicit residual
/// `a − A·R⁻¹u`, which stays accurate when `a` is nearly dependent on the
/// columns of `A`.
///
/// # Panics
///
/// If `col.len() != a.nrows()`, if `r` is not `a.ncols()` square, or if
/// `‖a‖² + β²` is zero.
pub fn qraddcol_with<T: LinalgScalar>(
    a: &impl MatrixRef<T>,
    r: &impl MatrixRef<T>,
    col: &[T],
    beta: T::Real,
    settings: &UpdateSettings<T::Real>,
) -> DynMatrix<T> {
    let m = a.nrows();
    let n = a.ncols();
    assert_eq!(col.len(), m, "new column has length {}, A has {} rows", col.len(), m);
    assert!(
        r.nrows() == n && r.ncols() == n,
        "R is {}x{}, expected {}x{}",
        r.nrows(),
        r.ncols(),
        n,
        n
    );

    let zero = <T::Real as Zero>::zero();
    let beta2 = beta * beta;
    let col_norm = nrm2(col);
    let anorm2 = col_norm * col_norm + beta2;
    assert!(anorm2 > zero, "new column must be nonzero");

    if n == 0 {
        return DynMatrix::from_fn(1, 1, |_, _| T::from_real(anorm2.sqrt()));
    }

    // c = Aᴴa, u = R⁻ᴴc
    let mut u = vec![T::zero(); n];
    gemv_h(T::one(), a, n, col, T::zero(), &mut u);
    trsv_upper_h(r, &mut u);
    let unorm = nrm2(&u);
    let d2 = anorm2 - unorm * unorm;

    let gamma = if d2 > settings.independence_ratio * anorm2 {
        d2.sqrt()
    } else {
        // z = R⁻¹u, res = a − A·z
        let mut z = u.clone();
        trsv_upper(r, &mut z);
        let mut res = col.to_vec();
        gemv(T::zero() - T::one(), a, n, &z, T::one(), &mut res);

        // du = R⁻ᴴ(Aᴴres − β²z), dz = R⁻¹du
        let mut du = vec![T::zero(); n];
        gemv_h(T::one(), a, n, &res, T::zero(), &mut du);
        if beta != zero {
            axpy(T::from_real(zero - beta2), &z, &mut du);
        }
        trsv_upper_h(r, &mut du);
        let mut dz = du.clone();
        trsv_upper(r, &mut dz);
        axpy(T::one(), &dz, &mut z);
        axpy(T::one(), &du, &mut u);

        copy(col, &mut res);
        gemv(T::zero() - T::one(), a, n, &z, T::one(), &mut res);
        let g = nrm2(&res);
        if beta != zero {
            let znorm = nrm2(&z);
            (g * g + beta2 * znorm * znorm + beta2).sqrt()
        } else {
            g
        }
    };

    DynMatrix::from_fn(n + 1, n + 1, |i, j| {
        if j < n {
            if i <= j {
                *r.get(i, j)
            } else {
                T::zero()
            }
        } else if i < n {
            u[i]
        } else {
            T::from_real(gamma)
        }
    })
}

/// Append column `col` to a preallocated factorization without allocating.
///
/// `a` (`m × n_max`) and `r` (`n_max × n_max`) hold `n` active columns. On
/// return column `n` of `r` holds the new factor column and, if `update_mat`
/// is set, column `n` of `a` holds `col`. Incrementing `n` is up to the caller.
///
/// The projection `u = R⁻ᴴAᴴa`, `z = R⁻¹u` is accepted as-is when the
/// residual `a − A·z` satisfies `‖Aᴴr‖/‖a‖ < ortho_tol`. Otherwise up to
/// `ortho_max_it` correction passes are run, followed by one last correction
/// of `u` from the final residual. Returns the number of correction passes
/// (zero on the single-pass path). Running out of passes is not an error.
///
/// # Panics
///
/// If `col` has the wrong length or is zero, if `r` (or `a`, with
/// `update_mat`) has no free column, or if `ws` is too small.
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::{qraddcol_in_place, UpdateSettings, Workspace};
///
/// let mut a = DynMatrix::zeros(3, 2, 0.0_f64);
/// let mut r = DynMatrix::zeros(2, 2, 0.0_f64);
/// let mut ws = Workspace::new(3, 2, 0.0);
/// let settings = UpdateSettings::default();
///
/// qraddcol_in_place(&mut a, &mut r, &[3.0, 4.0, 0.0], 0, &mut ws, &settings, true);
/// let passes = qraddcol_in_place(&mut a, &mut r, &[0.0, 0.0, 2.0], 1, &mut ws, &settings, true);
/// assert_eq!(passes, 0);
/// assert!((r[(0, 0)] - 5.0).abs() < 1e-12);
/// assert!(r[(0, 1)].abs() < 1e-12);
/// assert!((r[(1, 1)] - 2.0).abs() < 1e-12);
/// ```
pub fn qraddcol_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    r: &mut impl MatrixMut<T>,
    col: &[T],
    n: usize,
    ws: &mut Workspace<T>,
    settings: &UpdateSettings<T::Real>,
    update_mat: bool,
) -> usize {
    let m = a.nrows();
    assert_eq!(col.len(), m, "new column has length {}, A has {} rows", col.len(), m);
    assert!(
        n < r.nrows() && n < r.ncols(),
        "R capacity {}x{} exhausted at {} active columns",
        r.nrows(),
        r.ncols(),
        n
    );
    if update_mat {
        assert!(n < a.ncols(), "A capacity {} exhausted", a.ncols());
    } else {
        assert!(n <= a.ncols(), "A has {} columns, {} active", a.ncols(), n);
    }
    ws.ensure(m, n);

    let anorm = nrm2(col);
    assert!(anorm > <T::Real as Zero>::zero(), "new column must be nonzero");

    if n == 0 {
        *r.get_mut(0, 0) = T::from_real(anorm);
        if update_mat {
            a.col_as_mut_slice(0, 0).copy_from_slice(col);
        }
        return 0;
    }

    let minus_one = T::zero() - T::one();
    let Workspace {
        work,
        work2,
        u,
        z,
        r: res,
    } = ws;
    let c = &mut work[..n];
    let dz = &mut work2[..n];
    let u = &mut u[..n];
    let z = &mut z[..n];
    let res = &mut res[..];

    // u = R⁻ᴴAᴴa, z = R⁻¹u, res = a − A·z
    gemv_h(T::one(), &*a, n, col, T::zero(), u);
    trsv_upper_h(&*r, u);
    copy(u, z);
    trsv_upper(&*r, z);
    copy(col, res);
    gemv(minus_one, &*a, n, z, T::one(), res);
    let mut gamma = nrm2(res);
    gemv_h(T::one(), &*a, n, res, T::zero(), c);
    let mut err = nrm2(c) / anorm;

    let mut passes = 0;
    if !(err < settings.ortho_tol) {
        while passes < settings.ortho_max_it {
            passes += 1;
            // c ← du = R⁻ᴴAᴴres, dz = R⁻¹du
            trsv_upper_h(&*r, c);
            copy(c, dz);
            trsv_upper(&*r, dz);
            axpy(T::one(), c, u);
            axpy(T::one(), dz, z);

            copy(col, res);
            gemv(minus_one, &*a, n, z, T::one(), res);
            gamma = nrm2(res);
            gemv_h(T::one(), &*a, n, res, T::zero(), c);
            err = nrm2(c) / anorm;
            if err < settings.ortho_tol {
                break;
            }
        }
        // Last increment from the final residual, applied whichever way the
        // loop ended.
        trsv_upper_h(&*r, c);
        axpy(T::one(), c, u);
    }

    report_refinement(settings, "qraddcol", n, passes, err);

    r.col_as_mut_slice(n, 0)[..n].copy_from_slice(u);
    *r.get_mut(n, n) = T::from_real(gamma);
    if update_mat {
        a.col_as_mut_slice(n, 0).copy_from_slice(col);
    }
    passes
}
