use crate::backend::{make_givens, rot};
use crate::dynmatrix::DynMatrix;
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

/// Remove column `k` (0-based) from the `n×n` upper-triangular factor `r` and
/// return the `(n-1)×(n-1)` factor of the remaining columns.
///
/// After the column is dropped, row `k` carries the only entries that break
/// triangularity. A forward Givens sweep folds that row into rows
/// `k+1..n`, one diagonal at a time, and the emptied row is then removed.
/// Positive diagonal entries stay positive.
///
/// # Panics
///
/// If `r` is not square or `k >= n`.
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::qrdelcol;
///
/// let r = DynMatrix::from_rows(2, 2, &[5.0_f64, 0.0, 0.0, 3.0]);
/// let r = qrdelcol(&r, 0);
/// assert_eq!(r.nrows(), 1);
/// assert_eq!(r[(0, 0)], 3.0);
/// ```
pub fn qrdelcol<T: LinalgScalar>(r: &impl MatrixRef<T>, k: usize) -> DynMatrix<T> {
    let n = r.nrows();
    assert_eq!(r.ncols(), n, "R must be square, got {}x{}", n, r.ncols());
    assert!(k < n, "column index {} out of range for {} columns", k, n);

    let mut w = DynMatrix::from_fn(n, n - 1, |i, j| {
        let src = if j < k { j } else { j + 1 };
        if i <= src {
            *r.get(i, src)
        } else {
            T::zero()
        }
    });
    fold_row(&mut w, k, n);

    DynMatrix::from_fn(n - 1, n - 1, |i, j| {
        let src = if i < k { i } else { i + 1 };
        w[(src, j)]
    })
}

/// Remove column `k` (0-based) of the `n` active columns of preallocated `a`
/// and `r` without allocating.
///
/// Columns `k+1..n` of both matrices shift left by one, the factor is
/// re-triangularized in place, and the vacated last column of `a` and last
/// row and column of the active `r` block are zeroed. Decrementing `n` is up
/// to the caller.
///
/// # Panics
///
/// If `k >= n` or either matrix holds fewer than `n` columns.
pub fn qrdelcol_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    r: &mut impl MatrixMut<T>,
    k: usize,
    n: usize,
) {
    assert!(k < n, "column index {} out of range for {} columns", k, n);
    assert!(
        n <= a.ncols() && n <= r.ncols() && n <= r.nrows(),
        "{} active columns exceed A ({} cols) or R ({}x{})",
        n,
        a.ncols(),
        r.nrows(),
        r.ncols()
    );

    let m = a.nrows();
    shift_cols_left(a, k, n, m);
    shift_cols_left(r, k, n, n);

    fold_row(r, k, n);

    // Drop row k from the active block.
    for i in k..n - 1 {
        for j in 0..n - 1 {
            let v = *r.get(i + 1, j);
            *r.get_mut(i, j) = v;
        }
    }
    for j in 0..n - 1 {
        *r.get_mut(n - 1, j) = T::zero();
    }
}

/// Move columns `k+1..n` one slot left over the first `rows` rows and zero column `n-1`.
fn shift_cols_left<T: LinalgScalar>(x: &mut impl MatrixMut<T>, k: usize, n: usize, rows: usize) {
    for j in k..n - 1 {
        for i in 0..rows {
            let v = *x.get(i, j + 1);
            *x.get_mut(i, j) = v;
        }
    }
    x.col_as_mut_slice(n - 1, 0)[..rows].fill(T::zero());
}

/// Zero row `k` of an `n`-row, `n-1`-column factor whose column `k` was just
/// removed, rotating it into rows `k+1..n`.
fn fold_row<T: LinalgScalar>(w: &mut impl MatrixMut<T>, k: usize, n: usize) {
    for j in k..n - 1 {
        let (c, s, rr) = make_givens(*w.get(j + 1, j), *w.get(k, j));
        *w.get_mut(j + 1, j) = rr;
        *w.get_mut(k, j) = T::zero();
        for l in j + 1..n - 1 {
            let (x, y) = rot(c, s, *w.get(j + 1, l), *w.get(k, l));
            *w.get_mut(j + 1, l) = x;
            *w.get_mut(k, l) = y;
        }
    }
}
