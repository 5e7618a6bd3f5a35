use crate::backend::{make_givens, rot};
use crate::dynmatrix::DynMatrix;
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

/// Absorb a new row `row` of `A` into the `n×n` factor `r` and return the
/// updated factor (same size).
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::qraddrow;
///
/// let r = DynMatrix::from_rows(1, 1, &[3.0_f64]);
/// let r = qraddrow(&r, &[4.0]);
/// assert!((r[(0, 0)] - 5.0).abs() < 1e-12);
/// ```
pub fn qraddrow<T: LinalgScalar>(r: &impl MatrixRef<T>, row: &[T]) -> DynMatrix<T> {
    let n = r.nrows();
    assert_eq!(r.ncols(), n, "R must be square, got {}x{}", n, r.ncols());
    let mut w = DynMatrix::from_fn(n, n, |i, j| if i <= j { *r.get(i, j) } else { T::zero() });
    let mut row = row.to_vec();
    qraddrow_in_place(&mut w, &mut row, n);
    w
}

/// In-place row update of the leading `n×n` block of `r`.
///
/// One Givens rotation per diagonal entry zeroes `row[k]` against `R[k,k]`
/// and rotates the rest of both rows. `row` is used as scratch and is zero on
/// return.
///
/// # Panics
///
/// If `row.len() != n` or `r` is smaller than `n×n`.
pub fn qraddrow_in_place<T: LinalgScalar>(r: &mut impl MatrixMut<T>, row: &mut [T], n: usize) {
    assert_eq!(row.len(), n, "row has length {}, R has {} active columns", row.len(), n);
    assert!(
        n <= r.nrows() && n <= r.ncols(),
        "R is {}x{}, {} active columns",
        r.nrows(),
        r.ncols(),
        n
    );

    for k in 0..n {
        let (c, s, d) = make_givens(*r.get(k, k), row[k]);
        *r.get_mut(k, k) = d;
        row[k] = T::zero();
        for j in k + 1..n {
            let (x, y) = rot(c, s, *r.get(k, j), row[j]);
            *r.get_mut(k, j) = x;
            row[j] = y;
        }
    }
}
