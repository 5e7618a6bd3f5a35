use crate::traits::{LinalgScalar, MatrixRef};

use super::level1::{axpy, dotc};

/// Matrix-vector product over the leading columns:
/// `y := alpha · A[:, 0..ncols] · x + beta · y`.
///
/// `x` has length `ncols`, `y` has length `A.nrows()`. When `beta` is zero,
/// `y` is overwritten without being read.
pub fn gemv<T: LinalgScalar>(
    alpha: T,
    a: &impl MatrixRef<T>,
    ncols: usize,
    x: &[T],
    beta: T,
    y: &mut [T],
) {
    assert!(ncols <= a.ncols(), "gemv: {} columns requested, matrix has {}", ncols, a.ncols());
    assert_eq!(x.len(), ncols, "gemv: x length mismatch");
    assert_eq!(y.len(), a.nrows(), "gemv: y length mismatch");

    scale_or_clear(beta, y);
    for j in 0..ncols {
        let coeff = alpha * x[j];
        if coeff == T::zero() {
            continue;
        }
        axpy(coeff, a.col_as_slice(j, 0), y);
    }
}

/// Conjugate-transpose matrix-vector product over the leading columns:
/// `y := alpha · A[:, 0..ncols]ᴴ · x + beta · y`.
///
/// `x` has length `A.nrows()`, `y` has length `ncols`. When `beta` is zero,
/// `y` is overwritten without being read.
pub fn gemv_h<T: LinalgScalar>(
    alpha: T,
    a: &impl MatrixRef<T>,
    ncols: usize,
    x: &[T],
    beta: T,
    y: &mut [T],
) {
    assert!(ncols <= a.ncols(), "gemv_h: {} columns requested, matrix has {}", ncols, a.ncols());
    assert_eq!(x.len(), a.nrows(), "gemv_h: x length mismatch");
    assert_eq!(y.len(), ncols, "gemv_h: y length mismatch");

    for (j, yj) in y.iter_mut().enumerate() {
        let d = alpha * dotc(a.col_as_slice(j, 0), x);
        *yj = if beta == T::zero() { d } else { beta * *yj + d };
    }
}

/// In-place upper-triangular solve `x := R[0..k, 0..k]⁻¹ · x` with `k = x.len()`.
///
/// Column-oriented back substitution; only the upper triangle of the leading
/// block is read. A zero diagonal entry produces Inf/NaN, it is not checked.
pub fn trsv_upper<T: LinalgScalar>(r: &impl MatrixRef<T>, x: &mut [T]) {
    let k = x.len();
    assert!(
        k <= r.nrows() && k <= r.ncols(),
        "trsv: {}x{} block out of bounds for {}x{} matrix",
        k,
        k,
        r.nrows(),
        r.ncols()
    );
    for j in (0..k).rev() {
        let col = r.col_as_slice(j, 0);
        let xj = x[j] / col[j];
        x[j] = xj;
        if xj != T::zero() {
            axpy(T::zero() - xj, &col[..j], &mut x[..j]);
        }
    }
}

/// In-place conjugate-transpose solve `x := R[0..k, 0..k]⁻ᴴ · x` with `k = x.len()`.
///
/// `Rᴴ` is lower triangular, so this is forward substitution; each step is a
/// dot product against a column of `R`.
pub fn trsv_upper_h<T: LinalgScalar>(r: &impl MatrixRef<T>, x: &mut [T]) {
    let k = x.len();
    assert!(
        k <= r.nrows() && k <= r.ncols(),
        "trsv: {}x{} block out of bounds for {}x{} matrix",
        k,
        k,
        r.nrows(),
        r.ncols()
    );
    for j in 0..k {
        let col = r.col_as_slice(j, 0);
        let s = dotc(&col[..j], &x[..j]);
        x[j] = (x[j] - s) / col[j].conj();
    }
}

#[inline]
fn scale_or_clear<T: LinalgScalar>(beta: T, y: &mut [T]) {
    if beta == T::zero() {
        y.fill(T::zero());
    } else if beta != T::one() {
        for yi in y.iter_mut() {
            *yi = beta * *yi;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynMatrix;

    const TOL: f64 = 1e-12;

    fn upper() -> DynMatrix<f64> {
        DynMatrix::from_rows(3, 3, &[2.0, 1.0, -1.0, 0.0, 3.0, 2.0, 0.0, 0.0, 4.0])
    }

    #[test]
    fn gemv_overwrites_when_beta_zero() {
        let a = DynMatrix::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut y = [f64::NAN; 3];
        gemv(1.0, &a, 2, &[1.0, -1.0], 0.0, &mut y);
        assert_eq!(y, [-1.0, -1.0, -1.0]);
    }

    #[test]
    fn gemv_accumulates() {
        let a = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut y = [10.0, 20.0];
        // Only the first two columns take part.
        gemv(-1.0, &a, 2, &[1.0, 1.0], 1.0, &mut y);
        assert_eq!(y, [7.0, 11.0]);
    }

    #[test]
    fn gemv_h_leading_columns() {
        let a = DynMatrix::from_rows(3, 3, &[1.0, 2.0, 9.0, 3.0, 4.0, 9.0, 5.0, 6.0, 9.0]);
        let mut y = [0.0; 2];
        gemv_h(1.0, &a, 2, &[1.0, 1.0, 1.0], 0.0, &mut y);
        assert_eq!(y, [9.0, 12.0]);
    }

    #[test]
    fn trsv_upper_solves() {
        let r = upper();
        let x_true = [1.0, -2.0, 0.5];
        let mut b = [0.0; 3];
        gemv(1.0, &r, 3, &x_true, 0.0, &mut b);
        trsv_upper(&r, &mut b);
        for i in 0..3 {
            assert!((b[i] - x_true[i]).abs() < TOL, "x[{}] = {}", i, b[i]);
        }
    }

    #[test]
    fn trsv_upper_h_solves() {
        let r = upper();
        let x_true = [1.0, -2.0, 0.5];
        let mut b = [0.0; 3];
        gemv_h(1.0, &r, 3, &x_true, 0.0, &mut b);
        trsv_upper_h(&r, &mut b);
        for i in 0..3 {
            assert!((b[i] - x_true[i]).abs() < TOL, "x[{}] = {}", i, b[i]);
        }
    }

    #[test]
    fn trsv_leading_block_only() {
        // Garbage outside the 2x2 active block must not be read.
        let mut r = upper();
        r[(2, 2)] = 0.0;
        r[(0, 2)] = f64::NAN;
        let mut x = [4.0, 6.0];
        trsv_upper(&r, &mut x);
        assert!((x[1] - 2.0).abs() < TOL);
        assert!((x[0] - 1.0).abs() < TOL);
    }
}
