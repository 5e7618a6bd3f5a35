use crate::backend::{trsv_upper, trsv_upper_h};
use crate::dynmatrix::DynVector;
use crate::traits::{LinalgScalar, MatrixRef};

/// Solve `R·x = b` over the leading `k×k` block of upper-triangular `R`, `k = b.len()`.
///
/// Entries of `R` below the diagonal or outside the leading block are never
/// read, so `R` may be a capacity-sized buffer. A (near-)zero diagonal entry
/// is a caller error and shows up as Inf/NaN in the result.
///
/// ```
/// use qrupdate::DynMatrix;
/// use qrupdate::update::solve_r;
///
/// let r = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 0.0, 4.0]);
/// let x = solve_r(&r, &[4.0, 8.0]);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
pub fn solve_r<T: LinalgScalar>(r: &impl MatrixRef<T>, b: &[T]) -> DynVector<T> {
    let mut x = DynVector::from_slice(b);
    trsv_upper(r, x.as_mut_slice());
    x
}

/// Solve `Rᴴ·x = b` over the leading `k×k` block of upper-triangular `R`, `k = b.len()`.
pub fn solve_rt<T: LinalgScalar>(r: &impl MatrixRef<T>, b: &[T]) -> DynVector<T> {
    let mut x = DynVector::from_slice(b);
    trsv_upper_h(r, x.as_mut_slice());
    x
}

/// In-place `x := R⁻¹·x` over the leading `x.len()` block.
#[inline]
pub fn solve_r_in_place<T: LinalgScalar>(r: &impl MatrixRef<T>, x: &mut [T]) {
    trsv_upper(r, x);
}

/// In-place `x := R⁻ᴴ·x` over the leading `x.len()` block.
#[inline]
pub fn solve_rt_in_place<T: LinalgScalar>(r: &impl MatrixRef<T>, x: &mut [T]) {
    trsv_upper_h(r, x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DynMatrix;

    #[test]
    fn solve_rt_lower_system() {
        // Rᵀ = [[2, 0], [1, 4]]
        let r = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 0.0, 4.0]);
        let x = solve_rt(&r, &[2.0, 9.0]);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn active_block_of_capacity_buffer() {
        let mut r = DynMatrix::zeros(4, 4, 0.0_f64);
        r[(0, 0)] = 2.0;
        r[(0, 1)] = 1.0;
        r[(1, 1)] = 4.0;
        let mut x = [4.0, 8.0];
        solve_r_in_place(&r, &mut x);
        assert_eq!(x, [1.0, 2.0]);
        solve_rt_in_place(&r, &mut x);
        // Rᵀ·[0.5, 0.375] = [1, 2]
        assert!((x[0] - 0.5).abs() < 1e-12);
        assert!((x[1] - 0.375).abs() < 1e-12);
    }

    #[test]
    fn empty_system() {
        let r = DynMatrix::zeros(0, 0, 0.0_f64);
        assert!(solve_r(&r, &[]).is_empty());
    }

    #[test]
    fn zero_pivot_propagates_non_finite() {
        let r = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 0.0]);
        let x = solve_r(&r, &[1.0, 1.0]);
        assert!(!x[1].is_finite());
    }
}
