use num_traits::{Float, Zero};

use crate::traits::{LinalgScalar, Scalar};

/// Conjugated dot product `xᴴ·y = Σ conj(xᵢ)·yᵢ`.
#[inline]
pub fn dotc<T: LinalgScalar>(x: &[T], y: &[T]) -> T {
    debug_assert_eq!(x.len(), y.len());
    let mut sum = T::zero();
    for (&xi, &yi) in x.iter().zip(y) {
        sum = sum + xi.conj() * yi;
    }
    sum
}

/// Euclidean norm `‖x‖₂`.
///
/// Accumulates with a running scale so that entries near the overflow or
/// underflow threshold do not spoil the result.
#[inline]
pub fn nrm2<T: LinalgScalar>(x: &[T]) -> T::Real {
    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as num_traits::One>::one();
    let mut scale = zero;
    let mut ssq = one;
    for &xi in x {
        let a = xi.modulus();
        if a == zero {
            continue;
        }
        if scale < a {
            let q = scale / a;
            ssq = one + ssq * q * q;
            scale = a;
        } else {
            let q = a / scale;
            ssq = ssq + q * q;
        }
    }
    scale * Float::sqrt(ssq)
}

/// AXPY: `y += alpha * x`.
#[inline]
pub fn axpy<T: Scalar>(alpha: T, x: &[T], y: &mut [T]) {
    debug_assert_eq!(x.len(), y.len());
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi = *yi + alpha * xi;
    }
}

/// `y := x`.
#[inline]
pub fn copy<T: Copy>(x: &[T], y: &mut [T]) {
    y.copy_from_slice(x);
}
