use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::backend;
use crate::traits::{LinalgScalar, Scalar};

/// Dynamically-sized vector.
///
/// Returned by the value-tier kernels (`solve_r`, `csne`, ...). Use
/// [`as_slice`](Self::as_slice) to feed it back into the slice-based
/// in-place tier.
///
/// # Examples
///
/// ```
/// use qrupdate::DynVector;
///
/// let v = DynVector::from_slice(&[3.0_f64, 4.0]);
/// assert_eq!(v[0], 3.0);
/// assert_eq!(v.len(), 2);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynVector<T> {
    data: Vec<T>,
}

impl<T: Scalar> DynVector<T> {
    /// Create a vector from a flat slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create a vector from an owned `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the vector data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the vector data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: LinalgScalar> DynVector<T> {
    /// L2 (Euclidean) norm.
    pub fn norm(&self) -> T::Real {
        backend::nrm2(&self.data)
    }
}

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for DynVector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}
