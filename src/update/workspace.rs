use alloc::vec;
use alloc::vec::Vec;

use crate::traits::Scalar;

/// Caller-owned scratch storage for the in-place update tier.
///
/// Allocate once at the maximum expected size (`m` rows, `n_max` columns) and
/// pass `&mut` into every in-place call of a session. The kernels only index
/// into the leading `N` (or `N + 1`) entries and never allocate.
///
/// ```
/// use qrupdate::update::Workspace;
///
/// let ws = Workspace::new(100, 20, 0.0_f64);
/// assert_eq!(ws.nrows(), 100);
/// assert_eq!(ws.capacity(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Workspace<T> {
    /// Length `n_max`: right-hand sides and corrections (`c`, `du`).
    pub(crate) work: Vec<T>,
    /// Length `n_max`: second correction (`dz`, `dx`).
    pub(crate) work2: Vec<T>,
    /// Length `n_max`: new column of `R` being built.
    pub(crate) u: Vec<T>,
    /// Length `n_max`: projection coefficients / CSNE solution.
    pub(crate) z: Vec<T>,
    /// Length `m`: residual.
    pub(crate) r: Vec<T>,
}

impl<T: Scalar> Workspace<T> {
    /// Allocate zeroed workspace for `m`-row matrices with up to `n_max` columns.
    ///
    /// The `_zero` parameter is only used for type inference.
    pub fn new(m: usize, n_max: usize, _zero: T) -> Self {
        Self {
            work: vec![T::zero(); n_max],
            work2: vec![T::zero(); n_max],
            u: vec![T::zero(); n_max],
            z: vec![T::zero(); n_max],
            r: vec![T::zero(); m],
        }
    }
}

impl<T> Workspace<T> {
    /// Row dimension the residual buffer was sized for.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.r.len()
    }

    /// Largest active dimension the column buffers can serve.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.work
            .len()
            .min(self.work2.len())
            .min(self.u.len())
            .min(self.z.len())
    }

    /// Residual left by the last in-place call (`a − A·z` or `b − A·x`).
    #[inline]
    pub fn residual(&self) -> &[T] {
        &self.r
    }

    /// Panic unless the buffers can serve an `m`-row problem of active dimension `n`.
    #[inline]
    pub(crate) fn ensure(&self, m: usize, n: usize) {
        assert_eq!(
            self.r.len(),
            m,
            "workspace residual length {} does not match {} rows",
            self.r.len(),
            m,
        );
        assert!(
            self.capacity() >= n,
            "workspace capacity {} below active dimension {}",
            self.capacity(),
            n,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        let ws = Workspace::new(7, 3, 0.0_f64);
        assert_eq!(ws.nrows(), 7);
        assert_eq!(ws.capacity(), 3);
        assert_eq!(ws.residual().len(), 7);
        ws.ensure(7, 3);
    }

    #[test]
    #[should_panic(expected = "workspace capacity")]
    fn too_small() {
        let ws = Workspace::new(7, 3, 0.0_f64);
        ws.ensure(7, 4);
    }

    #[test]
    #[should_panic(expected = "workspace residual length")]
    fn wrong_rows() {
        let ws = Workspace::new(7, 3, 0.0_f64);
        ws.ensure(6, 1);
    }
}
