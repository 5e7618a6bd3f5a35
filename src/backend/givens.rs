use num_traits::{Float, One, Zero};

use crate::traits::LinalgScalar;

/// Construct a plane rotation that annihilates `g` against `f`.
///
/// Returns `(c, s, r)` with real `c ≥ 0` such that
///
/// ```text
/// [  c        s ] [f]   [r]
/// [ -conj(s)  c ] [g] = [0]
/// ```
///
/// For real inputs `r` has the sign of `f`, so a positive pivot stays
/// positive. `g = 0` yields the identity rotation; `f = 0` yields `c = 0`.
///
/// ```
/// use qrupdate::backend::make_givens;
/// let (c, s, r) = make_givens(3.0_f64, 4.0);
/// assert!((r - 5.0).abs() < 1e-12);
/// assert!((-s * 3.0 + c * 4.0).abs() < 1e-12);
/// ```
#[inline]
pub fn make_givens<T: LinalgScalar>(f: T, g: T) -> (T::Real, T, T) {
    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();
    if g == T::zero() {
        (one, T::zero(), f)
    } else if f == T::zero() {
        let d = g.modulus();
        (zero, g.conj().scale_real(one / d), T::from_real(d))
    } else {
        let f1 = f.modulus();
        let g1 = g.modulus();
        let h = Float::hypot(f1, g1);
        let h_inv = one / h;
        let c = f1 * h_inv;
        // r = (f / |f|) · h, s = (f / |f|) · conj(g) / h
        let phase = f.scale_real(one / f1);
        let r = phase.scale_real(h);
        let s = phase * g.conj().scale_real(h_inv);
        (c, s, r)
    }
}

/// Apply a rotation from [`make_givens`] to one pair of entries:
/// `(x, y) ← (c·x + s·y, c·y − conj(s)·x)`.
#[inline]
pub fn rot<T: LinalgScalar>(c: T::Real, s: T, x: T, y: T) -> (T, T) {
    (
        x.scale_real(c) + s * y,
        y.scale_real(c) - s.conj() * x,
    )
}
