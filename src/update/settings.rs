use crate::traits::FloatScalar;

/// Tolerances and switches for the update kernels.
///
/// Passed by reference into every in-place call and into the `*_with` value
/// variants, so independent factorization sessions can run with different
/// tolerances side by side.
///
/// ```
/// use qrupdate::update::UpdateSettings;
///
/// let strict = UpdateSettings { ortho_tol: 1e-13, ..UpdateSettings::default() };
/// assert_eq!(strict.ortho_max_it, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateSettings<R> {
    /// Acceptable relative orthogonality error `‖Aᴴr‖ / ‖a‖` (add-column)
    /// or `‖Aᴴr‖ / ‖b‖` (CSNE).
    pub ortho_tol: R,
    /// Maximum number of refinement passes.
    pub ortho_max_it: usize,
    /// Value add-column takes the single-projection path when
    /// `d² > independence_ratio · ‖a‖²`. `1.0` keeps the refinement step on
    /// every call; `0.01` is the classical well-conditioning check.
    pub independence_ratio: R,
    /// Report refinement counts through the `log` facade (needs the `log` feature).
    pub verbose: bool,
}

impl<R: FloatScalar> Default for UpdateSettings<R> {
    /// `ortho_tol = √ε` (about `1.5e-8` for `f64`, `3.5e-4` for `f32`),
    /// ten refinement passes, refinement always on.
    fn default() -> Self {
        Self {
            ortho_tol: R::epsilon().sqrt(),
            ortho_max_it: 10,
            independence_ratio: R::one(),
            verbose: false,
        }
    }
}
