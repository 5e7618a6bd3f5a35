//! Incremental updates of the `R` factor of `A = QR`, with `Q` never formed.
//!
//! Two tiers share the same numerics:
//!
//! - Value functions ([`qraddcol`], [`qrdelcol`], [`qraddrow`], [`csne`])
//!   take exact-size inputs and return freshly allocated results.
//! - In-place functions ([`qraddcol_in_place`], [`qrdelcol_in_place`],
//!   [`qraddrow_in_place`], [`csne_in_place`]) work on the leading active block
//!   of preallocated `A` (`m × n_max`) and `R` (`n_max × n_max`) buffers, with
//!   scratch space from a caller-owned [`Workspace`]. They never allocate.
//!
//! [`IncrementalQr`] bundles the buffers of one session and turns caller
//! mistakes into [`UpdateError`]s. The kernel functions themselves treat a
//! violated precondition (wrong lengths, exhausted capacity, zero column,
//! index out of range) as a bug and panic. Refinement that fails to reach
//! `ortho_tol` is not an error: the best result after `ortho_max_it` passes is
//! returned together with the pass count.
//!
//! Indices are 0-based. For complex element types every transpose is the
//! conjugate transpose, so the maintained invariant is
//! `RᴴR = AᴴA + β²I`.
//!
//! ```
//! use qrupdate::DynMatrix;
//! use qrupdate::update::{qraddcol, qrdelcol, csne};
//!
//! let a0 = DynMatrix::from_rows(3, 1, &[1.0_f64, 0.0, 0.0]);
//! let r0 = DynMatrix::from_rows(1, 1, &[1.0]);
//! let r1 = qraddcol(&a0, &r0, &[1.0, 1.0, 0.0], 0.0);
//! assert!((r1[(0, 1)] - 1.0).abs() < 1e-12);
//! assert!((r1[(1, 1)] - 1.0).abs() < 1e-12);
//!
//! let a1 = DynMatrix::from_rows(3, 2, &[1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
//! let (x, _) = csne(&r1, &a1, &[2.0, 1.0, 5.0]);
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 1.0).abs() < 1e-12);
//!
//! let r2 = qrdelcol(&r1, 0);
//! assert!((r2[(0, 0)] - 2.0_f64.sqrt()).abs() < 1e-12);
//! ```

mod addcol;
mod addrow;
mod csne;
mod delcol;
mod session;
mod settings;
mod triangular;
mod workspace;


pub use addcol::{qraddcol, qraddcol_in_place, qraddcol_with};
pub use addrow::{qraddrow, qraddrow_in_place};
pub use csne::{csne, csne_in_place};
pub use delcol::{qrdelcol, qrdelcol_in_place};
pub use session::IncrementalQr;
pub use settings::UpdateSettings;
pub use triangular::{solve_r, solve_r_in_place, solve_rt, solve_rt_in_place};
pub use workspace::Workspace;

use crate::traits::FloatScalar;

/// Misuse reported by [`IncrementalQr`].
///
/// ```
/// use qrupdate::update::{IncrementalQr, UpdateError};
///
/// let mut qr = IncrementalQr::with_capacity(2, 1, 0.0_f64);
/// assert_eq!(qr.add_column(&[0.0, 0.0]), Err(UpdateError::ZeroColumn));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    /// All `n_max` columns are in use.
    CapacityExceeded,
    /// Vector length does not match the row count of `A`.
    DimensionMismatch { expected: usize, got: usize },
    /// New column has zero norm.
    ZeroColumn,
    /// Column index not below the active column count.
    IndexOutOfRange { index: usize, len: usize },
    /// Solve requested with no active columns.
    Empty,
}

impl core::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UpdateError::CapacityExceeded => write!(f, "factorization is at column capacity"),
            UpdateError::DimensionMismatch { expected, got } => {
                write!(f, "vector length {} does not match {} rows", got, expected)
            }
            UpdateError::ZeroColumn => write!(f, "new column has zero norm"),
            UpdateError::IndexOutOfRange { index, len } => {
                write!(f, "column index {} out of range for {} active columns", index, len)
            }
            UpdateError::Empty => write!(f, "factorization has no active columns"),
        }
    }
}

/// Emit the refinement outcome of an in-place kernel when `verbose` is set.
#[cfg(feature = "log")]
pub(crate) fn report_refinement<R: FloatScalar>(
    settings: &UpdateSettings<R>,
    kernel: &str,
    n: usize,
    passes: usize,
    err: R,
) {
    if !settings.verbose {
        return;
    }
    if err < settings.ortho_tol {
        log::debug!(
            target: "qrupdate",
            "{}: n = {}, {} refinement passes, orthogonality error {:?}",
            kernel,
            n,
            passes,
            err
        );
    } else {
        log::warn!(
            target: "qrupdate",
            "{}: n = {}, orthogonality error {:?} above {:?} after {} passes",
            kernel,
            n,
            err,
            settings.ortho_tol,
            passes
        );
    }
}

#[cfg(not(feature = "log"))]
#[inline(always)]
pub(crate) fn report_refinement<R: FloatScalar>(
    _settings: &UpdateSettings<R>,
    _kernel: &str,
    _n: usize,
    _passes: usize,
    _err: R,
) {
}
