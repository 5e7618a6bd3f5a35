//! # qrupdate
//!
//! Incremental maintenance of the upper-triangular factor `R` of a QR
//! factorization `A = QR` as columns of `A` come and go, without ever forming
//! `Q`. Built for active-set and basis-update loops that change `A` one column
//! (or one row) at a time and need a least-squares solve against the current
//! factor after every change. `no_std` compatible with `alloc`.
//!
//! ## Quick start
//!
//! ```
//! use qrupdate::update::IncrementalQr;
//!
//! // Room for 3-row columns, at most 2 of them.
//! let mut qr = IncrementalQr::with_capacity(3, 2, 0.0_f64);
//! qr.add_column(&[3.0, 4.0, 0.0]).unwrap();
//! qr.add_column(&[0.0, 0.0, 3.0]).unwrap();
//!
//! let r = qr.r_active();
//! assert!((r[(0, 0)] - 5.0).abs() < 1e-12);
//! assert!((r[(1, 1)] - 3.0).abs() < 1e-12);
//!
//! // Least squares min ‖Ax − b‖ by corrected semi-normal equations.
//! let x = qr.solve(&[3.0, 4.0, 6.0]).unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 2.0).abs() < 1e-12);
//!
//! qr.delete_column(0).unwrap();
//! assert!((qr.r_active()[(0, 0)] - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`update`]: add column ([`update::qraddcol`]),
//!   delete column ([`update::qrdelcol`]), add row ([`update::qraddrow`]) and
//!   the CSNE least-squares solve ([`update::csne`]). Each comes as a
//!   value-returning function and as a zero-allocation `*_in_place` kernel
//!   over preallocated buffers plus a caller-owned [`update::Workspace`].
//!   [`update::IncrementalQr`] bundles one session's buffers.
//!
//! - [`backend`]: slice-level dense kernels the updates are built on:
//!   `dotc`, `nrm2`, `axpy`, `gemv`, `gemv_h`, upper-triangular solves and
//!   Givens rotations.
//!
//! - [`dynmatrix`]: Heap-allocated column-major `DynMatrix<T>` with runtime
//!   dimensions and the [`DynVector<T>`] newtype.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, used for norms and tolerances
//!   - [`LinalgScalar`]: real floats and complex numbers
//!   - [`MatrixRef`] / [`MatrixMut`]: column-major read/write access for the kernels
//!
//! ## Complex matrices
//!
//! Enable the `complex` feature to run every update with `Complex<f32>` /
//! `Complex<f64>`. Transposes become conjugate transposes, Givens rotations
//! keep a real cosine, and diagonals of `R` stay real and positive.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm |
//! | `libm`    | baseline | Pure-Rust software float fallback for `no_std` |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `log`     | no       | Refinement diagnostics through the `log` facade when `verbose` is set |
//! | `all`     | no       | `std` + `complex` + `log` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod backend;
pub mod dynmatrix;
pub mod traits;
pub mod update;

pub use dynmatrix::{DynMatrix, DynVector};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
