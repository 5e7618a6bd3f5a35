//! Dense kernels the update algorithms are built from.
//!
//! These play the role BLAS plays for a Fortran QR-update library: level-1
//! vector kernels, level-2 matrix-vector and triangular-solve kernels, and
//! plane (Givens) rotations. All of them are slice based and never allocate,
//! so the in-place update tier stays allocation-free.
//!
//! Matrices are read through [`MatrixRef`](crate::traits::MatrixRef) column
//! slices; every kernel takes the active dimension explicitly and only
//! touches the leading block it names.

mod givens;
mod level1;
mod level2;

pub use givens::{make_givens, rot};
pub use level1::{axpy, copy, dotc, nrm2};
pub use level2::{gemv, gemv_h, trsv_upper, trsv_upper_h};
