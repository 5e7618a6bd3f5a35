use qrupdate::update::{
    csne, qraddcol, qraddcol_in_place, qrdelcol, qrdelcol_in_place, IncrementalQr, UpdateError,
    UpdateSettings, Workspace,
};
use qrupdate::{DynMatrix, DynVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = 1e-10;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

// ── Concrete scenarios ─────────────────────────────────────────────

#[test]
fn grow_then_shrink_by_value() {
    let a0 = DynMatrix::zeros(3, 0, 0.0_f64);
    let r0 = DynMatrix::zeros(0, 0, 0.0_f64);
    let first = [3.0, 4.0, 0.0];
    let r1 = qraddcol(&a0, &r0, &first, 0.0);
    assert_eq!(r1.nrows(), 1);
    assert_near(r1[(0, 0)], 5.0, TOL, "R after first column");

    let a1 = DynMatrix::from_cols(&[&first[..]]);
    let second = [0.0, 0.0, 3.0];
    let r2 = qraddcol(&a1, &r1, &second, 0.0);
    assert_near(r2[(0, 0)], 5.0, TOL, "R[0,0]");
    assert_near(r2[(0, 1)], 0.0, TOL, "R[0,1]");
    assert_eq!(r2[(1, 0)], 0.0);
    assert_near(r2[(1, 1)], 3.0, TOL, "R[1,1]");

    let r3 = qrdelcol(&r2, 0);
    assert_eq!(r3.nrows(), 1);
    assert_near(r3[(0, 0)], 3.0, TOL, "R after delete");
}

#[test]
fn grow_then_shrink_in_place() {
    let mut a = DynMatrix::zeros(3, 2, 0.0_f64);
    let mut r = DynMatrix::zeros(2, 2, 0.0_f64);
    let mut ws = Workspace::new(3, 2, 0.0);
    let settings = UpdateSettings::default();

    qraddcol_in_place(&mut a, &mut r, &[3.0, 4.0, 0.0], 0, &mut ws, &settings, true);
    assert_eq!(r[(0, 0)], 5.0);
    let passes = qraddcol_in_place(&mut a, &mut r, &[0.0, 0.0, 3.0], 1, &mut ws, &settings, true);
    assert_eq!(passes, 0);
    assert_near(r[(1, 1)], 3.0, TOL, "R[1,1]");

    qrdelcol_in_place(&mut a, &mut r, 0, 2);
    assert_near(r[(0, 0)], 3.0, TOL, "R after delete");
    assert_eq!(r[(0, 1)], 0.0);
    assert_eq!(r[(1, 1)], 0.0);
    assert_eq!(a.col(0).as_slice(), &[0.0, 0.0, 3.0]);
    assert_eq!(a.col(1).as_slice(), &[0.0, 0.0, 0.0]);
}

#[test]
fn small_random_least_squares() {
    let mut gen = StdRng::seed_from_u64(0);
    let mut qr = IncrementalQr::with_capacity(4, 2, 0.0_f64);
    for _ in 0..2 {
        let col: Vec<f64> = (0..4).map(|_| gen.gen_range(-1.0..1.0)).collect();
        qr.add_column(&col).unwrap();
    }
    let b: Vec<f64> = (0..4).map(|_| gen.gen_range(-1.0..1.0)).collect();

    let x = qr.solve(&b).unwrap();
    let a = qr.a_active();
    let res = DynVector::from_slice(qr.residual());
    let at_r = a.conj_transpose().vecmul(&res);
    let bnorm = DynVector::from_slice(&b).norm();
    assert!(at_r.norm() < TOL * bnorm, "Aᵀr = {:?}", at_r);

    let (x_value, res_value) = csne(&qr.r_active(), &a, &b);
    for i in 0..2 {
        assert_near(x[i], x_value[i], TOL, "x");
    }
    for i in 0..4 {
        assert_near(res[i], res_value[i], TOL, "residual");
    }
}

// ── Session behaviour ──────────────────────────────────────────────

#[test]
fn active_set_walk() {
    let mut gen = StdRng::seed_from_u64(1);
    let (m, n_max) = (12, 6);
    let mut qr = IncrementalQr::with_capacity(m, n_max, 0.0_f64);
    let pool: Vec<Vec<f64>> = (0..10)
        .map(|_| (0..m).map(|_| gen.gen_range(-1.0..1.0)).collect())
        .collect();

    for col in pool.iter().take(n_max) {
        qr.add_column(col).unwrap();
    }
    assert_eq!(qr.add_column(&pool[6]), Err(UpdateError::CapacityExceeded));

    for (i, col) in pool.iter().enumerate().skip(n_max) {
        qr.delete_column(i % qr.active_cols()).unwrap();
        qr.add_column(col).unwrap();
        assert_eq!(qr.active_cols(), n_max);

        let a = qr.a_active();
        let r = qr.r_active();
        let err = (&r.gram() - &a.gram()).norm_max();
        assert!(err < TOL, "walk step {}: {}", i, err);
    }
}

#[test]
fn error_display() {
    let err = UpdateError::DimensionMismatch { expected: 3, got: 2 };
    assert_eq!(err.to_string(), "vector length 2 does not match 3 rows");
    let err = UpdateError::IndexOutOfRange { index: 4, len: 2 };
    assert_eq!(err.to_string(), "column index 4 out of range for 2 active columns");
}

#[test]
fn session_settings_are_independent() {
    let strict = UpdateSettings { ortho_tol: 0.0, ortho_max_it: 2, ..UpdateSettings::default() };
    let mut a = IncrementalQr::with_settings(3, 2, 0.0_f64, strict);
    let mut b = IncrementalQr::with_capacity(3, 2, 0.0_f64);
    for col in [[1.0, 1.0, 0.0], [1.0, 0.0, 1.0]] {
        a.add_column(&col).unwrap();
        b.add_column(&col).unwrap();
    }
    assert_eq!(a.settings().ortho_max_it, 2);
    assert_eq!(b.settings().ortho_max_it, 10);
    let diff = (&a.r_active() - &b.r_active()).norm_max();
    assert!(diff < TOL);
}
