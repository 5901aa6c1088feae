mod common;

use approx::assert_relative_eq;
use matexp::pade::Regime;
use matexp::{
    expm, expm_in_place, expm_into, opnorm1, try_expm, try_expm_assign, try_expm_in_place,
    try_expm_into, Dual, Dual64, ExpmError, SquareMatrix,
};

use common::{
    max_abs, max_abs_diff, random_matrix, random_skew, random_with_norm, reference_expm, rng,
    transpose,
};

/// One norm per regime, plus several squaring counts.
const NORMS: [f64; 8] = [0.01, 0.2, 0.9, 2.0, 5.0, 12.0, 40.0, 150.0];

fn assert_close(actual: &SquareMatrix<f64>, expected: &SquareMatrix<f64>, rel: f64) {
    let scale = max_abs(expected).max(1.0);
    let err = max_abs_diff(actual, expected);
    assert!(
        err <= rel * scale,
        "max error {:e} exceeds {:e} (scale {:e})\nactual = {:?}\nexpected = {:?}",
        err,
        rel * scale,
        scale,
        actual,
        expected
    );
}

// ══════════════════════════════════════════════
//  Exact and closed-form cases
// ══════════════════════════════════════════════

#[test]
fn zero_matrix_gives_identity_exactly() {
    for n in 1..=6 {
        let e = expm(&SquareMatrix::<f64>::zeros(n));
        assert_eq!(e, SquareMatrix::identity(n), "n = {}", n);
    }
}

#[test]
fn scalar_matrices_match_exp() {
    for &x in &[-30.0, -5.0, -1.0, -0.01, 0.0, 0.1, 0.5, 1.5, 3.0, 7.0, 20.0, 100.0] {
        let e = expm(&SquareMatrix::from_row_slice(1, &[x]));
        assert_relative_eq!(e[(0, 0)], f64::exp(x), max_relative = 1e-12);
    }
}

#[test]
fn huge_scalar_norms_stay_finite_through_the_solve() {
    // s = 995 here; the square of the unscaled entry would overflow.
    let e = try_expm(&SquareMatrix::from_row_slice(1, &[-1e300])).unwrap();
    assert_eq!(e[(0, 0)], 0.0);

    for &x in &[-700.0, 700.0, -1e5] {
        let e = try_expm(&SquareMatrix::from_row_slice(1, &[x])).unwrap();
        assert_relative_eq!(e[(0, 0)], f64::exp(x), max_relative = 1e-12);
    }
}

#[test]
fn huge_nilpotent_has_regular_denominator() {
    // [[x, x], [-x, -x]] squares to zero; x² itself is far beyond f64::MAX.
    let x = 1e160;
    let a = SquareMatrix::from_row_slice(2, &[x, x, -x, -x]);
    assert!(matches!(
        Regime::select(opnorm1(&a)),
        Regime::Pade13 { squarings } if squarings > 500
    ));
    assert!(try_expm(&a).is_ok());
}

#[test]
fn nilpotent_series_terminates() {
    // N³ = 0, so exp(N) = I + N + N²/2.
    let a = SquareMatrix::from_row_slice(3, &[0.0, 1.0, 2.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0]);
    let expected =
        SquareMatrix::from_row_slice(3, &[1.0, 1.0, 3.5, 0.0, 1.0, 3.0, 0.0, 0.0, 1.0]);
    assert_close(&expm(&a), &expected, 1e-13);
}

#[test]
fn diagonal_matrix_exponentiates_entrywise() {
    let d: [f64; 4] = [8.0, 16.0, 30.0, 50.0];
    let a = SquareMatrix::from_fn(4, |i, j| if i == j { d[i] } else { 0.0 });
    let e = expm(&a);
    for i in 0..4 {
        assert_relative_eq!(e[(i, i)], d[i].exp(), max_relative = 1e-12);
        for j in 0..4 {
            if i != j {
                assert_eq!(e[(i, j)], 0.0);
            }
        }
    }
}

#[test]
fn rotation_generator_across_squaring_counts() {
    // |A|_1 = θ, so θ = 8, 16, 30, 50 need 1, 2, 3, 4 squarings.
    for (theta, squarings) in [(8.0_f64, 1), (16.0, 2), (30.0, 3), (50.0, 4)] {
        let a = SquareMatrix::from_row_slice(2, &[0.0, theta, -theta, 0.0]);
        assert_eq!(
            Regime::select(opnorm1(&a)),
            Regime::Pade13 { squarings },
            "theta = {}",
            theta
        );
        let (s, c) = theta.sin_cos();
        let expected = SquareMatrix::from_row_slice(2, &[c, s, -s, c]);
        assert_close(&expm(&a), &expected, 1e-12);
    }
}

#[test]
fn upper_triangular_two_by_two() {
    // exp([[a, b], [0, d]]) = [[e^a, b (e^a - e^d)/(a - d)], [0, e^d]]
    for &(a, b, d) in &[(0.1, 0.2, -0.05), (1.0, 3.0, -2.0), (4.0, -7.0, 2.5)] {
        let m = SquareMatrix::from_row_slice(2, &[a, b, 0.0, d]);
        let e = expm(&m);
        let off = b * (f64::exp(a) - f64::exp(d)) / (a - d);
        assert_relative_eq!(e[(0, 0)], f64::exp(a), max_relative = 1e-13);
        assert_relative_eq!(e[(1, 1)], f64::exp(d), max_relative = 1e-13);
        assert_relative_eq!(e[(0, 1)], off, max_relative = 1e-12);
        assert_eq!(e[(1, 0)], 0.0);
    }
}

// ══════════════════════════════════════════════
//  Algebraic identities
// ══════════════════════════════════════════════

#[test]
fn agrees_with_taylor_reference() {
    let mut r = rng(11);
    for &n in &[2, 3, 5, 8] {
        for &norm in &NORMS[..7] {
            let a = random_with_norm(&mut r, n, norm);
            assert_close(&expm(&a), &reference_expm(&a), 1e-10);
        }
    }
}

#[test]
fn inverse_is_exp_of_negation() {
    let mut r = rng(7);
    for &norm in &NORMS[..6] {
        let a = random_with_norm(&mut r, 5, norm);
        let mut neg = a.clone();
        neg.scale_mut(-1.0);
        let prod = expm(&a).matmul(&expm(&neg));
        assert_close(&prod, &SquareMatrix::identity(5), 1e-10);
    }
}

#[test]
fn skew_symmetric_gives_orthogonal() {
    let mut r = rng(3);
    for &n in &[2, 4, 7] {
        for &norm in &NORMS {
            let q = expm(&random_skew(&mut r, n, norm));
            let qqt = q.matmul(&transpose(&q));
            assert_close(&qqt, &SquareMatrix::identity(n), 1e-11);
        }
    }
}

#[test]
fn commuting_sum_factorizes() {
    let mut r = rng(19);
    let a = random_with_norm(&mut r, 4, 1.0);
    // B is a polynomial in A, hence commutes with it.
    let mut b = a.matmul(&a);
    b.scale_mut(0.3);
    b.axpy(-0.5, &a);
    b.add_diag(0.2);
    let mut sum = a.clone();
    sum.axpy(1.0, &b);
    assert_close(&expm(&sum), &expm(&a).matmul(&expm(&b)), 1e-12);
}

#[test]
fn commuting_diagonal_pair_factorizes() {
    let a = SquareMatrix::from_fn(3, |i, j| if i == j { [0.5, -2.0, 3.0][i] } else { 0.0 });
    let b = SquareMatrix::from_fn(3, |i, j| if i == j { [4.0, 1.5, -7.0][i] } else { 0.0 });
    let mut sum = a.clone();
    sum.axpy(1.0, &b);
    assert_close(&expm(&sum), &expm(&a).matmul(&expm(&b)), 1e-13);
}

#[test]
fn transpose_commutes_with_exp() {
    let mut r = rng(5);
    for &norm in &[0.2, 3.0, 25.0] {
        let a = random_with_norm(&mut r, 6, norm);
        assert_close(&expm(&transpose(&a)), &transpose(&expm(&a)), 1e-12);
    }
}

// ══════════════════════════════════════════════
//  Regime boundaries
// ══════════════════════════════════════════════

#[test]
fn continuous_across_regime_thresholds() {
    let mut r = rng(23);
    let base = random_with_norm(&mut r, 4, 1.0);
    let delta = 1e-9;
    for &theta in &[0.015, 0.25, 0.95, 2.1, 5.4, 10.8, 21.6] {
        let mut below = base.clone();
        below.scale_mut(theta * (1.0 - delta));
        let mut above = base.clone();
        above.scale_mut(theta * (1.0 + delta));
        assert_ne!(
            Regime::select(opnorm1(&below)),
            Regime::select(opnorm1(&above)),
            "theta = {}",
            theta
        );

        let eb = expm(&below);
        let ea = expm(&above);
        assert_close(&eb, &reference_expm(&below), 1e-10);
        assert_close(&ea, &reference_expm(&above), 1e-10);
        assert_close(&eb, &ea, 1e-6);
    }
}

// ══════════════════════════════════════════════
//  Dual instantiations
// ══════════════════════════════════════════════

#[test]
fn dual_primal_matches_plain_exponential() {
    let mut r = rng(29);
    for &norm in &NORMS[..7] {
        let a: SquareMatrix<Dual64<3>> = random_matrix(&mut r, 4);
        let mut a = a;
        a.scale_mut(norm / opnorm1(&a));
        let plain = a.map(|d| d.re);
        let e = expm(&a);
        assert_close(&e.map(|d| d.re), &expm(&plain), 1e-12);
    }
}

#[test]
fn nested_dual_primal_matches_plain_exponential() {
    let mut r = rng(31);
    let a: SquareMatrix<Dual<Dual64<2>, 2>> = random_matrix(&mut r, 3);
    let plain = a.map(|d| d.re.re);
    let e = expm(&a);
    assert_close(&e.map(|d| d.re.re), &expm(&plain), 1e-12);
}

// ══════════════════════════════════════════════
//  Buffer entry points
// ══════════════════════════════════════════════

#[test]
fn into_and_in_place_agree_with_expm() {
    let mut r = rng(37);
    let a = random_with_norm(&mut r, 3, 4.0);
    let expected = expm(&a);

    let mut out = [0.0; 9];
    expm_into(&mut out, a.as_slice(), 3);
    assert_eq!(&out, expected.as_slice());

    let mut buf = a.as_slice().to_vec();
    expm_in_place(&mut buf, 3);
    assert_eq!(buf.as_slice(), expected.as_slice());

    let mut out = SquareMatrix::zeros(3);
    try_expm_assign(&mut out, &a).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn in_place_on_duals() {
    let mut r = rng(41);
    let a: SquareMatrix<Dual64<2>> = random_matrix(&mut r, 3);
    let expected = expm(&a);
    let mut buf = a.as_slice().to_vec();
    try_expm_in_place(&mut buf, 3).unwrap();
    for (x, y) in buf.iter().zip(expected.as_slice()) {
        assert_eq!(x.re, y.re);
        assert_eq!(x.eps, y.eps);
    }
}

// ══════════════════════════════════════════════
//  Errors
// ══════════════════════════════════════════════

#[test]
fn wrong_buffer_length_is_reported() {
    let mut out = [0.0; 3];
    let a = [0.0; 4];
    assert_eq!(
        try_expm_into(&mut out, &a, 2),
        Err(ExpmError::BufferLength { len: 3, n: 2 })
    );
    let mut short = [0.0; 5];
    assert_eq!(
        try_expm_in_place(&mut short, 2),
        Err(ExpmError::BufferLength { len: 5, n: 2 })
    );
}

#[test]
fn empty_and_oversized_dimensions_are_reported() {
    let mut empty: [f64; 0] = [];
    assert_eq!(try_expm_in_place(&mut empty, 0), Err(ExpmError::EmptyMatrix));

    let mut big = vec![0.0_f64; 17 * 17];
    assert_eq!(
        try_expm_in_place(&mut big, 17),
        Err(ExpmError::TooLarge { n: 17 })
    );
}

#[test]
fn assign_checks_output_dimension() {
    let a = SquareMatrix::<f64>::identity(2);
    let mut out = SquareMatrix::zeros(3);
    assert_eq!(
        try_expm_assign(&mut out, &a),
        Err(ExpmError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn nan_input_reports_singular_denominator() {
    let a = SquareMatrix::from_row_slice(2, &[f64::NAN; 4]);
    assert_eq!(try_expm(&a), Err(ExpmError::SingularDenominator));
}

#[test]
#[should_panic(expected = "expm_into:")]
fn panicking_form_reports_bad_length() {
    let mut out = [0.0; 2];
    expm_into(&mut out, &[0.0; 4], 2);
}

#[test]
fn error_messages_are_readable() {
    assert_eq!(
        ExpmError::TooLarge { n: 20 }.to_string(),
        "matrix dimension 20 exceeds the supported maximum of 16"
    );
    assert_eq!(
        ExpmError::BufferLength { len: 5, n: 2 }.to_string(),
        "buffer of length 5 does not hold a 2x2 matrix"
    );
}
