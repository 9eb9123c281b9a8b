// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Property-Based Tests (proptest) for miso-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for miso-math using proptest.
//!
//! Covers: minimizer convergence on shifted quadratic bowls within the
//! box, distance-matrix symmetry, Cholesky reconstruction and solve.

use ndarray::{array, Array1, Array2};
use proptest::prelude::*;

use miso_math::cholesky::{cholesky_factor, cholesky_solve};
use miso_math::distance::sq_cdist;
use miso_math::minimize::{minimize, MinimizeOptions};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The minimizer finds interior minima of anisotropic quadratics.
    #[test]
    fn quadratic_minimum_found(
        cx in -5.0f64..5.0,
        cy in -5.0f64..5.0,
        scale in 0.1f64..50.0,
        x0 in -8.0f64..8.0,
        y0 in -8.0f64..8.0,
    ) {
        let res = minimize(
            |x| (x[0] - cx).powi(2) + scale * (x[1] - cy).powi(2),
            &array![x0, y0],
            &[(-10.0, 10.0), (-10.0, 10.0)],
            &MinimizeOptions::default(),
        );
        prop_assert!(res.converged, "reason {:?}", res.reason);
        prop_assert!((res.x[0] - cx).abs() < 1e-5, "x = {}", res.x[0]);
        prop_assert!((res.x[1] - cy).abs() < 1e-5, "y = {}", res.x[1]);
    }

    /// Clamped minima land on the box face nearest the free optimum.
    #[test]
    fn clamped_minimum_on_face(shift in 3.0f64..20.0) {
        let res = minimize(
            |x| (x[0] - shift).powi(2) + x[1] * x[1],
            &array![0.5, 0.5],
            &[(0.0, 2.0), (-1.0, 1.0)],
            &MinimizeOptions::default(),
        );
        prop_assert!((res.x[0] - 2.0).abs() < 1e-6);
        prop_assert!(res.x[1].abs() < 1e-5);
    }
}

proptest! {
    /// Self-distance matrices are symmetric with a zero diagonal.
    #[test]
    fn sq_cdist_symmetric(
        rows in proptest::collection::vec(
            proptest::collection::vec(-10.0f64..10.0, 3),
            2..8,
        ),
    ) {
        let n = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let a = Array2::from_shape_vec((n, 3), flat).unwrap();
        let d = sq_cdist(&a, &a);
        for i in 0..n {
            prop_assert!(d[[i, i]].abs() < 1e-12);
            for j in 0..n {
                prop_assert!((d[[i, j]] - d[[j, i]]).abs() < 1e-9);
                prop_assert!(d[[i, j]] >= 0.0);
            }
        }
    }

    /// Cholesky solve inverts A x = b for generated SPD matrices.
    #[test]
    fn cholesky_solves_spd_systems(
        entries in proptest::collection::vec(-1.0f64..1.0, 9),
        rhs in proptest::collection::vec(-5.0f64..5.0, 3),
    ) {
        // A = B B^T + I is symmetric positive definite by construction
        let b_mat = Array2::from_shape_vec((3, 3), entries).unwrap();
        let mut a = b_mat.dot(&b_mat.t());
        for i in 0..3 {
            a[[i, i]] += 1.0;
        }

        let factor = cholesky_factor(&a).expect("SPD by construction");
        let b = Array1::from_vec(rhs);
        let x = cholesky_solve(&factor, &b);
        let back = a.dot(&x);
        for i in 0..3 {
            prop_assert!((back[i] - b[i]).abs() < 1e-8, "row {}", i);
        }
    }
}
