// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Property-Based Tests (proptest) for miso-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for miso-types using proptest.
//!
//! Covers: isotope registry lookups, normalization invariants,
//! construction-record defaults and roundtrips.

use proptest::prelude::*;

use miso_types::isotopes::{
    normalize, nuclide_index, vector_sum, IsotopeVector, N_ISOTOPES, NUC_IDS,
};
use miso_types::record::CascadeSpec;

proptest! {
    /// Every registry id maps back to its own index.
    #[test]
    fn nuclide_index_roundtrip(i in 0usize..N_ISOTOPES) {
        prop_assert_eq!(nuclide_index(NUC_IDS[i]), Some(i));
    }

    /// Normalization produces a unit sum for any positive vector and is
    /// idempotent.
    #[test]
    fn normalize_unit_sum_and_idempotent(
        values in proptest::array::uniform6(1e-9f64..10.0),
    ) {
        let mut x: IsotopeVector = values;
        normalize(&mut x);
        prop_assert!((vector_sum(&x) - 1.0).abs() < 1e-12);

        let before = x;
        normalize(&mut x);
        for i in 0..N_ISOTOPES {
            prop_assert!((x[i] - before[i]).abs() < 1e-15);
        }
    }

    /// Normalization preserves the proportions between entries.
    #[test]
    fn normalize_preserves_ratios(
        a in 1e-6f64..1.0,
        b in 1e-6f64..1.0,
    ) {
        let mut x: IsotopeVector = [0.0, 0.0, 0.0, a, 0.0, b];
        normalize(&mut x);
        prop_assert!((x[3] / x[5] - a / b).abs() < 1e-9);
    }

    /// Missing optional fields always default to 1.4 / unbounded,
    /// whatever the mandatory fields hold.
    #[test]
    fn spec_defaults_from_minimal_json(
        u235 in 1e-4f64..0.5,
        product in 0.51f64..0.99,
        tails in 1e-6f64..9e-5,
    ) {
        let json = format!(
            r#"{{
                "feed_composition": {{"922350000": {u235}, "922380000": 0.5}},
                "product_assay": {product},
                "tails_assay": {tails},
                "process": "centrifuge"
            }}"#
        );
        let spec: CascadeSpec = serde_json::from_str(&json).unwrap();
        prop_assert!((spec.alpha_235 - 1.4).abs() < 1e-12);
        prop_assert!(spec.feed_qty.is_infinite());
        prop_assert!(spec.product_qty.is_infinite());
        prop_assert!(spec.max_swu.is_infinite());
        prop_assert!((spec.product_assay - product).abs() < 1e-12);
    }
}
