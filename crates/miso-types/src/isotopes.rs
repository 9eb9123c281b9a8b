// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Isotopes
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed registry of the six uranium isotopes tracked by the cascade.
//!
//! The registry is fixed at compile time: every composition and every
//! per-isotope coefficient in the workspace is a `[f64; 6]` indexed in
//! the order below. Index 3 (U-235) is the key isotope that drives the
//! cascade design, index 5 (U-238) the reference isotope of the value
//! function.

/// Number of uranium isotopes tracked.
pub const N_ISOTOPES: usize = 6;

/// Index of the key isotope (U-235).
pub const KEY_ISOTOPE: usize = 3;

/// Index of the reference isotope (U-238).
pub const REFERENCE_ISOTOPE: usize = 5;

/// Nuclide ids in registry order: U-232, U-233, U-234, U-235, U-236, U-238.
pub const NUC_IDS: [&str; N_ISOTOPES] = [
    "922320000",
    "922330000",
    "922340000",
    "922350000",
    "922360000",
    "922380000",
];

/// Cascade key-weight reference mass M* (atomic mass units).
pub const MSTAR: f64 = 350.5;

/// Mass of the six fluorine ligands in UF6 process gas (6 * 19).
pub const MASS_HEXAFLUORIDE: f64 = 114.0;

/// Process-gas molecular masses: isotope mass plus the UF6 ligand mass.
pub const PROCESS_GAS_MASSES: [f64; N_ISOTOPES] =
    [346.0, 347.0, 348.0, 349.0, 350.0, 352.0];

/// Fixed-length composition or coefficient vector in registry order.
pub type IsotopeVector = [f64; N_ISOTOPES];

/// Registry index of a nuclide id, if recognised.
pub fn nuclide_index(nuc_id: &str) -> Option<usize> {
    NUC_IDS.iter().position(|&id| id == nuc_id)
}

/// Sum of all entries.
pub fn vector_sum(x: &IsotopeVector) -> f64 {
    x.iter().sum()
}

/// Scale the vector in place so its entries sum to one.
///
/// Callers must ensure the sum is positive; a zero vector stays zero.
pub fn normalize(x: &mut IsotopeVector) {
    let total = vector_sum(x);
    if total > 0.0 {
        for v in x.iter_mut() {
            *v /= total;
        }
    }
}
