// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Miso Cascade
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Matched abundance-ratio cascade solver.
//!
//! Enriches a uranium feed of up to six isotopes into product and tails
//! streams with user-specified U-235 assays, resolving the enriching
//! and stripping stage counts, the material flows and the separative
//! work.

pub mod cascade;
pub mod report;
pub mod separation;

pub use cascade::EnrichmentCascade;
pub use separation::SeparationFactors;
