// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Miso Types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared types for the multicomponent isotope-separation workspace.
//!
//! Isotope registry, enrichment-process enum, the workspace error type
//! and the JSON records exchanged with the facility layer.

pub mod error;
pub mod isotopes;
pub mod process;
pub mod record;
