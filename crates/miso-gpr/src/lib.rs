// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Miso Gpr
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaussian-process kernel evaluation for spent-fuel prediction.
//!
//! Evaluates trained surrogate models (kernel hyperparameters and
//! training data produced elsewhere) to predict spent-fuel nuclide
//! quantities from reactor input parameters. Prediction only: no
//! hyperparameter fitting happens here, and nothing is shared with the
//! cascade solver beyond the error and math crates.

pub mod kernel;
pub mod model;

pub use kernel::{Kernel, KernelKind};
pub use model::{GprModel, ModelCollection};
