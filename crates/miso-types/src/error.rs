// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    /// The requested product assay cannot be reached given the feed's
    /// minor-isotope content. Carries the asymptotic maximum U-235
    /// product fraction so the caller can lower the target and retry.
    #[error(
        "Unphysical staging: the requested U-235 product enrichment cannot be \
         reached with this feed. The maximal (asymptotic) product enrichment is \
         {maximal_enrichment:.6} atom fractions (stripping stages: {n_stripping:.3}). \
         Try lowering the target below this value, e.g. by 0.5%."
    )]
    Infeasible {
        maximal_enrichment: f64,
        n_stripping: f64,
    },

    #[error(
        "Staging optimizer did not converge for any of {attempts} initial guesses \
         (best deviation reached: {best_deviation:.3e})"
    )]
    OptimizerFailure { attempts: usize, best_deviation: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CascadeResult<T> = Result<T, CascadeError>;
