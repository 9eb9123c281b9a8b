// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Separation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Stage separation factors and the stream value function.
//!
//! The per-isotope factors follow Wood, "Effects of separation
//! processes on minor uranium isotopes in enrichment cascades",
//! Science & Global Security 16 (2008); the value function follows
//! Harvey's key-weight formulation with U-235 matched and U-238 as
//! reference isotope.

use miso_types::error::{CascadeError, CascadeResult};
use miso_types::isotopes::{
    IsotopeVector, KEY_ISOTOPE, MSTAR, N_ISOTOPES, PROCESS_GAS_MASSES, REFERENCE_ISOTOPE,
};
use miso_types::process::Process;

/// Per-isotope single-stage separation factors.
#[derive(Debug, Clone, Copy)]
pub struct SeparationFactors {
    /// Overall stage separation factor per isotope, always positive.
    pub alpha: IsotopeVector,
    /// `alpha` normalized by the square root of the key isotope's
    /// factor, the coefficient form used by the cascade equations.
    pub alpha_star: IsotopeVector,
}

impl SeparationFactors {
    /// Derive the factors for a process and a U-235 reference factor.
    ///
    /// `alpha_235` only enters the centrifuge model; diffusion factors
    /// are fixed by the process-gas masses alone.
    pub fn for_process(process: Process, alpha_235: f64) -> Self {
        let mut alpha = [0.0; N_ISOTOPES];
        let m_key = PROCESS_GAS_MASSES[KEY_ISOTOPE];
        for (i, a) in alpha.iter_mut().enumerate() {
            *a = match process {
                // the 1/3 factor carries units of inverse atomic mass,
                // keeping alpha dimensionless
                Process::Centrifuge => {
                    1.0 + (2.0 * MSTAR - m_key - PROCESS_GAS_MASSES[i]) * (alpha_235 - 1.0) / 3.0
                }
                Process::Diffusion => ((2.0 * MSTAR - m_key) / PROCESS_GAS_MASSES[i]).sqrt(),
            };
        }

        let key_root = alpha[KEY_ISOTOPE].sqrt();
        let mut alpha_star = [0.0; N_ISOTOPES];
        for i in 0..N_ISOTOPES {
            alpha_star[i] = alpha[i] / key_root;
        }

        SeparationFactors { alpha, alpha_star }
    }

    /// Thermodynamic value of a stream with composition `x`.
    ///
    /// U-235 is the matched isotope and U-238 the reference. The
    /// degenerate key weight `k = 1/2` makes the summand singular and
    /// is not modeled.
    pub fn value_function(&self, x: &IsotopeVector) -> CascadeResult<f64> {
        let key_spread = self.alpha[KEY_ISOTOPE] - 1.0;
        let abundance_ratio = x[KEY_ISOTOPE] / x[REFERENCE_ISOTOPE];

        let mut total = 0.0;
        for i in 0..N_ISOTOPES {
            let k = (self.alpha[i] - 1.0) / key_spread;
            if 2.0 * k == 1.0 {
                return Err(CascadeError::Unimplemented(
                    "value function with key weight k = 0.5".to_string(),
                ));
            }
            total += x[i] / (2.0 * k - 1.0);
        }

        Ok(total * abundance_ratio.ln())
    }
}
