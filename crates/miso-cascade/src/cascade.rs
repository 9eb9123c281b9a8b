// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Cascade
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Matched abundance-ratio cascade session.
//!
//! A session owns the feed/product/tails compositions, the target
//! assays, the resource bounds and the staging state. Setters
//! invalidate the cached solution; `solve` resolves the staging through
//! a grid of initial guesses driving the bounded minimizer, then
//! finalizes concentrations, flows and separative work. The von Halle
//! matched abundance-ratio equations are used throughout.

use std::collections::BTreeMap;

use ndarray::{array, Array1};

use miso_math::minimize::{minimize, MinimizeOptions, MinimizeResult, StopReason};
use miso_types::error::{CascadeError, CascadeResult};
use miso_types::isotopes::{
    normalize, nuclide_index, vector_sum, IsotopeVector, KEY_ISOTOPE, NUC_IDS, N_ISOTOPES,
};
use miso_types::process::Process;
use miso_types::record::{CascadeRecord, CascadeSpec, FeedComposition};

use crate::separation::SeparationFactors;

/// Relative concentration deviation below which a staging is accepted.
const DEVIATION_TOL: f64 = 1e-7;

/// Fraction of the stage upper bound above which a solution is treated
/// as jammed against the bound.
const BOUND_FRACTION: f64 = 0.9;

/// Multiple of the stage upper bound used as a stand-in for infinitely
/// many enriching stages in the asymptotic diagnosis. A heuristic, not
/// a physical constant.
const ASYMPTOTIC_STAGE_FACTOR: f64 = 10.0;

/// Initial staging guesses and stage upper bound per process. Diffusion
/// cascades need orders of magnitude more stages than centrifuges.
struct StagingGrid {
    enriching: &'static [f64],
    stripping: &'static [f64],
    upper_bound: f64,
}

static CENTRIFUGE_GRID: StagingGrid = StagingGrid {
    enriching: &[5.0, 10.0, 50.0],
    stripping: &[1.0, 5.0, 10.0, 50.0],
    upper_bound: 200.0,
};

static DIFFUSION_GRID: StagingGrid = StagingGrid {
    enriching: &[500.0, 1000.0, 5000.0],
    stripping: &[100.0, 500.0, 1000.0, 5000.0],
    upper_bound: 7000.0,
};

/// Multicomponent enrichment cascade session.
#[derive(Debug, Clone)]
pub struct EnrichmentCascade {
    xf: IsotopeVector,
    xp: IsotopeVector,
    xt: IsotopeVector,

    user_xp: f64,
    user_xt: f64,

    process: Process,
    alpha_235: f64,
    factors: SeparationFactors,

    f: f64,
    p: f64,
    t: f64,
    swu: f64,
    user_f: f64,
    user_p: f64,
    user_swu: f64,

    /// Continuous stage counts; not rounded to integers, as rounding
    /// would distort centrifuge cascades noticeably.
    n_e: f64,
    n_s: f64,

    /// True while the staging and concentrations match the current
    /// inputs. Cleared by every setter, set by a successful solve.
    uptodate: bool,

    /// Asymptotic maximum U-235 product fraction, NaN unless the last
    /// solve diagnosed an unreachable target.
    maximal_enrichment: f64,

    staging_runs: usize,
}

impl EnrichmentCascade {
    /// Build a session from a construction record, validating all
    /// inputs the way the setters do.
    pub fn from_spec(spec: &CascadeSpec) -> CascadeResult<Self> {
        if !spec.max_swu.is_finite() && !spec.feed_qty.is_finite() && !spec.product_qty.is_finite()
        {
            return Err(CascadeError::InvalidArgument(
                "'feed_qty', 'product_qty' and 'max_swu' are all unbounded; \
                 at least one of them has to be finite"
                    .to_string(),
            ));
        }
        if spec.max_swu <= 0.0 {
            return Err(CascadeError::InvalidArgument(
                "'max_swu' has to be strictly positive".to_string(),
            ));
        }

        let mut cascade = EnrichmentCascade {
            xf: [0.0; N_ISOTOPES],
            xp: [0.0; N_ISOTOPES],
            xt: [0.0; N_ISOTOPES],
            user_xp: 0.0,
            user_xt: 0.0,
            process: spec.process,
            alpha_235: spec.alpha_235,
            factors: SeparationFactors::for_process(spec.process, spec.alpha_235),
            f: 0.0,
            p: 0.0,
            t: 0.0,
            swu: 0.0,
            user_f: spec.feed_qty,
            user_p: spec.product_qty,
            user_swu: spec.max_swu,
            n_e: 100.0,
            n_s: 100.0,
            uptodate: false,
            maximal_enrichment: f64::NAN,
            staging_runs: 0,
        };

        match &spec.feed_composition {
            FeedComposition::Nuclides(map) => cascade.set_feed_composition(map)?,
            FeedComposition::Vector(v) => cascade.set_feed_vector(v)?,
        }
        cascade.set_product_enrichment(spec.product_assay)?;
        cascade.set_tails_enrichment(spec.tails_assay)?;

        Ok(cascade)
    }

    // ── setters ──────────────────────────────────────────────────────

    /// Set and normalize the feed composition from a nuclide-id map.
    ///
    /// The map must name U-235; unknown nuclides and fractions outside
    /// `[0, 1)` are rejected.
    pub fn set_feed_composition(&mut self, composition: &BTreeMap<String, f64>) -> CascadeResult<()> {
        let mut xf = [0.0; N_ISOTOPES];
        for (nuclide, &fraction) in composition {
            let Some(index) = nuclide_index(nuclide) else {
                return Err(CascadeError::InvalidArgument(format!(
                    "invalid nuclide '{nuclide}' in feed composition; allowed nuclides: {NUC_IDS:?}"
                )));
            };
            if !(0.0..1.0).contains(&fraction) {
                return Err(CascadeError::InvalidArgument(format!(
                    "feed fraction {fraction} for nuclide '{nuclide}' is outside [0, 1)"
                )));
            }
            xf[index] = fraction;
        }
        if !composition.contains_key(NUC_IDS[KEY_ISOTOPE]) {
            return Err(CascadeError::InvalidArgument(
                "feed U-235 content unspecified".to_string(),
            ));
        }
        if vector_sum(&xf) <= 0.0 {
            return Err(CascadeError::InvalidArgument(
                "feed composition sums to zero".to_string(),
            ));
        }

        normalize(&mut xf);
        self.xf = xf;
        self.uptodate = false;
        Ok(())
    }

    /// Set and normalize the feed composition from a pre-ordered
    /// six-entry vector.
    pub fn set_feed_vector(&mut self, composition: &[f64]) -> CascadeResult<()> {
        if composition.len() != N_ISOTOPES {
            return Err(CascadeError::InvalidArgument(format!(
                "feed composition vector must have shape ({N_ISOTOPES},), got ({},)",
                composition.len()
            )));
        }
        if composition.iter().any(|&v| !(0.0..1.0).contains(&v)) {
            return Err(CascadeError::InvalidArgument(format!(
                "composition {composition:?} is not valid: at least one nuclide \
                 with a concentration < 0 or >= 1"
            )));
        }
        let mut xf = [0.0; N_ISOTOPES];
        xf.copy_from_slice(composition);
        if vector_sum(&xf) <= 0.0 {
            return Err(CascadeError::InvalidArgument(
                "feed composition sums to zero".to_string(),
            ));
        }

        normalize(&mut xf);
        self.xf = xf;
        self.uptodate = false;
        Ok(())
    }

    /// Set the target U-235 atom fraction of the product stream.
    pub fn set_product_enrichment(&mut self, assay: f64) -> CascadeResult<()> {
        if !(assay > 0.0 && assay <= 1.0) || assay <= self.xf[KEY_ISOTOPE] {
            return Err(CascadeError::InvalidArgument(format!(
                "target product enrichment {assay} must lie in (0, 1] and above \
                 the feed concentration {}",
                self.xf[KEY_ISOTOPE]
            )));
        }
        self.user_xp = assay;
        self.uptodate = false;
        Ok(())
    }

    /// Set the target U-235 atom fraction of the tails stream.
    pub fn set_tails_enrichment(&mut self, assay: f64) -> CascadeResult<()> {
        if !(assay > 0.0 && assay < 1.0) {
            return Err(CascadeError::InvalidArgument(format!(
                "target tails enrichment {assay} must lie in (0, 1)"
            )));
        }
        let feed_is_set = self.xf.iter().any(|&v| v != 0.0);
        if feed_is_set && assay >= self.xf[KEY_ISOTOPE] {
            return Err(CascadeError::InvalidArgument(format!(
                "target tails enrichment {assay} must be smaller than the feed \
                 concentration {}",
                self.xf[KEY_ISOTOPE]
            )));
        }
        self.user_xt = assay;
        self.uptodate = false;
        Ok(())
    }

    /// Change the separation process; the stage factors are rederived.
    pub fn set_process(&mut self, process: Process) {
        self.process = process;
        self.factors = SeparationFactors::for_process(process, self.alpha_235);
        self.uptodate = false;
    }

    /// Change the U-235 reference separation factor; the stage factors
    /// are rederived (diffusion ignores the value).
    pub fn set_alpha(&mut self, alpha_235: f64) {
        self.alpha_235 = alpha_235;
        self.factors = SeparationFactors::for_process(self.process, alpha_235);
        self.uptodate = false;
    }

    // ── cascade equations ────────────────────────────────────────────

    /// Extraction/stripping coefficients and cut ratios at a staging.
    fn stage_coefficients(
        &self,
        n_e: f64,
        n_s: f64,
    ) -> (IsotopeVector, IsotopeVector, f64, f64) {
        let a = &self.factors.alpha_star;
        let mut e = [0.0; N_ISOTOPES];
        let mut s = [0.0; N_ISOTOPES];
        for i in 0..N_ISOTOPES {
            e[i] = 1.0 / a[i] / (1.0 - a[i].powf(-n_e));
            s[i] = 1.0 / a[i] / (a[i].powf(n_s + 1.0) - 1.0);
        }
        let mut e_sum = 0.0;
        let mut s_sum = 0.0;
        for i in 0..N_ISOTOPES {
            e_sum += e[i] * self.xf[i] / (e[i] + s[i]);
            s_sum += s[i] * self.xf[i] / (e[i] + s[i]);
        }
        (e, s, e_sum, s_sum)
    }

    /// Compute the product and tails compositions for the given stage
    /// counts and return the relative deviation from the targets.
    ///
    /// Updates the session's product/tails compositions in place; the
    /// flow solver reads whatever the last call produced.
    pub fn calculate_concentrations(&mut self, n_e: f64, n_s: f64) -> f64 {
        let (e, s, e_sum, s_sum) = self.stage_coefficients(n_e, n_s);
        for i in 0..N_ISOTOPES {
            self.xp[i] = e[i] * self.xf[i] / ((e[i] + s[i]) * e_sum);
            self.xt[i] = s[i] * self.xf[i] / ((e[i] + s[i]) * s_sum);
        }
        self.concentration_deviation()
    }

    /// Relative deviation of the computed product and tails assays from
    /// the user targets; the objective minimized by the staging search.
    pub fn concentration_deviation(&self) -> f64 {
        let delta_xp = (self.xp[KEY_ISOTOPE] - self.user_xp) / self.user_xp;
        let delta_xt = (self.xt[KEY_ISOTOPE] - self.user_xt) / self.user_xt;
        (delta_xp * delta_xp + delta_xt * delta_xt).sqrt()
    }

    /// Separative work of the current three-stream balance.
    ///
    /// Unbounded on both sides means every quantity is unconstrained
    /// and the balance degenerates to infinity.
    pub fn separative_work(&self) -> CascadeResult<f64> {
        if (self.p.is_infinite() || self.t.is_infinite()) && self.f.is_infinite() {
            return Ok(f64::INFINITY);
        }
        let vf = self.factors.value_function(&self.xf)?;
        let vp = self.factors.value_function(&self.xp)?;
        let vt = self.factors.value_function(&self.xt)?;
        Ok(vp * self.p + vt * self.t - vf * self.f)
    }

    /// Compute feed, product and tails flows at the current staging,
    /// honoring whichever resource bound binds first and capping
    /// against the separative-work limit.
    pub fn calculate_flows(&mut self) -> CascadeResult<()> {
        let (_, _, e_sum, s_sum) = self.stage_coefficients(self.n_e, self.n_s);

        let product_from_feed = self.user_f * e_sum;
        let feed_from_product = self.user_p / e_sum;

        if product_from_feed < self.user_p {
            self.p = product_from_feed;
            self.f = self.user_f;
        } else {
            self.f = feed_from_product;
            self.p = self.user_p;
        }
        self.t = self.f * s_sum;

        self.swu = self.separative_work()?;
        if self.swu > self.user_swu {
            // the SWU bound binds: rederive the feed from it, keeping
            // the cut ratios of the branch selected above
            self.swu = self.user_swu;
            let vf = self.factors.value_function(&self.xf)?;
            let vp = self.factors.value_function(&self.xp)?;
            let vt = self.factors.value_function(&self.xt)?;
            self.f = self.swu / (vp * e_sum + vt * s_sum - vf);
            self.p = self.f * e_sum;
            self.t = self.f * s_sum;
        }
        Ok(())
    }

    // ── staging search ───────────────────────────────────────────────

    fn staging_grid(&self) -> &'static StagingGrid {
        match self.process {
            Process::Centrifuge => &CENTRIFUGE_GRID,
            Process::Diffusion => &DIFFUSION_GRID,
        }
    }

    fn run_minimizer(&mut self, x0: Array1<f64>, bounds: &[(f64, f64)]) -> MinimizeResult {
        let opts = MinimizeOptions::default();
        let mut objective = |n: &Array1<f64>| self.calculate_concentrations(n[0], n[1]);
        minimize(&mut objective, &x0, bounds, &opts)
    }

    /// Evaluate the cascade at effectively infinite enriching stages to
    /// diagnose the asymptotic maximum reachable product assay, then
    /// report the target as unreachable.
    fn diagnose_asymptote(&mut self, n_s_seed: f64, upper_bound: f64) -> CascadeError {
        let seed = ASYMPTOTIC_STAGE_FACTOR * upper_bound;
        let result = self.run_minimizer(
            array![seed, n_s_seed],
            &[(seed, seed), (0.0, upper_bound)],
        );
        self.calculate_concentrations(result.x[0], result.x[1]);
        self.maximal_enrichment = self.xp[KEY_ISOTOPE];
        self.n_e = f64::NAN;
        self.n_s = result.x[1];
        CascadeError::Infeasible {
            maximal_enrichment: self.maximal_enrichment,
            n_stripping: self.n_s,
        }
    }

    /// Find the enriching and stripping stage counts that reproduce the
    /// target assays.
    ///
    /// Returns the cached staging when the session is up to date.
    /// Otherwise each initial guess of the process grid is handed to
    /// the bounded minimizer until one converges with a deviation below
    /// tolerance. A converged staging that is jammed against the stage
    /// bound, or whose objective has gone flat along the enriching
    /// axis, is evidence that the target assay sits at or beyond the
    /// asymptotic maximum; such runs end with the infeasibility
    /// diagnosis instead of a result.
    pub fn solve_staging(&mut self) -> CascadeResult<(f64, f64)> {
        if self.uptodate {
            return Ok((self.n_e, self.n_s));
        }

        let grid = self.staging_grid();
        let upper = grid.upper_bound;
        let bounds = [(0.0, upper), (0.0, upper)];

        self.staging_runs += 1;

        let mut attempts = 0usize;
        let mut best_deviation = f64::INFINITY;
        let mut suspect_n_s: Option<f64> = None;

        for &n_s_init in grid.stripping {
            for &n_e_init in grid.enriching {
                let result = self.run_minimizer(array![n_e_init, n_s_init], &bounds);
                attempts += 1;

                self.n_e = result.x[0];
                self.n_s = result.x[1];
                let deviation = self.calculate_concentrations(self.n_e, self.n_s);
                self.calculate_flows()?;
                best_deviation = best_deviation.min(deviation);

                if result.converged && deviation < DEVIATION_TOL {
                    if result.reason == StopReason::FlatObjective
                        || result.x[0] > BOUND_FRACTION * upper
                    {
                        return Err(self.diagnose_asymptote(result.x[1], upper));
                    }
                    self.uptodate = true;
                    self.maximal_enrichment = f64::NAN;
                    return Ok((self.n_e, self.n_s));
                }

                // a converged run pinned at the stage bound cannot meet
                // the tolerance for any staging: remember it as
                // asymptote evidence
                if result.converged
                    && result.x[0] > BOUND_FRACTION * upper
                    && suspect_n_s.is_none()
                {
                    suspect_n_s = Some(result.x[1]);
                }
            }
        }

        if let Some(n_s_seed) = suspect_n_s {
            return Err(self.diagnose_asymptote(n_s_seed, upper));
        }

        Err(CascadeError::OptimizerFailure {
            attempts,
            best_deviation,
        })
    }

    /// Solve the complete enrichment: staging, concentrations, flows.
    pub fn solve(&mut self) -> CascadeResult<()> {
        self.solve_staging()?;
        Ok(())
    }

    // ── results ──────────────────────────────────────────────────────

    pub fn feed_qty(&self) -> f64 {
        self.f
    }

    pub fn product_qty(&self) -> f64 {
        self.p
    }

    pub fn tails_qty(&self) -> f64 {
        self.t
    }

    pub fn swu(&self) -> f64 {
        self.swu
    }

    pub fn n_enriching(&self) -> f64 {
        self.n_e
    }

    pub fn n_stripping(&self) -> f64 {
        self.n_s
    }

    pub fn feed_composition(&self) -> &IsotopeVector {
        &self.xf
    }

    pub fn product_composition(&self) -> &IsotopeVector {
        &self.xp
    }

    pub fn tails_composition(&self) -> &IsotopeVector {
        &self.xt
    }

    pub fn process(&self) -> Process {
        self.process
    }

    pub fn separation_factors(&self) -> &SeparationFactors {
        &self.factors
    }

    pub fn product_target(&self) -> f64 {
        self.user_xp
    }

    pub fn tails_target(&self) -> f64 {
        self.user_xt
    }

    pub fn feed_limit(&self) -> f64 {
        self.user_f
    }

    pub fn product_limit(&self) -> f64 {
        self.user_p
    }

    pub fn swu_limit(&self) -> f64 {
        self.user_swu
    }

    /// NaN unless the last solve diagnosed an unreachable target.
    pub fn maximal_enrichment(&self) -> f64 {
        self.maximal_enrichment
    }

    pub fn is_uptodate(&self) -> bool {
        self.uptodate
    }

    /// Number of times the staging grid search actually ran (cached
    /// re-solves do not count).
    pub fn staging_runs(&self) -> usize {
        self.staging_runs
    }

    /// Solved results as the output record persisted for the facility
    /// layer.
    pub fn to_record(&self) -> CascadeRecord {
        let composition_map = |x: &IsotopeVector| {
            NUC_IDS
                .iter()
                .zip(x.iter())
                .map(|(&id, &v)| (id.to_string(), v))
                .collect::<BTreeMap<String, f64>>()
        };
        CascadeRecord {
            feed_qty: self.f,
            product_qty: self.p,
            tails_qty: self.t,
            swu: self.swu,
            process: self.process,
            alpha_235: self.factors.alpha[KEY_ISOTOPE],
            n_enriching: self.n_e,
            n_stripping: self.n_s,
            feed_composition: composition_map(&self.xf),
            product_composition: composition_map(&self.xp),
            tails_composition: composition_map(&self.xt),
        }
    }
}
