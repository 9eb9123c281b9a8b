// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Record
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! JSON records exchanged with the facility layer.
//!
//! `CascadeSpec` is the construction input (typically deserialized from
//! a file written by the facility driver), `CascadeRecord` the solved
//! output persisted back for it. The solver core itself never touches
//! the filesystem; the `from_file`/`to_file` helpers here are the
//! serialization adapters around it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CascadeResult;
use crate::process::Process;

fn default_alpha_235() -> f64 {
    1.4
}

fn default_unbounded() -> f64 {
    f64::INFINITY
}

/// Feed composition as given by the caller: either a nuclide-id map or
/// a pre-ordered six-entry vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedComposition {
    Nuclides(BTreeMap<String, f64>),
    Vector(Vec<f64>),
}

/// Construction input for an enrichment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeSpec {
    pub feed_composition: FeedComposition,
    /// Desired U-235 atom fraction in the product stream.
    pub product_assay: f64,
    /// Desired U-235 atom fraction in the tails stream.
    pub tails_assay: f64,
    pub process: Process,
    /// Overall U-235 stage separation factor (centrifuge only).
    #[serde(default = "default_alpha_235")]
    pub alpha_235: f64,
    /// Available feed quantity; absent means unbounded.
    #[serde(default = "default_unbounded")]
    pub feed_qty: f64,
    /// Requested product quantity; absent means unbounded.
    #[serde(default = "default_unbounded")]
    pub product_qty: f64,
    /// Available separative work; absent means unbounded.
    #[serde(default = "default_unbounded")]
    pub max_swu: f64,
}

impl CascadeSpec {
    pub fn from_file<P: AsRef<Path>>(path: P) -> CascadeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let spec: Self = serde_json::from_str(&contents)?;
        Ok(spec)
    }
}

/// Solved enrichment results, keyed the same way as the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeRecord {
    pub feed_qty: f64,
    pub product_qty: f64,
    pub tails_qty: f64,
    pub swu: f64,
    pub process: Process,
    pub alpha_235: f64,
    pub n_enriching: f64,
    pub n_stripping: f64,
    pub feed_composition: BTreeMap<String, f64>,
    pub product_composition: BTreeMap<String, f64>,
    pub tails_composition: BTreeMap<String, f64>,
}

impl CascadeRecord {
    pub fn from_file<P: AsRef<Path>>(path: P) -> CascadeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let record: Self = serde_json::from_str(&contents)?;
        Ok(record)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> CascadeResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
