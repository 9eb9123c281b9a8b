// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Kernel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Covariance kernels for trained surrogate models.
//!
//! Every kernel carries a noise amplitude as its last parameter; the
//! noise enters the diagonal of square (training) covariance matrices
//! to keep them positive definite, and is left out of cross-covariance
//! rows used for prediction.

use miso_math::distance::{cdist, sq_cdist};
use miso_types::error::{CascadeError, CascadeResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Kernel family of a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelKind {
    /// Squared exponential: params `[amplitude, length, noise]`.
    #[serde(rename = "SQE")]
    SquaredExponential,
    /// Squared exponential with one length scale per input dimension:
    /// params `[amplitude, length_1 .. length_d, noise]`.
    #[serde(rename = "ASQE")]
    AnisotropicSquaredExponential,
    /// Laplacian: params `[amplitude, length, noise]`.
    #[serde(rename = "LAP")]
    Laplacian,
    /// Cauchy: params `[length, noise]`.
    #[serde(rename = "Cauchy")]
    Cauchy,
}

/// A kernel family with its trained hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kernel {
    pub kind: KernelKind,
    pub params: Vec<f64>,
}

impl Kernel {
    /// Expected parameter count for `dims` input dimensions.
    pub fn expected_params(kind: KernelKind, dims: usize) -> usize {
        match kind {
            KernelKind::SquaredExponential | KernelKind::Laplacian => 3,
            KernelKind::AnisotropicSquaredExponential => dims + 2,
            KernelKind::Cauchy => 2,
        }
    }

    fn validate(&self, dims: usize) -> CascadeResult<()> {
        let expected = Self::expected_params(self.kind, dims);
        if self.params.len() != expected {
            return Err(CascadeError::InvalidArgument(format!(
                "kernel {:?} over {dims} dimensions needs {expected} parameters, got {}",
                self.kind,
                self.params.len()
            )));
        }
        if !self.params.iter().all(|v| v.is_finite()) {
            return Err(CascadeError::InvalidArgument(
                "kernel parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn noise(&self) -> f64 {
        *self.params.last().expect("validated parameter vector")
    }

    /// Covariance matrix between two sample sets, shape
    /// `(x1.nrows, x2.nrows)`. Adds the noise variance on the diagonal
    /// of square matrices.
    pub fn evaluate(&self, x1: &Array2<f64>, x2: &Array2<f64>) -> CascadeResult<Array2<f64>> {
        if x1.ncols() != x2.ncols() {
            return Err(CascadeError::InvalidArgument(format!(
                "input dimension mismatch: {} vs {}",
                x1.ncols(),
                x2.ncols()
            )));
        }
        self.validate(x1.ncols())?;

        let mut k = match self.kind {
            KernelKind::SquaredExponential => {
                let amplitude = self.params[0];
                let length = self.params[1];
                let sqdist = sq_cdist(x1, x2);
                sqdist.mapv(|d2| amplitude * amplitude * (-0.5 * d2 / (length * length)).exp())
            }
            KernelKind::AnisotropicSquaredExponential => {
                let amplitude = self.params[0];
                let scaled1 = scale_columns(x1, &self.params[1..self.params.len() - 1]);
                let scaled2 = scale_columns(x2, &self.params[1..self.params.len() - 1]);
                let sqdist = sq_cdist(&scaled1, &scaled2);
                sqdist.mapv(|d2| amplitude * amplitude * (-0.5 * d2).exp())
            }
            KernelKind::Laplacian => {
                let amplitude = self.params[0];
                let length = self.params[1];
                let dist = cdist(x1, x2);
                dist.mapv(|d| amplitude * amplitude * (-0.5 * d / length).exp())
            }
            KernelKind::Cauchy => {
                let length = self.params[0];
                let sqdist = sq_cdist(x1, x2);
                sqdist.mapv(|d2| 1.0 / (1.0 + d2 / (length * length)))
            }
        };

        if x1.nrows() == x2.nrows() {
            let noise = self.noise();
            for i in 0..k.nrows() {
                k[[i, i]] += noise * noise;
            }
        }
        Ok(k)
    }
}

/// Divide each column by its length scale.
fn scale_columns(x: &Array2<f64>, length_scales: &[f64]) -> Array2<f64> {
    let mut scaled = x.clone();
    for (j, &scale) in length_scales.iter().enumerate() {
        for v in scaled.column_mut(j) {
            *v /= scale;
        }
    }
    scaled
}
