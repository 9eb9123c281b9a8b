// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Trained surrogate models and their posterior-mean prediction.
//!
//! A model stores the training inputs, the kernel with its trained
//! hyperparameters and the precomputed posterior weights `K^-1 y`.
//! Collections of models (one per predicted nuclide) load from the JSON
//! files written by the training pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use miso_math::cholesky::{cholesky_factor, cholesky_solve};
use miso_types::error::{CascadeError, CascadeResult};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::kernel::Kernel;

/// One trained Gaussian-process output.
#[derive(Debug, Clone)]
pub struct GprModel {
    /// Name of the predicted quantity (nuclide id for spent fuel).
    pub name: String,
    kernel: Kernel,
    x_train: Array2<f64>,
    weights: Array1<f64>,
}

impl GprModel {
    /// Assemble a model from trained data: builds the training
    /// covariance and precomputes the posterior weights.
    pub fn from_training(
        name: impl Into<String>,
        kernel: Kernel,
        x_train: Array2<f64>,
        y_train: &Array1<f64>,
    ) -> CascadeResult<Self> {
        if x_train.nrows() != y_train.len() {
            return Err(CascadeError::InvalidArgument(format!(
                "training rows ({}) and outputs ({}) disagree",
                x_train.nrows(),
                y_train.len()
            )));
        }
        if x_train.nrows() == 0 {
            return Err(CascadeError::InvalidArgument(
                "a trained model needs at least one sample".to_string(),
            ));
        }

        let covariance = kernel.evaluate(&x_train, &x_train)?;
        let factor = cholesky_factor(&covariance).ok_or_else(|| {
            CascadeError::InvalidArgument(
                "training covariance is not positive definite; stored model data \
                 is inconsistent"
                    .to_string(),
            )
        })?;
        let weights = cholesky_solve(&factor, y_train);

        Ok(GprModel {
            name: name.into(),
            kernel,
            x_train,
            weights,
        })
    }

    /// Posterior mean at a single input point.
    pub fn predict(&self, input: &[f64]) -> CascadeResult<f64> {
        let query = Array2::from_shape_vec((1, input.len()), input.to_vec())
            .expect("1 x d query matrix");
        let k_row = self.kernel.evaluate(&query, &self.x_train)?;
        let mut mean = 0.0;
        for (i, &w) in self.weights.iter().enumerate() {
            mean += k_row[[0, i]] * w;
        }
        Ok(mean)
    }
}

/// Serialized form of one trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelRecord {
    name: String,
    kernel: Kernel,
    x_train: Vec<Vec<f64>>,
    y_train: Vec<f64>,
}

/// A set of trained models sharing the same input parameters, one per
/// predicted quantity.
#[derive(Debug, Clone)]
pub struct ModelCollection {
    models: Vec<GprModel>,
}

impl ModelCollection {
    pub fn from_records_json(json: &str) -> CascadeResult<Self> {
        let records: Vec<ModelRecord> = serde_json::from_str(json)?;
        let mut models = Vec::with_capacity(records.len());
        for record in records {
            let rows = record.x_train.len();
            let dims = record.x_train.first().map_or(0, Vec::len);
            if record.x_train.iter().any(|row| row.len() != dims) {
                return Err(CascadeError::InvalidArgument(format!(
                    "ragged training matrix in model '{}'",
                    record.name
                )));
            }
            let flat: Vec<f64> = record.x_train.into_iter().flatten().collect();
            let x_train = Array2::from_shape_vec((rows, dims), flat)
                .map_err(|e| CascadeError::InvalidArgument(e.to_string()))?;
            let y_train = Array1::from_vec(record.y_train);
            models.push(GprModel::from_training(
                record.name,
                record.kernel,
                x_train,
                &y_train,
            )?);
        }
        Ok(ModelCollection { models })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CascadeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_records_json(&contents)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Predict every output for one input-parameter vector, keyed by
    /// model name. This is the spent-fuel composition record.
    pub fn predict_all(&self, input: &[f64]) -> CascadeResult<BTreeMap<String, f64>> {
        let mut out = BTreeMap::new();
        for model in &self.models {
            out.insert(model.name.clone(), model.predict(input)?);
        }
        Ok(out)
    }
}
