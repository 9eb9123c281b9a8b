//! Pairwise distance matrices for kernel evaluation.
//!
//! Row-major sample matrices: one observation per row. Shapes must
//! agree on the feature dimension; that is checked by the callers that
//! assemble kernels, these primitives only assert it.

use ndarray::Array2;

/// Pairwise squared Euclidean distances, shape `(a.nrows, b.nrows)`.
pub fn sq_cdist(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    assert_eq!(
        a.ncols(),
        b.ncols(),
        "feature dimensions must match for pairwise distances"
    );
    let (na, nb) = (a.nrows(), b.nrows());
    let mut out = Array2::zeros((na, nb));
    for i in 0..na {
        for j in 0..nb {
            let mut acc = 0.0;
            for k in 0..a.ncols() {
                let d = a[[i, k]] - b[[j, k]];
                acc += d * d;
            }
            out[[i, j]] = acc;
        }
    }
    out
}

/// Pairwise Euclidean distances, shape `(a.nrows, b.nrows)`.
pub fn cdist(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    sq_cdist(a, b).mapv(f64::sqrt)
}
