//! Mathematical primitives for SCPN MISO Cascade.

pub mod cholesky;
pub mod distance;
pub mod minimize;
