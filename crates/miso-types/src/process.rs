// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Process
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CascadeError;

/// Physical separation process of the cascade stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Process {
    Centrifuge,
    Diffusion,
}

impl Process {
    pub fn as_str(&self) -> &'static str {
        match self {
            Process::Centrifuge => "centrifuge",
            Process::Diffusion => "diffusion",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Process {
    type Err = CascadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "centrifuge" => Ok(Process::Centrifuge),
            "diffusion" => Ok(Process::Diffusion),
            other => Err(CascadeError::InvalidArgument(format!(
                "'process' must be one of: centrifuge, diffusion (got '{other}')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_strings() {
        for p in [Process::Centrifuge, Process::Diffusion] {
            assert_eq!(Process::from_str(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn test_unknown_process_rejected() {
        let err = Process::from_str("laser").unwrap_err();
        assert!(matches!(err, CascadeError::InvalidArgument(_)));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Process::Centrifuge).unwrap();
        assert_eq!(json, "\"centrifuge\"");
        let p: Process = serde_json::from_str("\"diffusion\"").unwrap();
        assert_eq!(p, Process::Diffusion);
    }
}
