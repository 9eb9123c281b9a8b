// ─────────────────────────────────────────────────────────────────────
// SCPN MISO Cascade — Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Operator-facing text dump of a cascade session.
//!
//! Everything here is for human eyes; downstream machinery consumes the
//! JSON record instead.

use std::fmt::Write;

use miso_types::process::Process;

use crate::cascade::EnrichmentCascade;

/// Render all inputs and computed outputs of the session, including the
/// per-isotope percentage compositions and separation factors.
pub fn diagnostic_report(cascade: &EnrichmentCascade) -> String {
    let mut out = String::new();
    let factors = cascade.separation_factors();

    let _ = writeln!(out, "--------------------------------------");
    let _ = writeln!(out, "Starting calculations with parameters:");
    let _ = writeln!(out, "  feed               {:11.3}", cascade.feed_limit());
    let _ = writeln!(out, "  product            {:11.3}", cascade.product_limit());
    let _ = writeln!(out, "  x_p (235)          {:11.3}", cascade.product_target());
    let _ = writeln!(out, "  x_t (235)          {:11.3}", cascade.tails_target());
    let _ = writeln!(out, "  process            {:>11}", cascade.process());
    let _ = writeln!(out, "  maximal SWU        {:11.3}", cascade.swu_limit());
    if cascade.process() == Process::Centrifuge {
        let _ = writeln!(out, "  alpha_235          {:11.3}", factors.alpha[3]);
    }

    let _ = writeln!(out, "\nUsed:");
    let _ = writeln!(out, "  feed               {:11.3}", cascade.feed_qty());
    let _ = writeln!(out, "  SWU                {:11.3}", cascade.swu());
    let _ = writeln!(out, "  enriching stages   {:11.3}", cascade.n_enriching());
    let _ = writeln!(out, "  stripping stages   {:11.3}", cascade.n_stripping());

    let _ = writeln!(out, "\nProduced:");
    let _ = writeln!(out, "  product            {:11.3}", cascade.product_qty());
    let _ = writeln!(out, "  tails              {:11.3}", cascade.tails_qty());

    let _ = writeln!(out, "\nCompositions [%]:");
    let _ = writeln!(
        out,
        "  U-isotope        232         233         234         235         236         238"
    );
    for (label, composition) in [
        ("x_f", cascade.feed_composition()),
        ("x_p", cascade.product_composition()),
        ("x_t", cascade.tails_composition()),
    ] {
        let _ = write!(out, "  {label}     ");
        for v in composition {
            let _ = write!(out, "{:12.4e}", v * 100.0);
        }
        let _ = writeln!(out);
    }

    let _ = write!(out, "\n  alpha   ");
    for a in &factors.alpha {
        let _ = write!(out, "{a:12.6}");
    }
    let _ = writeln!(out);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use miso_types::record::{CascadeSpec, FeedComposition};

    fn solved_session() -> EnrichmentCascade {
        let mut feed = BTreeMap::new();
        feed.insert("922350000".to_string(), 0.00711);
        feed.insert("922380000".to_string(), 0.99289);
        let spec = CascadeSpec {
            feed_composition: FeedComposition::Nuclides(feed),
            product_assay: 0.05,
            tails_assay: 0.003,
            process: Process::Centrifuge,
            alpha_235: 1.4,
            feed_qty: 1000.0,
            product_qty: f64::INFINITY,
            max_swu: f64::INFINITY,
        };
        let mut cascade = EnrichmentCascade::from_spec(&spec).unwrap();
        cascade.solve().unwrap();
        cascade
    }

    #[test]
    fn test_report_lists_all_sections() {
        let report = diagnostic_report(&solved_session());
        for needle in [
            "Starting calculations with parameters:",
            "Used:",
            "Produced:",
            "Compositions [%]:",
            "enriching stages",
            "alpha",
            "centrifuge",
        ] {
            assert!(report.contains(needle), "missing '{needle}' in:\n{report}");
        }
    }

    #[test]
    fn test_report_contains_isotope_header() {
        let report = diagnostic_report(&solved_session());
        assert!(report.contains("232"));
        assert!(report.contains("238"));
        assert!(report.contains("x_f"));
        assert!(report.contains("x_p"));
        assert!(report.contains("x_t"));
    }
}
