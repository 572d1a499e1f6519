// src/extract.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A denominator reference inside an MCF node body.
static DENOMINATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"measurementDenominator: dcs:(\w+)").expect("denominator regex should be valid")
});

/// Collect every denominator dcid referenced in `mcf`, deduplicated in
/// first-appearance order.
pub fn extract_denominators(mcf: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dcids = Vec::new();
    for caps in DENOMINATOR_RE.captures_iter(mcf) {
        let dcid = caps[1].to_string();
        if seen.insert(dcid.clone()) {
            dcids.push(dcid);
        }
    }
    dcids
}
