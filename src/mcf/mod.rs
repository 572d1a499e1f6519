// src/mcf/mod.rs

mod name;
mod slots;

pub use slots::Slots;

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::debug;

/// Render one StatisticalVariable node for `sv`.
///
/// Tokens are split on `_` and classified one at a time; every matched token
/// also contributes to the display name. `Count` is a pure measurement
/// marker and is skipped, `Person` turns the name into a population count.
fn render_node(sv: &str) -> String {
    let mut slots = Slots::default();
    let mut raw_name = String::new();

    for prop in sv.split('_') {
        if prop == "Count" {
            continue;
        }
        if prop == "Person" {
            raw_name.push_str("Population: ");
        }
        if slots.apply(prop) {
            raw_name.push_str(prop);
            raw_name.push_str(", ");
        }
    }

    format!(
        "Node: dcid:{sv}\n\
         name: \"{name}\"\n\
         typeOf: dcs:StatisticalVariable\n\
         populationType: dcs:Person{props}\n\
         statType: dcs:measuredValue\n\
         measuredProperty: dcs:count\n",
        sv = sv,
        name = name::finish(&raw_name),
        props = slots.render(),
    )
}

/// Render the MCF body for `sv_list`: one node per identifier, blank line
/// between nodes, no trailing newline. Identifiers containing `Total` are
/// aggregates that already exist upstream and are skipped.
pub fn render_mcf(sv_list: &[String]) -> String {
    let mut body = String::new();
    for sv in sv_list {
        if sv.contains("Total") {
            continue;
        }
        debug!(sv = %sv, "rendering node");
        body.push_str(&render_node(sv));
        body.push('\n');
    }
    body.trim_end_matches('\n').to_string()
}

/// Render and write the MCF for `sv_list`, replacing whatever is at `path`.
pub fn write_mcf(sv_list: &[String], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let body = render_mcf(sv_list);
    fs::write(path, body).with_context(|| format!("writing MCF to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn svs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn total_identifiers_emit_no_node() {
        let body = render_mcf(&svs(&[
            "Person_Count_Total",
            "Person_Count_Male_EducationalAttainmentTertiary",
        ]));
        assert_eq!(body.matches("Node: dcid:").count(), 1);
        assert!(!body.contains("Total"));
    }

    #[test]
    fn education_node_has_expected_name_and_properties() {
        let body = render_mcf(&svs(&["Person_Count_Male_EducationalAttainmentTertiary"]));
        assert!(body.starts_with("Node: dcid:Person_Count_Male_EducationalAttainmentTertiary\n"));
        assert!(body.contains("name: \"Population: Male, Educational Attainment Tertiary\""));
        assert!(body.contains("\neducationalAttainment: dcs:Tertiary\n"));
        assert!(body.contains("\ngender: dcs:Male\n"));
        assert!(body.ends_with("measuredProperty: dcs:count"));
    }

    #[test]
    fn income_and_duration_tokens_both_render() {
        let body = render_mcf(&svs(&["Person_Count_IncomeOf0To20Percentile_30To60Minutes"]));
        assert!(body.contains(
            "populationType: dcs:Person\n\
             income: [0 20 Percentile]\n\
             duration: [30 60 Minutes]\n\
             statType: dcs:measuredValue"
        ));
        assert!(body.contains(
            "name: \"Population: Income Of 0 To 20 Percentile, 30 To 60 Minutes\""
        ));
    }

    #[test]
    fn nodes_are_blank_line_separated_without_trailing_newline() {
        let body = render_mcf(&svs(&[
            "Person_Count_Male",
            "Person_Count_Female",
        ]));
        assert!(body.contains("measuredProperty: dcs:count\n\nNode: dcid:Person_Count_Female"));
        assert!(!body.ends_with('\n'));
    }

    #[test]
    fn rendering_is_deterministic() {
        let list = svs(&["Person_Count_Male_Urban", "Person_Count_30OrMoreMinutes"]);
        assert_eq!(render_mcf(&list), render_mcf(&list));
    }

    #[test]
    fn write_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deno.mcf");
        fs::write(&path, "stale content that must disappear").unwrap();

        write_mcf(&svs(&["Person_Count_Male"]), &path).unwrap();

        let got = fs::read_to_string(&path).unwrap();
        assert!(got.starts_with("Node: dcid:Person_Count_Male"));
        assert!(!got.contains("stale"));
    }

    #[test]
    fn empty_list_writes_an_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deno.mcf");
        fs::write(&path, "old").unwrap();

        write_mcf(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn missing_denominators_come_out_sorted_and_deduplicated() {
        // the driver path: extract → existence filter → sort → render
        let mcf_in = "measurementDenominator: dcs:Person_Count_Urban\n\
                      measurementDenominator: dcs:Person_Count_Male\n\
                      measurementDenominator: dcs:Person_Count_Male\n";
        let denominators = crate::extract::extract_denominators(mcf_in);
        assert_eq!(denominators.len(), 2);

        let status: HashMap<String, bool> =
            denominators.iter().map(|d| (d.clone(), false)).collect();
        let missing = crate::registry::missing_dcids(&status);

        let body = render_mcf(&missing);
        let male = body.find("Node: dcid:Person_Count_Male").unwrap();
        let urban = body.find("Node: dcid:Person_Count_Urban").unwrap();
        assert_eq!(body.matches("Node: dcid:").count(), 2);
        assert!(male < urban);
    }
}
