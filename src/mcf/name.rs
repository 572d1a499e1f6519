// src/mcf/name.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Word character followed by an uppercase letter, the boundary where a
/// camel-cased token gets split for display.
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)([A-Z])").expect("camel-case regex should be valid"));

/// Turn the accumulated comma-separated token list into the final display
/// name: trailing separators trimmed, camel case spaced out (leftmost,
/// non-overlapping), `To`/`Of` given a trailing space.
pub fn finish(raw: &str) -> String {
    let trimmed = raw.trim_end_matches([',', ' ']);
    CAMEL_BOUNDARY
        .replace_all(trimmed, "${1} ${2}")
        .replace("To", "To ")
        .replace("Of", "Of ")
        .replace("ACitizen", "A Citizen")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_separator_and_spaces_camel_case() {
        assert_eq!(
            finish("Population: Male, EducationalAttainmentTertiary, "),
            "Population: Male, Educational Attainment Tertiary"
        );
    }

    #[test]
    fn to_and_of_get_trailing_spaces() {
        assert_eq!(
            finish("IncomeOf0To20Percentile, "),
            "Income Of 0 To 20 Percentile"
        );
    }

    #[test]
    fn consecutive_capitals_split_once() {
        assert_eq!(finish("ACitizen"), "A Citizen");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(finish(""), "");
    }
}
