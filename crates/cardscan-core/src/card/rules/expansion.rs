//! Expansion (set) code extraction.
//!
//! Card footers print the set code next to a language marker, e.g. `ABC.EN`
//! or `XYZEN`. When neither form is present, the first run of capitals in the
//! whole text is taken as a last resort.

use tracing::debug;

use super::patterns::{DOT_EN_CODE, LANGUAGE_MARKER, UPPERCASE_RUN};
use super::{CardText, ExtractionMatch, FieldExtractor, RuleMatch, Stage, run_cascade};

/// Expansion cascade, in priority order.
pub const EXPANSION_STAGES: &[Stage] = &[
    Stage {
        name: "dot-en",
        rule: dot_en,
    },
    Stage {
        name: "bare-en",
        rule: bare_en,
    },
    Stage {
        name: "uppercase-run",
        rule: uppercase_run,
    },
];

/// Expansion code field extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpansionExtractor;

impl ExpansionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for ExpansionExtractor {
    fn extract(&self, text: &CardText<'_>) -> Option<ExtractionMatch> {
        if text.is_blank() {
            debug!("No usable text, skipping expansion extraction");
            return None;
        }
        run_cascade(EXPANSION_STAGES, text)
    }
}

/// Extract the expansion code from recognized lines.
pub fn extract_expansion<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    ExpansionExtractor::new()
        .extract(&CardText::new(lines))
        .map(|m| m.value)
}

fn dot_en(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines().iter().enumerate().find_map(|(i, line)| {
        DOT_EN_CODE
            .captures(line)
            .map(|caps| RuleMatch::new(&caps[1]).at_line(i))
    })
}

// Only the first marker in a line counts; a line starting with it is skipped.
// A marker preceded by whitespace only still matches, with an empty code,
// which ends the cascade.
fn bare_en(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines().iter().enumerate().find_map(|(i, line)| {
        let pos = line.find(LANGUAGE_MARKER)?;
        if pos == 0 {
            return None;
        }
        Some(RuleMatch::new(line[..pos].trim()).at_line(i))
    })
}

fn uppercase_run(text: &CardText<'_>) -> Option<RuleMatch> {
    UPPERCASE_RUN
        .find(text.full_text())
        .map(|m| RuleMatch::new(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stage_for(lines: &[&str]) -> Option<&'static str> {
        ExpansionExtractor::new()
            .extract(&CardText::new(lines))
            .map(|m| m.stage)
    }

    #[test]
    fn test_dot_en() {
        let lines = ["Dragon Knight", "ABC.EN", "12/99"];
        assert_eq!(extract_expansion(&lines), Some("ABC".to_string()));
        assert_eq!(stage_for(&lines), Some("dot-en"));
    }

    #[test]
    fn test_dot_en_inside_line() {
        assert_eq!(
            extract_expansion(&["foo", "1st ed. LOB.EN001"]),
            Some("LOB".to_string())
        );
    }

    #[test]
    fn test_bare_en() {
        let lines = ["Fire Elemental", "XYZEN SET", "C0042"];
        assert_eq!(extract_expansion(&lines), Some("XYZ".to_string()));
        assert_eq!(stage_for(&lines), Some("bare-en"));
    }

    #[test]
    fn test_bare_en_trims_prefix() {
        assert_eq!(
            extract_expansion(&["card", "  SDK EN"]),
            Some("SDK".to_string())
        );
    }

    #[test]
    fn test_bare_en_ignores_marker_at_line_start() {
        // "ENERGY" begins with the marker, so only the later line counts.
        assert_eq!(
            extract_expansion(&["ENERGY BOOST", "MRDEN"]),
            Some("MRD".to_string())
        );
    }

    #[test]
    fn test_bare_en_uses_first_marker_only() {
        // First marker sits at index 0; the later "EN" in the same line is ignored.
        assert_eq!(stage_for(&["ENABLE TOKEN"]), Some("uppercase-run"));
        assert_eq!(extract_expansion(&["ENABLE TOKEN"]), Some("ENABLE".to_string()));
    }

    #[test]
    fn test_bare_en_blank_prefix_ends_cascade() {
        assert_eq!(stage_for(&["   EN"]), None);

        // Neither later lines nor the uppercase-run stage are consulted.
        assert_eq!(extract_expansion(&["  EN", "ABC"]), None);
        assert_eq!(extract_expansion(&["\tEN SET", "XYZEN"]), None);
    }

    #[test]
    fn test_uppercase_run_fallback() {
        let lines = ["the DRAGON awakens", "7"];
        assert_eq!(extract_expansion(&lines), Some("DRAGON".to_string()));
        assert_eq!(stage_for(&lines), Some("uppercase-run"));
    }

    #[test]
    fn test_uppercase_run_needs_word_boundaries() {
        assert_eq!(extract_expansion(&["aBCDe", "AB"]), None);
    }

    #[test]
    fn test_dot_en_beats_bare_en() {
        // Line 0 satisfies bare-en, line 1 satisfies dot-en; dot-en wins.
        let lines = ["QQEN", "RST.EN"];
        assert_eq!(extract_expansion(&lines), Some("RST".to_string()));
    }

    #[test]
    fn test_bare_en_beats_uppercase_run() {
        let lines = ["WIZARDS", "abcEN"];
        assert_eq!(extract_expansion(&lines), Some("abc".to_string()));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_expansion(&["   ", "", "???"]), None);
    }

    #[test]
    fn test_empty_marker_short_circuits() {
        assert_eq!(extract_expansion(&["ABC.EN", "Empty"]), None);
        let none: [&str; 0] = [];
        assert_eq!(extract_expansion(&none), None);
    }
}
