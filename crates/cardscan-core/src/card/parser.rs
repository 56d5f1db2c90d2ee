//! Card parser running the title, expansion and collector number cascades.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::models::card::{CardFields, CardRecord};
use crate::ocr::OcrResult;

use super::rules::{
    CardText, CollectorExtractor, ExpansionExtractor, ExtractionMatch, FieldExtractor,
    TitleExtractor,
};
use super::CardExtractor;

/// Result of parsing one card's recognized lines.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Raw extracted fields.
    pub fields: CardFields,
    /// Cascade stage that produced the title.
    pub title_stage: Option<&'static str>,
    /// Cascade stage that produced the expansion code.
    pub expansion_stage: Option<&'static str>,
    /// Cascade stage that produced the collector number.
    pub collector_stage: Option<&'static str>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in microseconds.
    pub processing_time_us: u64,
}

/// Trait for card parsing.
pub trait CardParser {
    /// Parse a card from its recognized lines, in recognizer order.
    fn parse(&self, lines: &[String]) -> ExtractionResult;
}

/// Rule-based card parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleCardParser {
    title: TitleExtractor,
    expansion: ExpansionExtractor,
    collector: CollectorExtractor,
}

impl RuleCardParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the lines and wrap the outcome into a record for `image_path`.
    pub fn record(&self, image_path: &Path, lines: Vec<String>) -> CardRecord {
        let result = self.parse(&lines);
        CardRecord::new(image_path, result.fields, lines)
    }
}

fn split(found: Option<ExtractionMatch>) -> (Option<String>, Option<&'static str>) {
    match found {
        Some(m) => (Some(m.value), Some(m.stage)),
        None => (None, None),
    }
}

impl CardParser for RuleCardParser {
    fn parse(&self, lines: &[String]) -> ExtractionResult {
        let start = Instant::now();
        let text = CardText::new(lines);
        let mut warnings = Vec::new();

        debug!(
            "Parsing card from {} lines ({} characters)",
            lines.len(),
            text.full_text().len()
        );

        if text.is_blank() {
            warnings.push("No usable text detected".to_string());
        }

        let (title, title_stage) = split(self.title.extract(&text));
        if title.is_none() {
            warnings.push("Could not extract title".to_string());
        }

        let (expansion, expansion_stage) = split(self.expansion.extract(&text));
        if expansion.is_none() {
            warnings.push("Could not extract expansion code".to_string());
        }

        let (collector_number, collector_stage) = split(self.collector.extract(&text));
        if collector_number.is_none() {
            warnings.push("Could not extract collector number".to_string());
        }

        let fields = CardFields {
            title,
            collector_number,
            expansion,
        };

        info!(
            title = fields.title_display(),
            collector = fields.collector_number_display(),
            expansion = fields.expansion_display(),
            "Extracted card fields"
        );
        debug!(
            ?title_stage,
            ?expansion_stage,
            ?collector_stage,
            "Matched cascade stages"
        );

        ExtractionResult {
            fields,
            title_stage,
            expansion_stage,
            collector_stage,
            warnings,
            processing_time_us: micros(start.elapsed()),
        }
    }
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

impl CardExtractor for RuleCardParser {
    fn extract(&self, ocr_result: &OcrResult) -> CardFields {
        self.extract_from_lines(&ocr_result.texts())
    }

    fn extract_from_lines(&self, lines: &[String]) -> CardFields {
        self.parse(lines).fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardStatus;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn parse(raw: &[&str]) -> ExtractionResult {
        RuleCardParser::new().parse(&lines(raw))
    }

    #[test]
    fn test_dot_en_card() {
        let result = parse(&["Dragon Knight", "ABC.EN", "12/99"]);
        assert_eq!(result.fields.title_display(), "Dragon Knight");
        assert_eq!(result.fields.expansion_display(), "ABC");
        assert_eq!(result.fields.collector_number_display(), "12/99");
        assert_eq!(result.expansion_stage, Some("dot-en"));
        assert_eq!(result.collector_stage, Some("plain-slash"));
        assert!(result.warnings.is_empty());

        let record = RuleCardParser::new().record(
            Path::new("cards/dragon.jpg"),
            lines(&["Dragon Knight", "ABC.EN", "12/99"]),
        );
        assert_eq!(record.cleaned_collector_number(), "12");
        assert_eq!(record.cleaned_expansion(), "ABC");
    }

    #[test]
    fn test_rarity_prefix_card() {
        let record = RuleCardParser::new().record(
            Path::new("fire.png"),
            lines(&["Fire Elemental", "XYZEN SET", "C0042"]),
        );
        assert_eq!(record.title(), "Fire Elemental");
        assert_eq!(record.expansion(), "XYZ");
        assert_eq!(record.collector_number(), "0042");
        assert_eq!(record.cleaned_collector_number(), "0042");
        assert_eq!(record.cleaned_expansion(), "XYZ");
        assert_eq!(record.status, CardStatus::Processed);
    }

    #[test]
    fn test_publisher_anchor_card() {
        let record = RuleCardParser::new().record(
            Path::new("spirit.png"),
            lines(&["Water Spirit", "Wizards of the Coast Inc.", "7/120U", "flavor text"]),
        );
        assert_eq!(record.collector_number(), "7/120U");
        assert_eq!(record.cleaned_collector_number(), "7");
    }

    #[test]
    fn test_nothing_matches() {
        let result = parse(&["   ", "", "???"]);
        assert_eq!(result.fields.title_display(), "???");
        assert_eq!(result.fields.expansion, None);
        assert_eq!(result.fields.collector_number, None);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_empty_marker() {
        let result = parse(&["Dark Magician", "LOB.EN005", "Empty", "12/99R"]);
        assert_eq!(result.fields.title, None);
        assert_eq!(result.fields.title_display(), "Unknown");
        assert_eq!(result.title_stage, None);
        assert_eq!(result.fields.expansion, None);
        assert_eq!(result.fields.collector_number, None);
        assert_eq!(result.expansion_stage, None);
        assert_eq!(result.collector_stage, None);
    }

    #[test]
    fn test_empty_sequence() {
        let result = parse(&[]);
        assert_eq!(result.fields, CardFields::default());
        assert_eq!(result.fields.title_display(), "Unknown");
        assert_eq!(result.fields.collector_number_display(), "Unknown");
        assert_eq!(result.fields.expansion_display(), "Unknown");
    }

    #[test]
    fn test_sentinel_text_is_not_special() {
        // Literal "Unknown" in the recognized text is ordinary input.
        let result = parse(&["Unknown"]);
        assert_eq!(result.fields.title.as_deref(), Some("Unknown"));
        assert_eq!(result.fields.expansion, None);
    }

    #[test]
    fn test_empty_marker_blanks_every_field() {
        let result = parse(&["Dark Magician", "Empty"]);
        assert_eq!(result.fields, CardFields::default());
    }

    #[test]
    fn test_blank_prefix_before_marker_gives_unknown_expansion() {
        let result = parse(&["  EN", "ABC"]);
        assert_eq!(result.fields.expansion_display(), "Unknown");
        assert_eq!(result.expansion_stage, None);
    }

    #[test]
    fn test_processing_time_saturates() {
        assert_eq!(micros(Duration::from_millis(3)), 3_000);
        assert_eq!(micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_extract_from_ocr_result() {
        let ocr = OcrResult::from_texts(["Dragon Knight", "ABC.EN", "12/99"]);
        let fields = RuleCardParser::new().extract(&ocr);
        assert_eq!(fields, RuleCardParser::new().extract_from_lines(&ocr.texts()));
        assert_eq!(fields.expansion.as_deref(), Some("ABC"));
    }
}
