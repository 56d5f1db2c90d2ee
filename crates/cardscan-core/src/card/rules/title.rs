//! Card title extraction.

use tracing::debug;

use super::{CardText, ExtractionMatch, FieldExtractor, RuleMatch, Stage, run_cascade};

/// Title cascade: the card name is printed at the top, so the first
/// recognized line with content wins.
pub const TITLE_STAGES: &[Stage] = &[Stage {
    name: "first-line",
    rule: first_non_blank_line,
}];

/// Title field extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleExtractor;

impl TitleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for TitleExtractor {
    fn extract(&self, text: &CardText<'_>) -> Option<ExtractionMatch> {
        if text.is_blank() {
            debug!("No usable text, skipping title extraction");
            return None;
        }
        run_cascade(TITLE_STAGES, text)
    }
}

/// Extract the card title from recognized lines.
pub fn extract_title<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    TitleExtractor::new()
        .extract(&CardText::new(lines))
        .map(|m| m.value)
}

fn first_non_blank_line(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines()
        .iter()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .find(|(_, line)| !line.is_empty())
        .map(|(i, line)| RuleMatch::new(line).at_line(i))
}
