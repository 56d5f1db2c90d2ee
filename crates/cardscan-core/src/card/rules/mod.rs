//! Rule-based field extractors for trading card text.
//!
//! Each field is extracted by a cascade: an ordered list of [`Stage`]s tried
//! in sequence, stopping at the first stage that matches.

pub mod collector;
pub mod expansion;
pub mod patterns;
pub mod title;

pub use collector::{extract_collector_number, CollectorExtractor, COLLECTOR_STAGES};
pub use expansion::{extract_expansion, ExpansionExtractor, EXPANSION_STAGES};
pub use patterns::*;
pub use title::{extract_title, TitleExtractor};

use tracing::trace;

/// Recognized lines of one card image together with their derived full text.
#[derive(Debug, Clone)]
pub struct CardText<'a> {
    lines: Vec<&'a str>,
    full_text: String,
}

impl<'a> CardText<'a> {
    /// Borrow a line sequence in recognizer order.
    pub fn new<S: AsRef<str>>(lines: &'a [S]) -> Self {
        let lines: Vec<&'a str> = lines.iter().map(|l| l.as_ref()).collect();
        let full_text = lines.join(" ");
        Self { lines, full_text }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// All lines joined with a single space.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// True when there is nothing usable to extract from: no lines at all, or
    /// the recognizer flagged the detection as empty.
    pub fn is_blank(&self) -> bool {
        self.lines.is_empty() || self.full_text.contains(EMPTY_MARKER)
    }
}

/// Value found by a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub value: String,
    /// Index of the line the value came from, if it came from a single line.
    pub line: Option<usize>,
}

impl RuleMatch {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A named, side-effect free rule in a cascade.
#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub rule: fn(&CardText<'_>) -> Option<RuleMatch>,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Stage").field(&self.name).finish()
    }
}

/// Extracted value along with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Extracted value.
    pub value: String,
    /// Name of the cascade stage that matched.
    pub stage: &'static str,
    /// Source line index.
    pub line: Option<usize>,
}

/// Run `stages` in order and return the first match.
///
/// A stage that matches with an empty value claims the field without
/// producing one: the cascade stops there and yields `None`.
pub fn run_cascade(stages: &[Stage], text: &CardText<'_>) -> Option<ExtractionMatch> {
    let (stage, found) = stages.iter().find_map(|stage| {
        let found = (stage.rule)(text);
        trace!(stage = stage.name, matched = found.is_some(), "cascade stage");
        found.map(|m| (stage, m))
    })?;

    if found.value.is_empty() {
        trace!(stage = stage.name, "stage matched an empty value");
        return None;
    }

    Some(ExtractionMatch {
        value: found.value,
        stage: stage.name,
        line: found.line,
    })
}

/// Trait for card field extractors.
pub trait FieldExtractor {
    /// Extract the field, or `None` when no rule matches.
    fn extract(&self, text: &CardText<'_>) -> Option<ExtractionMatch>;
}
