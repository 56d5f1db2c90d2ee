//! Collector number extraction.
//!
//! Collector numbers show up in several printed forms depending on the game
//! and print run:
//! - below the publisher copyright line: `7/120U`
//! - rarity letter plus four digits: `C0042`
//! - number over set size with a rarity suffix: `12/99R`
//! - number over set size: `12/99`
//! - a lone number
//!
//! The forms are tried in that order.

use tracing::debug;

use super::patterns::{
    ANCHORED_SLASH, PLAIN_SLASH, PUBLISHER_ANCHOR, RARITY_PREFIX, RARITY_SLASH, STANDALONE_NUMBER,
};
use super::{CardText, ExtractionMatch, FieldExtractor, RuleMatch, Stage, run_cascade};

/// Number of lines after the publisher line searched for a collector number.
pub const ANCHOR_WINDOW: usize = 2;

/// Collector number cascade, in priority order.
pub const COLLECTOR_STAGES: &[Stage] = &[
    Stage {
        name: "publisher-anchor",
        rule: publisher_anchor,
    },
    Stage {
        name: "rarity-prefix",
        rule: rarity_prefix,
    },
    Stage {
        name: "rarity-slash",
        rule: rarity_slash,
    },
    Stage {
        name: "plain-slash",
        rule: plain_slash,
    },
    Stage {
        name: "standalone-number",
        rule: standalone_number,
    },
];

/// Collector number field extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectorExtractor;

impl CollectorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CollectorExtractor {
    fn extract(&self, text: &CardText<'_>) -> Option<ExtractionMatch> {
        if text.is_blank() {
            debug!("No usable text, skipping collector number extraction");
            return None;
        }
        run_cascade(COLLECTOR_STAGES, text)
    }
}

/// Extract the raw collector number from recognized lines.
pub fn extract_collector_number<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    CollectorExtractor::new()
        .extract(&CardText::new(lines))
        .map(|m| m.value)
}

// Only the first publisher line is considered. If its window has no number
// the cascade moves on instead of looking for another publisher line.
fn publisher_anchor(text: &CardText<'_>) -> Option<RuleMatch> {
    let lines = text.lines();
    let anchor = (0..lines.len().saturating_sub(1))
        .find(|&i| lines[i].contains(PUBLISHER_ANCHOR))?;

    let window_end = (anchor + 1 + ANCHOR_WINDOW).min(lines.len());
    (anchor + 1..window_end).find_map(|i| {
        ANCHORED_SLASH
            .find(lines[i])
            .map(|m| RuleMatch::new(m.as_str()).at_line(i))
    })
}

fn rarity_prefix(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines().iter().enumerate().find_map(|(i, line)| {
        RARITY_PREFIX
            .captures(line.trim())
            .map(|caps| RuleMatch::new(&caps[1]).at_line(i))
    })
}

fn rarity_slash(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines().iter().enumerate().find_map(|(i, line)| {
        RARITY_SLASH.captures(line).map(|caps| {
            RuleMatch::new(format!("{}/{}{}", &caps[1], &caps[2], &caps[3])).at_line(i)
        })
    })
}

fn plain_slash(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines().iter().enumerate().find_map(|(i, line)| {
        PLAIN_SLASH
            .captures(line)
            .map(|caps| RuleMatch::new(format!("{}/{}", &caps[1], &caps[2])).at_line(i))
    })
}

fn standalone_number(text: &CardText<'_>) -> Option<RuleMatch> {
    text.lines().iter().enumerate().find_map(|(i, line)| {
        STANDALONE_NUMBER
            .find(line)
            .map(|m| RuleMatch::new(m.as_str()).at_line(i))
    })
}
