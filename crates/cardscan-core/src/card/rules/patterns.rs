//! Common regex patterns for trading card text extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Expansion code patterns
    pub static ref DOT_EN_CODE: Regex = Regex::new(
        r"([A-Z]{3})\.EN"
    ).unwrap();

    pub static ref UPPERCASE_RUN: Regex = Regex::new(
        r"\b[A-Z]{3,}\b"
    ).unwrap();

    // Collector number patterns
    pub static ref ANCHORED_SLASH: Regex = Regex::new(
        r"\d+/\d+[CUMLR]?"
    ).unwrap();

    pub static ref RARITY_PREFIX: Regex = Regex::new(
        r"^[CLUMR](\d{4})"
    ).unwrap();

    pub static ref RARITY_SLASH: Regex = Regex::new(
        r"(\d+)/(\d+)([CUMLR])"
    ).unwrap();

    pub static ref PLAIN_SLASH: Regex = Regex::new(
        r"(\d+)/(\d+)"
    ).unwrap();

    pub static ref STANDALONE_NUMBER: Regex = Regex::new(
        r"\b\d+\b"
    ).unwrap();

    // Normalization
    pub static ref DIGIT: Regex = Regex::new(r"\d").unwrap();

    pub static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
}

/// Publisher line marker preceding the collector number block.
pub const PUBLISHER_ANCHOR: &str = "Inc.";

/// Language marker following the expansion code.
pub const LANGUAGE_MARKER: &str = "EN";

/// Marker emitted by the recognizer for blank detections.
pub const EMPTY_MARKER: &str = "Empty";
