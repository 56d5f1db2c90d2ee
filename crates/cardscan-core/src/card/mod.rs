//! Card field extraction module.

pub mod normalize;
mod parser;
pub mod rules;

pub use normalize::{
    clean_collector_number, clean_expansion_code, normalize_collector_number,
    normalize_expansion, UNKNOWN,
};
pub use parser::{CardParser, ExtractionResult, RuleCardParser};

use crate::models::card::CardFields;
use crate::ocr::OcrResult;

/// Trait for card field extractors.
///
/// Extraction is total: any input, including an empty one, yields a value.
pub trait CardExtractor: Send + Sync {
    /// Extract card fields from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> CardFields;

    /// Extract card fields from recognized lines.
    fn extract_from_lines(&self, lines: &[String]) -> CardFields;
}
