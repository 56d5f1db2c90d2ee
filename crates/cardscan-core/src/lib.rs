//! Core library for trading card OCR processing.
//!
//! This crate provides:
//! - Card field extraction (title, collector number, expansion code) as
//!   ordered rule cascades over recognized text lines
//! - Normalization of extracted values for display and export
//! - Card records, batches and manual edits
//! - Line recognizers (pure Rust OCR, text sidecar files)

pub mod card;
pub mod error;
pub mod models;
pub mod ocr;
pub mod scanner;

pub use card::{
    clean_collector_number, clean_expansion_code, CardExtractor, CardParser, ExtractionResult,
    RuleCardParser, UNKNOWN,
};
pub use error::{CardScanError, OcrError, Result};
pub use models::card::{BatchSummary, CardBatch, CardEdit, CardFields, CardRecord, CardStatus};
pub use models::config::CardScanConfig;
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use ocr::{LineRecognizer, OcrResult, TextLine, TextSidecarRecognizer};
pub use scanner::{discover_images, CardScanner, ScanOutcome};
