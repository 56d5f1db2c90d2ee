//! Error types for the cardscan-core library.
//!
//! Field extraction itself never fails; these cover the layers around it.

use thiserror::Error;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardScanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session or configuration file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No card with this file name in the batch.
    #[error("no card named {0} in batch")]
    UnknownCard(String),

    /// Configuration value out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid or unreadable image.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardScanError>;
