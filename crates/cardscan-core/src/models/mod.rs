//! Data models for card scanning.

pub mod card;
pub mod config;

pub use card::{BatchSummary, CardBatch, CardEdit, CardFields, CardRecord, CardStatus};
pub use config::{CardScanConfig, ExportConfig, OcrConfig, ScanConfig};
