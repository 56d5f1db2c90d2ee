//! Configuration structures for the card scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CardScanError, Result};

/// Main configuration for the cardscan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardScanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Folder scanning configuration.
    pub scan: ScanConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Model directory with every model file present.
    pub fn models_present(&self) -> bool {
        [&self.detection_model, &self.recognition_model, &self.dictionary]
            .iter()
            .all(|name| self.model_dir.join(name).is_file())
    }
}

/// Image folder scanning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Accepted image file extensions, lower case, without the dot.
    pub extensions: Vec<String>,

    /// Number of finished records buffered between scanner and collector.
    pub channel_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "bmp", "tiff", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            channel_capacity: 16,
        }
    }
}

impl ScanConfig {
    /// Whether `path` has one of the accepted extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions.iter().any(|x| *x == e))
    }
}

/// CSV export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default output CSV path.
    pub output_csv: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_csv: PathBuf::from("card_data.csv"),
        }
    }
}

impl CardScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the scanner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(CardScanError::Config(
                "scan.extensions must list at least one image type".to_string(),
            ));
        }
        if self.scan.channel_capacity == 0 {
            return Err(CardScanError::Config(
                "scan.channel_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.ocr.model_dir.join(model_name)
    }
}
