//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{LineRecognizer, OcrResult, TextLine};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from the model files named in `config`.
    pub fn from_config(config: OcrConfig) -> Result<Self, OcrError> {
        let det_path = config.model_dir.join(&config.detection_model);
        let rec_path = config.model_dir.join(&config.recognition_model);
        let dict_path = config.model_dir.join(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!(
            "Loaded pure-onnx-ocr engine from {}",
            config.model_dir.display()
        );

        Ok(Self { engine, config })
    }
}

impl LineRecognizer for PureOcrEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        let start = Instant::now();

        let image = image::open(path)
            .map_err(|e| OcrError::InvalidImage(format!("{}: {}", path.display(), e)))?;
        let (width, height) = image.dimensions();

        debug!("Recognizing {} ({}x{})", path.display(), width, height);

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let lines = results
            .iter()
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextLine {
                    text,
                    confidence: r.confidence,
                    bbox: polygon_to_bbox(&r.bounding_box),
                }
            })
            .collect();

        let mut result = OcrResult {
            lines,
            processing_time_ms: 0,
            image_size: Some((width, height)),
        };
        result.sort_by_reading_order();
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} lines in {}ms",
            result.lines.len(),
            result.processing_time_ms
        );

        Ok(result)
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
