//! Recognizer reading pre-recognized text from sidecar files.
//!
//! For `cards/dragon.jpg` the lines are read from `cards/dragon.txt`, one
//! recognized region per line. Useful for re-running extraction on text
//! produced elsewhere, and for running the pipeline without OCR models.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::error::OcrError;

use super::{LineRecognizer, OcrResult};

/// Sidecar file extension.
pub const SIDECAR_EXTENSION: &str = "txt";

/// Line recognizer backed by `.txt` files next to the images.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSidecarRecognizer;

impl TextSidecarRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Path of the sidecar file for an image.
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        image_path.with_extension(SIDECAR_EXTENSION)
    }
}

impl LineRecognizer for TextSidecarRecognizer {
    fn name(&self) -> &'static str {
        "sidecar"
    }

    fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let sidecar = Self::sidecar_path(path);

        let content = std::fs::read_to_string(&sidecar).map_err(|e| {
            OcrError::Recognition(format!("cannot read {}: {}", sidecar.display(), e))
        })?;

        let mut result = OcrResult::from_texts(content.lines());
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Read {} lines from {}",
            result.lines.len(),
            sidecar.display()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_sidecar_lines() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("card.jpg");
        std::fs::write(dir.path().join("card.txt"), "Dragon Knight\nABC.EN\n\n12/99\n").unwrap();

        let result = TextSidecarRecognizer::new().recognize(&image).unwrap();
        assert_eq!(result.texts(), vec!["Dragon Knight", "ABC.EN", "", "12/99"]);
    }

    #[test]
    fn test_missing_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextSidecarRecognizer::new()
            .recognize(&dir.path().join("none.png"))
            .unwrap_err();
        assert!(matches!(err, OcrError::Recognition(_)));
    }

    #[test]
    fn test_empty_sidecar_has_no_lines() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blank.txt"), "").unwrap();

        let result = TextSidecarRecognizer::new()
            .recognize(&dir.path().join("blank.png"))
            .unwrap();
        assert!(result.is_empty());
    }
}
