//! Per-image scanning: recognize, extract, build a record.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::card::RuleCardParser;
use crate::error::Result;
use crate::models::card::CardRecord;
use crate::models::config::ScanConfig;
use crate::ocr::LineRecognizer;

/// How a scan over a list of images ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Images turned into records.
    pub scanned: usize,
    /// Whether the scan stopped before the last image.
    pub cancelled: bool,
}

/// Turns card images into card records.
pub struct CardScanner {
    parser: RuleCardParser,
    recognizer: Option<Box<dyn LineRecognizer>>,
}

impl CardScanner {
    /// Create a scanner. Without a recognizer every image is recorded by
    /// file name only.
    pub fn new(recognizer: Option<Box<dyn LineRecognizer>>) -> Self {
        Self {
            parser: RuleCardParser::new(),
            recognizer,
        }
    }

    /// Name of the recognizer in use, if any.
    pub fn recognizer_name(&self) -> Option<&'static str> {
        self.recognizer.as_ref().map(|r| r.name())
    }

    /// Produce the record for a single image. Recognition failures are
    /// recorded on the card, never returned.
    pub fn scan_image(&self, path: &Path) -> CardRecord {
        let Some(recognizer) = &self.recognizer else {
            return CardRecord::without_ocr(path);
        };

        match recognizer.recognize(path) {
            Ok(result) if result.is_empty() => {
                debug!("No text detected in {}", path.display());
                CardRecord::no_text(path)
            }
            Ok(result) => {
                debug!(
                    "{} recognized {} lines in {}ms",
                    recognizer.name(),
                    result.lines.len(),
                    result.processing_time_ms
                );
                self.parser.record(path, result.texts())
            }
            Err(e) => {
                warn!("OCR error on {}: {}", path.display(), e);
                CardRecord::ocr_error(path, &e.to_string())
            }
        }
    }

    /// Scan `paths` in order, handing each record to `sink`.
    ///
    /// `stop` is checked before every image. The scan also ends when `sink`
    /// returns `false`.
    pub fn scan_each<F>(&self, paths: &[PathBuf], stop: &AtomicBool, mut sink: F) -> ScanOutcome
    where
        F: FnMut(usize, CardRecord) -> bool,
    {
        let mut outcome = ScanOutcome::default();

        for (i, path) in paths.iter().enumerate() {
            if stop.load(Ordering::Relaxed) {
                info!("Scan stopped after {} of {} images", i, paths.len());
                outcome.cancelled = true;
                break;
            }

            info!("Processing {}/{}: {}", i + 1, paths.len(), path.display());
            let record = self.scan_image(path);
            outcome.scanned += 1;

            if !sink(i, record) {
                outcome.cancelled = i + 1 < paths.len();
                break;
            }
        }

        outcome
    }
}

/// List the image files directly inside `folder`, sorted by name.
pub fn discover_images(folder: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && scan.accepts(&path) {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} images in {}", files.len(), folder.display());
    Ok(files)
}
