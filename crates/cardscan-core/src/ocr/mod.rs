//! Line recognizers turning card images into ordered text lines.

#[cfg(feature = "native")]
mod pure_engine;
mod sidecar;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;
pub use sidecar::TextSidecarRecognizer;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Trait for anything that can read the text lines off a card image.
pub trait LineRecognizer: Send {
    /// Engine identifier.
    fn name(&self) -> &'static str;

    /// Recognize the text of the image at `path`.
    fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError>;
}

/// A recognized line of text with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],
}

impl TextLine {
    /// A line without position information.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            bbox: [0.0; 8],
        }
    }

    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized lines in reading order.
    pub lines: Vec<TextLine>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height), when known.
    pub image_size: Option<(u32, u32)>,
}

impl OcrResult {
    /// Build a result from plain text lines.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: texts.into_iter().map(TextLine::plain).collect(),
            ..Self::default()
        }
    }

    /// The recognized texts, in order.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sort lines by reading order (top-to-bottom, left-to-right).
    pub fn sort_by_reading_order(&mut self) {
        self.lines.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });
    }
}
