//! Card data models.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::card::normalize::{
    from_display, normalize_collector_number, normalize_expansion, or_unknown,
};
use crate::error::{CardScanError, Result};

/// Title used when the recognizer returned no lines.
pub const NO_TEXT_TITLE: &str = "No text detected";

/// Title used when recognition failed.
pub const OCR_ERROR_TITLE: &str = "OCR Error";

/// Text line stored when no recognizer is configured.
pub const OCR_UNAVAILABLE_LINE: &str = "OCR not available";

/// Serializes `Option<String>` as its display form, `None` as `"Unknown"`.
mod sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::card::normalize::{from_display, or_unknown};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(or_unknown(value.as_deref()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(from_display(&raw).map(str::to_string))
    }
}

/// Raw fields extracted from one card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFields {
    /// Card title.
    #[serde(with = "sentinel", default)]
    pub title: Option<String>,

    /// Collector number as printed, e.g. `7/120U`.
    #[serde(with = "sentinel", default)]
    pub collector_number: Option<String>,

    /// Expansion code as printed.
    #[serde(with = "sentinel", default)]
    pub expansion: Option<String>,
}

impl CardFields {
    pub fn title_display(&self) -> &str {
        or_unknown(self.title.as_deref())
    }

    pub fn collector_number_display(&self) -> &str {
        or_unknown(self.collector_number.as_deref())
    }

    pub fn expansion_display(&self) -> &str {
        or_unknown(self.expansion.as_deref())
    }
}

/// Processing state of a card record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    /// Fields came straight from extraction.
    Processed,
    /// Fields were corrected by hand.
    Updated,
    /// Recognition failed for this image.
    Error,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Processed => "Processed",
            Self::Updated => "Updated",
            Self::Error => "Error",
        };
        f.write_str(s)
    }
}

/// A manual correction. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardEdit {
    pub title: Option<String>,
    pub collector_number: Option<String>,
    pub expansion: Option<String>,
}

impl CardEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_collector_number(mut self, collector_number: impl Into<String>) -> Self {
        self.collector_number = Some(collector_number.into());
        self
    }

    pub fn with_expansion(mut self, expansion: impl Into<String>) -> Self {
        self.expansion = Some(expansion.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.collector_number.is_none() && self.expansion.is_none()
    }
}

/// Everything known about one scanned card image.
///
/// Cleaned values are private and only ever derived from the raw ones, so
/// the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Image file name.
    pub filename: String,

    /// Full path of the image.
    pub image_path: PathBuf,

    #[serde(flatten)]
    fields: CardFields,

    #[serde(with = "sentinel", default)]
    cleaned_collector_number: Option<String>,

    #[serde(with = "sentinel", default)]
    cleaned_expansion: Option<String>,

    /// Processing state.
    pub status: CardStatus,

    /// Recognized lines, in recognizer order.
    pub text_lines: Vec<String>,
}

impl CardRecord {
    /// Create a processed record from extracted fields.
    pub fn new(image_path: &Path, fields: CardFields, text_lines: Vec<String>) -> Self {
        let mut record = Self {
            filename: file_name(image_path),
            image_path: image_path.to_path_buf(),
            fields,
            cleaned_collector_number: None,
            cleaned_expansion: None,
            status: CardStatus::Processed,
            text_lines,
        };
        record.refresh_cleaned();
        record
    }

    /// Record for an image in which the recognizer found no text.
    pub fn no_text(image_path: &Path) -> Self {
        let fields = CardFields {
            title: Some(NO_TEXT_TITLE.to_string()),
            ..CardFields::default()
        };
        Self::new(image_path, fields, Vec::new())
    }

    /// Record for an image on which recognition failed.
    pub fn ocr_error(image_path: &Path, message: &str) -> Self {
        let fields = CardFields {
            title: Some(OCR_ERROR_TITLE.to_string()),
            ..CardFields::default()
        };
        let mut record = Self::new(image_path, fields, vec![format!("OCR Error: {}", message)]);
        record.status = CardStatus::Error;
        record
    }

    /// Record for an image scanned without a recognizer; titled by file stem.
    pub fn without_ocr(image_path: &Path) -> Self {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty());
        let fields = CardFields {
            title: stem,
            ..CardFields::default()
        };
        Self::new(image_path, fields, vec![OCR_UNAVAILABLE_LINE.to_string()])
    }

    pub fn fields(&self) -> &CardFields {
        &self.fields
    }

    pub fn title(&self) -> &str {
        self.fields.title_display()
    }

    /// Raw collector number.
    pub fn collector_number(&self) -> &str {
        self.fields.collector_number_display()
    }

    /// Raw expansion code.
    pub fn expansion(&self) -> &str {
        self.fields.expansion_display()
    }

    pub fn cleaned_collector_number(&self) -> &str {
        or_unknown(self.cleaned_collector_number.as_deref())
    }

    pub fn cleaned_expansion(&self) -> &str {
        or_unknown(self.cleaned_expansion.as_deref())
    }

    /// Apply a manual correction and mark the record as updated.
    pub fn apply_edit(&mut self, edit: CardEdit) {
        let parse = |value: String| from_display(&value).map(str::to_string);

        if let Some(title) = edit.title {
            self.fields.title = parse(title);
        }
        if let Some(collector_number) = edit.collector_number {
            self.fields.collector_number = parse(collector_number);
        }
        if let Some(expansion) = edit.expansion {
            self.fields.expansion = parse(expansion);
        }

        self.refresh_cleaned();
        self.status = CardStatus::Updated;
    }

    fn refresh_cleaned(&mut self) {
        self.cleaned_collector_number =
            normalize_collector_number(self.fields.collector_number.as_deref());
        self.cleaned_expansion = normalize_expansion(self.fields.expansion.as_deref());
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Record counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub updated: usize,
    pub errors: usize,
}

/// Ordered collection of card records from one scanning session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBatch {
    records: Vec<CardRecord>,
}

impl CardBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping processing order.
    pub fn push(&mut self, record: CardRecord) {
        self.records.push(record);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.records.iter()
    }

    /// Find a record by image file name.
    pub fn find(&self, filename: &str) -> Option<&CardRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }

    /// Apply a manual correction to the record named `filename`.
    pub fn apply_edit(&mut self, filename: &str, edit: CardEdit) -> Result<&CardRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.filename == filename)
            .ok_or_else(|| CardScanError::UnknownCard(filename.to_string()))?;

        record.apply_edit(edit);
        info!(
            "Updated card: {}, Title: {}, Collector: {}, Set: {}",
            record.filename,
            record.title(),
            record.cleaned_collector_number(),
            record.cleaned_expansion()
        );
        Ok(record)
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for record in &self.records {
            match record.status {
                CardStatus::Processed => summary.processed += 1,
                CardStatus::Updated => summary.updated += 1,
                CardStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    /// Load a session from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut batch: Self = serde_json::from_str(&content)?;
        for record in &mut batch.records {
            record.refresh_cleaned();
        }
        Ok(batch)
    }

    /// Save the session to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CardBatch {
    type Item = &'a CardRecord;
    type IntoIter = std::slice::Iter<'a, CardRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(name: &str, collector: &str, expansion: &str) -> CardRecord {
        CardRecord::new(
            Path::new(name),
            CardFields {
                title: Some("Card".to_string()),
                collector_number: Some(collector.to_string()),
                expansion: Some(expansion.to_string()),
            },
            vec!["Card".to_string()],
        )
    }

    #[test]
    fn test_cleaned_values_follow_raw() {
        let r = record("dir/a.jpg", "7/120U", "AB.CD");
        assert_eq!(r.filename, "a.jpg");
        assert_eq!(r.collector_number(), "7/120U");
        assert_eq!(r.cleaned_collector_number(), "7");
        assert_eq!(r.expansion(), "AB.CD");
        assert_eq!(r.cleaned_expansion(), "ABC");
        assert_eq!(r.status, CardStatus::Processed);
    }

    #[test]
    fn test_fallback_records() {
        let r = CardRecord::no_text(Path::new("x/blank.png"));
        assert_eq!(r.title(), "No text detected");
        assert_eq!(r.cleaned_collector_number(), "Unknown");
        assert_eq!(r.status, CardStatus::Processed);

        let r = CardRecord::ocr_error(Path::new("x/bad.png"), "boom");
        assert_eq!(r.title(), "OCR Error");
        assert_eq!(r.text_lines, vec!["OCR Error: boom".to_string()]);
        assert_eq!(r.status, CardStatus::Error);

        let r = CardRecord::without_ocr(Path::new("x/black_lotus.jpg"));
        assert_eq!(r.title(), "black_lotus");
        assert_eq!(r.expansion(), "Unknown");
        assert_eq!(r.text_lines, vec!["OCR not available".to_string()]);
    }

    #[test]
    fn test_apply_edit_runs_normalizer() {
        let mut r = record("a.jpg", "12/99", "ABC");
        r.apply_edit(
            CardEdit::new()
                .with_title("Shivan Dragon")
                .with_collector_number("R0042/350")
                .with_expansion("M.2.1.X"),
        );
        assert_eq!(r.title(), "Shivan Dragon");
        assert_eq!(r.collector_number(), "R0042/350");
        assert_eq!(r.cleaned_collector_number(), "0042");
        assert_eq!(r.cleaned_expansion(), "M21");
        assert_eq!(r.status, CardStatus::Updated);
    }

    #[test]
    fn test_apply_edit_keeps_unset_fields() {
        let mut r = record("a.jpg", "12/99", "ABC");
        r.apply_edit(CardEdit::new().with_expansion("Unknown"));
        assert_eq!(r.collector_number(), "12/99");
        assert_eq!(r.expansion(), "Unknown");
        assert_eq!(r.fields().expansion, None);
        assert_eq!(r.status, CardStatus::Updated);
    }

    #[test]
    fn test_reapplying_cleaned_values_is_stable() {
        let mut r = record("a.jpg", "7/120U", "XYZ.EN");
        let collector = r.cleaned_collector_number().to_string();
        let expansion = r.cleaned_expansion().to_string();
        r.apply_edit(
            CardEdit::new()
                .with_collector_number(collector.clone())
                .with_expansion(expansion.clone()),
        );
        assert_eq!(r.cleaned_collector_number(), collector);
        assert_eq!(r.cleaned_expansion(), expansion);
    }

    #[test]
    fn test_batch_edit_and_summary() {
        let mut batch = CardBatch::new();
        batch.push(record("a.jpg", "1/10", "AAA"));
        batch.push(record("b.jpg", "2/10", "BBB"));
        batch.push(CardRecord::ocr_error(Path::new("c.jpg"), "failed"));

        let updated = batch
            .apply_edit("b.jpg", CardEdit::new().with_title("Renamed"))
            .unwrap();
        assert_eq!(updated.title(), "Renamed");

        assert!(matches!(
            batch.apply_edit("missing.jpg", CardEdit::new()),
            Err(CardScanError::UnknownCard(_))
        ));

        assert_eq!(
            batch.summary(),
            BatchSummary {
                processed: 1,
                updated: 1,
                errors: 1
            }
        );

        let names: Vec<&str> = batch.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);

        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_serializes_unknown_sentinel() {
        let r = CardRecord::no_text(Path::new("blank.png"));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["title"], "No text detected");
        assert_eq!(json["collector_number"], "Unknown");
        assert_eq!(json["cleaned_expansion"], "Unknown");
        assert_eq!(json["status"], "Processed");
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut batch = CardBatch::new();
        batch.push(record("a.jpg", "7/120U", "ABC"));
        batch.push(CardRecord::no_text(Path::new("b.jpg")));
        batch.save(&path).unwrap();

        let loaded = CardBatch::load(&path).unwrap();
        assert_eq!(loaded, batch);
        assert_eq!(loaded.find("b.jpg").unwrap().collector_number(), "Unknown");
    }
}
