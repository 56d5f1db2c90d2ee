//! CSV export of card batches.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use cardscan_core::CardBatch;

/// Columns of the exported CSV, in order.
pub const CSV_HEADER: [&str; 5] = ["filename", "title", "collector_number", "expansion", "status"];

/// Write one row per record, in processing order, using cleaned values.
pub fn write_csv<W: Write>(batch: &CardBatch, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for record in batch {
        let status = record.status.to_string();
        wtr.write_record([
            record.filename.as_str(),
            record.title(),
            record.cleaned_collector_number(),
            record.cleaned_expansion(),
            status.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export a batch to a CSV file.
pub fn export_csv(batch: &CardBatch, path: &Path) -> anyhow::Result<()> {
    if batch.is_empty() {
        anyhow::bail!("No data to export");
    }
    write_csv(batch, File::create(path)?)
}

/// Render a batch as CSV text.
pub fn format_csv(batch: &CardBatch) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(batch, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use cardscan_core::{CardEdit, CardRecord, RuleCardParser};
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_csv_rows_use_cleaned_values() {
        let parser = RuleCardParser::new();
        let mut batch = CardBatch::new();
        batch.push(parser.record(
            Path::new("cards/spirit.jpg"),
            lines(&["Water Spirit", "Wizards of the Coast Inc.", "7/120U", "flavor text"]),
        ));
        batch.push(parser.record(
            Path::new("cards/fire.png"),
            lines(&["Fire Elemental", "XYZEN SET", "C0042"]),
        ));
        batch.push(CardRecord::ocr_error(Path::new("cards/bad.png"), "boom"));

        let csv = format_csv(&batch).unwrap();
        assert_eq!(
            csv,
            "filename,title,collector_number,expansion,status\n\
             spirit.jpg,Water Spirit,7,Unknown,Processed\n\
             fire.png,Fire Elemental,0042,XYZ,Processed\n\
             bad.png,OCR Error,Unknown,Unknown,Error\n"
        );
    }

    #[test]
    fn test_csv_quotes_and_updates() {
        let mut batch = CardBatch::new();
        batch.push(RuleCardParser::new().record(Path::new("a.jpg"), lines(&["Ajani, Mentor", "12/99"])));
        batch
            .apply_edit("a.jpg", CardEdit::new().with_expansion("M.21"))
            .unwrap();

        let csv = format_csv(&batch).unwrap();
        assert_eq!(
            csv.lines().nth(1),
            Some("a.jpg,\"Ajani, Mentor\",12,M21,Updated")
        );
    }

    #[test]
    fn test_export_refuses_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_csv(&CardBatch::new(), &dir.path().join("out.csv")).is_err());
    }
}
