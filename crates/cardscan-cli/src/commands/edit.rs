//! Edit command - correct a scanned card by hand.

use std::path::PathBuf;

use clap::Args;
use console::style;

use cardscan_core::{CardBatch, CardEdit};

use crate::export::export_csv;

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Session file written by `cardscan scan --session`
    #[arg(required = true)]
    session: PathBuf,

    /// Image file name of the card to correct
    #[arg(required = true)]
    filename: String,

    /// New card title
    #[arg(long)]
    title: Option<String>,

    /// New collector number
    #[arg(long)]
    collector: Option<String>,

    /// New set/expansion code
    #[arg(long)]
    expansion: Option<String>,

    /// Re-export the session to this CSV file
    #[arg(short, long)]
    export: Option<PathBuf>,
}

pub async fn run(args: EditArgs) -> anyhow::Result<()> {
    let edit = CardEdit {
        title: args.title,
        collector_number: args.collector,
        expansion: args.expansion,
    };
    if edit.is_empty() {
        anyhow::bail!("Nothing to update: pass --title, --collector or --expansion");
    }

    let mut batch = CardBatch::load(&args.session)?;
    let record = batch.apply_edit(&args.filename, edit)?;

    println!(
        "{} Updated card data for {}: {} | {} | {}",
        style("✓").green(),
        record.filename,
        record.title(),
        record.cleaned_collector_number(),
        record.cleaned_expansion()
    );

    batch.save(&args.session)?;

    if let Some(csv_path) = &args.export {
        export_csv(&batch, csv_path)?;
        println!(
            "{} Exported {} cards to {}",
            style("✓").green(),
            batch.len(),
            csv_path.display()
        );
    }

    Ok(())
}
