//! Scan command - extract card data from a folder of card images.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use cardscan_core::{
    discover_images, CardBatch, CardRecord, CardScanConfig, CardScanner, CardStatus,
    LineRecognizer, TextSidecarRecognizer,
};

use crate::export::export_csv;

use super::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Folder containing card images
    #[arg(required = true)]
    input: PathBuf,

    /// Output CSV file (default from configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also save the full session (raw and cleaned values) as JSON
    #[arg(short, long)]
    session: Option<PathBuf>,

    /// Read recognized lines from `<image>.txt` files instead of running OCR
    #[arg(long)]
    sidecar: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub async fn run(args: ScanArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    if !args.input.is_dir() {
        anyhow::bail!("Please select a valid input folder: {}", args.input.display());
    }

    let files = discover_images(&args.input, &config.scan)?;
    if files.is_empty() {
        anyhow::bail!("No image files found in {}", args.input.display());
    }
    let total = files.len();

    println!("{} Found {} images to process", style("ℹ").blue(), total);

    let recognizer = build_recognizer(&args, &config);
    if recognizer.is_none() {
        println!(
            "{} OCR is disabled: cards will be recorded by file name only.",
            style("⚠").yellow()
        );
    }
    let scanner = CardScanner::new(recognizer);

    // Ctrl-C asks the scanner to stop before the next image.
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Processing stopped by user");
                stop.store(true, Ordering::Relaxed);
            }
        });
    }

    let (tx, mut rx) = mpsc::channel::<CardRecord>(config.scan.channel_capacity.max(1));
    let producer_stop = Arc::clone(&stop);
    let producer = tokio::task::spawn_blocking(move || {
        scanner.scan_each(&files, &producer_stop, |_, record| {
            tx.blocking_send(record).is_ok()
        })
    });

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images {msg}")?
            .progress_chars("=>-"),
    );

    let mut batch = CardBatch::new();
    while let Some(record) = rx.recv().await {
        if record.status == CardStatus::Error {
            warn!("{}: {}", record.filename, record.text_lines.join(" "));
        }
        pb.set_message(record.filename.clone());
        batch.push(record);
        pb.inc(1);
    }

    let outcome = producer.await?;
    if outcome.cancelled {
        pb.abandon_with_message("Stopped");
    } else {
        pb.finish_with_message("Complete");
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.export.output_csv.clone());

    if batch.is_empty() {
        println!("{} No cards were processed", style("⚠").yellow());
        return Ok(());
    }

    export_csv(&batch, &output)?;
    println!(
        "{} Exported {} cards to {}",
        style("✓").green(),
        batch.len(),
        output.display()
    );

    if let Some(session) = &args.session {
        batch.save(session)?;
        println!("{} Session saved to {}", style("✓").green(), session.display());
    }

    let summary = batch.summary();
    println!();
    println!(
        "{} Processed {} of {} images in {:?}",
        style("✓").green(),
        outcome.scanned,
        total,
        start.elapsed()
    );
    println!(
        "   {} ok, {} failed",
        style(summary.processed + summary.updated).green(),
        style(summary.errors).red()
    );

    if summary.errors > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for record in batch.iter().filter(|r| r.status == CardStatus::Error) {
            println!("  - {}", record.filename);
        }
    }

    Ok(())
}

fn build_recognizer(args: &ScanArgs, config: &CardScanConfig) -> Option<Box<dyn LineRecognizer>> {
    if args.sidecar {
        debug!("Reading recognized text from sidecar files");
        return Some(Box::new(TextSidecarRecognizer::new()));
    }

    #[cfg(feature = "native")]
    {
        if !config.ocr.models_present() {
            warn!(
                "OCR models not found in {}",
                config.ocr.model_dir.display()
            );
            return None;
        }

        match cardscan_core::PureOcrEngine::from_config(config.ocr.clone()) {
            Ok(engine) => Some(Box::new(engine)),
            Err(e) => {
                warn!("Could not initialize OCR: {}", e);
                None
            }
        }
    }

    #[cfg(not(feature = "native"))]
    {
        debug!("Built without OCR support ({})", config.ocr.model_dir.display());
        None
    }
}
