//! CLI application for trading card OCR scanning.

mod commands;
mod export;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, edit, parse, scan};

/// Card scanner - extract title, collector number and set code from card photos
#[derive(Parser)]
#[command(name = "cardscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder of card images and export a CSV
    Scan(scan::ScanArgs),

    /// Extract card fields from recognized text lines
    Parse(parse::ParseArgs),

    /// Correct a card in a saved session
    Edit(edit::EditArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Scan(args) => scan::run(args).await,
        Commands::Parse(args) => parse::run(args).await,
        Commands::Edit(args) => edit::run(args).await,
        Commands::Config(args) => config::run(args).await,
    }
}
