//! Parse command - run field extraction on already recognized text.

use std::fs;
use std::io::Read;
use std::path::Path;

use clap::Args;
use console::style;
use tracing::debug;

use cardscan_core::{CardBatch, CardParser, CardRecord, RuleCardParser};

use crate::export::format_csv;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file with one recognized line per row, or '-' for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which rule produced each field
    #[arg(long)]
    show_stages: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs) -> anyhow::Result<()> {
    let content = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = Path::new(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(path)?
    };

    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    debug!("Read {} lines from {}", lines.len(), args.input);

    let parser = RuleCardParser::new();
    let result = parser.parse(&lines);
    let record = CardRecord::new(Path::new(&args.input), result.fields.clone(), lines);

    println!("{}", format_record(&record, args.format)?);

    if args.show_stages {
        let stage = |s: Option<&str>| s.unwrap_or("none").to_string();
        eprintln!();
        eprintln!("{} title: {}", style("ℹ").blue(), stage(result.title_stage));
        eprintln!("{} expansion: {}", style("ℹ").blue(), stage(result.expansion_stage));
        eprintln!("{} collector number: {}", style("ℹ").blue(), stage(result.collector_stage));
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    Ok(())
}

fn format_record(record: &CardRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let mut batch = CardBatch::new();
            batch.push(record.clone());
            Ok(format_csv(&batch)?.trim_end().to_string())
        }
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_text(record: &CardRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Title:            {}\n", record.title()));
    output.push_str(&format!(
        "Collector number: {} (raw: {})\n",
        record.cleaned_collector_number(),
        record.collector_number()
    ));
    output.push_str(&format!(
        "Set/Expansion:    {} (raw: {})\n",
        record.cleaned_expansion(),
        record.expansion()
    ));
    output.push_str(&format!("Status:           {}", record.status));

    output
}
