//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use cardscan_core::CardScanConfig;

use super::config_file;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Config file to act on instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "ocr.model_dir")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config_path = config_file(args.config.as_deref());

    match args.command {
        ConfigCommand::Show => show_config(&config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, &config_path),
        ConfigCommand::Get { key } => get_config(&config_path, &key),
        ConfigCommand::Set { key, value } => set_config(&config_path, &key, &value),
        ConfigCommand::Path => show_path(&config_path),
    }
}

fn current_config(config_path: &Path) -> anyhow::Result<CardScanConfig> {
    if config_path.exists() {
        Ok(CardScanConfig::from_file(config_path)?)
    } else {
        Ok(CardScanConfig::default())
    }
}

fn show_config(config_path: &Path) -> anyhow::Result<()> {
    if !config_path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = current_config(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    CardScanConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(current_config(config_path)?)?;
    println!("{}", serde_json::to_string_pretty(lookup(&json, key)?)?);
    Ok(())
}

fn lookup<'a>(json: &'a serde_json::Value, key: &str) -> anyhow::Result<&'a serde_json::Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut json = serde_json::to_value(current_config(config_path)?)?;

    // Bare words are taken as strings
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    assign(&mut json, key, parsed_value.clone())?;

    let config: CardScanConfig = serde_json::from_value(json)?;
    config.validate()?;
    config.save(config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn assign(json: &mut serde_json::Value, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
    let (parent_key, last) = match key.rsplit_once('.') {
        Some((parent, last)) => (Some(parent), last),
        None => (None, key),
    };

    let mut current = json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    match current.as_object_mut() {
        Some(obj) if obj.contains_key(last) => {
            obj.insert(last.to_string(), value);
            Ok(())
        }
        Some(_) => anyhow::bail!("Configuration key not found: {}", key),
        None => anyhow::bail!("Cannot set value at non-object path"),
    }
}

fn show_path(config_path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'cardscan config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(CardScanConfig::default()).unwrap();
        assert_eq!(lookup(&json, "export.output_csv").unwrap(), "card_data.csv");
        assert!(lookup(&json, "export.nope").is_err());
    }

    #[test]
    fn test_assign_nested_key() {
        let mut json = serde_json::to_value(CardScanConfig::default()).unwrap();
        assign(&mut json, "ocr.keep_unk", serde_json::Value::Bool(true)).unwrap();
        assign(&mut json, "scan.channel_capacity", serde_json::json!(4)).unwrap();

        let config: CardScanConfig = serde_json::from_value(json.clone()).unwrap();
        assert!(config.ocr.keep_unk);
        assert_eq!(config.scan.channel_capacity, 4);

        assert!(assign(&mut json, "ocr.typo", serde_json::Value::Null).is_err());
        assert!(assign(&mut json, "ocr.keep_unk.deeper", serde_json::Value::Null).is_err());
    }
}
