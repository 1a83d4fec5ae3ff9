//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use idscan_core::ClassifierConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Validate a configuration file
    Check {
        /// Configuration file (default: the standard location)
        file: Option<PathBuf>,
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
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Check { file } => check_config(file),
        ConfigCommand::Path => show_path(),
    }
}

/// Load the config given on the command line, the default file if it
/// exists, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ClassifierConfig> {
    if let Some(path) = config_path {
        return Ok(ClassifierConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(ClassifierConfig::from_file(&default_path)?)
    } else {
        Ok(ClassifierConfig::default())
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idscan")
        .join("config.json")
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        ClassifierConfig::from_file(&config_path)?
    } else {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        ClassifierConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    ClassifierConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn check_config(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = file.unwrap_or_else(default_config_path);
    let config = ClassifierConfig::from_file(&path)?;

    println!(
        "{} {} is valid ({} document types, confidence floor {})",
        style("✓").green(),
        path.display(),
        config.corpus.len(),
        config.confidence_floor
    );

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let path = default_config_path();
    println!("{}", path.display());

    if path.exists() {
        println!("  {} File exists", style("✓").green());
    } else {
        println!("  {} File does not exist (using defaults)", style("ℹ").blue());
    }

    Ok(())
}
