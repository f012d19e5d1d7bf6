use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::fixtures::source::DEFAULT_FIXTURE_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "docseed")]
#[command(about = "Fixture seeder - load YAML fixtures into a document store", long_about = None)]
pub struct Args {
    /// Directory holding fixture files (falls back to ../<DIR> when relative)
    #[arg(long, value_name = "DIR", env = "DOCSEED_FIXTURES", default_value = DEFAULT_FIXTURE_PATH)]
    pub fixtures: PathBuf,

    /// Model schema file (YAML)
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Class to load. Can be specified multiple times; defaults to every
    /// top-level model that has a fixture file.
    #[arg(long, value_name = "NAME")]
    pub class: Vec<String>,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format (json, yaml)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_file(&self.schema).context("Invalid schema path")?;
        if let Some(name) = self.class.iter().find(|c| c.trim().is_empty()) {
            anyhow::bail!("Class name must not be empty: {name:?}");
        }
        Ok(())
    }
}

pub fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }
    std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    Ok(())
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}
