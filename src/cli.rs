//! CLI interface for the loan document tagger

use crate::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loan-doc-tagger")]
#[command(about = "Tag scanned loan application documents and check the application for completeness")]
#[command(long_about = "OCR loan documents (PDFs and images), classify each one against a keyword taxonomy, and report missing or duplicated required documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Config file this invocation reads and writes.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a batch of documents
    Classify {
        /// Files to classify (PDF, PNG, JPG, JPEG, TXT)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show matched keywords, error details and batch statistics
        #[arg(short, long)]
        detailed: bool,

        /// Only accept keywords that appear as whole words
        #[arg(long)]
        whole_word: bool,
    },

    /// Show the document taxonomy and required documents
    Taxonomy,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}
