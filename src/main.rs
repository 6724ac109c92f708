//! Loan document tagger: OCR, keyword classification and completeness checks

use clap::Parser;
use loan_doc_tagger::cli::{self, Cli, Commands, ConfigAction};
use loan_doc_tagger::config::{Config, OutputFormat};
use loan_doc_tagger::error::{Result, TaggerError};
use loan_doc_tagger::output::formatter::{save_report_to_file, ReportGenerator};
use loan_doc_tagger::processing::{BatchProcessor, MatchMode};
use log::{error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config_path();

    // config commands run before validation so a broken file can still be reset
    if let Commands::Config { action } = &cli.command {
        if let Err(e) = run_config_command(action.as_ref(), &config_path, cli.config.is_some()) {
            error!("Command failed: {}", e);
            process::exit(1);
        }
        return;
    }

    let config = match Config::load_at(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Classify {
            files,
            output,
            save,
            detailed,
            whole_word,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(TaggerError::InvalidInput)?,
                None => config.output.format,
            };
            if whole_word {
                config.classification.match_mode = MatchMode::WholeWord;
            }
            let detailed = detailed || config.output.detailed;

            info!("Classifying {} document(s)", files.len());

            let mut processor = BatchProcessor::from_config(&config)?
                .with_progress(output_format == OutputFormat::Console && save.is_none());
            let report = processor.process_batch(&files).await?;

            let generator = ReportGenerator::with_options(config.output.color_output && save.is_none(), detailed);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("📁 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Taxonomy => {
            let taxonomy = config.taxonomy();
            let required = config.required_set();

            println!("📚 Document Taxonomy (first match wins)\n");
            for (i, entry) in taxonomy.entries().iter().enumerate() {
                let marker = if required.contains(&entry.label) { " [required]" } else { "" };
                println!("  {}. {}{}", i + 1, entry.label, marker);
                println!("     {}", entry.keywords.join(", "));
            }
            println!("\nMatch mode: {:?}", config.classification.match_mode);
        }

        // dispatched in main before the config is loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn run_config_command(action: Option<&ConfigAction>, config_path: &Path, explicit: bool) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let config = Config::load_at(explicit.then_some(config_path))?;
            println!("⚙️  Current Configuration ({})\n", config_path.display());
            println!("Document types: {}", config.taxonomy.len());
            println!("Required documents: {}", config.required.join(", "));
            println!("\nExtraction:");
            println!("  PDF pages to OCR: {}", config.extraction.pdf_max_pages);
            println!("  Render DPI: {}", config.extraction.render_dpi);
            println!("  OCR language: {}", config.extraction.ocr_language);
            println!("  Tesseract: {}", config.extraction.tesseract_cmd);
            println!("  pdftoppm: {}", config.extraction.pdftoppm_cmd);
            println!("  Prefer PDF text layer: {}", config.extraction.prefer_text_layer);
            println!("  Caching: {}", config.extraction.enable_caching);
            println!("\nClassification:");
            println!("  Match mode: {:?}", config.classification.match_mode);
            println!("\nOutput:");
            println!("  Format: {:?}", config.output.format);
            println!("  Colors: {}", config.output.color_output);
        }

        Some(ConfigAction::Reset) => {
            println!("🔄 Resetting configuration to defaults...");
            Config::reset_at(config_path)?;
            println!("✅ Configuration reset successfully: {}", config_path.display());
        }

        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}
