//! Tesseract and Poppler command-line invocation

use crate::config::ExtractionConfig;
use crate::error::{Result, TaggerError};
use log::debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Runs `tesseract <image> stdout` and returns the recognized text.
pub struct TesseractOcr {
    command: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.ocr_language.clone())
    }

    pub async fn recognize(&self, image: &Path) -> Result<String> {
        debug!("Running {} on {}", self.command, image.display());

        let output = Command::new(&self.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| TaggerError::Ocr(format!("Failed to launch '{}': {}", self.command, e)))?;

        if !output.status.success() {
            return Err(TaggerError::Ocr(format!(
                "{} failed on '{}' ({}): {}",
                self.command,
                image.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Renders the first pages of a PDF to PNG files with `pdftoppm`.
pub struct PdfRasterizer {
    command: String,
    max_pages: u32,
    dpi: u32,
}

impl PdfRasterizer {
    pub fn new(command: impl Into<String>, max_pages: u32, dpi: u32) -> Self {
        Self {
            command: command.into(),
            max_pages,
            dpi,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.pdftoppm_cmd.clone(), config.pdf_max_pages, config.render_dpi)
    }

    /// Render pages into `out_dir`, returning the page images in page order.
    pub async fn render(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let prefix = out_dir.join("page");
        debug!(
            "Rasterizing up to {} page(s) of {} at {} dpi",
            self.max_pages,
            pdf.display(),
            self.dpi
        );

        let output = Command::new(&self.command)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg(self.max_pages.to_string())
            .arg(pdf)
            .arg(&prefix)
            .output()
            .await
            .map_err(|e| {
                TaggerError::PdfExtraction(format!("Failed to launch '{}': {}", self.command, e))
            })?;

        if !output.status.success() {
            return Err(TaggerError::PdfExtraction(format!(
                "{} failed on '{}' ({}): {}",
                self.command,
                pdf.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("png") {
                pages.push(path);
            }
        }
        // pdftoppm zero-pads page numbers, so name order is page order
        pages.sort();

        if pages.is_empty() {
            return Err(TaggerError::PdfExtraction(format!(
                "{} produced no pages for '{}'",
                self.command,
                pdf.display()
            )));
        }

        Ok(pages)
    }
}
