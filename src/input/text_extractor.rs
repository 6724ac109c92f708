//! Text extraction from PDFs, scanned images and plain text files

use crate::config::ExtractionConfig;
use crate::error::{Result, TaggerError};
use crate::input::ocr::{PdfRasterizer, TesseractOcr};
use log::debug;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor {
    prefer_text_layer: bool,
    rasterizer: PdfRasterizer,
    ocr: TesseractOcr,
}

impl PdfExtractor {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            prefer_text_layer: config.prefer_text_layer,
            rasterizer: PdfRasterizer::from_config(config),
            ocr: TesseractOcr::from_config(config),
        }
    }

    async fn read_text_layer(path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let display = path.display().to_string();

        // pdf-extract is blocking and can panic on malformed input
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                TaggerError::PdfExtraction(format!("PDF text extraction aborted for '{}': {}", display, e))
            })?
            .map_err(|e| {
                TaggerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", display, e))
            })
    }

    async fn ocr_pages(&self, path: &Path) -> Result<String> {
        let workdir = tempfile::tempdir()?;
        let pages = self.rasterizer.render(path, workdir.path()).await?;

        let mut text = String::new();
        for page in &pages {
            text.push_str(&self.ocr.recognize(page).await?);
            text.push('\n');
        }
        Ok(text)
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        if self.prefer_text_layer {
            match Self::read_text_layer(path).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("Using embedded text layer of {}", path.display());
                    return Ok(text);
                }
                Ok(_) => debug!("No text layer in {}, falling back to OCR", path.display()),
                Err(e) => debug!("{}; falling back to OCR", e),
            }
        }

        self.ocr_pages(path).await
    }
}

pub struct ImageExtractor {
    ocr: TesseractOcr,
}

impl ImageExtractor {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            ocr: TesseractOcr::from_config(config),
        }
    }
}

impl TextExtractor for ImageExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        self.ocr.recognize(path).await
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "Sale Deed\nStamp Duty paid").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Sale Deed\nStamp Duty paid");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_without_ocr_tools_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not really a pdf").unwrap();

        let config = ExtractionConfig {
            pdftoppm_cmd: "definitely-not-a-real-pdftoppm-binary".to_string(),
            ..ExtractionConfig::default()
        };
        let result = PdfExtractor::from_config(&config).extract(&path).await;
        assert!(matches!(result, Err(TaggerError::PdfExtraction(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ocr_fallback_joins_pages_in_order() {
        use crate::input::ocr::stub_tools;

        let tools = tempfile::tempdir().unwrap();
        let pdf = tools.path().join("scan.pdf");
        std::fs::write(&pdf, b"%PDF-1.4 scanned").unwrap();

        let config = ExtractionConfig {
            pdftoppm_cmd: stub_tools::pdftoppm(tools.path()).to_string_lossy().to_string(),
            tesseract_cmd: stub_tools::tesseract(tools.path()).to_string_lossy().to_string(),
            prefer_text_layer: false,
            ..ExtractionConfig::default()
        };
        let text = PdfExtractor::from_config(&config).extract(&pdf).await.unwrap();
        assert_eq!(text, "PAGE-1.PNG\n\nPAGE-2.PNG\n\n");

        let args = std::fs::read_to_string(tools.path().join("args.txt")).unwrap();
        assert!(args.contains("-f 1 -l 2"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_text_layer_falls_back_to_limited_ocr() {
        use crate::input::ocr::stub_tools;

        let tools = tempfile::tempdir().unwrap();
        let pdf = tools.path().join("broken.pdf");
        std::fs::write(&pdf, b"not really a pdf").unwrap();

        let config = ExtractionConfig {
            pdftoppm_cmd: stub_tools::pdftoppm(tools.path()).to_string_lossy().to_string(),
            tesseract_cmd: stub_tools::tesseract(tools.path()).to_string_lossy().to_string(),
            pdf_max_pages: 1,
            prefer_text_layer: true,
            ..ExtractionConfig::default()
        };
        let text = PdfExtractor::from_config(&config).extract(&pdf).await.unwrap();
        assert!(text.starts_with("PAGE-1.PNG\n"));

        let args = std::fs::read_to_string(tools.path().join("args.txt")).unwrap();
        assert!(args.contains("-f 1 -l 1"));
    }
}
