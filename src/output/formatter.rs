//! Output formatters for batch reports

use crate::config::OutputFormat;
use crate::error::{Result, TaggerError};
use crate::output::report::BatchReport;
use crate::processing::document::DetectedType;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a batch report
pub trait OutputFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console table with colored summary lines
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Loan Document Tagging Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; color: #333; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #dee2e6; padding: 8px 12px; text-align: left; }
        th { background: #f1f3f5; }
        .type-error { color: #dc3545; font-weight: bold; }
        .type-unclassified { color: #6c757d; font-style: italic; }
        .warning { background: #fff3cd; border-left: 4px solid #ffc107; padding: 12px; margin: 10px 0; }
        .danger { background: #f8d7da; border-left: 4px solid #dc3545; padding: 12px; margin: 10px 0; }
        .success { background: #d4edda; border-left: 4px solid #28a745; padding: 12px; margin: 10px 0; }
        .metadata { color: #6c757d; font-size: 0.9em; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Loan Document Tagging Report</h1>
    <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>

    <h2>Processing Results</h2>
    <table>
        <tr><th>Filename</th><th>Detected Type</th></tr>
        {% for row in rows %}
        <tr><td>{{ row.filename }}</td><td class="{{ row.css_class }}">{{ row.detected }}</td></tr>
        {% endfor %}
    </table>

    <h2>Application Summary</h2>
    {% if has_missing %}
    <div class="warning"><strong>Missing Documents:</strong> {{ missing }}</div>
    {% else %}
    <div class="success">All required documents are present!</div>
    {% endif %}
    {% if has_duplicates %}
    <div class="danger"><strong>Duplicate Documents Found:</strong> {{ duplicates }}</div>
    {% else %}
    <div class="success">No duplicate documents found.</div>
    {% endif %}

    <div class="metadata">Generated by Loan Document Tagger v{{ version }} | {{ file_count }} file(s), {{ error_count }} error(s)</div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    rows: Vec<HtmlRow>,
    has_missing: bool,
    missing: String,
    has_duplicates: bool,
    duplicates: String,
    version: String,
    file_count: usize,
    error_count: usize,
}

struct HtmlRow {
    filename: String,
    detected: String,
    css_class: &'static str,
}

fn format_timestamp(report: &BatchReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn type_color(detected: &DetectedType) -> Color {
        match detected {
            DetectedType::Document(_) => Color::Cyan,
            DetectedType::Unclassified => Color::BrightBlack,
            DetectedType::Error => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 LOAN DOCUMENT TAGGING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("✅ Processing Results", 2));
        let name_width = report
            .results
            .iter()
            .map(|r| r.filename.chars().count())
            .chain(std::iter::once("Filename".len()))
            .max()
            .unwrap_or(0);

        output.push_str(&format!("  {:<width$}  {}\n", "Filename", "Detected Type", width = name_width));
        output.push_str(&format!("  {}  {}\n", "-".repeat(name_width), "-".repeat(13)));
        for result in &report.results {
            // pad before coloring so escape codes don't skew the columns
            let name = format!("{:<width$}", result.filename, width = name_width);
            output.push_str(&format!(
                "  {}  {}\n",
                name,
                self.colorize(result.detected_type.label(), Self::type_color(&result.detected_type))
            ));

            if self.detailed {
                if let Some(keyword) = &result.matched_keyword {
                    output.push_str(&format!(
                        "  {:<width$}    matched: \"{}\"\n",
                        "",
                        keyword,
                        width = name_width
                    ));
                }
                if let Some(error) = &result.error {
                    output.push_str(&format!(
                        "  {:<width$}    {}\n",
                        "",
                        self.colorize(error, Color::Red),
                        width = name_width
                    ));
                }
            }
        }

        output.push_str(&self.format_header("📊 Application Summary", 2));
        if report.summary.has_missing() {
            output.push_str(&format!(
                "⚠️  {} {}\n",
                self.colorize("Missing Documents:", Color::Yellow),
                report.missing().join(", ")
            ));
        } else {
            output.push_str(&format!("{}\n", self.colorize("All required documents are present!", Color::Green)));
        }

        if report.summary.has_duplicates() {
            output.push_str(&format!(
                "🚨 {} {}\n",
                self.colorize("Duplicate Documents Found:", Color::Red),
                report.duplicates().join(", ")
            ));
        } else {
            output.push_str(&format!("{}\n", self.colorize("No duplicate documents found.", Color::Green)));
        }

        if self.detailed {
            output.push_str(&self.format_header("Batch Statistics", 3));
            output.push_str(&format!("  • Files: {}\n", report.metadata.file_count));
            output.push_str(&format!("  • Classified: {}\n", report.metadata.classified_count));
            output.push_str(&format!("  • Unclassified: {}\n", report.metadata.unclassified_count));
            output.push_str(&format!("  • Errors: {}\n", report.metadata.error_count));
            output.push_str(&format!("  • Required types: {}\n", report.metadata.required_count));
        }

        output.push_str(&format!(
            "\n{} Generated by Loan Document Tagger v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.tagger_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📄 Loan Document Tagging Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Files:** {}\n\n",
                format_timestamp(report),
                report.metadata.processing_time_ms,
                report.metadata.file_count
            ));
        }

        output.push_str("## Processing Results\n\n");
        output.push_str("| Filename | Detected Type |\n");
        output.push_str("|----------|---------------|\n");
        for (filename, detected) in report.rows() {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_cell(filename),
                Self::escape_cell(detected.label())
            ));
        }

        output.push_str("\n## Application Summary\n\n");
        if report.summary.has_missing() {
            output.push_str(&format!("**Missing Documents:** {}\n\n", report.missing().join(", ")));
        } else {
            output.push_str("All required documents are present!\n\n");
        }
        if report.summary.has_duplicates() {
            output.push_str(&format!("**Duplicate Documents Found:** {}\n", report.duplicates().join(", ")));
        } else {
            output.push_str("No duplicate documents found.\n");
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &BatchReport) -> HtmlTemplate {
        let rows = report
            .results
            .iter()
            .map(|r| HtmlRow {
                filename: r.filename.clone(),
                detected: r.detected_type.label().to_string(),
                css_class: match r.detected_type {
                    DetectedType::Document(_) => "type-document",
                    DetectedType::Unclassified => "type-unclassified",
                    DetectedType::Error => "type-error",
                },
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            processing_time: report.metadata.processing_time_ms,
            rows,
            has_missing: report.summary.has_missing(),
            missing: report.missing().join(", "),
            has_duplicates: report.summary.has_duplicates(),
            duplicates: report.duplicates().join(", "),
            version: report.metadata.tagger_version.clone(),
            file_count: report.metadata.file_count,
            error_count: report.metadata.error_count,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| TaggerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    fn formatters(&self) -> [&dyn OutputFormatter; 4] {
        [
            &self.console_formatter,
            &self.json_formatter,
            &self.markdown_formatter,
            &self.html_formatter,
        ]
    }

    /// Formatter registered for `format`.
    pub fn formatter_for(&self, format: OutputFormat) -> Result<&dyn OutputFormatter> {
        self.formatters()
            .into_iter()
            .find(|formatter| formatter.supports_format() == format)
            .ok_or_else(|| TaggerError::OutputFormatting(format!("No formatter for {:?}", format)))
    }

    pub fn generate_report(&self, report: &BatchReport, format: OutputFormat) -> Result<String> {
        self.formatter_for(format)?.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
