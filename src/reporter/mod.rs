//! Dashboard rendering module
//!
//! Renders a presentation as terminal text, Markdown, JSON or a single-file
//! HTML dashboard.

mod html;
mod json;
mod markdown;
mod text;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;

use crate::models::Presentation;
use crate::report::present_demo;
use anyhow::Result;
use log::warn;

/// Rows listed before a rendered table is truncated
pub(crate) const MAX_TABLE_ROWS: usize = 50;

/// Trait for dashboard renderers
pub trait Reporter {
    fn generate(presentation: &Presentation) -> Result<String>;
}

/// Render with the renderer named by `format` (text, markdown, json, html)
pub fn render(format: &str, presentation: &Presentation) -> Result<String> {
    match format {
        "json" => JsonReporter::generate(presentation),
        "html" => HtmlReporter::generate(presentation),
        "markdown" | "md" => MarkdownReporter::generate(presentation),
        _ => TextReporter::generate(presentation),
    }
}

/// Render `presentation`, downgrading to the sample data if a real report
/// cannot be rendered. Failures rendering the sample data are returned.
pub fn render_or_demo(format: &str, presentation: &Presentation) -> Result<String> {
    match render(format, presentation) {
        Ok(output) => Ok(output),
        Err(e) if !presentation.is_demo() => {
            warn!("Rendering the report failed: {:#}; showing sample data", e);
            let demo = present_demo(format!("Report could not be rendered: {}", e));
            render(format, &demo)
        }
        Err(e) => Err(e),
    }
}

/// Width-scaled bar for text charts
pub(crate) fn text_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let len = ((count as f64 / max as f64) * width as f64).round().max(1.0) as usize;
    "█".repeat(len)
}
