//! Markdown dashboard generator

use crate::models::{DataSource, Presentation, ReportTable};
use crate::reporter::{text_bar, Reporter, MAX_TABLE_ROWS};
use anyhow::Result;

pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn generate(presentation: &Presentation) -> Result<String> {
        let mut output = String::new();
        let view = &presentation.view;

        // Header
        output.push_str("# Invoice Validation Dashboard\n\n");
        match &presentation.source {
            DataSource::Real { file } => {
                output.push_str(&format!("**Report:** `{}`\n\n", file.name));
                output.push_str(&format!("**Report Date:** {}\n\n", file.date.format("%Y-%m-%d")));
            }
            DataSource::Demo { reason } => {
                output.push_str("> **Sample data.** No validation report is available.\n");
                output.push_str(&format!("> {}\n\n", reason));
            }
        }

        // Metrics
        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        for (label, value) in presentation.metrics() {
            output.push_str(&format!("| {} | {} |\n", label, value));
        }
        output.push('\n');

        output.push_str("### Status\n\n");
        output.push_str(&format!(
            "| Status | Count |\n|--------|-------|\n| Pending | {} |\n| Under Review | {} |\n| Resolved | {} |\n",
            view.statuses.pending, view.statuses.under_review, view.statuses.resolved
        ));
        if view.statuses.other > 0 {
            output.push_str(&format!("| Other | {} |\n", view.statuses.other));
        }
        output.push('\n');

        // Chart
        if !view.chart.is_empty() {
            output.push_str("## Issues by Type\n\n```text\n");
            let max = view.chart.iter().map(|b| b.count).max().unwrap_or(0);
            let label_width = view.chart.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
            for bar in &view.chart {
                output.push_str(&format!(
                    "{:<width$}  {:>5}  {}\n",
                    bar.label,
                    bar.count,
                    text_bar(bar.count, max, 40),
                    width = label_width
                ));
            }
            output.push_str("```\n\n");
        }

        // Rows
        if !presentation.is_demo() {
            output.push_str("## Validation Results\n\n");
            output.push_str(&Self::format_table(&view.table));
        }

        output.push_str("\n---\n\n");
        output.push_str("*Generated by delta-dashboard*\n");

        Ok(output)
    }
}

impl MarkdownReporter {
    fn format_table(table: &ReportTable) -> String {
        if table.columns.is_empty() {
            return "*The report has no columns.*\n".to_string();
        }

        let mut s = String::new();
        let header: Vec<String> = table.columns.iter().map(|c| Self::escape(c)).collect();
        s.push_str(&format!("| {} |\n", header.join(" | ")));
        s.push_str(&format!("|{}\n", "---|".repeat(table.columns.len())));

        for row in table.rows.iter().take(MAX_TABLE_ROWS) {
            let cells: Vec<String> = row.cells.iter().map(|c| Self::escape(&c.to_string())).collect();
            s.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        if table.len() > MAX_TABLE_ROWS {
            s.push_str(&format!(
                "\n*...and {} more rows. Use `export` for the full spreadsheet.*\n",
                table.len() - MAX_TABLE_ROWS
            ));
        }
        s
    }

    fn escape(cell: &str) -> String {
        cell.replace('|', "\\|").replace('\n', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use crate::report::{present, present_demo};
    use crate::models::ReportFile;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_demo_markdown() {
        let md = MarkdownReporter::generate(&present_demo("no reports")).unwrap();
        assert!(md.contains("**Sample data.**"));
        assert!(md.contains("| Total Issues | 41 |"));
        assert!(md.contains("| Resolved | 6 |"));
        assert!(!md.contains("## Validation Results"));
    }

    #[test]
    fn test_real_markdown_table() {
        let table = ReportTable::from_raw(
            vec!["issue_type".to_string(), "Remarks".to_string()],
            vec![vec![
                CellValue::Text("Missing GST Number".to_string()),
                CellValue::Text("a|b".to_string()),
            ]],
        );
        let file = ReportFile {
            name: "delta_report_2024-06-01.xlsx".to_string(),
            path: PathBuf::from("data/delta_report_2024-06-01.xlsx"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            size_bytes: 4096,
        };
        let md = MarkdownReporter::generate(&present(file, table)).unwrap();
        assert!(md.contains("`delta_report_2024-06-01.xlsx`"));
        assert!(md.contains("| GST Issues | 1 |"));
        assert!(md.contains("| Missing GST Number | a\\|b |"));
    }
}
