//! Terminal summary

use crate::models::{DataSource, Presentation, ReportTable};
use crate::reporter::{text_bar, Reporter, MAX_TABLE_ROWS};
use anyhow::Result;

pub struct TextReporter;

impl Reporter for TextReporter {
    fn generate(presentation: &Presentation) -> Result<String> {
        let mut output = String::new();
        let view = &presentation.view;

        output.push_str("📊 Invoice Validation Dashboard\n");
        output.push_str("===============================\n\n");

        match &presentation.source {
            DataSource::Real { file } => {
                output.push_str(&format!("📋 {}\n", presentation.title()));
                output.push_str(&format!("📅 Report date: {}\n\n", file.date.format("%Y-%m-%d")));
            }
            DataSource::Demo { reason } => {
                output.push_str(&format!("🧪 {}\n", presentation.title()));
                output.push_str(&format!("   {}\n\n", reason));
            }
        }

        for (label, value) in presentation.metrics() {
            output.push_str(&format!("{}: {}\n", label, value));
        }
        output.push('\n');

        let statuses = &view.statuses;
        output.push_str(&format!(
            "Status: {} pending, {} under review, {} resolved",
            statuses.pending, statuses.under_review, statuses.resolved
        ));
        if statuses.other > 0 {
            output.push_str(&format!(", {} other", statuses.other));
        }
        output.push_str("\n\n");

        if !view.chart.is_empty() {
            output.push_str("Issues by type:\n");
            let max = view.chart.iter().map(|b| b.count).max().unwrap_or(0);
            let label_width = view.chart.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
            for bar in &view.chart {
                output.push_str(&format!(
                    "   {:<width$}  {:>5}  {}\n",
                    bar.label,
                    bar.count,
                    text_bar(bar.count, max, 30),
                    width = label_width
                ));
            }
        }

        if !presentation.is_demo() {
            output.push_str(&format!("\nValidation results ({} rows):\n", view.table.len()));
            output.push_str(&Self::format_table(&view.table));
        }

        Ok(output)
    }
}

impl TextReporter {
    /// Left-aligned columns padded to the widest cell shown
    fn format_table(table: &ReportTable) -> String {
        if table.columns.is_empty() {
            return "   (no columns)\n".to_string();
        }

        let shown: Vec<Vec<String>> = table
            .rows
            .iter()
            .take(MAX_TABLE_ROWS)
            .map(|row| row.cells.iter().map(|c| c.to_string().replace('\n', " ")).collect())
            .collect();

        let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
        for cells in &shown {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect();
            format!("   {}\n", padded.join("  ").trim_end())
        };

        let mut s = line(table.columns.as_slice());
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        s.push_str(&line(rule.as_slice()));
        for cells in &shown {
            s.push_str(&line(cells.as_slice()));
        }
        if table.len() > MAX_TABLE_ROWS {
            s.push_str(&format!("   ...and {} more rows\n", table.len() - MAX_TABLE_ROWS));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, ReportFile};
    use crate::report::{present, present_demo};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn report_file() -> ReportFile {
        ReportFile {
            name: "delta_report_2024-06-01.xlsx".to_string(),
            path: PathBuf::from("data/delta_report_2024-06-01.xlsx"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            size_bytes: 4096,
        }
    }

    #[test]
    fn test_demo_summary() {
        let text = TextReporter::generate(&present_demo("Report directory not found: data")).unwrap();
        assert!(text.contains("Sample Data"));
        assert!(text.contains("Report directory not found: data"));
        assert!(text.contains("Total Issues: 41"));
        assert!(text.contains("High Priority: 33"));
        assert!(text.contains("Resolved: 6"));
        for label in ["Missing GST Number", "Missing Total Amount", "Duplicate Invoice", "Negative Amount"] {
            assert!(text.contains(label));
        }
    }

    #[test]
    fn test_real_report_lists_rows() {
        let table = ReportTable::from_raw(
            vec!["Invoice No".to_string(), "issue_type".to_string(), "Amount".to_string()],
            vec![
                vec![
                    CellValue::Text("KS-2024777".to_string()),
                    CellValue::Text("Missing GST Number".to_string()),
                    CellValue::Number(1500.0),
                ],
                vec![
                    CellValue::Text("KS-2024778".to_string()),
                    CellValue::Text("Negative Amount".to_string()),
                    CellValue::Number(-20.0),
                ],
            ],
        );
        let text = TextReporter::generate(&present(report_file(), table)).unwrap();

        assert!(text.contains("Validation results (2 rows):"));
        assert!(text.contains("Invoice No"));
        assert!(text.contains("KS-2024777"));
        assert!(text.contains("KS-2024778"));
        assert!(!text.contains("more rows"));
    }

    #[test]
    fn test_long_report_is_truncated() {
        let rows = (0..MAX_TABLE_ROWS + 7)
            .map(|i| vec![CellValue::Text(format!("KS-{}", 2024000 + i))])
            .collect();
        let table = ReportTable::from_raw(vec!["Invoice No".to_string()], rows);
        let text = TextReporter::generate(&present(report_file(), table)).unwrap();

        assert!(text.contains("KS-2024000"));
        assert!(!text.contains(&format!("KS-{}", 2024000 + MAX_TABLE_ROWS)));
        assert!(text.contains("...and 7 more rows"));
    }

    #[test]
    fn test_demo_has_no_row_table() {
        let text = TextReporter::generate(&present_demo("no reports")).unwrap();
        assert!(!text.contains("Validation results"));
    }
}
