//! Summary counters and chart data

use crate::models::{ChartBar, IssueStatus, ReportRow, ReportTable, ReportView, StatusBreakdown, SummaryCounters};

/// Label for rows without an issue type
pub const UNSPECIFIED_ISSUE: &str = "(unspecified)";

/// Compute the four headline counters. Total over any input, including
/// the empty collection.
pub fn summarize(rows: &[ReportRow]) -> SummaryCounters {
    let mut counters = SummaryCounters {
        total: rows.len(),
        ..SummaryCounters::default()
    };

    for row in rows {
        if row.parsed_severity().is_some_and(|s| s.is_high_priority()) {
            counters.high_priority += 1;
        }
        let issue_type = row.issue_type_str();
        if issue_type.contains("GST") {
            counters.gst_issues += 1;
        }
        if issue_type.contains("Duplicate") {
            counters.duplicate_issues += 1;
        }
    }

    counters
}

/// Count rows per review status
pub fn status_breakdown(rows: &[ReportRow]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for row in rows {
        match row.parsed_status() {
            Some(IssueStatus::Pending) => breakdown.pending += 1,
            Some(IssueStatus::Resolved) => breakdown.resolved += 1,
            Some(IssueStatus::UnderReview) => breakdown.under_review += 1,
            None => breakdown.other += 1,
        }
    }
    breakdown
}

/// One bar per issue type, in order of first appearance
pub fn issue_chart(rows: &[ReportRow]) -> Vec<ChartBar> {
    let mut bars: Vec<ChartBar> = Vec::new();
    for row in rows {
        let label = row.issue_type.as_deref().unwrap_or(UNSPECIFIED_ISSUE);
        match bars.iter_mut().find(|b| b.label == label) {
            Some(bar) => bar.count += 1,
            None => bars.push(ChartBar {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    bars
}

/// Derive every view component from one table
pub fn build_view(table: ReportTable) -> ReportView {
    let counters = summarize(&table.rows);
    let statuses = status_breakdown(&table.rows);
    let chart = issue_chart(&table.rows);
    ReportView {
        table,
        counters,
        statuses,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    fn row(issue_type: Option<&str>, severity: Option<&str>, status: Option<&str>) -> ReportRow {
        ReportRow {
            issue_type: issue_type.map(String::from),
            severity: severity.map(String::from),
            status: status.map(String::from),
            amount: None,
            cells: vec![CellValue::Empty],
        }
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(summarize(&[]), SummaryCounters::default());
        assert_eq!(status_breakdown(&[]), StatusBreakdown::default());
        assert!(issue_chart(&[]).is_empty());
    }

    #[test]
    fn test_counts() {
        let rows = vec![
            row(Some("Missing GST Number"), Some("High"), Some("Pending")),
            row(Some("GST Issue: Invalid GSTIN Format"), Some("Critical"), Some("Resolved")),
            row(Some("Duplicate Invoice"), Some("Medium"), Some("Under Review")),
            row(Some("Negative Amount"), Some("low"), None),
            row(None, None, Some("Escalated")),
        ];
        let counters = summarize(&rows);
        assert_eq!(counters.total, rows.len());
        assert_eq!(counters.high_priority, 2);
        assert_eq!(counters.gst_issues, 2);
        assert_eq!(counters.duplicate_issues, 1);

        let statuses = status_breakdown(&rows);
        assert_eq!(statuses.pending, 1);
        assert_eq!(statuses.resolved, 1);
        assert_eq!(statuses.under_review, 1);
        assert_eq!(statuses.other, 2);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let rows = vec![row(Some("gst mismatch"), None, None), row(Some("duplicate"), None, None)];
        let counters = summarize(&rows);
        assert_eq!(counters.gst_issues, 0);
        assert_eq!(counters.duplicate_issues, 0);
    }

    #[test]
    fn test_chart_first_appearance_order() {
        let rows = vec![
            row(Some("Negative Amount"), None, None),
            row(Some("Duplicate Invoice"), None, None),
            row(Some("Negative Amount"), None, None),
            row(None, None, None),
        ];
        let chart = issue_chart(&rows);
        let labels: Vec<_> = chart.iter().map(|b| (b.label.as_str(), b.count)).collect();
        assert_eq!(
            labels,
            vec![("Negative Amount", 2), ("Duplicate Invoice", 1), (UNSPECIFIED_ISSUE, 1)]
        );
    }
}
