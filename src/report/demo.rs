//! Built-in sample dataset shown when no real report is available

use super::summary::build_view;
use crate::models::{CellValue, DataSource, IssueStatus, Presentation, ReportTable, ReportView, Severity};

/// One issue category of the sample dataset
#[derive(Debug, Clone, Copy)]
pub struct DemoIssue {
    pub issue_type: &'static str,
    pub count: usize,
    pub severity: Severity,
    pub status: IssueStatus,
}

pub static DEMO_ISSUES: [DemoIssue; 4] = [
    DemoIssue {
        issue_type: "Missing GST Number",
        count: 29,
        severity: Severity::High,
        status: IssueStatus::Pending,
    },
    DemoIssue {
        issue_type: "Missing Total Amount",
        count: 4,
        severity: Severity::Critical,
        status: IssueStatus::UnderReview,
    },
    DemoIssue {
        issue_type: "Duplicate Invoice",
        count: 6,
        severity: Severity::Medium,
        status: IssueStatus::Resolved,
    },
    DemoIssue {
        issue_type: "Negative Amount",
        count: 2,
        severity: Severity::Low,
        status: IssueStatus::Pending,
    },
];

pub const DEMO_COLUMNS: [&str; 4] = ["Invoice No", "Issue Type", "Severity", "Status"];

/// Expand the sample categories into one row per issue
pub fn demo_table() -> ReportTable {
    let columns = DEMO_COLUMNS.iter().map(|c| c.to_string()).collect();
    let raw_rows = DEMO_ISSUES
        .iter()
        .flat_map(|issue| std::iter::repeat(issue).take(issue.count))
        .enumerate()
        .map(|(idx, issue)| {
            vec![
                CellValue::Text(format!("DEMO-{:03}", idx + 1)),
                CellValue::Text(issue.issue_type.to_string()),
                CellValue::Text(issue.severity.label().to_string()),
                CellValue::Text(issue.status.label().to_string()),
            ]
        })
        .collect();
    ReportTable::from_raw(columns, raw_rows)
}

pub fn demo_view() -> ReportView {
    build_view(demo_table())
}

/// The sample-data presentation, annotated with why real data is missing
pub fn present_demo(reason: impl Into<String>) -> Presentation {
    Presentation {
        source: DataSource::Demo {
            reason: reason.into(),
        },
        view: demo_view(),
    }
}
