//! Report data structures

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

// ============================================
// Cells and rows
// ============================================

/// A single spreadsheet cell, kept verbatim for export
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text form, `None` when blank
    pub fn as_text(&self) -> Option<String> {
        let text = self.to_string();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Numeric value; text cells are scanned for the first signed decimal
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_amount(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) if dt.num_seconds_from_midnight() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)?").expect("amount pattern is valid"))
}

/// Extract an amount from text such as `"₹1,250.50"` or `"-300 INR"`
pub fn parse_amount(text: &str) -> Option<f64> {
    let found = amount_pattern().find(text)?;
    found.as_str().replace(',', "").parse().ok()
}

fn header_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\s\-]+").expect("header pattern is valid"))
}

/// Normalize a header for lookup: `"Issue Type"` -> `"issue_type"`
pub fn normalize_header(header: &str) -> String {
    header_separator()
        .replace_all(header.trim(), "_")
        .to_lowercase()
}

/// Positions of the semantic columns within a report header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldColumns {
    pub issue_type: Option<usize>,
    pub severity: Option<usize>,
    pub status: Option<usize>,
    pub amount: Option<usize>,
}

impl FieldColumns {
    pub fn locate(columns: &[String]) -> Self {
        let mut fields = FieldColumns::default();
        for (idx, column) in columns.iter().enumerate() {
            let slot = match normalize_header(column).as_str() {
                "issue_type" => &mut fields.issue_type,
                "severity" => &mut fields.severity,
                "status" => &mut fields.status,
                "amount" => &mut fields.amount,
                _ => continue,
            };
            // first matching column wins
            slot.get_or_insert(idx);
        }
        fields
    }
}

/// One issue line of a delta report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub issue_type: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    /// All cells of the row, aligned with `ReportTable::columns`
    pub cells: Vec<CellValue>,
}

impl ReportRow {
    pub fn from_cells(fields: &FieldColumns, cells: Vec<CellValue>) -> Self {
        let cell = |idx: Option<usize>| idx.and_then(|i| cells.get(i));
        Self {
            issue_type: cell(fields.issue_type).and_then(CellValue::as_text),
            severity: cell(fields.severity).and_then(CellValue::as_text),
            status: cell(fields.status).and_then(CellValue::as_text),
            amount: cell(fields.amount).and_then(CellValue::as_number),
            cells,
        }
    }

    /// Issue type for matching; absent reads as empty
    pub fn issue_type_str(&self) -> &str {
        self.issue_type.as_deref().unwrap_or("")
    }

    pub fn parsed_severity(&self) -> Option<Severity> {
        self.severity.as_deref().and_then(Severity::parse)
    }

    pub fn parsed_status(&self) -> Option<IssueStatus> {
        self.status.as_deref().and_then(IssueStatus::parse)
    }
}

/// Header plus rows of a loaded report sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Build a table from a header and raw rows; blank rows are dropped
    pub fn from_raw(columns: Vec<String>, raw_rows: Vec<Vec<CellValue>>) -> Self {
        let fields = FieldColumns::locate(&columns);
        let width = columns.len();
        let rows = raw_rows
            .into_iter()
            .filter(|cells| !cells.iter().all(CellValue::is_empty))
            .map(|mut cells| {
                cells.resize(width.max(cells.len()), CellValue::Empty);
                ReportRow::from_cells(&fields, cells)
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================
// Labels
// ============================================

/// Severity level of a reported issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn is_high_priority(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// Review status of a reported issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueStatus {
    Pending,
    Resolved,
    UnderReview,
}

impl IssueStatus {
    pub fn parse(label: &str) -> Option<Self> {
        match normalize_header(label).as_str() {
            "pending" => Some(IssueStatus::Pending),
            "resolved" => Some(IssueStatus::Resolved),
            "under_review" => Some(IssueStatus::UnderReview),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::UnderReview => "Under Review",
        }
    }
}

// ============================================
// Report files and derived views
// ============================================

/// A discovered `delta_report_<date>.xlsx` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFile {
    pub name: String,
    pub path: PathBuf,
    pub date: NaiveDate,
    pub size_bytes: u64,
}

/// The four headline counters of a dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounters {
    pub total: usize,
    pub high_priority: usize,
    pub gst_issues: usize,
    pub duplicate_issues: usize,
}

/// Row counts per review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub resolved: usize,
    pub under_review: usize,
    pub other: usize,
}

/// One bar of the issue-type chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub count: usize,
}

/// Everything a renderer shows, derived from a single table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub table: ReportTable,
    pub counters: SummaryCounters,
    pub statuses: StatusBreakdown,
    pub chart: Vec<ChartBar>,
}

/// Where the presented rows came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Real { file: ReportFile },
    Demo { reason: String },
}

/// A rendered-ready dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub source: DataSource,
    pub view: ReportView,
}

impl Presentation {
    pub fn is_demo(&self) -> bool {
        matches!(self.source, DataSource::Demo { .. })
    }

    /// Headline shown above the dashboard
    pub fn title(&self) -> String {
        match &self.source {
            DataSource::Real { file } => format!("Latest Report: {}", file.name),
            DataSource::Demo { .. } => "Sample Data (no report available)".to_string(),
        }
    }

    /// The labeled metrics, in display order
    pub fn metrics(&self) -> Vec<(&'static str, usize)> {
        let counters = &self.view.counters;
        match self.source {
            DataSource::Real { .. } => vec![
                ("Total Issues", counters.total),
                ("High Priority", counters.high_priority),
                ("GST Issues", counters.gst_issues),
                ("Duplicates", counters.duplicate_issues),
            ],
            DataSource::Demo { .. } => vec![
                ("Total Issues", counters.total),
                ("High Priority", counters.high_priority),
                ("Resolved", self.view.statuses.resolved),
            ],
        }
    }
}
