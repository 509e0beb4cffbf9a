//! Invoice validation delta report dashboard
//!
//! Presents the newest `delta_report_<date>.xlsx` as summary metrics, an
//! issue-type chart and a row table, and falls back to a fixed sample
//! dataset whenever no usable report exists.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod report;
pub mod reporter;
pub mod utils;

pub use config::{load_config, DashboardConfig};
pub use error::{ReportError, ReportResult};
pub use models::{Presentation, ReportFile, ReportRow, ReportTable, SummaryCounters};
pub use report::ReportPresenter;
