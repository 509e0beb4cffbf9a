//! Archiving of old delta reports

use super::discovery::discover;
use crate::config::DashboardConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::ReportFile;
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::Path;

pub const ARCHIVE_DIR: &str = "archive";

/// Move every report dated on or before `cutoff` into `<directory>/archive/`.
///
/// Returns the reports that were (or, with `dry_run`, would be) moved.
/// A missing directory or an empty one archives nothing.
pub fn archive_old_reports(
    directory: &Path,
    config: &DashboardConfig,
    cutoff: NaiveDate,
    dry_run: bool,
) -> ReportResult<Vec<ReportFile>> {
    let reports = match discover(directory, config) {
        Ok(r) => r,
        Err(ReportError::DirectoryMissing(_)) | Err(ReportError::NoMatchingFiles { .. }) => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let stale: Vec<ReportFile> = reports.into_iter().filter(|r| r.date <= cutoff).collect();
    if stale.is_empty() || dry_run {
        return Ok(stale);
    }

    let archive_dir = directory.join(ARCHIVE_DIR);
    fs::create_dir_all(&archive_dir).map_err(|e| ReportError::Archive {
        path: archive_dir.clone(),
        message: e.to_string(),
    })?;

    for report in &stale {
        let target = archive_dir.join(&report.name);
        fs::rename(&report.path, &target).map_err(|e| ReportError::Archive {
            path: report.path.clone(),
            message: e.to_string(),
        })?;
        info!("Archived delta report: {}", report.name);
    }

    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "delta_report_2024-01-15.xlsx",
            "delta_report_2024-05-20.xlsx",
            "delta_report_2024-06-01.xlsx",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        dir
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
    }

    #[test]
    fn test_moves_only_old_reports() {
        let dir = setup();
        let moved = archive_old_reports(dir.path(), &DashboardConfig::default(), cutoff(), false).unwrap();

        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].name, "delta_report_2024-01-15.xlsx");
        assert!(dir.path().join("archive/delta_report_2024-01-15.xlsx").exists());
        assert!(!dir.path().join("delta_report_2024-01-15.xlsx").exists());
        assert!(dir.path().join("delta_report_2024-06-01.xlsx").exists());
    }

    #[test]
    fn test_report_dated_on_cutoff_is_archived() {
        let dir = setup();
        let cutoff = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let moved = archive_old_reports(dir.path(), &DashboardConfig::default(), cutoff, false).unwrap();

        let names: Vec<_> = moved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["delta_report_2024-05-20.xlsx", "delta_report_2024-01-15.xlsx"]);
        assert!(dir.path().join("archive/delta_report_2024-05-20.xlsx").exists());
        assert!(dir.path().join("delta_report_2024-06-01.xlsx").exists());
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let dir = setup();
        let moved = archive_old_reports(dir.path(), &DashboardConfig::default(), cutoff(), true).unwrap();

        assert_eq!(moved.len(), 1);
        assert!(dir.path().join("delta_report_2024-01-15.xlsx").exists());
        assert!(!dir.path().join(ARCHIVE_DIR).exists());
    }

    #[test]
    fn test_missing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let moved = archive_old_reports(
            &dir.path().join("data"),
            &DashboardConfig::default(),
            cutoff(),
            false,
        )
        .unwrap();
        assert!(moved.is_empty());
    }
}
