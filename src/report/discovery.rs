//! Delta report discovery

use crate::config::DashboardConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::ReportFile;
use chrono::NaiveDate;
use glob::Pattern;
use log::{debug, warn};
use std::path::Path;
use walkdir::WalkDir;

/// Parse the date token of a report file name, e.g.
/// `delta_report_2024-06-01.xlsx` -> 2024-06-01
pub fn report_date(name: &str, config: &DashboardConfig) -> Option<NaiveDate> {
    let suffix = format!(".{}", config.file_extension);
    let token = name.strip_prefix(&config.file_prefix)?.strip_suffix(&suffix)?;
    NaiveDate::parse_from_str(token, &config.date_format).ok()
}

/// List the delta reports in `directory`, newest first.
///
/// Ordering uses the parsed date token, so a change of date format cannot
/// silently reorder reports. Files matching the name pattern whose token
/// does not parse are skipped.
pub fn discover(directory: &Path, config: &DashboardConfig) -> ReportResult<Vec<ReportFile>> {
    if !directory.exists() {
        return Err(ReportError::DirectoryMissing(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(ReportError::DirectoryUnreadable {
            path: directory.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let file_pattern = config.file_pattern();
    let pattern = Pattern::new(&file_pattern)
        .map_err(|e| ReportError::Config(format!("invalid file pattern: {}", e)))?;

    let mut reports = Vec::new();
    let walker = WalkDir::new(directory).min_depth(1).max_depth(1).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(ReportError::DirectoryUnreadable {
                    path: directory.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(n) => n,
            None => continue,
        };
        if !pattern.matches(name) {
            continue;
        }

        let date = match report_date(name, config) {
            Some(d) => d,
            None => {
                warn!("Skipping {}: date token does not match {}", name, config.date_format);
                continue;
            }
        };

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        reports.push(ReportFile {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
            date,
            size_bytes,
        });
    }

    if reports.is_empty() {
        return Err(ReportError::NoMatchingFiles {
            directory: directory.to_path_buf(),
            pattern: file_pattern,
        });
    }

    reports.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.name.cmp(&a.name)));
    debug!("Discovered {} report(s), newest {}", reports.len(), reports[0].name);

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_report_date() {
        let config = DashboardConfig::default();
        assert_eq!(
            report_date("delta_report_2024-06-01.xlsx", &config),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(report_date("delta_report_latest.xlsx", &config), None);
        assert_eq!(report_date("invoices_2024-06-01.xlsx", &config), None);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("data");
        let err = discover(&missing, &DashboardConfig::default()).unwrap_err();
        assert_eq!(err, ReportError::DirectoryMissing(missing));
    }

    #[test]
    fn test_no_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "master_invoice_log.xlsx");
        touch(dir.path(), "delta_report_2024-06-01.xls");
        let err = discover(dir.path(), &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::NoMatchingFiles { .. }));
    }

    #[test]
    fn test_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "delta_report_2024-01-01.xlsx");
        touch(dir.path(), "delta_report_2024-06-01.xlsx");
        touch(dir.path(), "delta_report_2023-12-31.xlsx");

        let reports = discover(dir.path(), &DashboardConfig::default()).unwrap();
        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "delta_report_2024-06-01.xlsx",
                "delta_report_2024-01-01.xlsx",
                "delta_report_2023-12-31.xlsx",
            ]
        );
        assert_eq!(reports[0].size_bytes, 1);
    }

    #[test]
    fn test_orders_by_parsed_date_not_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "delta_report_09-06-2024.xlsx");
        touch(dir.path(), "delta_report_10-01-2024.xlsx");
        let config = DashboardConfig {
            date_format: "%d-%m-%Y".to_string(),
            ..DashboardConfig::default()
        };

        // lexicographically "10-01-2024" sorts last, but June is newer
        let reports = discover(dir.path(), &config).unwrap();
        assert_eq!(reports[0].name, "delta_report_09-06-2024.xlsx");
    }

    #[test]
    fn test_skips_unparseable_dates() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "delta_report_backup.xlsx");
        touch(dir.path(), "delta_report_2024-02-30.xlsx");
        let err = discover(dir.path(), &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::NoMatchingFiles { .. }));
    }

    #[test]
    fn test_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("delta_report_2024-06-01.xlsx")).unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        touch(&dir.path().join("archive"), "delta_report_2020-01-01.xlsx");
        let err = discover(dir.path(), &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::NoMatchingFiles { .. }));
    }
}
