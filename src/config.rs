//! Dashboard configuration

use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for discovering, loading and archiving delta reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the upstream comparator writes reports into
    pub data_dir: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    /// chrono format of the date token between prefix and extension
    pub date_format: String,
    /// Sheet names tried in order before falling back to the first sheet
    pub preferred_sheets: Vec<String>,
    pub archive_after_days: i64,
    /// Skip discovery and always show the sample data
    pub force_demo: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_prefix: "delta_report_".to_string(),
            file_extension: "xlsx".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            preferred_sheets: Vec::new(),
            archive_after_days: 90,
            force_demo: false,
        }
    }
}

impl DashboardConfig {
    /// Glob pattern for report file names, e.g. `delta_report_*.xlsx`
    pub fn file_pattern(&self) -> String {
        format!("{}*.{}", self.file_prefix, self.file_extension)
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.file_prefix.is_empty() {
            return Err(ReportError::Config("file_prefix must not be empty".to_string()));
        }
        if self.file_extension.is_empty() || self.file_extension.starts_with('.') {
            return Err(ReportError::Config(format!(
                "file_extension must be a bare extension, got {:?}",
                self.file_extension
            )));
        }
        if self.archive_after_days < 0 {
            return Err(ReportError::Config("archive_after_days must not be negative".to_string()));
        }
        glob::Pattern::new(&self.file_pattern())
            .map_err(|e| ReportError::Config(format!("invalid file pattern: {}", e)))?;
        Ok(())
    }
}

/// Load a configuration from a JSON file; absent keys take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> ReportResult<DashboardConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ReportError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    let config: DashboardConfig = serde_json::from_str(&content)
        .map_err(|e| ReportError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.file_pattern(), "delta_report_*.xlsx");
        assert_eq!(config.archive_after_days, 90);
        assert!(!config.force_demo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"data_dir": "/srv/reports", "force_demo": true}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/reports"));
        assert!(config.force_demo);
        assert_eq!(config.file_prefix, "delta_report_");
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let config = DashboardConfig {
            file_extension: ".xlsx".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/dashboard.json").unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }
}
