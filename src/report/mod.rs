//! Report presentation module
//!
//! Finds the newest delta report, loads and summarizes it, and falls back
//! to the built-in sample dataset whenever real data is unavailable.

mod archive;
mod demo;
mod discovery;
mod loader;
mod summary;

pub use archive::*;
pub use demo::*;
pub use discovery::*;
pub use loader::*;
pub use summary::*;

use crate::config::DashboardConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::{DataSource, Presentation, ReportFile, ReportTable};
use log::{info, warn};

/// Outcome of one discover/load cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleState {
    ForcedDemo,
    NoDirectory(ReportError),
    NoFiles(ReportError),
    FileError(ReportError),
    Loaded { file: ReportFile, table: ReportTable },
}

/// Notice shown when the sample data was requested explicitly
pub const FORCED_DEMO_NOTICE: &str = "Demo mode forced; local reports ignored.";

/// Notice shown next to the sample data when a report could not be used
pub fn unavailable_notice(err: &ReportError) -> String {
    format!("Real data unavailable: {}. Showing sample data.", err)
}

/// Build the presentation of a loaded report
pub fn present(file: ReportFile, table: ReportTable) -> Presentation {
    Presentation {
        source: DataSource::Real { file },
        view: build_view(table),
    }
}

/// Delta report presenter
pub struct ReportPresenter {
    config: DashboardConfig,
}

impl ReportPresenter {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Reports in the configured directory, newest first
    pub fn discover(&self) -> ReportResult<Vec<ReportFile>> {
        discover(&self.config.data_dir, &self.config)
    }

    pub fn load(&self, file: &ReportFile) -> ReportResult<ReportTable> {
        load(file, &self.config.preferred_sheets)
    }

    /// The newest report and its rows
    pub fn latest(&self) -> ReportResult<(ReportFile, ReportTable)> {
        let newest = self
            .discover()?
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::NoMatchingFiles {
                directory: self.config.data_dir.clone(),
                pattern: self.config.file_pattern(),
            })?;
        let table = self.load(&newest)?;
        Ok((newest, table))
    }

    /// Run discovery and loading once, classifying the result
    pub fn run_cycle(&self) -> CycleState {
        if self.config.force_demo {
            return CycleState::ForcedDemo;
        }

        match self.latest() {
            Ok((file, table)) => CycleState::Loaded { file, table },
            Err(e @ ReportError::DirectoryMissing(_)) | Err(e @ ReportError::DirectoryUnreadable { .. }) => {
                CycleState::NoDirectory(e)
            }
            Err(e @ ReportError::NoMatchingFiles { .. }) => CycleState::NoFiles(e),
            Err(e) => CycleState::FileError(e),
        }
    }

    /// One full refresh: real dashboard when possible, sample data otherwise.
    pub fn refresh(&self) -> Presentation {
        match self.run_cycle() {
            CycleState::Loaded { file, table } => {
                info!("Presenting {} ({} rows)", file.name, table.len());
                present(file, table)
            }
            CycleState::ForcedDemo => {
                info!("{}", FORCED_DEMO_NOTICE);
                present_demo(FORCED_DEMO_NOTICE)
            }
            CycleState::NoDirectory(e) | CycleState::NoFiles(e) | CycleState::FileError(e) => {
                let reason = unavailable_notice(&e);
                warn!("{}", reason);
                present_demo(reason)
            }
        }
    }
}
