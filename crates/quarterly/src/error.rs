//! Error types for pipeline runs.

use quarterly_data::DataError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Per-period fetch failures never surface here; they are logged and the
/// period is skipped.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Data layer error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Start year after end year
    #[error("Invalid year range: {start_year} to {end_year}")]
    InvalidYearRange {
        /// First fiscal year
        start_year: i32,
        /// Last fiscal year
        end_year: i32,
    },

    /// No company configured
    #[error("No companies configured")]
    NoCompanies,

    /// A company entry is unusable
    #[error("Invalid company entry '{name}': {reason}")]
    InvalidCompany {
        /// Configured name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path of the config file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Config file is not valid JSON for a run
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
