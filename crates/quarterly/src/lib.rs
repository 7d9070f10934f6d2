#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarterly/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export main types from sub-crates
pub use quarterly_data as data;
pub use quarterly_metrics as metrics;
pub use quarterly_output as output;

pub use config::{CompanyTarget, ConfigFile, RunConfig};
pub use error::PipelineError;
pub use pipeline::{PipelineEvent, PipelineOutcome, run_pipeline, run_with_progress};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
