#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarterly/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod forecast;
pub mod growth;
pub mod ratios;

pub use forecast::{ForecastConfig, ForecastStrategy, Forecaster, UnknownStrategy};
pub use growth::{GrowthAnnotator, GrowthConfig, yoy_percent};
pub use ratios::{apply_ratios, compute_ratios, percent_of, profit_status};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
