#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarterly/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dart;
pub mod directory;
pub mod error;
pub mod statement;
pub mod table;

pub use error::{DataError, Result};
pub use statement::{
    Account, Figures, FiscalPeriod, Growth, PeriodRecord, ProfitStatus, Quarter, Ratios, RowKind,
    fiscal_periods,
};
pub use table::{PeriodTableBuilder, parse_amount};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
