//! OpenDART financial statement access.
//!
//! This module provides:
//! - The [`FinancialSource`] capability the pipeline consumes
//! - An HTTP implementation, [`DartClient`]
//! - Consolidated-statement extraction from raw line items
//!
//! # Example
//!
//! ```no_run
//! use quarterly_data::dart::{DartClient, ExtractedPeriod, FinancialSource};
//! use quarterly_data::{FiscalPeriod, Quarter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DartClient::new(std::env::var("DART_API_KEY")?)?;
//!     let items = client.fetch_period_figures("00126380", 2024, Quarter::Q1).await?;
//!     let extracted =
//!         ExtractedPeriod::from_line_items(FiscalPeriod::new(2024, Quarter::Q1), &items);
//!     println!("Extracted {} accounts", extracted.amounts.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod extract;
pub mod source;

pub use client::{DART_BASE_URL, DartClient, DartConfig, validate_corp_code};
pub use extract::{CONSOLIDATED, ExtractedPeriod, LineItem};
pub use source::{CompanyProfile, FinancialSource};
