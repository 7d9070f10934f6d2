//! The fetch capability the pipeline depends on.

use super::extract::LineItem;
use crate::error::Result;
use crate::statement::Quarter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Profile details of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Industry classification code
    pub industry_code: Option<String>,
    /// Registered company name
    pub display_name: String,
}

/// Source of per-period financial statement line items.
///
/// [`DartClient`](super::DartClient) implements this over HTTP; tests use
/// in-memory implementations.
#[async_trait]
pub trait FinancialSource {
    /// Fetch the statement line items of one company for one fiscal period.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success API statuses, or
    /// when the response carries no usable line items.
    async fn fetch_period_figures(
        &self,
        corp_code: &str,
        fiscal_year: i32,
        quarter: Quarter,
    ) -> Result<Vec<LineItem>>;

    /// Fetch the profile (industry code and name) of a company.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures or non-success API statuses.
    async fn fetch_company_profile(&self, corp_code: &str) -> Result<CompanyProfile>;
}
