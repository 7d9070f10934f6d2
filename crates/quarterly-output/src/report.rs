//! Machine-readable run report.

use crate::summary::{CompanySummary, summarize};
use chrono::{DateTime, Utc};
use quarterly_data::{FiscalPeriod, PeriodRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A period that produced no row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedPeriod {
    /// Company display name.
    pub company: String,

    /// Fiscal period that was skipped.
    pub period: FiscalPeriod,

    /// Why the fetch failed or returned nothing.
    pub reason: String,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// First fiscal year requested.
    pub start_year: i32,

    /// Last fiscal year requested.
    pub end_year: i32,

    /// Forecast strategy name.
    pub strategy: String,

    /// Total rows written.
    pub rows: usize,

    /// Per-company summaries.
    pub companies: Vec<CompanySummary>,

    /// Periods skipped during fetching.
    pub skipped_periods: Vec<SkippedPeriod>,

    /// Companies with no usable period.
    pub dropped_companies: Vec<String>,
}

impl RunReport {
    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Builder for creating run reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    years: Option<(i32, i32)>,
    strategy: Option<String>,
    records: Vec<PeriodRecord>,
    skipped_periods: Vec<SkippedPeriod>,
    dropped_companies: Vec<String>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested year range.
    pub const fn years(mut self, start_year: i32, end_year: i32) -> Self {
        self.years = Some((start_year, end_year));
        self
    }

    /// Set the forecast strategy name.
    pub fn strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Set the combined table.
    pub fn records(mut self, records: &[PeriodRecord]) -> Self {
        self.records = records.to_vec();
        self
    }

    /// Set the skipped periods.
    pub fn skipped_periods(mut self, skipped: Vec<SkippedPeriod>) -> Self {
        self.skipped_periods = skipped;
        self
    }

    /// Set the dropped companies.
    pub fn dropped_companies(mut self, dropped: Vec<String>) -> Self {
        self.dropped_companies = dropped;
        self
    }

    /// Build the report.
    pub fn build(self) -> RunReport {
        let (start_year, end_year) = self.years.unwrap_or_default();
        RunReport {
            timestamp: Utc::now(),
            start_year,
            end_year,
            strategy: self.strategy.unwrap_or_else(|| "none".to_string()),
            rows: self.records.len(),
            companies: summarize(&self.records),
            skipped_periods: self.skipped_periods,
            dropped_companies: self.dropped_companies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarterly_data::{Figures, Quarter};

    #[test]
    fn test_report_builder() {
        let period = FiscalPeriod::new(2024, Quarter::Q1);
        let records = vec![PeriodRecord::actual(
            "A",
            "00000001",
            period,
            Figures::default(),
        )];

        let report = ReportBuilder::new()
            .years(2023, 2024)
            .strategy("growth")
            .records(&records)
            .skipped_periods(vec![SkippedPeriod {
                company: "A".to_string(),
                period: FiscalPeriod::new(2023, Quarter::Q4),
                reason: "no data".to_string(),
            }])
            .dropped_companies(vec!["B".to_string()])
            .build();

        assert_eq!(report.start_year, 2023);
        assert_eq!(report.end_year, 2024);
        assert_eq!(report.strategy, "growth");
        assert_eq!(report.rows, 1);
        assert_eq!(report.companies.len(), 1);
        assert_eq!(report.skipped_periods.len(), 1);
        assert_eq!(report.dropped_companies, vec!["B".to_string()]);
    }

    #[test]
    fn test_report_json() {
        let report = ReportBuilder::new().years(2020, 2020).build();
        let json = report.to_json().unwrap();

        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"strategy\": \"none\""));
        assert!(json.contains("\"dropped_companies\": []"));
    }
}
