//! CSV and JSON export of the combined period table.
//!
//! Records are flattened into [`PeriodRow`]s with a fixed column order. Missing
//! values become empty cells in CSV and `null` in JSON.

use quarterly_data::{PeriodRecord, ProfitStatus, RowKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized CSV was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::PrettyJson => "pretty-json",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// One exported row, in output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Company display name.
    pub company: String,
    /// Fiscal year.
    pub year: i32,
    /// Quarter number, 1 through 4.
    pub quarter: u8,
    /// Actual or forecast.
    pub kind: RowKind,
    /// Industry code from the company profile.
    pub industry_code: Option<String>,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Total equity.
    pub total_equity: Option<f64>,
    /// Revenue.
    pub revenue: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Revenue minus operating income.
    pub operating_cost: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Surplus or deficit.
    pub profit_status: Option<ProfitStatus>,
    /// YoY revenue growth (%).
    pub revenue_growth_pct: Option<f64>,
    /// YoY operating income growth (%).
    pub operating_income_growth_pct: Option<f64>,
    /// YoY net income growth (%).
    pub net_income_growth_pct: Option<f64>,
    /// Operating margin (%).
    pub operating_margin_pct: Option<f64>,
    /// Net margin (%).
    pub net_margin_pct: Option<f64>,
    /// Operating cost ratio (%).
    pub operating_cost_ratio_pct: Option<f64>,
    /// Return on assets (%).
    pub roa_pct: Option<f64>,
    /// Return on equity (%).
    pub roe_pct: Option<f64>,
}

impl PeriodRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 21] = [
        "company",
        "year",
        "quarter",
        "kind",
        "industry_code",
        "total_assets",
        "total_liabilities",
        "total_equity",
        "revenue",
        "operating_income",
        "operating_cost",
        "net_income",
        "profit_status",
        "revenue_growth_pct",
        "operating_income_growth_pct",
        "net_income_growth_pct",
        "operating_margin_pct",
        "net_margin_pct",
        "operating_cost_ratio_pct",
        "roa_pct",
        "roe_pct",
    ];
}

impl From<&PeriodRecord> for PeriodRow {
    fn from(record: &PeriodRecord) -> Self {
        let figures = record.figures();
        let period = record.period();
        Self {
            company: record.company().to_string(),
            year: period.year,
            quarter: period.quarter.number(),
            kind: record.kind(),
            industry_code: record.industry_code().map(str::to_string),
            total_assets: figures.total_assets,
            total_liabilities: figures.total_liabilities,
            total_equity: figures.total_equity,
            revenue: figures.revenue,
            operating_income: figures.operating_income,
            operating_cost: record.ratios.operating_cost,
            net_income: figures.net_income,
            profit_status: record.ratios.profit_status,
            revenue_growth_pct: record.growth.revenue,
            operating_income_growth_pct: record.growth.operating_income,
            net_income_growth_pct: record.growth.net_income,
            operating_margin_pct: record.ratios.operating_margin,
            net_margin_pct: record.ratios.net_margin,
            operating_cost_ratio_pct: record.ratios.operating_cost_ratio,
            roa_pct: record.ratios.roa,
            roe_pct: record.ratios.roe,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for [PeriodRow] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                // Header is written explicitly so an empty table still has one.
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(vec![]);
                wtr.write_record(PeriodRow::COLUMNS)?;
                for row in self {
                    wtr.serialize(row)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                Ok(String::from_utf8(bytes)?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for [PeriodRecord] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        let rows: Vec<PeriodRow> = self.iter().map(PeriodRow::from).collect();
        rows.export_to_string(format)
    }
}
