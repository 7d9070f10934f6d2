//! Per-company summary of a finished run.
//!
//! Condenses the combined table into one line per company: how many periods
//! were reported and projected, and the headline figures of the latest
//! reported quarter.

use quarterly_data::{FiscalPeriod, PeriodRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline view of one company's rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanySummary {
    /// Company display name.
    pub company: String,

    /// OpenDART corp code.
    pub corp_code: String,

    /// Number of actual rows.
    pub actual_periods: usize,

    /// Number of forecast rows.
    pub forecast_periods: usize,

    /// First actual period.
    pub first_period: Option<FiscalPeriod>,

    /// Last actual period.
    pub latest_period: Option<FiscalPeriod>,

    /// Revenue of the latest actual period.
    pub latest_revenue: Option<f64>,

    /// Operating margin of the latest actual period (%).
    pub latest_operating_margin: Option<f64>,

    /// YoY revenue growth of the latest actual period (%).
    pub latest_revenue_growth: Option<f64>,

    /// Revenue of the last forecast period.
    pub projected_revenue: Option<f64>,
}

impl CompanySummary {
    fn from_rows(rows: &[&PeriodRecord]) -> Option<Self> {
        let first = rows.first()?;
        let actuals: Vec<&PeriodRecord> = rows.iter().copied().filter(|r| r.is_actual()).collect();
        let latest = actuals.last();

        Some(Self {
            company: first.company().to_string(),
            corp_code: first.corp_code().to_string(),
            actual_periods: actuals.len(),
            forecast_periods: rows.len() - actuals.len(),
            first_period: actuals.first().map(|r| r.period()),
            latest_period: latest.map(|r| r.period()),
            latest_revenue: latest.and_then(|r| r.figures().revenue),
            latest_operating_margin: latest.and_then(|r| r.ratios.operating_margin),
            latest_revenue_growth: latest.and_then(|r| r.growth.revenue),
            projected_revenue: rows
                .iter()
                .rev()
                .find(|r| !r.is_actual())
                .and_then(|r| r.figures().revenue),
        })
    }
}

impl fmt::Display for CompanySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} actual, {} forecast",
            self.company, self.corp_code, self.actual_periods, self.forecast_periods
        )
    }
}

/// Summarize a combined table, one entry per corp code in first-seen order.
pub fn summarize(records: &[PeriodRecord]) -> Vec<CompanySummary> {
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if !order.contains(&record.corp_code()) {
            order.push(record.corp_code());
        }
    }

    order
        .into_iter()
        .filter_map(|code| {
            let rows: Vec<&PeriodRecord> =
                records.iter().filter(|r| r.corp_code() == code).collect();
            CompanySummary::from_rows(&rows)
        })
        .collect()
}

fn cell(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn period_cell(period: Option<FiscalPeriod>) -> String {
    period.map_or_else(|| "-".to_string(), |p| p.to_string())
}

/// Render summaries as a fixed-width table for the terminal.
pub fn to_ascii_table(summaries: &[CompanySummary]) -> String {
    let mut output = String::new();

    output.push_str("\nRun Summary\n");
    output.push_str(&"=".repeat(96));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>8} {:>8} {:>8} {:>10} {:>16} {:>10} {:>10}\n",
        "Company", "Code", "Actual", "Fcst", "Latest", "Revenue", "Op. Mgn%", "Rev. YoY%"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for s in summaries {
        output.push_str(&format!(
            "{:<20} {:>8} {:>8} {:>8} {:>10} {:>16} {:>10} {:>10}\n",
            s.company,
            s.corp_code,
            s.actual_periods,
            s.forecast_periods,
            period_cell(s.latest_period),
            cell(s.latest_revenue, 0),
            cell(s.latest_operating_margin, 2),
            cell(s.latest_revenue_growth, 2),
        ));
    }

    output.push_str(&"=".repeat(96));
    output.push('\n');
    output
}
