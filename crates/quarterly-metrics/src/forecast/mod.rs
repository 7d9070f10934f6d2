//! Forecasting of future quarters.
//!
//! Two fixed heuristics project every account of a company's table:
//!
//! - [`ForecastStrategy::LinearTrend`] fits a least-squares line over the
//!   period index and extrapolates it
//! - [`ForecastStrategy::TrailingGrowth`] compounds the average year-over-year
//!   growth onto the value one year back
//!
//! [`ForecastStrategy::Disabled`] emits empty placeholder rows instead.
//! Histories are laid out one slot per fiscal quarter from the first actual
//! row to the last, so a skipped period is a `None` slot rather than a shift.
//! Projected rows continue the fiscal calendar after the last actual row and
//! carry ratios recomputed from the projected figures.

pub mod linear;
pub mod trailing;

pub use linear::{LineFit, fit_line, project_linear};
pub use trailing::{average_growth, project_trailing};

use crate::ratios::apply_ratios;
use quarterly_data::{Account, Figures, PeriodRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lag used by trailing growth: one year of quarters.
pub const YEAR_LAG: usize = 4;

/// Forecasting method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastStrategy {
    /// Least-squares line over the period index
    #[serde(alias = "linear")]
    LinearTrend,
    /// Average YoY growth compounded on the lagged value
    #[default]
    #[serde(alias = "growth")]
    TrailingGrowth,
    /// Placeholder rows without figures
    #[serde(alias = "none")]
    Disabled,
}

impl ForecastStrategy {
    /// Number of quarters projected when no horizon is configured.
    pub const fn default_horizon(&self) -> usize {
        match self {
            Self::LinearTrend | Self::TrailingGrowth => 8,
            Self::Disabled => 4,
        }
    }

    /// Short name used on the command line and in reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LinearTrend => "linear",
            Self::TrailingGrowth => "growth",
            Self::Disabled => "none",
        }
    }
}

impl fmt::Display for ForecastStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised strategy name.
#[derive(Debug, Error)]
#[error("unknown forecast strategy '{0}' (expected linear, growth or none)")]
pub struct UnknownStrategy(pub String);

impl FromStr for ForecastStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear-trend" => Ok(Self::LinearTrend),
            "growth" | "trailing-growth" => Ok(Self::TrailingGrowth),
            "none" | "disabled" => Ok(Self::Disabled),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Configuration for the forecaster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Forecasting method (default: trailing growth)
    pub strategy: ForecastStrategy,
    /// Quarters to project (default: the strategy's default horizon)
    pub horizon: Option<usize>,
}

/// Projects future quarters of one company's table.
#[derive(Debug, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    /// Create a forecaster with the given configuration.
    pub const fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Create a forecaster using a strategy's default horizon.
    pub const fn new(strategy: ForecastStrategy) -> Self {
        Self::with_config(ForecastConfig {
            strategy,
            horizon: None,
        })
    }

    /// Current configuration.
    pub const fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Quarters this forecaster projects.
    pub fn horizon(&self) -> usize {
        self.config
            .horizon
            .unwrap_or_else(|| self.config.strategy.default_horizon())
    }

    /// Forecast rows following `actuals`.
    ///
    /// `actuals` must be one company's actual rows in chronological order.
    /// Returns an empty vector when `actuals` is empty.
    pub fn forecast(&self, actuals: &[PeriodRecord]) -> Vec<PeriodRecord> {
        let Some(last) = actuals.last() else {
            return Vec::new();
        };

        let horizon = self.horizon();
        let mut projected = vec![Figures::default(); horizon];

        for account in Account::ALL {
            let history = aligned_history(actuals, account);

            let values = match self.config.strategy {
                ForecastStrategy::LinearTrend => project_linear(&history, horizon),
                ForecastStrategy::TrailingGrowth => project_trailing(&history, YEAR_LAG, horizon),
                ForecastStrategy::Disabled => break,
            };

            for (figures, value) in projected.iter_mut().zip(values) {
                figures.set(account, value);
            }
        }

        let mut period = last.period();
        let industry_code = last.industry_code().map(str::to_string);
        let mut rows: Vec<PeriodRecord> = projected
            .into_iter()
            .map(|figures| {
                period = period.next();
                PeriodRecord::forecast(last.company(), last.corp_code(), period, figures)
                    .with_industry_code(industry_code.clone())
            })
            .collect();

        if self.config.strategy != ForecastStrategy::Disabled {
            apply_ratios(&mut rows);
        }

        tracing::debug!(
            corp_code = last.corp_code(),
            strategy = %self.config.strategy,
            rows = rows.len(),
            "forecast produced"
        );

        rows
    }
}

/// One slot per quarter from the first to the last record; periods without a
/// record stay `None`.
fn aligned_history(actuals: &[PeriodRecord], account: Account) -> Vec<Option<f64>> {
    let (Some(first), Some(last)) = (actuals.first(), actuals.last()) else {
        return Vec::new();
    };
    let start = first.period();
    let len = usize::try_from(last.period().quarters_since(start) + 1).unwrap_or(0);

    let mut history = vec![None; len];
    for record in actuals {
        let slot = usize::try_from(record.period().quarters_since(start)).ok();
        if let Some(value) = slot.and_then(|i| history.get_mut(i)) {
            *value = record.figures().get(account);
        }
    }
    history
}
