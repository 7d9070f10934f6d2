//! Run configuration.
//!
//! A [`RunConfig`] is passed explicitly to the pipeline; nothing is read from
//! process-wide state. [`ConfigFile`] is the JSON form loaded by the binary,
//! with every field optional so command-line flags can fill the gaps.

use crate::error::PipelineError;
use quarterly_data::dart::validate_corp_code;
use quarterly_metrics::{ForecastConfig, ForecastStrategy, GrowthConfig};
use quarterly_output::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default first fiscal year.
pub const DEFAULT_START_YEAR: i32 = 2020;

/// Default last fiscal year.
pub const DEFAULT_END_YEAR: i32 = 2024;

/// A company to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTarget {
    /// Display name used in the output
    pub name: String,
    /// OpenDART corp code
    pub corp_code: String,
}

impl CompanyTarget {
    /// Create a new target.
    pub fn new(name: impl Into<String>, corp_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            corp_code: corp_code.into(),
        }
    }

    /// Check the name and corp code.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidCompany` for an empty name or a corp code
    /// that is not 8 digits.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.name.trim().is_empty() {
            return Err(PipelineError::InvalidCompany {
                name: self.corp_code.clone(),
                reason: "empty name".to_string(),
            });
        }
        validate_corp_code(&self.corp_code).map_err(|e| PipelineError::InvalidCompany {
            name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Companies, processed in order
    pub companies: Vec<CompanyTarget>,
    /// First fiscal year (inclusive)
    pub start_year: i32,
    /// Last fiscal year (inclusive)
    pub end_year: i32,
    /// Forecast strategy
    pub strategy: ForecastStrategy,
    /// Forecast horizon override
    pub horizon: Option<usize>,
    /// Annotate growth over actual and forecast rows together
    pub growth_over_forecast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_START_YEAR, DEFAULT_END_YEAR)
    }
}

impl RunConfig {
    /// Create a config for a year range with no companies yet.
    pub const fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            companies: Vec::new(),
            start_year,
            end_year,
            strategy: ForecastStrategy::TrailingGrowth,
            horizon: None,
            growth_over_forecast: false,
        }
    }

    /// Add a company.
    pub fn with_company(mut self, company: CompanyTarget) -> Self {
        self.companies.push(company);
        self
    }

    /// Set the forecast strategy.
    pub const fn with_strategy(mut self, strategy: ForecastStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the forecast horizon.
    pub const fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Check the config before any request is made.
    ///
    /// Individual companies are checked by the pipeline, which drops the
    /// invalid ones and carries on.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted year range or an empty company list.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.start_year > self.end_year {
            return Err(PipelineError::InvalidYearRange {
                start_year: self.start_year,
                end_year: self.end_year,
            });
        }
        if self.companies.is_empty() {
            return Err(PipelineError::NoCompanies);
        }
        Ok(())
    }

    /// Forecaster settings for this run.
    pub const fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            strategy: self.strategy,
            horizon: self.horizon,
        }
    }

    /// Growth annotator settings for this run.
    pub fn growth_config(&self) -> GrowthConfig {
        GrowthConfig {
            include_forecasts: self.growth_over_forecast,
            ..GrowthConfig::default()
        }
    }
}

/// JSON config file. Missing fields fall back to defaults or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Companies with known corp codes
    pub companies: Vec<CompanyTarget>,
    /// Company names to resolve through the directory snapshot
    pub company_names: Vec<String>,
    /// First fiscal year
    pub start_year: Option<i32>,
    /// Last fiscal year
    pub end_year: Option<i32>,
    /// Forecast strategy
    pub strategy: Option<ForecastStrategy>,
    /// Forecast horizon override
    pub horizon: Option<usize>,
    /// Annotate growth over forecast rows too
    pub growth_over_forecast: Option<bool>,
    /// Output file
    pub output: Option<PathBuf>,
    /// Output format
    pub format: Option<ExportFormat>,
}

impl ConfigFile {
    /// Parse a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a valid config.
    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Run config from the file's values, defaults elsewhere.
    ///
    /// `company_names` are not included; they need a directory lookup first.
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            companies: self.companies.clone(),
            start_year: self.start_year.unwrap_or(DEFAULT_START_YEAR),
            end_year: self.end_year.unwrap_or(DEFAULT_END_YEAR),
            strategy: self.strategy.unwrap_or_default(),
            horizon: self.horizon,
            growth_over_forecast: self.growth_over_forecast.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn samsung() -> CompanyTarget {
        CompanyTarget::new("삼성전자", "00126380")
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.start_year, 2020);
        assert_eq!(config.end_year, 2024);
        assert_eq!(config.strategy, ForecastStrategy::TrailingGrowth);
        assert!(!config.growth_over_forecast);
    }

    #[test]
    fn test_validate_ok() {
        let config = RunConfig::new(2020, 2020).with_company(samsung());
        assert!(config.validate().is_ok());
        assert!(samsung().validate().is_ok());
    }

    #[test]
    fn test_validate_year_range() {
        let config = RunConfig::new(2024, 2020).with_company(samsung());
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidYearRange {
                start_year: 2024,
                end_year: 2020
            })
        ));
    }

    #[test]
    fn test_validate_no_companies() {
        assert!(matches!(
            RunConfig::default().validate(),
            Err(PipelineError::NoCompanies)
        ));
    }

    #[rstest]
    #[case("", "00126380")]
    #[case("삼성전자", "126380")]
    #[case("삼성전자", "0012638A")]
    fn test_validate_bad_company(#[case] name: &str, #[case] code: &str) {
        let target = CompanyTarget::new(name, code);
        assert!(matches!(
            target.validate(),
            Err(PipelineError::InvalidCompany { .. })
        ));

        // A bad entry does not invalidate the run as a whole.
        let config = RunConfig::default().with_company(samsung()).with_company(target);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_configs() {
        let mut config = RunConfig::default()
            .with_strategy(ForecastStrategy::LinearTrend)
            .with_horizon(3);
        config.growth_over_forecast = true;

        let forecast = config.forecast_config();
        assert_eq!(forecast.strategy, ForecastStrategy::LinearTrend);
        assert_eq!(forecast.horizon, Some(3));

        let growth = config.growth_config();
        assert_eq!(growth.lag, 4);
        assert!(growth.include_forecasts);
    }

    #[test]
    fn test_config_file() {
        let file = ConfigFile::from_json(
            r#"{
                "companies": [{"name": "삼성전자", "corp_code": "00126380"}],
                "company_names": ["SK하이닉스"],
                "start_year": 2021,
                "strategy": "linear-trend",
                "format": "pretty-json"
            }"#,
        )
        .unwrap();

        assert_eq!(file.company_names, vec!["SK하이닉스".to_string()]);
        assert_eq!(file.format, Some(ExportFormat::PrettyJson));

        let config = file.to_run_config();
        assert_eq!(config.companies, vec![samsung()]);
        assert_eq!(config.start_year, 2021);
        assert_eq!(config.end_year, DEFAULT_END_YEAR);
        assert_eq!(config.strategy, ForecastStrategy::LinearTrend);
    }

    #[test]
    fn test_config_file_rejects_unknown_fields() {
        assert!(matches!(
            ConfigFile::from_json(r#"{"api_key": "secret"}"#),
            Err(PipelineError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_config_file_missing() {
        let result = ConfigFile::load(Path::new("/nonexistent/quarterly.json"));
        assert!(matches!(result, Err(PipelineError::ConfigRead { .. })));
    }
}
