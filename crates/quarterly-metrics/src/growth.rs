//! Year-over-year growth
//!
//! Compares each period with the same quarter one year earlier in the same
//! company's table. Lags are keyed by fiscal period, not row position, so a
//! skipped period never shifts the comparison. Companies are grouped by corp
//! code so lag windows never cross company boundaries.

use quarterly_data::{Growth, PeriodRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the growth annotator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Lag in quarters (default: 4 for YoY on quarterly data)
    pub lag: usize,
    /// Annotate forecast rows too, lagging across the actual/forecast boundary
    /// (default: false)
    pub include_forecasts: bool,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            lag: 4,
            include_forecasts: false,
        }
    }
}

/// `(current / previous - 1) * 100`; `None` when either side is missing or
/// the previous value is zero.
pub fn yoy_percent(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(cur), Some(prev)) if prev != 0.0 => Some((cur / prev - 1.0) * 100.0),
        _ => None,
    }
}

/// Fills the growth fields of a combined table.
#[derive(Debug, Default)]
pub struct GrowthAnnotator {
    config: GrowthConfig,
}

impl GrowthAnnotator {
    /// Create an annotator with the given configuration.
    pub const fn with_config(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub const fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Annotate every record in place.
    ///
    /// Companies may be interleaved and rows need not be contiguous. A row
    /// whose lagged period is absent from the table gets `None` growth, as do
    /// rows outside the annotated scope.
    pub fn annotate(&self, records: &mut [PeriodRecord]) {
        let mut by_period: HashMap<(String, i64), usize> = HashMap::new();
        let mut in_scope = Vec::new();

        for (idx, record) in records.iter_mut().enumerate() {
            record.growth = Growth::default();
            if record.is_actual() || self.config.include_forecasts {
                by_period.insert(
                    (record.corp_code().to_string(), record.period().ordinal()),
                    idx,
                );
                in_scope.push(idx);
            }
        }

        let lag = self.config.lag as i64;
        for idx in in_scope {
            let key = (
                records[idx].corp_code().to_string(),
                records[idx].period().ordinal() - lag,
            );
            let Some(&prev_idx) = by_period.get(&key) else {
                continue;
            };

            let previous = *records[prev_idx].figures();
            let current = *records[idx].figures();

            let mut growth = Growth::default();
            for account in Growth::ACCOUNTS {
                growth.set(
                    account,
                    yoy_percent(current.get(account), previous.get(account)),
                );
            }
            records[idx].growth = growth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quarterly_data::{Figures, FiscalPeriod, Quarter, fiscal_periods};

    fn company(name: &str, code: &str, revenues: &[Option<f64>]) -> Vec<PeriodRecord> {
        fiscal_periods(2020, 2030)
            .zip(revenues)
            .map(|(period, revenue)| {
                let figures = Figures {
                    revenue: *revenue,
                    operating_income: revenue.map(|r| r / 10.0),
                    net_income: revenue.map(|r| r / 20.0),
                    ..Figures::default()
                };
                PeriodRecord::actual(name, code, period, figures)
            })
            .collect()
    }

    #[test]
    fn test_yoy_percent() {
        assert_relative_eq!(yoy_percent(Some(125.0), Some(100.0)).unwrap(), 25.0);
        assert_eq!(yoy_percent(Some(125.0), Some(0.0)), None);
        assert_eq!(yoy_percent(None, Some(100.0)), None);
        assert_eq!(yoy_percent(Some(1.0), None), None);
    }

    #[test]
    fn test_first_four_periods_have_no_growth() {
        let revenues: Vec<_> = (1..=8).map(|i| Some(100.0 * i as f64)).collect();
        let mut records = company("Acme", "00000001", &revenues);

        GrowthAnnotator::default().annotate(&mut records);

        for record in &records[..4] {
            assert_eq!(record.growth, Growth::default());
        }
        // 500 vs 100
        assert_relative_eq!(records[4].growth.revenue.unwrap(), 400.0, epsilon = 1e-9);
        assert_relative_eq!(
            records[4].growth.operating_income.unwrap(),
            400.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(records[7].growth.net_income.unwrap(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fewer_than_five_periods() {
        let revenues = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let mut records = company("Acme", "00000001", &revenues);

        GrowthAnnotator::default().annotate(&mut records);

        assert!(records.iter().all(|r| r.growth == Growth::default()));
    }

    #[test]
    fn test_companies_do_not_share_lag_window() {
        let mut records = company("A", "00000001", &[Some(1.0), Some(2.0), Some(3.0)]);
        records.extend(company("B", "00000002", &[Some(10.0), Some(20.0), Some(30.0)]));

        GrowthAnnotator::default().annotate(&mut records);

        // Six rows in total but each company only has three.
        assert!(records.iter().all(|r| r.growth.revenue.is_none()));
    }

    #[test]
    fn test_missing_lag_value_yields_none() {
        let revenues = vec![
            None,
            Some(100.0),
            Some(100.0),
            Some(100.0),
            Some(120.0),
            Some(110.0),
        ];
        let mut records = company("Acme", "00000001", &revenues);

        GrowthAnnotator::default().annotate(&mut records);

        assert_eq!(records[4].growth.revenue, None);
        assert_relative_eq!(records[5].growth.revenue.unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lag_follows_fiscal_period_across_gaps() {
        let revenues = [1_100.0, 1_200.0, 1_300.0, 1_400.0, 2_100.0, 2_200.0, 2_300.0];
        let mut records = company("Acme", "00000001", &revenues.map(Some));
        // 2020-Q3 was never fetched.
        records.remove(2);

        GrowthAnnotator::default().annotate(&mut records);

        // 2021-Q1 vs 2020-Q1
        assert_relative_eq!(
            records[3].growth.revenue.unwrap(),
            (2_100.0 / 1_100.0 - 1.0) * 100.0,
            epsilon = 1e-9
        );
        // 2021-Q2 vs 2020-Q2
        assert_relative_eq!(
            records[4].growth.revenue.unwrap(),
            (2_200.0 / 1_200.0 - 1.0) * 100.0,
            epsilon = 1e-9
        );
        // 2021-Q3 has no year-earlier row
        assert_eq!(records[5].growth, Growth::default());
    }

    #[test]
    fn test_forecast_rows_skipped_by_default() {
        let revenues: Vec<_> = (1..=4).map(|i| Some(100.0 * i as f64)).collect();
        let mut records = company("Acme", "00000001", &revenues);
        records.push(PeriodRecord::forecast(
            "Acme",
            "00000001",
            FiscalPeriod::new(2021, Quarter::Q1),
            Figures {
                revenue: Some(200.0),
                ..Figures::default()
            },
        ));

        let mut combined = records.clone();

        GrowthAnnotator::default().annotate(&mut records);
        assert_eq!(records[4].growth.revenue, None);

        GrowthAnnotator::with_config(GrowthConfig {
            include_forecasts: true,
            ..GrowthConfig::default()
        })
        .annotate(&mut combined);
        assert_relative_eq!(combined[4].growth.revenue.unwrap(), 100.0, epsilon = 1e-9);
    }
}
