//! Pipeline entry point.
//!
//! Companies are processed one after another and every request is awaited
//! before the next one is sent. A period whose fetch fails is skipped; a
//! company with an invalid entry or no usable period is dropped. None of
//! these abort the run.

use crate::config::{CompanyTarget, RunConfig};
use crate::error::PipelineError;
use quarterly_data::dart::{ExtractedPeriod, FinancialSource};
use quarterly_data::{FiscalPeriod, PeriodRecord, PeriodTableBuilder, fiscal_periods};
use quarterly_metrics::{Forecaster, GrowthAnnotator, apply_ratios};
use quarterly_output::SkippedPeriod;
use tracing::{debug, info, warn};

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent<'a> {
    /// Work on a company begins
    CompanyStarted {
        /// Company display name
        company: &'a str,
        /// Periods that will be requested
        periods: usize,
    },
    /// A period fetch finished, whether it produced a row or not
    PeriodFinished {
        /// Company display name
        company: &'a str,
        /// Period that was requested
        period: FiscalPeriod,
        /// False when the period was skipped
        ok: bool,
    },
    /// A company produced no rows
    CompanyDropped {
        /// Company display name
        company: &'a str,
    },
    /// A company's rows are complete
    CompanyFinished {
        /// Company display name
        company: &'a str,
        /// Actual rows
        actual: usize,
        /// Forecast rows
        forecast: usize,
    },
}

/// Result of a run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    /// Combined table, each company's rows contiguous and in order
    pub records: Vec<PeriodRecord>,
    /// Periods that produced no row
    pub skipped_periods: Vec<SkippedPeriod>,
    /// Companies without any usable period
    pub dropped_companies: Vec<String>,
}

/// Run the pipeline.
///
/// # Errors
///
/// Returns an error only when `config` fails validation.
pub async fn run_pipeline<S>(source: &S, config: &RunConfig) -> Result<PipelineOutcome, PipelineError>
where
    S: FinancialSource + ?Sized,
{
    run_with_progress(source, config, |_| {}).await
}

/// Run the pipeline, reporting progress through `on_event`.
///
/// # Errors
///
/// Returns an error only when `config` fails validation.
pub async fn run_with_progress<S, F>(
    source: &S,
    config: &RunConfig,
    mut on_event: F,
) -> Result<PipelineOutcome, PipelineError>
where
    S: FinancialSource + ?Sized,
    F: FnMut(PipelineEvent<'_>),
{
    config.validate()?;

    let forecaster = Forecaster::with_config(config.forecast_config());
    let mut outcome = PipelineOutcome::default();

    info!(
        companies = config.companies.len(),
        start_year = config.start_year,
        end_year = config.end_year,
        strategy = %config.strategy,
        "starting run"
    );

    for target in &config.companies {
        if let Err(e) = target.validate() {
            warn!(company = %target.name, corp_code = %target.corp_code, error = %e, "invalid company entry, company dropped");
            on_event(PipelineEvent::CompanyDropped {
                company: &target.name,
            });
            outcome.dropped_companies.push(target.name.clone());
            continue;
        }

        let mut table =
            collect_company(source, config, target, &mut outcome.skipped_periods, &mut on_event)
                .await;

        if table.is_empty() {
            warn!(company = %target.name, corp_code = %target.corp_code, "no usable period, company dropped");
            on_event(PipelineEvent::CompanyDropped {
                company: &target.name,
            });
            outcome.dropped_companies.push(target.name.clone());
            continue;
        }

        apply_ratios(&mut table);
        let actual = table.len();
        let forecasts = forecaster.forecast(&table);
        let forecast = forecasts.len();
        table.extend(forecasts);

        info!(company = %target.name, actual, forecast, "company complete");
        on_event(PipelineEvent::CompanyFinished {
            company: &target.name,
            actual,
            forecast,
        });
        outcome.records.extend(table);
    }

    GrowthAnnotator::with_config(config.growth_config()).annotate(&mut outcome.records);

    info!(
        rows = outcome.records.len(),
        skipped = outcome.skipped_periods.len(),
        dropped = outcome.dropped_companies.len(),
        "run complete"
    );

    Ok(outcome)
}

/// Fetch and tabulate every period of one company.
async fn collect_company<S, F>(
    source: &S,
    config: &RunConfig,
    target: &CompanyTarget,
    skipped: &mut Vec<SkippedPeriod>,
    on_event: &mut F,
) -> Vec<PeriodRecord>
where
    S: FinancialSource + ?Sized,
    F: FnMut(PipelineEvent<'_>),
{
    let periods: Vec<FiscalPeriod> = fiscal_periods(config.start_year, config.end_year).collect();
    on_event(PipelineEvent::CompanyStarted {
        company: &target.name,
        periods: periods.len(),
    });

    let industry_code = match source.fetch_company_profile(&target.corp_code).await {
        Ok(profile) => {
            debug!(company = %target.name, registered = %profile.display_name, "profile fetched");
            profile.industry_code
        }
        Err(e) => {
            warn!(company = %target.name, error = %e, "profile unavailable, industry code left empty");
            None
        }
    };

    let mut builder =
        PeriodTableBuilder::new(&target.name, &target.corp_code).industry_code(industry_code);

    for period in periods {
        let fetched = source
            .fetch_period_figures(&target.corp_code, period.year, period.quarter)
            .await;

        let reason = match fetched {
            Ok(items) if !items.is_empty() => {
                builder.push(&ExtractedPeriod::from_line_items(period, &items));
                None
            }
            Ok(_) => Some("empty statement list".to_string()),
            Err(e) => Some(e.to_string()),
        };

        if let Some(reason) = &reason {
            warn!(company = %target.name, %period, %reason, "period skipped");
            skipped.push(SkippedPeriod {
                company: target.name.clone(),
                period,
                reason: reason.clone(),
            });
        }
        on_event(PipelineEvent::PeriodFinished {
            company: &target.name,
            period,
            ok: reason.is_none(),
        });
    }

    builder.build()
}
