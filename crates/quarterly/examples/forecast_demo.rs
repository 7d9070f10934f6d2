//! Derive ratios, forecasts and growth for a synthetic company, then print
//! the table as CSV and a summary.

use quarterly::data::{Figures, PeriodRecord, fiscal_periods};
use quarterly::metrics::{ForecastStrategy, Forecaster, GrowthAnnotator, apply_ratios};
use quarterly::output::{ExportFormat, Exporter, summarize, to_ascii_table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Quarterly Forecast Demo ===\n");

    let mut records: Vec<PeriodRecord> = fiscal_periods(2022, 2023)
        .enumerate()
        .map(|(i, period)| {
            let revenue = 1_000.0 + 50.0 * i as f64;
            let figures = Figures {
                total_assets: Some(8_000.0),
                total_liabilities: Some(3_000.0),
                total_equity: Some(5_000.0),
                revenue: Some(revenue),
                operating_income: Some(revenue * 0.12),
                net_income: Some(revenue * 0.08),
            };
            PeriodRecord::actual("Demo Co", "00000001", period, figures)
        })
        .collect();

    apply_ratios(&mut records);

    for strategy in [ForecastStrategy::LinearTrend, ForecastStrategy::TrailingGrowth] {
        let forecasts = Forecaster::new(strategy).forecast(&records);
        println!("{strategy} forecast:");
        for row in &forecasts {
            println!(
                "  {}  revenue {:>10.1}",
                row.period(),
                row.figures().revenue.unwrap_or(f64::NAN)
            );
        }
        println!();
    }

    let forecasts = Forecaster::new(ForecastStrategy::TrailingGrowth).forecast(&records);
    records.extend(forecasts);
    GrowthAnnotator::default().annotate(&mut records);

    println!("{}", records.export_to_string(ExportFormat::Csv)?);
    println!("{}", to_ascii_table(&summarize(&records)));

    Ok(())
}
