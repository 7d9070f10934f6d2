//! Profitability and efficiency ratios.
//!
//! Every ratio is a percentage. A zero denominator yields `0` rather than an
//! infinite or missing value; a missing operand yields `None`.

use quarterly_data::{Figures, PeriodRecord, ProfitStatus, Ratios};

/// `numerator / denominator * 100`, with a zero guard on the denominator.
pub fn percent_of(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(_), Some(den)) if den == 0.0 => Some(0.0),
        (Some(num), Some(den)) => Some(num / den * 100.0),
        _ => None,
    }
}

/// Surplus when net income is strictly positive, deficit otherwise.
pub fn profit_status(net_income: Option<f64>) -> ProfitStatus {
    match net_income {
        Some(ni) if ni > 0.0 => ProfitStatus::Surplus,
        _ => ProfitStatus::Deficit,
    }
}

/// Derive all ratios from raw figures.
pub fn compute_ratios(figures: &Figures) -> Ratios {
    let operating_cost = match (figures.revenue, figures.operating_income) {
        (Some(revenue), Some(operating_income)) => Some(revenue - operating_income),
        _ => None,
    };

    Ratios {
        operating_margin: percent_of(figures.operating_income, figures.revenue),
        net_margin: percent_of(figures.net_income, figures.revenue),
        roa: percent_of(figures.net_income, figures.total_assets),
        roe: percent_of(figures.net_income, figures.total_equity),
        operating_cost,
        operating_cost_ratio: percent_of(operating_cost, figures.revenue),
        profit_status: Some(profit_status(figures.net_income)),
    }
}

/// Recompute the ratios of every record from its raw figures.
pub fn apply_ratios(records: &mut [PeriodRecord]) {
    for record in records.iter_mut() {
        record.ratios = compute_ratios(record.figures());
    }
}
