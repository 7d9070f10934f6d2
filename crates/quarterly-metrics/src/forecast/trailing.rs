//! Trailing growth compounding.
//!
//! The average year-over-year growth of a series is applied to the value one
//! year (four quarters) back. The series grows as it is projected, so once
//! the horizon passes the lag each forecast builds on an earlier forecast.

/// Mean of the finite lagged growth rates `v[i] / v[i - lag] - 1`.
///
/// Pairs with a missing side are skipped, as are infinite and NaN rates from
/// zero bases. Returns exactly `0.0` when no finite rate exists.
pub fn average_growth(values: &[Option<f64>], lag: usize) -> f64 {
    let rates: Vec<f64> = (lag..values.len())
        .filter_map(|i| match (values[i], values[i - lag]) {
            (Some(cur), Some(base)) => Some(cur / base - 1.0),
            _ => None,
        })
        .filter(|r| r.is_finite())
        .collect();

    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().sum::<f64>() / rates.len() as f64
}

/// Project `horizon` values after `values`.
///
/// Forecast `k` is `seq[n + k - lag] * (1 + average_growth)`, where `seq` is
/// the actual values followed by the forecasts produced so far. When the
/// index falls before the start of the series the last known actual value is
/// used as the base.
pub fn project_trailing(values: &[Option<f64>], lag: usize, horizon: usize) -> Vec<Option<f64>> {
    let rate = average_growth(values, lag);
    let fallback = values.iter().rev().find_map(|v| *v);

    let n = values.len();
    let mut seq: Vec<Option<f64>> = values.to_vec();
    seq.reserve(horizon);

    for k in 0..horizon {
        let base = match (n + k).checked_sub(lag) {
            Some(idx) => seq[idx],
            None => fallback,
        };
        seq.push(base.map(|b| b * (1.0 + rate)));
    }

    seq.split_off(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_average_growth() {
        let values = series(&[100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0]);
        let expected = ((140.0 / 100.0 - 1.0)
            + (150.0 / 110.0 - 1.0)
            + (160.0 / 120.0 - 1.0)
            + (170.0 / 130.0 - 1.0))
            / 4.0;

        assert_eq!(average_growth(&values, 4), expected);
    }

    #[test]
    fn test_average_growth_without_history() {
        assert_eq!(average_growth(&series(&[1.0, 2.0, 3.0]), 4), 0.0);
        assert_eq!(average_growth(&[], 4), 0.0);
    }

    #[test]
    fn test_average_growth_skips_non_finite() {
        // 10/0 and 5/0 are infinite; 0/10 - 1 and 30/5 - 1 average to 2.
        let values = series(&[0.0, 0.0, 10.0, 5.0, 0.0, 30.0]);
        assert_eq!(average_growth(&values, 2), 2.0);

        let infinite = series(&[0.0, 0.0, 0.0, 0.0, 5.0]);
        assert_eq!(average_growth(&infinite, 4), 0.0);

        let nan = series(&[0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(average_growth(&nan, 4), 0.0);
    }

    #[test]
    fn test_average_growth_skips_missing() {
        let values = vec![Some(100.0), None, Some(200.0), Some(150.0)];
        // Only 200/100 pairs up at lag 2.
        assert_eq!(average_growth(&values, 2), 1.0);
    }

    #[test]
    fn test_projection_chain() {
        let values = series(&[100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0]);
        let rate = average_growth(&values, 4);

        let projected = project_trailing(&values, 4, 8);
        assert_eq!(projected.len(), 8);

        // First four read the trailing actuals.
        assert_eq!(projected[0], Some(140.0 * (1.0 + rate)));
        assert_eq!(projected[1], Some(150.0 * (1.0 + rate)));
        assert_eq!(projected[2], Some(160.0 * (1.0 + rate)));
        assert_eq!(projected[3], Some(170.0 * (1.0 + rate)));

        // The next four compound on the earlier forecasts.
        assert_eq!(projected[4], Some(projected[0].unwrap() * (1.0 + rate)));
        assert_relative_eq!(
            projected[7].unwrap(),
            170.0 * (1.0 + rate) * (1.0 + rate),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_projection_with_short_history_holds_last_value() {
        let projected = project_trailing(&series(&[10.0, 20.0]), 4, 4);
        // Zero growth; positions -2 and -1 fall back to the last value,
        // positions 0 and 1 read the actuals.
        assert_eq!(projected, vec![Some(20.0), Some(20.0), Some(10.0), Some(20.0)]);
    }

    #[test]
    fn test_missing_base_propagates() {
        let values = vec![None, Some(1.0), Some(1.0), Some(1.0), Some(1.0)];
        let projected = project_trailing(&values, 4, 5);

        assert_eq!(projected[0], Some(1.0));
        assert_eq!(projected[4], Some(1.0));
        assert!(projected.iter().all(Option::is_some));

        let gap = vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0), None];
        let projected = project_trailing(&gap, 4, 4);
        assert_eq!(projected[0], Some(1.0));
        assert_eq!(projected[3], None);
    }
}
