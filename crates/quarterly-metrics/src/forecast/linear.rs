//! Linear trend extrapolation.
//!
//! Fits a least-squares line over the known values of a series, indexed by
//! position, and evaluates it past the end of the series.

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Slope per period
    pub slope: f64,
    /// Value at index zero
    pub intercept: f64,
}

impl LineFit {
    /// Evaluate the line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares line through `(x, y)` points.
///
/// Returns `None` for fewer than two points or when every x is the same.
pub fn fit_line(points: &[(f64, f64)]) -> Option<LineFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(LineFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Project `horizon` values after `values`.
///
/// Missing values are left out of the fit but keep their index. With a single
/// known value the projection holds it flat; with none every projection is
/// `None`.
pub fn project_linear(values: &[Option<f64>], horizon: usize) -> Vec<Option<f64>> {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
        .collect();

    let n = values.len();
    match fit_line(&points) {
        Some(line) => (n..n + horizon)
            .map(|i| Some(line.at(i as f64)))
            .collect(),
        None => {
            let last = points.last().map(|(_, y)| *y);
            if last.is_some() {
                tracing::debug!(known = points.len(), "too few points for a trend, holding flat");
            }
            vec![last; horizon]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_exact_line() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let line = fit_line(&points).unwrap();
        assert_relative_eq!(line.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 1.0, epsilon = 1e-12);
        assert_relative_eq!(line.at(10.0), 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_noisy_line() {
        // y = x with symmetric noise
        let points = [(0.0, 1.0), (1.0, 0.0), (2.0, 3.0), (3.0, 2.0)];
        let line = fit_line(&points).unwrap();
        assert_relative_eq!(line.slope, 0.6, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_degenerate() {
        assert!(fit_line(&[]).is_none());
        assert!(fit_line(&[(1.0, 1.0)]).is_none());
        assert!(fit_line(&[(1.0, 1.0), (1.0, 2.0)]).is_none());
    }

    #[test]
    fn test_project_linear() {
        let values = [Some(100.0), Some(110.0), Some(120.0), Some(130.0)];
        let projected = project_linear(&values, 8);

        assert_eq!(projected.len(), 8);
        assert_relative_eq!(projected[0].unwrap(), 140.0, epsilon = 1e-9);
        assert_relative_eq!(projected[7].unwrap(), 210.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_linear_skips_missing_values() {
        let values = [Some(0.0), None, Some(20.0), Some(30.0)];
        let projected = project_linear(&values, 2);

        assert_relative_eq!(projected[0].unwrap(), 40.0, epsilon = 1e-9);
        assert_relative_eq!(projected[1].unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_linear_fallbacks() {
        assert_eq!(project_linear(&[None, Some(7.0), None], 3), vec![Some(7.0); 3]);
        assert_eq!(project_linear(&[None, None], 2), vec![None, None]);
        assert_eq!(project_linear(&[], 2), vec![None, None]);
    }
}
