//! Ordinary least-squares linear fit with degenerate-input fallback

/// Result of a linear fit: `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub const ZERO: Self = Self { slope: 0.0, intercept: 0.0 };
}

/// Fit a line through `(x, y)` samples with the closed-form OLS formulas.
///
/// slope = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
/// intercept = (Σy − slope·Σx) / n
///
/// A degenerate fit (empty input, zero variance in x, or any non-finite
/// intermediate) resolves to slope 0 / intercept 0 rather than propagating
/// NaN into the forecasts.
pub fn linear_fit(samples: &[(f64, f64)]) -> LinearFit {
    let n = samples.len() as f64;
    if samples.is_empty() {
        return LinearFit::ZERO;
    }

    let sum_x: f64 = samples.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = samples.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = samples.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = samples.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    if slope.is_finite() && intercept.is_finite() {
        LinearFit { slope, intercept }
    } else {
        LinearFit::ZERO
    }
}
