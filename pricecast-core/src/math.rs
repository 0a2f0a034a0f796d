//! Small numeric helpers shared by the analysis modules.
//!
//! None of these guard against degenerate input: an empty slice gives `NaN`
//! from `mean`, a zero-variance pair gives `NaN` from `pearson_correlation`.
//! Callers decide what a degenerate value means for them.

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N).
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Simple returns `(p[i] - p[i-1]) / p[i-1]`. One shorter than the input.
pub fn pct_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Root mean square of the values. `NaN` for an empty slice.
pub fn root_mean_square(values: &[f64]) -> f64 {
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Relative change from first to last element; 0 below two elements.
pub fn relative_change(prices: &[f64]) -> f64 {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) if prices.len() >= 2 => (last - first) / first,
        _ => 0.0,
    }
}

/// Three-valued sign: -1, 0 or +1. `NaN` stays `NaN`.
///
/// Unlike `f64::signum`, zero maps to zero, so "opposite sign" comparisons
/// treat a flat slope as its own class.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        f64::NAN
    }
}

/// Maximum of the slice; `-inf` when empty.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Minimum of the slice; `+inf` when empty.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Pearson correlation over the common prefix of `x` and `y`.
///
/// Population moments. Zero variance in either input yields `NaN`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let n = n as f64;
    (cov / n) / ((var_x / n) * (var_y / n)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), 5.0);
        assert_eq!(population_std(&v), 2.0);
    }

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn returns_are_one_shorter() {
        let r = pct_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-12);
        assert!((r[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn relative_change_needs_two_points() {
        assert_eq!(relative_change(&[5.0]), 0.0);
        assert_eq!(relative_change(&[]), 0.0);
        assert!((relative_change(&[100.0, 90.0, 120.0]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.5), -1.0);
        assert!(sign(f64::NAN).is_nan());
    }

    #[test]
    fn correlation_perfect_and_degenerate() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&x, &y) - 1.0).abs() < 1e-12);

        let flat = [1.0, 1.0, 1.0, 1.0];
        assert!(pearson_correlation(&x, &flat).is_nan());
    }
}
