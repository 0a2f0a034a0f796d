//! Pivot detection and regression slope over pivots.
//!
//! A point is a peak when it equals the maximum of the `2w + 1` window centered
//! on it, a trough when it equals the minimum. Ties count, so a plateau yields
//! several adjacent pivots. The first and last `w` points are never pivots.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HALF_WINDOW: usize = 2;

/// A local extremum: its price and its index in the source series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub value: f64,
    pub index: usize,
}

pub fn find_peaks(prices: &[f64], half_window: usize) -> Vec<Pivot> {
    scan(prices, half_window, |window, value| {
        window.iter().copied().fold(f64::NEG_INFINITY, f64::max) == value
    })
}

pub fn find_troughs(prices: &[f64], half_window: usize) -> Vec<Pivot> {
    scan(prices, half_window, |window, value| {
        window.iter().copied().fold(f64::INFINITY, f64::min) == value
    })
}

fn scan(prices: &[f64], w: usize, is_pivot: impl Fn(&[f64], f64) -> bool) -> Vec<Pivot> {
    if prices.len() <= 2 * w {
        return Vec::new();
    }
    (w..prices.len() - w)
        .filter(|&i| is_pivot(&prices[i - w..=i + w], prices[i]))
        .map(|i| Pivot {
            value: prices[i],
            index: i,
        })
        .collect()
}

/// Least-squares slope of value against index.
///
/// `NaN` for fewer than two points (zero denominator).
pub fn least_squares_slope(points: &[Pivot]) -> f64 {
    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let x = p.index as f64;
        sum_x += x;
        sum_y += p.value;
        sum_xy += x * p.value;
        sum_x2 += x * x;
    }
    (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x)
}

/// Treat a plain series as pivots at their own index (re-indexed from 0).
pub fn as_pivots(prices: &[f64]) -> Vec<Pivot> {
    prices
        .iter()
        .enumerate()
        .map(|(index, &value)| Pivot { value, index })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_peak_and_troughs() {
        let prices = [1.0, 2.0, 5.0, 2.0, 1.0, 0.5, 1.0];
        let peaks = find_peaks(&prices, 2);
        assert_eq!(peaks, vec![Pivot { value: 5.0, index: 2 }]);

        let troughs = find_troughs(&prices, 2);
        assert_eq!(troughs.len(), 0, "index 5 is within the skipped tail");
    }

    #[test]
    fn plateau_yields_multiple_pivots() {
        let prices = [1.0, 3.0, 3.0, 3.0, 1.0, 0.0];
        let peaks = find_peaks(&prices, 1);
        let indices: Vec<usize> = peaks.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn too_short_for_window() {
        assert!(find_peaks(&[1.0, 2.0, 1.0], 2).is_empty());
        assert!(find_troughs(&[], 2).is_empty());
    }

    #[test]
    fn slope_of_line() {
        let points = as_pivots(&[1.0, 3.0, 5.0, 7.0]);
        assert!((least_squares_slope(&points) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn slope_of_single_point_is_nan() {
        assert!(least_squares_slope(&as_pivots(&[4.0])).is_nan());
    }
}
