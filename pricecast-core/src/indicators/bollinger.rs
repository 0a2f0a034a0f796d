//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(price, period)
//! - Upper: middle + mult * stddev(price, period)
//! - Lower: middle - mult * stddev(price, period)
//!
//! Uses population stddev (divide by N) over the same trailing window as the
//! SMA value it is paired with. One band per SMA output.

use serde::{Deserialize, Serialize};

use super::sma::sma;
use crate::domain::PricePoint;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger bands over the price column.
///
/// Empty input yields a single all-zero band. A series shorter than `period`
/// yields no bands.
pub fn bollinger_bands(points: &[PricePoint], period: usize, multiplier: f64) -> Vec<BollingerBand> {
    assert!(period >= 1, "Bollinger period must be >= 1");

    if points.is_empty() {
        return vec![BollingerBand::default()];
    }

    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    if prices.len() < period {
        return Vec::new();
    }

    let middles = sma(&prices, period);
    prices
        .windows(period)
        .zip(middles)
        .map(|(window, middle)| {
            let variance = window
                .iter()
                .map(|price| {
                    let diff = price - middle;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let stddev = variance.sqrt();
            BollingerBand {
                upper: middle + multiplier * stddev,
                middle,
                lower: middle - multiplier * stddev,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_points, DEFAULT_EPSILON};

    #[test]
    fn bollinger_empty_is_zero_band() {
        assert_eq!(
            bollinger_bands(&[], 20, 2.0),
            vec![BollingerBand::default()]
        );
    }

    #[test]
    fn bollinger_short_series_has_no_bands() {
        let points = make_points(&[1.0, 2.0, 3.0]);
        assert!(bollinger_bands(&points, 20, 2.0).is_empty());
    }

    #[test]
    fn bollinger_middle_is_sma() {
        let points = make_points(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let bands = bollinger_bands(&points, 3, 2.0);
        assert_eq!(bands.len(), 3);
        assert_approx(bands[0].middle, 11.0, DEFAULT_EPSILON);
        assert_approx(bands[1].middle, 12.0, DEFAULT_EPSILON);
        assert_approx(bands[2].middle, 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_known_width() {
        // Window [10, 11, 12]: population variance = 2/3
        let points = make_points(&[10.0, 11.0, 12.0]);
        let bands = bollinger_bands(&points, 3, 2.0);
        let std = (2.0_f64 / 3.0).sqrt();
        assert_approx(bands[0].upper, 11.0 + 2.0 * std, DEFAULT_EPSILON);
        assert_approx(bands[0].lower, 11.0 - 2.0 * std, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let points = make_points(&[100.0, 100.0, 100.0, 100.0]);
        for band in bollinger_bands(&points, 3, 2.0) {
            assert_approx(band.upper, 100.0, DEFAULT_EPSILON);
            assert_approx(band.lower, 100.0, DEFAULT_EPSILON);
        }
    }
}
