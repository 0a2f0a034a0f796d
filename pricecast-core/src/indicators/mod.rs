//! Indicator engine.
//!
//! Stateless free functions over a price series. Unlike a bar-aligned
//! indicator, the outputs here are *not* padded with warmup `NaN`s: each
//! function documents how its output is positioned against the tail of the
//! input.
//!
//! | Indicator | Output length               |
//! |-----------|-----------------------------|
//! | SMA       | len - period + 1            |
//! | EMA/MACD  | len                         |
//! | RSI       | max(1, len - period)        |
//! | Bollinger | len - period + 1 (or 1/0)   |

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger_bands, BollingerBand};
pub use ema::ema;
pub use macd::{macd, macd_of_series, MacdSeries};
pub use rsi::{rsi, NEUTRAL_RSI};
pub use sma::sma;

use serde::{Deserialize, Serialize};

use crate::domain::PricePoint;

/// MACD, RSI and Bollinger bands computed together over one series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub macd: MacdSeries,
    pub rsi: Vec<f64>,
    pub bollinger: Vec<BollingerBand>,
}

impl IndicatorSet {
    pub fn last_rsi(&self) -> Option<f64> {
        self.rsi.last().copied()
    }

    pub fn last_band(&self) -> Option<&BollingerBand> {
        self.bollinger.last()
    }
}

/// Compute the full indicator set with the default periods
/// (MACD 12/26/9, RSI 14, Bollinger 20 x 2).
pub fn compute_indicators(points: &[PricePoint]) -> IndicatorSet {
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    IndicatorSet {
        macd: macd_of_series(&prices),
        rsi: rsi(&prices, rsi::DEFAULT_RSI_PERIOD),
        bollinger: bollinger_bands(points, bollinger::DEFAULT_PERIOD, bollinger::DEFAULT_MULTIPLIER),
    }
}

/// Create daily points from prices for testing. Volume is 1000.
#[cfg(test)]
pub fn make_points(prices: &[f64]) -> Vec<PricePoint> {
    const BASE_MS: i64 = 1_704_153_600_000; // 2024-01-02
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint::new(BASE_MS + i as i64 * crate::domain::DAY_MS, price, 1000.0))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
