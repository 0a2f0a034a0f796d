//! Moving Average Convergence Divergence (MACD).
//!
//! MACD = EMA(12) - EMA(26), signal = EMA(MACD, 9), histogram = MACD - signal.
//! Both EMAs are full length (seeded at the first price), so all three output
//! series have the same length as the input.

use serde::{Deserialize, Serialize};

use super::ema::ema;
use crate::domain::PricePoint;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn last_histogram(&self) -> Option<f64> {
        self.histogram.last().copied()
    }
}

/// MACD over the price column of `points`. Empty input gives empty series.
pub fn macd(points: &[PricePoint]) -> MacdSeries {
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    macd_of_series(&prices)
}

/// MACD over a pre-extracted price slice.
pub fn macd_of_series(prices: &[f64]) -> MacdSeries {
    if prices.is_empty() {
        return MacdSeries::default();
    }

    let fast = ema(prices, FAST_PERIOD);
    let slow = ema(prices, SLOW_PERIOD);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema(&macd, SIGNAL_PERIOD);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
