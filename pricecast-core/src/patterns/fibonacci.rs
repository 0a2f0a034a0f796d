//! Fibonacci retracement levels between a high and a low.

use serde::{Deserialize, Serialize};

pub const FIBONACCI_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub level: f64,
    pub price: f64,
}

/// `price = high - (high - low) * ratio` for each standard ratio.
pub fn fibonacci_levels(high: f64, low: f64) -> Vec<FibonacciLevel> {
    FIBONACCI_RATIOS
        .iter()
        .map(|&level| FibonacciLevel {
            level,
            price: high - (high - low) * level,
        })
        .collect()
}
