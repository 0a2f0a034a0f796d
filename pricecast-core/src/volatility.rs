//! Realized and rolling volatility, and the direction volatility is moving in.
//!
//! Volatility = sqrt(mean(r^2)) * sqrt(252), r = simple returns.
//! The 252 trading-day factor is applied regardless of the sampling interval
//! of the input series.

use serde::{Deserialize, Serialize};

use crate::domain::PricePoint;
use crate::math::{pct_returns, root_mean_square};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_WINDOW: usize = 20;

/// Number of trailing values compared against the block before them.
const TREND_BLOCK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityTrend {
    pub direction: TrendDirection,
    pub magnitude: f64,
}

impl VolatilityTrend {
    pub fn stable() -> Self {
        Self {
            direction: TrendDirection::Stable,
            magnitude: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReport {
    /// Annualized volatility of the full series.
    pub current: f64,
    /// Rolling annualized volatility, one value per full window of returns.
    pub historical: Vec<f64>,
    pub trend: VolatilityTrend,
}

fn annualized(returns: &[f64]) -> f64 {
    root_mean_square(returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Analyze volatility over the price column with a rolling `window`.
///
/// A series with fewer than two points has no returns; `current` is reported
/// as 0 in that case rather than `NaN`.
pub fn analyze_volatility(points: &[PricePoint], window: usize) -> VolatilityReport {
    assert!(window >= 1, "volatility window must be >= 1");

    if points.is_empty() {
        return VolatilityReport {
            current: 0.0,
            historical: Vec::new(),
            trend: VolatilityTrend::stable(),
        };
    }

    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    let returns = pct_returns(&prices);

    let current = if returns.is_empty() {
        0.0
    } else {
        annualized(&returns)
    };

    let historical: Vec<f64> = (window..returns.len())
        .map(|i| annualized(&returns[i - window..i]))
        .collect();

    let trend = volatility_trend(&historical);

    VolatilityReport {
        current,
        historical,
        trend,
    }
}

/// Compare the mean of the last five values against the five before them.
///
/// The older block is averaged over `min(max(0, len - 5), 5)`; with five or
/// fewer values that divisor is zero, the older mean is undefined and the
/// direction falls through to `Decreasing` with zero magnitude.
pub fn volatility_trend(values: &[f64]) -> VolatilityTrend {
    if values.is_empty() {
        return VolatilityTrend::stable();
    }

    let n = values.len();
    let recent_start = n.saturating_sub(TREND_BLOCK);
    let recent = values[recent_start..].iter().sum::<f64>() / n.min(TREND_BLOCK) as f64;

    let old_start = n.saturating_sub(2 * TREND_BLOCK);
    let old_sum: f64 = values[old_start..recent_start].iter().sum();
    let old = old_sum / n.saturating_sub(TREND_BLOCK).min(TREND_BLOCK) as f64;

    let direction = if recent > old {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let magnitude = if old == 0.0 || old.is_nan() {
        0.0
    } else {
        (recent - old).abs() / old
    };

    VolatilityTrend {
        direction,
        magnitude,
    }
}
