//! Historical pattern summary — the bias profile the simulation leans on.
//!
//! Trend scores are built from three votes over the latest indicator values:
//! MACD histogram sign, RSI against 50, and price against the Bollinger
//! middle. Bullish scores are scaled by 0.05 and bearish ones by -0.02; the
//! asymmetry is part of the model.

use serde::{Deserialize, Serialize};

use crate::domain::{Level, PricePoint};
use crate::indicators::IndicatorSet;
use crate::levels::split_by_kind;
use crate::volatility::VolatilityReport;

pub const DEFAULT_CYCLE_LENGTH: u32 = 365;

const VOTE_WINDOW: usize = 5;
const BULLISH_SCALE: f64 = 0.05;
const BEARISH_SCALE: f64 = -0.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryConfig {
    /// Market cycle length in days. Policy, not measured from data.
    pub cycle_length: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPatternSummary {
    pub daily_volatility: f64,
    pub bullish_trend: f64,
    pub bearish_trend: f64,
    pub cycle_length: u32,
    pub support_levels: Vec<Level>,
    pub resistance_levels: Vec<Level>,
}

impl Default for HistoricalPatternSummary {
    /// Priors used before any history has been analyzed.
    fn default() -> Self {
        Self {
            daily_volatility: 0.03,
            bullish_trend: 0.015,
            bearish_trend: -0.01,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            support_levels: Vec::new(),
            resistance_levels: Vec::new(),
        }
    }
}

/// Share of the last five values satisfying `pred`, always over five.
fn vote(values: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    let tail = &values[values.len().saturating_sub(VOTE_WINDOW)..];
    tail.iter().filter(|&&v| pred(v)).count() as f64 / VOTE_WINDOW as f64
}

fn band_vote(indicators: &IndicatorSet, current_price: Option<f64>, pred: impl Fn(f64, f64) -> bool) -> f64 {
    match (current_price, indicators.last_band()) {
        (Some(price), Some(band)) if pred(price, band.middle) => 1.0,
        _ => 0.0,
    }
}

pub fn bullish_trend(indicators: &IndicatorSet, current_price: Option<f64>) -> f64 {
    let macd = vote(&indicators.macd.histogram, |h| h > 0.0);
    let rsi = vote(&indicators.rsi, |r| r > 50.0);
    let above = band_vote(indicators, current_price, |p, m| p > m);
    (macd + rsi + above) / 3.0 * BULLISH_SCALE
}

pub fn bearish_trend(indicators: &IndicatorSet, current_price: Option<f64>) -> f64 {
    let macd = vote(&indicators.macd.histogram, |h| h < 0.0);
    let rsi = vote(&indicators.rsi, |r| r < 50.0);
    let below = band_vote(indicators, current_price, |p, m| p < m);
    (macd + rsi + below) / 3.0 * BEARISH_SCALE
}

/// Build the summary in one pass from already-computed components.
///
/// The current price is the last point's price.
pub fn summarize(
    points: &[PricePoint],
    indicators: &IndicatorSet,
    volatility: &VolatilityReport,
    levels: &[Level],
    config: &SummaryConfig,
) -> HistoricalPatternSummary {
    let current_price = points.last().map(|p| p.price);
    let (support_levels, resistance_levels) = split_by_kind(levels);

    HistoricalPatternSummary {
        daily_volatility: volatility.current,
        bullish_trend: bullish_trend(indicators, current_price),
        bearish_trend: bearish_trend(indicators, current_price),
        cycle_length: config.cycle_length,
        support_levels,
        resistance_levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LevelKind;
    use crate::indicators::{assert_approx, compute_indicators, make_points, BollingerBand, MacdSeries};
    use crate::volatility::{analyze_volatility, VolatilityTrend};

    fn set(histogram: Vec<f64>, rsi: Vec<f64>, middle: Option<f64>) -> IndicatorSet {
        IndicatorSet {
            macd: MacdSeries {
                macd: histogram.clone(),
                signal: vec![0.0; histogram.len()],
                histogram,
            },
            rsi,
            bollinger: middle
                .map(|m| {
                    vec![BollingerBand {
                        upper: m + 1.0,
                        middle: m,
                        lower: m - 1.0,
                    }]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn fully_bullish() {
        let s = set(vec![1.0; 5], vec![60.0; 5], Some(90.0));
        assert_approx(bullish_trend(&s, Some(100.0)), 0.05, 1e-12);
        assert_approx(bearish_trend(&s, Some(100.0)), 0.0, 1e-12);
    }

    #[test]
    fn fully_bearish() {
        let s = set(vec![-1.0; 8], vec![40.0; 8], Some(110.0));
        assert_approx(bullish_trend(&s, Some(100.0)), 0.0, 1e-12);
        assert_approx(bearish_trend(&s, Some(100.0)), -0.02, 1e-12);
    }

    #[test]
    fn votes_divide_by_five_even_when_short() {
        // Two positive histogram values out of a possible five
        let s = set(vec![1.0, 1.0], vec![], None);
        assert_approx(bullish_trend(&s, Some(100.0)), (0.4 / 3.0) * 0.05, 1e-12);
    }

    #[test]
    fn missing_band_contributes_nothing() {
        let s = set(vec![], vec![], None);
        assert_eq!(bullish_trend(&s, Some(100.0)), 0.0);
        assert_eq!(bearish_trend(&s, None), 0.0);
    }

    #[test]
    fn nan_rsi_votes_neither_way() {
        let s = set(vec![], vec![f64::NAN; 5], None);
        assert_eq!(bullish_trend(&s, None), 0.0);
        assert_eq!(bearish_trend(&s, None), 0.0);
    }

    #[test]
    fn summarize_splits_levels_and_copies_volatility() {
        let points = make_points(&[100.0, 101.0, 102.0]);
        let indicators = compute_indicators(&points);
        let volatility = VolatilityReport {
            current: 0.42,
            historical: vec![],
            trend: VolatilityTrend::stable(),
        };
        let levels = [
            Level::new(90.0, LevelKind::Support),
            Level::new(110.0, LevelKind::Resistance),
        ];
        let summary = summarize(&points, &indicators, &volatility, &levels, &SummaryConfig::default());
        assert_eq!(summary.daily_volatility, 0.42);
        assert_eq!(summary.cycle_length, 365);
        assert_eq!(summary.support_levels.len(), 1);
        assert_eq!(summary.resistance_levels.len(), 1);
        assert!(summary.bearish_trend <= 0.0);
    }

    #[test]
    fn summarize_uptrend_is_bullish() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let points = make_points(&closes);
        let indicators = compute_indicators(&points);
        let volatility = analyze_volatility(&points, 20);
        let summary = summarize(&points, &indicators, &volatility, &[], &SummaryConfig::default());
        assert!(summary.bullish_trend > 0.04);
        assert_eq!(summary.bearish_trend, 0.0);
    }
}
