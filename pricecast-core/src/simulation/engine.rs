//! Day-by-day price stepping.
//!
//! Each simulated day sums six return components, clamps the total, applies
//! it, then gives the nearest support/resistance level a chance to pull the
//! price in before flooring it.
//!
//! Order of random draws within a day (fixed, so seeded runs reproduce):
//! 1. one draw for the random component
//! 2. one draw to decide a support snap, plus one for its offset if it fires
//!    (only when a support below the price exists)
//! 3. same for resistance (only when reached and a resistance above exists)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ForecastPoint, Level, PricePoint, DAY_MS};
use crate::indicators::IndicatorSet;
use crate::math::relative_change;
use crate::summary::HistoricalPatternSummary;

use super::rng::RandomSource;

/// Points of history used for the momentum input.
const MOMENTUM_LOOKBACK: usize = 5;

/// Tunable constants of the step model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub random_scale: f64,
    pub momentum_decay: f64,
    pub momentum_scale: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub rsi_nudge: f64,
    pub macd_scale: f64,
    pub macd_cap: f64,
    pub reversion_scale: f64,
    pub growth_bias: f64,
    pub max_daily_gain: f64,
    pub max_daily_loss: f64,
    /// A snap fires when its draw is strictly above this.
    pub snap_threshold: f64,
    pub snap_band: f64,
    pub price_floor: f64,
    pub fallback_volatility: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            random_scale: 0.5,
            momentum_decay: 0.05,
            momentum_scale: 0.3,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_nudge: 0.01,
            macd_scale: 0.05,
            macd_cap: 0.01,
            reversion_scale: 0.1,
            growth_bias: 0.0005,
            max_daily_gain: 0.15,
            max_daily_loss: -0.12,
            snap_threshold: 0.7,
            snap_band: 0.02,
            price_floor: 1000.0,
            fallback_volatility: 0.02,
        }
    }
}

/// Bias inputs for one simulation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationContext {
    pub momentum: f64,
    /// Raw daily volatility; see `effective_volatility`.
    pub volatility: f64,
    pub last_rsi: Option<f64>,
    pub last_histogram: Option<f64>,
    pub bollinger_middle: Option<f64>,
    /// Strength order.
    pub support_levels: Vec<Level>,
    /// Strength order.
    pub resistance_levels: Vec<Level>,
    pub params: SimulationParams,
}

impl SimulationContext {
    pub fn from_analysis(
        history: &[PricePoint],
        indicators: &IndicatorSet,
        summary: &HistoricalPatternSummary,
    ) -> Self {
        let tail = &history[history.len().saturating_sub(MOMENTUM_LOOKBACK)..];
        let recent: Vec<f64> = tail.iter().map(|p| p.price).collect();

        Self {
            momentum: relative_change(&recent),
            volatility: summary.daily_volatility,
            last_rsi: indicators.last_rsi(),
            last_histogram: indicators.macd.last_histogram(),
            bollinger_middle: indicators.last_band().map(|b| b.middle),
            support_levels: summary.support_levels.clone(),
            resistance_levels: summary.resistance_levels.clone(),
            params: SimulationParams::default(),
        }
    }

    pub fn with_params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    /// Zero or non-finite volatility falls back to the configured default.
    pub fn effective_volatility(&self) -> f64 {
        if self.volatility == 0.0 || !self.volatility.is_finite() {
            self.params.fallback_volatility
        } else {
            self.volatility
        }
    }
}

/// The six additive parts of one day's return, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyReturn {
    pub random: f64,
    pub momentum: f64,
    pub rsi: f64,
    pub macd: f64,
    pub reversion: f64,
    pub growth: f64,
}

impl DailyReturn {
    pub fn total(&self) -> f64 {
        self.random + self.momentum + self.rsi + self.macd + self.reversion + self.growth
    }
}

/// Compute the return components for `day`. Takes exactly one draw.
pub fn return_components(
    ctx: &SimulationContext,
    price: f64,
    day: usize,
    rng: &mut dyn RandomSource,
) -> DailyReturn {
    let p = &ctx.params;

    let random = (rng.next_unit() * 2.0 - 1.0) * ctx.effective_volatility() * p.random_scale;
    let momentum = ctx.momentum * (-(day as f64) * p.momentum_decay).exp() * p.momentum_scale;

    let rsi = match ctx.last_rsi {
        Some(r) if r < p.rsi_oversold => p.rsi_nudge,
        Some(r) if r > p.rsi_overbought => -p.rsi_nudge,
        _ => 0.0,
    };

    let macd = ctx
        .last_histogram
        .map(|h| (h * p.macd_scale).clamp(-p.macd_cap, p.macd_cap))
        .unwrap_or(0.0);

    let reversion = ctx
        .bollinger_middle
        .map(|middle| (middle - price) / price * p.reversion_scale)
        .unwrap_or(0.0);

    DailyReturn {
        random,
        momentum,
        rsi,
        macd,
        reversion,
        growth: p.growth_bias,
    }
}

/// Pull `price` toward the strongest level on either side, with probability
/// `1 - snap_threshold` each. Support is tried first.
pub fn snap_to_levels(ctx: &SimulationContext, price: f64, rng: &mut dyn RandomSource) -> f64 {
    let p = &ctx.params;

    if let Some(support) = ctx.support_levels.iter().find(|l| l.price < price) {
        if rng.next_unit() > p.snap_threshold {
            return support.price * (1.0 + rng.next_unit() * p.snap_band);
        }
    }

    if let Some(resistance) = ctx.resistance_levels.iter().find(|l| l.price > price) {
        if rng.next_unit() > p.snap_threshold {
            return resistance.price * (1.0 - rng.next_unit() * p.snap_band);
        }
    }

    price
}

/// Advance one day. The caller is responsible for `begin_day`.
pub fn predict_step(ctx: &SimulationContext, price: f64, day: usize, rng: &mut dyn RandomSource) -> f64 {
    let p = &ctx.params;
    let change = return_components(ctx, price, day, rng)
        .total()
        .clamp(p.max_daily_loss, p.max_daily_gain);

    let next = snap_to_levels(ctx, price * (1.0 + change), rng);
    next.max(p.price_floor)
}

/// Run `days` steps from `seed_price`.
///
/// Returns `days + 1` prices; index 0 is `seed_price` untouched.
pub fn simulate(ctx: &SimulationContext, seed_price: f64, days: usize, rng: &mut dyn RandomSource) -> Vec<f64> {
    let mut prices = Vec::with_capacity(days + 1);
    prices.push(seed_price);

    let mut price = seed_price;
    for day in 0..days {
        rng.begin_day(day);
        price = predict_step(ctx, price, day, rng);
        prices.push(price);
    }

    debug!(
        days,
        seed_price,
        final_price = price,
        "simulation complete"
    );
    prices
}

/// Lay simulated prices on a daily grid starting at `anchor_ms`.
///
/// Every point is a projection, including the seed at index 0.
pub fn forecast_points(prices: &[f64], anchor_ms: i64) -> Vec<ForecastPoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| ForecastPoint {
            timestamp: anchor_ms + i as i64 * DAY_MS,
            price,
            is_historical: false,
        })
        .collect()
}
