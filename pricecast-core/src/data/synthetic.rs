//! Synthetic history for when no real series is available.
//!
//! Produces a regime-switching random walk: the drift alternates between the
//! summary's bullish and bearish trend every `cycle_length` days, with daily
//! noise scaled by the summary's volatility and the same level snapping the
//! forecast uses. Points are daily and end at `now_ms`. These are clearly
//! fake and should be tagged `DataSource::Synthetic` by callers.

use tracing::debug;

use crate::domain::{PricePoint, DAY_MS};
use crate::simulation::{snap_to_levels, RandomSource, SimulationContext, SimulationParams};
use crate::summary::HistoricalPatternSummary;

/// Default starting price when nothing better is known.
pub const DEFAULT_START_PRICE: f64 = 45_000.0;

/// `days + 1` daily points ending at `now_ms`.
///
/// The regime flips whenever the number of days remaining is a multiple of
/// the cycle length (including the very first point), starting bullish.
pub fn synthetic_history(
    days: usize,
    start_price: f64,
    summary: &HistoricalPatternSummary,
    now_ms: i64,
    rng: &mut dyn RandomSource,
) -> Vec<PricePoint> {
    let params = SimulationParams::default();
    let levels = SimulationContext {
        support_levels: summary.support_levels.clone(),
        resistance_levels: summary.resistance_levels.clone(),
        params,
        ..Default::default()
    };
    let cycle = summary.cycle_length.max(1) as usize;

    let mut points = Vec::with_capacity(days + 1);
    let mut price = start_price;
    let mut trend = summary.bullish_trend;
    let mut last_regime = 0.0_f64;

    for (step, remaining) in (0..=days).rev().enumerate() {
        rng.begin_day(step);

        if remaining % cycle == 0 {
            trend = if last_regime > 0.0 {
                summary.bearish_trend
            } else {
                summary.bullish_trend
            };
            last_regime = trend;
        }

        let noise = (rng.next_unit() - 0.5) * summary.daily_volatility;
        let drift = trend * (1.0 + rng.next_unit() * 0.5);
        let moved = price * (1.0 + noise + drift);

        price = snap_to_levels(&levels, moved, rng).max(params.price_floor);
        points.push(PricePoint::new(now_ms - remaining as i64 * DAY_MS, price, 0.0));
    }

    debug!(days, start_price, cycle, "generated synthetic history");
    points
}
