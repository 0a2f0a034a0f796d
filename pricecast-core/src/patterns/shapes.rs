//! Chart-shape predicates over a raw price series.
//!
//! Each predicate is gated on a minimum series length and returns `false`
//! below it.

use super::pivots::{
    as_pivots, find_peaks, find_troughs, least_squares_slope, Pivot, DEFAULT_HALF_WINDOW,
};
use crate::math::{max, min, pct_returns, relative_change, root_mean_square, sign};

/// Half-window used for the reversal patterns (H&S, double top/bottom).
pub const REVERSAL_HALF_WINDOW: usize = 5;

const SHOULDER_TOLERANCE: f64 = 0.1;
const DOUBLE_TOLERANCE: f64 = 0.02;
const DOUBLE_MIN_GAP: usize = 5;
const DOUBLE_MAX_GAP: usize = 30;
const FLAG_POLE_LEN: usize = 5;
const FLAG_POLE_TREND: f64 = 0.02;
const FLAG_CONSOLIDATION: f64 = 0.01;
const SLOPE_THRESHOLD: f64 = 0.1;

/// RMS of simple returns; 0 below two points.
fn rms_volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    root_mean_square(&pct_returns(prices))
}

fn shoulders_match(triple: &[Pivot], head_beats: impl Fn(f64, f64) -> bool) -> bool {
    let (left, head, right) = (triple[0], triple[1], triple[2]);
    head_beats(head.value, left.value)
        && head_beats(head.value, right.value)
        && (left.value - right.value).abs() / left.value < SHOULDER_TOLERANCE
}

pub fn is_head_and_shoulders(prices: &[f64]) -> bool {
    if prices.len() < 20 {
        return false;
    }
    let peaks = find_peaks(prices, REVERSAL_HALF_WINDOW);
    peaks.len() >= 3 && peaks.windows(3).any(|t| shoulders_match(t, |h, s| h > s))
}

pub fn is_inverse_head_and_shoulders(prices: &[f64]) -> bool {
    if prices.len() < 20 {
        return false;
    }
    let troughs = find_troughs(prices, REVERSAL_HALF_WINDOW);
    troughs.len() >= 3 && troughs.windows(3).any(|t| shoulders_match(t, |h, s| h < s))
}

fn has_double(pivots: &[Pivot]) -> bool {
    pivots.windows(2).any(|pair| {
        let (a, b) = (pair[0], pair[1]);
        let gap = b.index - a.index;
        (a.value - b.value).abs() / a.value < DOUBLE_TOLERANCE
            && (DOUBLE_MIN_GAP..=DOUBLE_MAX_GAP).contains(&gap)
    })
}

pub fn is_double_top(prices: &[f64]) -> bool {
    prices.len() >= 15 && has_double(&find_peaks(prices, REVERSAL_HALF_WINDOW))
}

pub fn is_double_bottom(prices: &[f64]) -> bool {
    prices.len() >= 15 && has_double(&find_troughs(prices, REVERSAL_HALF_WINDOW))
}

fn flag_parts(prices: &[f64]) -> Option<(f64, &[f64], &[f64])> {
    if prices.len() < 10 {
        return None;
    }
    let (pole, flag) = prices.split_at(FLAG_POLE_LEN);
    let consolidating = relative_change(flag).abs() < FLAG_CONSOLIDATION
        && rms_volatility(flag) < rms_volatility(pole);
    consolidating.then(|| (relative_change(pole), pole, flag))
}

/// Sharp rise over the first five points, then a quieter sideways drift.
pub fn is_bullish_flag(prices: &[f64]) -> bool {
    matches!(flag_parts(prices), Some((pole_trend, _, _)) if pole_trend > FLAG_POLE_TREND)
}

/// Sharp fall over the first five points, then a quieter sideways drift.
pub fn is_bearish_flag(prices: &[f64]) -> bool {
    matches!(flag_parts(prices), Some((pole_trend, _, _)) if pole_trend < -FLAG_POLE_TREND)
}

fn boundary_slopes(prices: &[f64]) -> Option<(f64, f64)> {
    let highs = find_peaks(prices, DEFAULT_HALF_WINDOW);
    let lows = find_troughs(prices, DEFAULT_HALF_WINDOW);
    if highs.len() < 3 || lows.len() < 3 {
        return None;
    }
    Some((least_squares_slope(&highs), least_squares_slope(&lows)))
}

/// Flat boundaries leaning in opposite directions.
pub fn is_triangle(prices: &[f64]) -> bool {
    boundary_slopes(prices).is_some_and(|(hi, lo)| {
        hi.abs() < SLOPE_THRESHOLD && lo.abs() < SLOPE_THRESHOLD && sign(hi) != sign(lo)
    })
}

/// Steep boundaries sloping the same way.
pub fn is_wedge(prices: &[f64]) -> bool {
    boundary_slopes(prices).is_some_and(|(hi, lo)| {
        hi.abs() > SLOPE_THRESHOLD && lo.abs() > SLOPE_THRESHOLD && sign(hi) == sign(lo)
    })
}

/// Flat boundaries sloping the same way.
pub fn is_channel(prices: &[f64]) -> bool {
    boundary_slopes(prices).is_some_and(|(hi, lo)| {
        hi.abs() < SLOPE_THRESHOLD && lo.abs() < SLOPE_THRESHOLD && sign(hi) == sign(lo)
    })
}

pub fn is_cup_and_handle(prices: &[f64]) -> bool {
    if prices.len() < 20 {
        return false;
    }
    let high = max(prices);
    let cup_depth = (high - min(prices)) / high;
    if !(0.1..=0.5).contains(&cup_depth) {
        return false;
    }

    let handle = &prices[prices.len() - prices.len() / 3..];
    let handle_high = max(handle);
    (handle_high - min(handle)) / handle_high < 0.1
}

pub fn is_rounding_bottom(prices: &[f64]) -> bool {
    if prices.len() < 20 {
        return false;
    }
    let (left, right) = prices.split_at(prices.len() / 2);
    least_squares_slope(&as_pivots(left)) < 0.0 && least_squares_slope(&as_pivots(right)) > 0.0
}
