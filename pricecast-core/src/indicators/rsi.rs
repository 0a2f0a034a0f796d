//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Seed: mean of the first `period` gains/losses (always divided by `period`).
//! Smoothing: avg = (avg * (period - 1) + new) / period.
//!
//! `avg_loss == 0` is not special-cased: pure gains give RSI 100 through an
//! infinite ratio, and a flat series gives `NaN` from 0/0. Both propagate.

/// RSI reported for an empty series.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Default look-back used by the analysis pipeline.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Compute RSI over `series`.
///
/// Output length is `max(1, changes - period + 1)` where `changes = len - 1`.
/// Empty input yields `[NEUTRAL_RSI]`.
pub fn rsi(series: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");

    if series.is_empty() {
        return vec![NEUTRAL_RSI];
    }

    let changes: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = changes.iter().map(|&c| if c > 0.0 { c } else { 0.0 }).collect();
    let losses: Vec<f64> = changes.iter().map(|&c| if c < 0.0 { -c } else { 0.0 }).collect();

    let p = period as f64;
    let seed_len = period.min(changes.len());
    let mut avg_gain = gains[..seed_len].iter().sum::<f64>() / p;
    let mut avg_loss = losses[..seed_len].iter().sum::<f64>() / p;

    let mut result = Vec::with_capacity(changes.len().saturating_sub(period) + 1);
    result.push(rsi_value(avg_gain, avg_loss));

    for i in period..changes.len() {
        avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;
        result.push(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
