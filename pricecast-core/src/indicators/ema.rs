//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * value[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1)
//! Seed: EMA[0] = value[0] (no SMA warmup).
//! Output length equals input length, so EMAs of different periods over the
//! same series line up index for index.

pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");

    let Some(&seed) = series.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(series.len());
    result.push(seed);

    let mut prev = seed;
    for &value in &series[1..] {
        let next = value * k + prev * (1.0 - k);
        result.push(next);
        prev = next;
    }

    result
}
