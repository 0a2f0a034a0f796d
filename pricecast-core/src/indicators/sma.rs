//! Simple Moving Average (SMA).
//!
//! Sliding arithmetic mean over a window of `period` values.
//! Output length: len - period + 1; output[0] aligns with input[period - 1].

/// Compute the SMA of `series`.
///
/// # Panics
/// When `period` is zero or longer than the series. Callers gate on length
/// first; there is no meaningful partial result.
pub fn sma(series: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "SMA period must be >= 1");
    assert!(
        period <= series.len(),
        "SMA period {period} exceeds series length {}",
        series.len()
    );

    series
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period as f64)
        .collect()
}
