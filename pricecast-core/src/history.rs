//! Fixed-size chunk statistics over a long history.
//!
//! The series is cut into consecutive chunks; a chunk is only taken while
//! more than `chunk_len` points remain after its start, so every chunk is
//! full and the tail is left out.

use serde::{Deserialize, Serialize};

use crate::domain::PricePoint;
use crate::math::{mean, relative_change};

pub const DEFAULT_CHUNK_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkStats {
    /// `(end - start) / start`.
    pub trend: f64,
    /// Mean absolute day-over-day relative change.
    pub volatility: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkSummary {
    pub avg_trend: f64,
    pub avg_volatility: f64,
    /// Mean price of each chunk, in order.
    pub price_ranges: Vec<f64>,
}

fn chunk_stats(prices: &[f64]) -> ChunkStats {
    let daily: Vec<f64> = prices.windows(2).map(|w| ((w[1] - w[0]) / w[0]).abs()).collect();
    ChunkStats {
        trend: relative_change(prices),
        volatility: mean(&daily),
        avg_price: mean(prices),
    }
}

/// Per-chunk statistics; empty when the series is not longer than one chunk.
pub fn chunk_series(points: &[PricePoint], chunk_len: usize) -> Vec<ChunkStats> {
    if chunk_len == 0 {
        return Vec::new();
    }
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();

    (0..prices.len().saturating_sub(chunk_len))
        .step_by(chunk_len)
        .map(|start| chunk_stats(&prices[start..start + chunk_len]))
        .collect()
}

/// Averages across chunks, or `None` if no chunk fits.
pub fn analyze_chunks(points: &[PricePoint], chunk_len: usize) -> Option<ChunkSummary> {
    let chunks = chunk_series(points, chunk_len);
    if chunks.is_empty() {
        return None;
    }

    let trends: Vec<f64> = chunks.iter().map(|c| c.trend).collect();
    let volatilities: Vec<f64> = chunks.iter().map(|c| c.volatility).collect();

    Some(ChunkSummary {
        avg_trend: mean(&trends),
        avg_volatility: mean(&volatilities),
        price_ranges: chunks.iter().map(|c| c.avg_price).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_points};

    #[test]
    fn needs_more_than_one_chunk_of_points() {
        assert!(analyze_chunks(&make_points(&[100.0; 30]), 30).is_none());
        assert!(analyze_chunks(&[], 30).is_none());
        assert!(analyze_chunks(&make_points(&[100.0; 31]), 30).is_some());
    }

    #[test]
    fn tail_is_dropped() {
        // 75 points: chunks start at 0 and 30 only (60 is not < 45)
        let chunks = chunk_series(&make_points(&[100.0; 75]), 30);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn chunk_statistics() {
        let mut prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        prices.extend(vec![200.0; 31]);
        let summary = analyze_chunks(&make_points(&prices), 30).unwrap();

        assert_eq!(summary.price_ranges.len(), 2);
        assert_approx(summary.price_ranges[0], 114.5, 1e-12);
        assert_approx(summary.price_ranges[1], 200.0, 1e-12);
        // 100 → 129, then flat
        assert_approx(summary.avg_trend, (0.29 + 0.0) / 2.0, 1e-12);
    }

    #[test]
    fn flat_chunks_have_no_volatility() {
        let summary = analyze_chunks(&make_points(&[50.0; 61]), 30).unwrap();
        assert_eq!(summary.avg_volatility, 0.0);
        assert_eq!(summary.avg_trend, 0.0);
    }
}
