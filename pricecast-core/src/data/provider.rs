//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over where the raw series comes from
//! (CSV import, synthetic fallback, an exchange feed owned by the host) so the
//! analysis pipeline never touches I/O directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PricePoint;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no usable price points in {0}")]
    Empty(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    CsvImport,
    Synthetic,
}

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Ascending by timestamp.
    pub points: Vec<PricePoint>,
    pub source: DataSource,
}

/// Supplies an ordered price series covering a trailing window.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch points within `window_seconds` of the most recent observation.
    fn fetch(&self, window_seconds: u64) -> Result<FetchResult, DataError>;
}

/// Keep the points whose timestamp lies within `window_seconds` of the last one.
pub fn trailing_window(points: &[PricePoint], window_seconds: u64) -> Vec<PricePoint> {
    let Some(last) = points.last() else {
        return Vec::new();
    };
    let cutoff = last
        .timestamp
        .saturating_sub((window_seconds as i64).saturating_mul(1000));
    points
        .iter()
        .filter(|p| p.timestamp >= cutoff)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DAY_MS;

    #[test]
    fn trailing_window_is_inclusive() {
        let points: Vec<PricePoint> = (0..10)
            .map(|i| PricePoint::new(i * DAY_MS, 100.0 + i as f64, 0.0))
            .collect();
        let window = trailing_window(&points, 3 * 86_400);
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].timestamp, 6 * DAY_MS);
    }

    #[test]
    fn trailing_window_empty() {
        assert!(trailing_window(&[], 86_400).is_empty());
    }

    #[test]
    fn error_messages_are_readable() {
        let err = DataError::Empty("prices.csv".into());
        assert_eq!(err.to_string(), "no usable price points in prices.csv");
    }
}
