//! PricePoint — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one calendar day. Forecast points are spaced by this amount.
pub const DAY_MS: i64 = 86_400_000;

/// A single price observation.
///
/// Series are expected in ascending timestamp order without duplicates. That
/// ordering is supplied by the data provider; nothing in the core re-sorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64, volume: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }

    /// Returns true if the price is NaN (void observation).
    pub fn is_void(&self) -> bool {
        self.price.is_nan()
    }

    /// Finite, non-negative price and volume.
    pub fn is_sane(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0 && self.volume.is_finite() && self.volume >= 0.0
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// One element of a simulated forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub timestamp: i64,
    pub price: f64,
    #[serde(default)]
    pub is_historical: bool,
}

impl ForecastPoint {
    /// View the forecast element as a plain price observation (volume 0).
    pub fn as_price_point(&self) -> PricePoint {
        PricePoint::new(self.timestamp, self.price, 0.0)
    }
}

/// Extract the price column.
pub fn prices(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}

/// Extract the volume column.
pub fn volumes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.volume).collect()
}
