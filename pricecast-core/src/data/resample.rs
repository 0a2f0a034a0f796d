//! Sampling cadence for live history: append policy and bucket resampling.
//!
//! The minimum spacing between retained points grows with the historical
//! window so that long windows stay a manageable size:
//!
//! | window          | interval |
//! |-----------------|----------|
//! | ≤ 1 hour        | 1 min    |
//! | ≤ 2 hours       | 5 min    |
//! | ≤ 1 day         | 15 min   |
//! | ≤ 1 week        | 1 hour   |
//! | longer          | 1 day    |

use serde::{Deserialize, Serialize};

use crate::domain::PricePoint;

/// Minimum spacing, in seconds, for a historical window of `window_seconds`.
pub fn minimum_interval(window_seconds: u64) -> u64 {
    match window_seconds {
        0..=3_600 => 60,
        3_601..=7_200 => 300,
        7_201..=86_400 => 900,
        86_401..=604_800 => 3_600,
        _ => 86_400,
    }
}

/// Whether `new` is far enough past the last retained point to be kept.
///
/// `interval_seconds` is compared against the millisecond timestamps after
/// conversion.
pub fn should_append(history: &[PricePoint], new: &PricePoint, interval_seconds: u64) -> bool {
    match history.last() {
        None => true,
        Some(last) => new.timestamp - last.timestamp >= interval_seconds as i64 * 1000,
    }
}

/// One resampled bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Bucket start, epoch ms.
    pub timestamp: i64,
    /// First price seen in the bucket.
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    fn open_with(bucket: i64, point: &PricePoint) -> Self {
        Self {
            timestamp: bucket,
            price: point.price,
            open: point.price,
            high: point.price,
            low: point.price,
            close: point.price,
            volume: point.volume,
        }
    }

    fn absorb(&mut self, point: &PricePoint) {
        self.high = self.high.max(point.price);
        self.low = self.low.min(point.price);
        self.close = point.price;
        self.volume += point.volume;
    }

    pub fn as_price_point(&self) -> PricePoint {
        PricePoint::new(self.timestamp, self.price, self.volume)
    }
}

/// Group points into `interval_ms` buckets keyed by `floor(ts / interval) * interval`.
///
/// Buckets come back in order of first appearance, which for ascending input
/// is ascending time.
pub fn resample(points: &[PricePoint], interval_ms: i64) -> Vec<Candle> {
    let mut candles: Vec<Candle> = Vec::new();
    if interval_ms <= 0 {
        return candles;
    }

    for point in points {
        let bucket = point.timestamp.div_euclid(interval_ms) * interval_ms;
        match candles.iter_mut().rev().find(|c| c.timestamp == bucket) {
            Some(candle) => candle.absorb(point),
            None => candles.push(Candle::open_with(bucket, point)),
        }
    }
    candles
}

/// Append `new` if the cadence allows it, then re-bucket the history at
/// `interval_seconds`.
pub fn append_resampled(history: &[PricePoint], new: PricePoint, interval_seconds: u64) -> Vec<PricePoint> {
    let mut next = history.to_vec();
    if should_append(history, &new, interval_seconds) {
        next.push(new);
    }
    resample(&next, interval_seconds as i64 * 1000)
        .iter()
        .map(Candle::as_price_point)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_thresholds() {
        assert_eq!(minimum_interval(60), 60);
        assert_eq!(minimum_interval(3_600), 60);
        assert_eq!(minimum_interval(3_601), 300);
        assert_eq!(minimum_interval(7_200), 300);
        assert_eq!(minimum_interval(86_400), 900);
        assert_eq!(minimum_interval(604_800), 3_600);
        assert_eq!(minimum_interval(604_801), 86_400);
    }

    #[test]
    fn append_policy() {
        let history = [PricePoint::new(0, 1.0, 0.0)];
        assert!(should_append(&[], &PricePoint::new(5, 1.0, 0.0), 60));
        assert!(!should_append(&history, &PricePoint::new(59_999, 1.0, 0.0), 60));
        assert!(should_append(&history, &PricePoint::new(60_000, 1.0, 0.0), 60));
    }

    #[test]
    fn buckets_aggregate() {
        let points = [
            PricePoint::new(0, 10.0, 1.0),
            PricePoint::new(10, 12.0, 2.0),
            PricePoint::new(20, 9.0, 3.0),
            PricePoint::new(100, 11.0, 4.0),
        ];
        let candles = resample(&points, 100);
        assert_eq!(candles.len(), 2);

        let first = candles[0];
        assert_eq!(first.timestamp, 0);
        assert_eq!(first.price, 10.0);
        assert_eq!(first.open, 10.0);
        assert_eq!(first.high, 12.0);
        assert_eq!(first.low, 9.0);
        assert_eq!(first.close, 9.0);
        assert_eq!(first.volume, 6.0);

        assert_eq!(candles[1].timestamp, 100);
        assert_eq!(candles[1].volume, 4.0);
    }

    #[test]
    fn bucket_order_is_first_appearance() {
        let points = [PricePoint::new(250, 1.0, 0.0), PricePoint::new(50, 2.0, 0.0)];
        let candles = resample(&points, 100);
        assert_eq!(candles[0].timestamp, 200);
        assert_eq!(candles[1].timestamp, 0);
    }

    #[test]
    fn non_positive_interval_yields_nothing() {
        assert!(resample(&[PricePoint::new(0, 1.0, 0.0)], 0).is_empty());
    }

    #[test]
    fn append_resampled_respects_cadence() {
        let history = vec![PricePoint::new(0, 100.0, 1.0)];
        let same = append_resampled(&history, PricePoint::new(30_000, 101.0, 1.0), 60);
        assert_eq!(same.len(), 1);
        assert_eq!(same[0].volume, 1.0);

        let grown = append_resampled(&history, PricePoint::new(60_000, 101.0, 1.0), 60);
        assert_eq!(grown.len(), 2);
        assert_eq!(grown[1].timestamp, 60_000);
    }
}
