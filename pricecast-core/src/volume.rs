//! Volume analysis: spikes, volume trend, price–volume correlation and
//! accumulation/distribution phase classification.

use serde::{Deserialize, Serialize};

use crate::indicators::sma;
use crate::math::{mean, pct_returns, pearson_correlation, relative_change};
use crate::volatility::TrendDirection;

pub const DEFAULT_VOLUME_PERIOD: usize = 20;

/// A bar whose volume exceeds this multiple of the average is a spike.
pub const SPIKE_RATIO: f64 = 2.0;

/// Price must stay within this band over the window for a phase to register.
pub const PHASE_PRICE_BAND: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpike {
    pub index: usize,
    pub spike: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeTrend {
    pub direction: TrendDirection,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeReport {
    pub average_volume: f64,
    pub volume_spikes: Vec<VolumeSpike>,
    pub volume_trend: VolumeTrend,
    /// Pearson correlation of price returns against volume changes. `NaN`
    /// when either series has zero variance; zero volumes give non-finite
    /// volume changes that propagate as well.
    pub price_volume_correlation: f64,
    pub is_accumulation: bool,
    pub is_distribution: bool,
}

/// Analyze the volume column against prices.
///
/// Returns `None` when either input is empty.
pub fn analyze_volume(prices: &[f64], volumes: &[f64], period: usize) -> Option<VolumeReport> {
    if prices.is_empty() || volumes.is_empty() {
        return None;
    }

    let average_volume = mean(volumes);
    let volume_spikes = volumes
        .iter()
        .enumerate()
        .map(|(index, &v)| VolumeSpike {
            index,
            spike: v / average_volume,
        })
        .filter(|s| s.spike > SPIKE_RATIO)
        .collect();

    let volume_trend = volume_trend(volumes, period);

    Some(VolumeReport {
        average_volume,
        volume_spikes,
        volume_trend,
        price_volume_correlation: price_volume_correlation(prices, volumes),
        is_accumulation: is_accumulation(prices, volumes, period),
        is_distribution: is_distribution(prices, volumes, period),
    })
}

/// Compare the first and last SMA(period) of volume.
///
/// Fewer than `period` volumes has no SMA to compare: reported as stable.
pub fn volume_trend(volumes: &[f64], period: usize) -> VolumeTrend {
    if period == 0 || volumes.len() < period {
        return VolumeTrend {
            direction: TrendDirection::Stable,
            magnitude: 0.0,
        };
    }

    let averages = sma(volumes, period);
    let first = averages[0];
    let last = averages[averages.len() - 1];

    VolumeTrend {
        direction: if last > first {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        },
        magnitude: (last - first).abs() / first,
    }
}

pub fn price_volume_correlation(prices: &[f64], volumes: &[f64]) -> f64 {
    let price_returns = pct_returns(prices);
    let volume_changes = pct_returns(volumes);
    pearson_correlation(&price_returns, &volume_changes)
}

fn price_is_ranging(prices: &[f64]) -> bool {
    let change = relative_change(prices);
    change > -PHASE_PRICE_BAND && change < PHASE_PRICE_BAND
}

/// Ranging price with rising volume.
pub fn is_accumulation(prices: &[f64], volumes: &[f64], period: usize) -> bool {
    price_is_ranging(prices) && volume_trend(volumes, period).direction == TrendDirection::Increasing
}

/// Ranging price with falling volume.
pub fn is_distribution(prices: &[f64], volumes: &[f64], period: usize) -> bool {
    price_is_ranging(prices) && volume_trend(volumes, period).direction == TrendDirection::Decreasing
}
