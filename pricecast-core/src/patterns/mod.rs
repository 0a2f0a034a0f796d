//! Pattern detector: pivots, chart shapes, Fibonacci retracements and the
//! five-wave heuristic.
//!
//! All detection runs on the raw price column; nothing here uses volume or
//! timestamps.

pub mod elliott;
pub mod fibonacci;
pub mod pivots;
pub mod shapes;

pub use elliott::{find_elliott_waves, WaveDirection, WaveSegment};
pub use fibonacci::{fibonacci_levels, FibonacciLevel};
pub use pivots::{find_peaks, find_troughs, least_squares_slope, Pivot};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::{max, min};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartPattern {
    #[serde(rename = "Head and Shoulders")]
    HeadAndShoulders,
    #[serde(rename = "Inverse H&S")]
    InverseHeadAndShoulders,
    #[serde(rename = "Double Top")]
    DoubleTop,
    #[serde(rename = "Double Bottom")]
    DoubleBottom,
    #[serde(rename = "Bullish Flag")]
    BullishFlag,
    #[serde(rename = "Bearish Flag")]
    BearishFlag,
    Triangle,
    Wedge,
    Channel,
    #[serde(rename = "Cup and Handle")]
    CupAndHandle,
    #[serde(rename = "Rounding Bottom")]
    RoundingBottom,
}

impl ChartPattern {
    pub fn name(&self) -> &'static str {
        match self {
            ChartPattern::HeadAndShoulders => "Head and Shoulders",
            ChartPattern::InverseHeadAndShoulders => "Inverse H&S",
            ChartPattern::DoubleTop => "Double Top",
            ChartPattern::DoubleBottom => "Double Bottom",
            ChartPattern::BullishFlag => "Bullish Flag",
            ChartPattern::BearishFlag => "Bearish Flag",
            ChartPattern::Triangle => "Triangle",
            ChartPattern::Wedge => "Wedge",
            ChartPattern::Channel => "Channel",
            ChartPattern::CupAndHandle => "Cup and Handle",
            ChartPattern::RoundingBottom => "Rounding Bottom",
        }
    }
}

impl fmt::Display for ChartPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of the advanced detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub patterns: Vec<ChartPattern>,
    pub fibonacci: Vec<FibonacciLevel>,
    pub elliott_waves: Option<Vec<WaveSegment>>,
}

type Predicate = fn(&[f64]) -> bool;

const CLASSIC: [(ChartPattern, Predicate); 5] = [
    (ChartPattern::HeadAndShoulders, shapes::is_head_and_shoulders),
    (ChartPattern::DoubleTop, shapes::is_double_top),
    (ChartPattern::DoubleBottom, shapes::is_double_bottom),
    (ChartPattern::BullishFlag, shapes::is_bullish_flag),
    (ChartPattern::BearishFlag, shapes::is_bearish_flag),
];

const ADVANCED: [(ChartPattern, Predicate); 6] = [
    (ChartPattern::Triangle, shapes::is_triangle),
    (ChartPattern::Wedge, shapes::is_wedge),
    (ChartPattern::Channel, shapes::is_channel),
    (ChartPattern::CupAndHandle, shapes::is_cup_and_handle),
    (ChartPattern::InverseHeadAndShoulders, shapes::is_inverse_head_and_shoulders),
    (ChartPattern::RoundingBottom, shapes::is_rounding_bottom),
];

fn matching(prices: &[f64], table: &[(ChartPattern, Predicate)]) -> Vec<ChartPattern> {
    table
        .iter()
        .filter(|(_, predicate)| predicate(prices))
        .map(|(pattern, _)| *pattern)
        .collect()
}

/// Reversal and continuation patterns: H&S, double top/bottom, flags.
pub fn detect_patterns(prices: &[f64]) -> Vec<ChartPattern> {
    matching(prices, &CLASSIC)
}

/// Boundary and shape patterns plus Fibonacci levels over the full range and
/// the five-wave segmentation.
pub fn detect_advanced_patterns(prices: &[f64]) -> PatternReport {
    let fibonacci = if prices.is_empty() {
        Vec::new()
    } else {
        fibonacci_levels(max(prices), min(prices))
    };

    PatternReport {
        patterns: matching(prices, &ADVANCED),
        fibonacci,
        elliott_waves: find_elliott_waves(prices, elliott::DEFAULT_MIN_LEN),
    }
}

/// Classic patterns followed by advanced ones, without duplicates.
pub fn detect_all(prices: &[f64]) -> Vec<ChartPattern> {
    let mut all = detect_patterns(prices);
    for pattern in matching(prices, &ADVANCED) {
        if !all.contains(&pattern) {
            all.push(pattern);
        }
    }
    all
}
