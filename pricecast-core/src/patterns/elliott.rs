//! Five-wave segmentation heuristic.
//!
//! This is a direction-reversal walk, not a rule-checked Elliott count: every
//! change of step direction closes a segment, and the result is accepted only
//! when exactly five segments were closed. The walk starts with no previous
//! direction, so the very first step always closes a zero-length opening
//! segment whose direction is unknown.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_LEN: usize = 20;
pub const WAVE_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSegment {
    pub wave: u8,
    pub start: f64,
    pub end: f64,
    pub direction: Option<WaveDirection>,
}

/// Returns the five segments, or `None` for a short series or any other count.
pub fn find_elliott_waves(prices: &[f64], min_len: usize) -> Option<Vec<WaveSegment>> {
    if prices.len() < min_len {
        return None;
    }
    let mut last_extreme = *prices.first()?;

    let mut waves: Vec<WaveSegment> = Vec::with_capacity(WAVE_COUNT);
    let mut last_direction: Option<WaveDirection> = None;

    for i in 1..prices.len() {
        let direction = if prices[i] > prices[i - 1] {
            WaveDirection::Up
        } else {
            WaveDirection::Down
        };

        if Some(direction) != last_direction && waves.len() < WAVE_COUNT {
            waves.push(WaveSegment {
                wave: waves.len() as u8 + 1,
                start: last_extreme,
                end: prices[i - 1],
                direction: last_direction,
            });
            last_extreme = prices[i - 1];
        }

        last_direction = Some(direction);
    }

    (waves.len() == WAVE_COUNT).then_some(waves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<f64> {
        // up 5, down 5, up 5, down 5, up 5 (+1 seed)
        let mut prices = vec![100.0];
        for leg in 0..5 {
            for _ in 0..5 {
                let last = *prices.last().unwrap();
                prices.push(if leg % 2 == 0 { last + 1.0 } else { last - 1.0 });
            }
        }
        prices
    }

    #[test]
    fn zigzag_yields_five_waves() {
        let waves = find_elliott_waves(&zigzag(), DEFAULT_MIN_LEN).unwrap();
        assert_eq!(waves.len(), 5);

        // Opening segment: zero length, unknown direction
        assert_eq!(waves[0].wave, 1);
        assert_eq!(waves[0].direction, None);
        assert_eq!(waves[0].start, 100.0);
        assert_eq!(waves[0].end, 100.0);

        // First completed leg went up 100 → 105
        assert_eq!(waves[1].direction, Some(WaveDirection::Up));
        assert_eq!(waves[1].start, 100.0);
        assert_eq!(waves[1].end, 105.0);

        assert_eq!(waves[2].direction, Some(WaveDirection::Down));
        assert_eq!(waves[2].end, 100.0);
        assert_eq!(waves[4].wave, 5);
    }

    #[test]
    fn monotonic_series_is_rejected() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert!(find_elliott_waves(&prices, DEFAULT_MIN_LEN).is_none());
    }

    #[test]
    fn short_series_is_rejected() {
        assert!(find_elliott_waves(&[1.0, 2.0, 1.0, 2.0, 1.0, 2.0], DEFAULT_MIN_LEN).is_none());
    }

    #[test]
    fn extra_reversals_are_capped_at_five() {
        let prices: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 100.0 } else { 101.0 }).collect();
        let waves = find_elliott_waves(&prices, DEFAULT_MIN_LEN).unwrap();
        assert_eq!(waves.len(), 5);
    }
}
