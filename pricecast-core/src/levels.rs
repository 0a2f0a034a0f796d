//! Support/resistance level clustering.
//!
//! Pivots are found with a strict five-point test, then merged greedily in
//! input order. Merging is order-sensitive: the cluster price moves to the
//! midpoint of its current price and each absorbed pivot, so the same pivots
//! in a different order can give different levels.

use crate::domain::{Level, LevelKind, PricePoint};

pub const DEFAULT_TOLERANCE: f64 = 0.02;

/// Strict pivot scan over 5-point windows.
///
/// A point strictly above all four neighbours is a resistance pivot; else a
/// point strictly below all four is a support pivot. Pivots come back in
/// series order, each with strength 1.
pub fn find_pivot_levels(points: &[PricePoint]) -> Vec<Level> {
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    prices
        .windows(5)
        .filter_map(|w| {
            let mid = w[2];
            let neighbours = [w[0], w[1], w[3], w[4]];
            if neighbours.iter().all(|&n| mid > n) {
                Some(Level::new(mid, LevelKind::Resistance))
            } else if neighbours.iter().all(|&n| mid < n) {
                Some(Level::new(mid, LevelKind::Support))
            } else {
                None
            }
        })
        .collect()
}

/// Greedy single-pass clustering.
///
/// For each pivot, the first existing cluster within `tolerance` (relative to
/// the cluster price) absorbs it: strength increments and the price moves to
/// the midpoint. The cluster keeps the kind of the pivot that opened it.
/// Output is stably sorted by descending strength.
pub fn cluster_levels(pivots: &[Level], tolerance: f64) -> Vec<Level> {
    let mut clusters: Vec<Level> = Vec::new();

    for pivot in pivots {
        let existing = clusters
            .iter_mut()
            .find(|c| ((c.price - pivot.price) / c.price).abs() < tolerance);

        match existing {
            Some(cluster) => {
                cluster.strength += 1;
                cluster.price = (cluster.price + pivot.price) / 2.0;
            }
            None => clusters.push(Level {
                strength: 1,
                ..*pivot
            }),
        }
    }

    clusters.sort_by(|a, b| b.strength.cmp(&a.strength));
    clusters
}

/// Pivots then clustering with the default tolerance.
pub fn find_support_resistance(points: &[PricePoint]) -> Vec<Level> {
    cluster_levels(&find_pivot_levels(points), DEFAULT_TOLERANCE)
}

/// Split clustered levels by kind, preserving strength order.
pub fn split_by_kind(levels: &[Level]) -> (Vec<Level>, Vec<Level>) {
    levels.iter().copied().partition(|l| l.is_support())
}
