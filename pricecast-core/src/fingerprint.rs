//! Analysis fingerprinting — a stable cache key for one (series, settings) pair.
//!
//! Hosts that persist analysis output can key it by this digest: any change to
//! a price, volume, timestamp or setting yields a different key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::PricePoint;
use crate::settings::AnalysisSettings;

/// Hex-encoded BLAKE3 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn fingerprint(points: &[PricePoint], settings: &AnalysisSettings) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&(points.len() as u64).to_le_bytes());
    for p in points {
        hasher.update(&p.timestamp.to_le_bytes());
        hasher.update(&p.price.to_le_bytes());
        hasher.update(&p.volume.to_le_bytes());
    }

    hasher.update(&settings.historical_window_seconds.to_le_bytes());
    hasher.update(&settings.forecast_window_seconds.to_le_bytes());
    hasher.update(&(settings.strategy_key.len() as u64).to_le_bytes());
    hasher.update(settings.strategy_key.as_bytes());
    match settings.seed {
        Some(seed) => {
            hasher.update(&[1]);
            hasher.update(&seed.to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    hasher.update(&settings.cycle_length.to_le_bytes());

    Fingerprint(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_points;

    #[test]
    fn stable_for_identical_input() {
        let points = make_points(&[1.0, 2.0, 3.0]);
        let settings = AnalysisSettings::default();
        assert_eq!(fingerprint(&points, &settings), fingerprint(&points, &settings));
        assert_eq!(fingerprint(&points, &settings).as_str().len(), 64);
    }

    #[test]
    fn sensitive_to_prices() {
        let settings = AnalysisSettings::default();
        let a = fingerprint(&make_points(&[1.0, 2.0, 3.0]), &settings);
        let b = fingerprint(&make_points(&[1.0, 2.0, 3.5]), &settings);
        assert_ne!(a, b);
    }

    #[test]
    fn sensitive_to_settings() {
        let points = make_points(&[1.0, 2.0, 3.0]);
        let base = AnalysisSettings::default();
        let entropy = AnalysisSettings {
            seed: None,
            ..base.clone()
        };
        let other_strategy = AnalysisSettings {
            strategy_key: "twap".into(),
            ..base.clone()
        };
        let a = fingerprint(&points, &base);
        assert_ne!(a, fingerprint(&points, &entropy));
        assert_ne!(a, fingerprint(&points, &other_strategy));
    }

    #[test]
    fn short_form() {
        let fp = fingerprint(&[], &AnalysisSettings::default());
        assert_eq!(fp.short().len(), 12);
        assert!(fp.to_string().starts_with(fp.short()));
    }
}
