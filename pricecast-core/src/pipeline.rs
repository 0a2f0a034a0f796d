//! End-to-end analysis: indicators → levels → summary → forecast → signal.
//!
//! Every output field is recomputed together from one input series and one
//! settings value. The only randomness comes from the caller's
//! `RandomSource`, and the only clock is the caller's `anchor_ms`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::{DataError, PriceProvider};
use crate::domain::{prices, volumes, ForecastPoint, Level, PricePoint, TradingSignal};
use crate::indicators::{compute_indicators, IndicatorSet};
use crate::levels::{find_support_resistance, split_by_kind};
use crate::patterns::{detect_advanced_patterns, detect_all, ChartPattern, FibonacciLevel, WaveSegment};
use crate::settings::AnalysisSettings;
use crate::simulation::{forecast_points, simulate, RandomSource, SimulationContext};
use crate::strategies;
use crate::summary::{summarize, HistoricalPatternSummary};
use crate::volatility::{analyze_volatility, VolatilityReport, DEFAULT_WINDOW};
use crate::volume::{analyze_volume, VolumeReport, DEFAULT_VOLUME_PERIOD};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("insufficient data: the price series is empty")]
    InsufficientData,

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Clustered levels split by kind, each in strength order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelSplit {
    pub support: Vec<Level>,
    pub resistance: Vec<Level>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub indicators: IndicatorSet,
    pub volatility: VolatilityReport,
    pub volume: VolumeReport,
    pub patterns: Vec<ChartPattern>,
    pub levels: LevelSplit,
    pub fibonacci: Vec<FibonacciLevel>,
    pub elliott_waves: Option<Vec<WaveSegment>>,
    pub summary: HistoricalPatternSummary,
    pub forecast: Vec<ForecastPoint>,
    pub signal: TradingSignal,
}

/// Run the full analysis over `points`.
///
/// The forecast starts at the last observed price and is laid out daily from
/// `anchor_ms`; a zero forecast window yields an empty forecast. The signal is
/// evaluated over history followed by the forecast.
pub fn analyze(
    points: &[PricePoint],
    settings: &AnalysisSettings,
    rng: &mut dyn RandomSource,
    anchor_ms: i64,
) -> Result<AnalysisOutput, AnalysisError> {
    let last = points.last().ok_or(AnalysisError::InsufficientData)?;
    let price_col = prices(points);

    let indicators = compute_indicators(points);
    let volatility = analyze_volatility(points, DEFAULT_WINDOW);
    let volume = analyze_volume(&price_col, &volumes(points), DEFAULT_VOLUME_PERIOD)
        .ok_or(AnalysisError::InsufficientData)?;
    debug!(
        points = points.len(),
        volatility = volatility.current,
        "indicators computed"
    );

    let patterns = detect_all(&price_col);
    let advanced = detect_advanced_patterns(&price_col);
    let levels = find_support_resistance(points);
    debug!(
        patterns = patterns.len(),
        levels = levels.len(),
        "patterns and levels detected"
    );

    let summary = summarize(
        points,
        &indicators,
        &volatility,
        &levels,
        &settings.summary_config(),
    );
    let (support, resistance) = split_by_kind(&levels);

    let days = settings.forecast_days();
    let forecast = if days == 0 {
        Vec::new()
    } else {
        let ctx = SimulationContext::from_analysis(points, &indicators, &summary);
        forecast_points(&simulate(&ctx, last.price, days, rng), anchor_ms)
    };

    let mut combined = points.to_vec();
    combined.extend(forecast.iter().map(ForecastPoint::as_price_point));
    let signal = strategies::evaluate(&settings.strategy_key, &combined);
    debug!(
        strategy = %settings.strategy_key,
        forecast_days = days,
        %signal,
        "analysis complete"
    );

    Ok(AnalysisOutput {
        indicators,
        volatility,
        volume,
        patterns,
        levels: LevelSplit {
            support,
            resistance,
        },
        fibonacci: advanced.fibonacci,
        elliott_waves: advanced.elliott_waves,
        summary,
        forecast,
        signal,
    })
}

/// Fetch the historical window from `provider` and analyze it, anchoring the
/// forecast at the last fetched timestamp.
pub fn analyze_from_provider(
    provider: &dyn PriceProvider,
    settings: &AnalysisSettings,
    rng: &mut dyn RandomSource,
) -> Result<AnalysisOutput, AnalysisError> {
    let fetched = provider.fetch(settings.historical_window_seconds)?;
    debug!(
        provider = provider.name(),
        points = fetched.points.len(),
        source = ?fetched.source,
        "fetched history"
    );
    let anchor = fetched
        .points
        .last()
        .map(|p| p.timestamp)
        .ok_or(AnalysisError::InsufficientData)?;
    analyze(&fetched.points, settings, rng, anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, FetchResult};
    use crate::domain::DAY_MS;
    use crate::indicators::make_points;
    use crate::simulation::SeededSource;

    fn rising(n: i32) -> Vec<PricePoint> {
        let closes: Vec<f64> = (0..n).map(|i| 40_000.0 * 1.01_f64.powi(i)).collect();
        make_points(&closes)
    }

    fn settings(forecast_days: u64, strategy: &str) -> AnalysisSettings {
        AnalysisSettings {
            forecast_window_seconds: forecast_days * 86_400,
            strategy_key: strategy.into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = analyze(&[], &AnalysisSettings::default(), &mut SeededSource::new(1), 0).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData));
    }

    #[test]
    fn forecast_length_matches_horizon() {
        let points = rising(40);
        let out = analyze(&points, &settings(7, "trend"), &mut SeededSource::new(42), 5_000).unwrap();
        assert_eq!(out.forecast.len(), 8);
        assert_eq!(out.forecast[0].price, points.last().unwrap().price);
        assert_eq!(out.forecast[0].timestamp, 5_000);
        assert_eq!(out.forecast[7].timestamp, 5_000 + 7 * DAY_MS);
    }

    #[test]
    fn zero_horizon_means_no_forecast() {
        let out = analyze(&rising(40), &settings(0, "trend"), &mut SeededSource::new(42), 0).unwrap();
        assert!(out.forecast.is_empty());
    }

    #[test]
    fn seeded_analysis_is_reproducible() {
        let points = rising(60);
        let s = settings(14, "twap");
        let a = analyze(&points, &s, &mut SeededSource::new(42), 0).unwrap();
        let b = analyze(&points, &s, &mut SeededSource::new(42), 0).unwrap();
        assert_eq!(a.forecast, b.forecast);
        assert_eq!(a.signal, b.signal);
    }

    #[test]
    fn unknown_strategy_holds() {
        let out = analyze(&rising(40), &settings(3, "martingale"), &mut SeededSource::new(1), 0).unwrap();
        assert_eq!(out.signal, TradingSignal::Hold);
    }

    #[test]
    fn single_point_degrades_gracefully() {
        let out = analyze(&make_points(&[50_000.0]), &settings(3, "trend"), &mut SeededSource::new(1), 0).unwrap();
        assert!(out.patterns.is_empty());
        assert!(out.levels.support.is_empty());
        assert_eq!(out.volume.average_volume, 1000.0);
        assert_eq!(out.volatility.current, 0.0);
        assert_eq!(out.forecast.len(), 4);
    }

    #[test]
    fn output_serializes_with_contract_names() {
        let out = analyze(&rising(40), &settings(2, "trend"), &mut SeededSource::new(1), 0).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        for key in [
            "indicators",
            "patterns",
            "levels",
            "fibonacci",
            "elliottWaves",
            "forecast",
            "signal",
            "summary",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["levels"].get("support").is_some());
    }

    struct FixedProvider(Vec<PricePoint>);

    impl PriceProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self, _window_seconds: u64) -> Result<FetchResult, DataError> {
            Ok(FetchResult {
                points: self.0.clone(),
                source: DataSource::Synthetic,
            })
        }
    }

    #[test]
    fn provider_anchor_is_last_timestamp() {
        let points = rising(30);
        let last_ts = points.last().unwrap().timestamp;
        let out = analyze_from_provider(&FixedProvider(points), &settings(1, "trend"), &mut SeededSource::new(1)).unwrap();
        assert_eq!(out.forecast[0].timestamp, last_ts);
    }

    #[test]
    fn provider_with_no_points_is_insufficient() {
        let err = analyze_from_provider(&FixedProvider(vec![]), &settings(1, "trend"), &mut SeededSource::new(1)).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData));
    }
}
