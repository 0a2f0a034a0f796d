//! Integration: CSV provider → pipeline, synthetic fallback → state.

use std::io::Write;

use pricecast_core::data::{synthetic_history, write_prices, CsvPriceProvider, PriceProvider};
use pricecast_core::domain::{TradingSignal, DAY_MS};
use pricecast_core::fingerprint::fingerprint;
use pricecast_core::history::analyze_chunks;
use pricecast_core::simulation::SeededSource;
use pricecast_core::summary::HistoricalPatternSummary;
use pricecast_core::{analyze, analyze_from_provider, AnalysisSettings, ForecastState};

const NOW: i64 = 1_735_689_600_000;

fn synthetic(days: usize, seed: u64) -> Vec<pricecast_core::PricePoint> {
    synthetic_history(
        days,
        45_000.0,
        &HistoricalPatternSummary::default(),
        NOW,
        &mut SeededSource::new(seed),
    )
}

fn settings(history_days: u64, forecast_days: u64, strategy: &str) -> AnalysisSettings {
    AnalysisSettings {
        historical_window_seconds: history_days * 86_400,
        forecast_window_seconds: forecast_days * 86_400,
        strategy_key: strategy.into(),
        ..Default::default()
    }
}

#[test]
fn csv_round_trip_through_pipeline() {
    let history = synthetic(120, 1);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(write_prices(&history).unwrap().as_bytes()).unwrap();

    let provider = CsvPriceProvider::new(file.path());
    let s = settings(90, 30, "meanReversion");

    let fetched = provider.fetch(s.historical_window_seconds).unwrap();
    assert_eq!(fetched.points.len(), 91);

    let out = analyze_from_provider(&provider, &s, &mut SeededSource::new(42)).unwrap();
    assert_eq!(out.forecast.len(), 31);
    assert_eq!(out.forecast[0].timestamp, NOW);
    assert_eq!(out.forecast[30].timestamp, NOW + 30 * DAY_MS);
    assert!(TradingSignal::ALL.contains(&out.signal));
    assert!(out.forecast[1..].iter().all(|p| p.price >= 1_000.0));
}

#[test]
fn every_strategy_produces_a_signal() {
    let history = synthetic(200, 2);
    for key in ["arbitrage", "meanReversion", "trend", "hft", "vwap", "indexRebalancing", "twap"] {
        let out = analyze(&history, &settings(200, 10, key), &mut SeededSource::new(7), NOW).unwrap();
        assert_ne!(out.signal, TradingSignal::Hold, "{key} held");
    }
}

#[test]
fn levels_feed_summary_and_output_consistently() {
    let history = synthetic(365, 3);
    let out = analyze(&history, &settings(365, 5, "trend"), &mut SeededSource::new(1), NOW).unwrap();
    assert_eq!(out.levels.support, out.summary.support_levels);
    assert_eq!(out.levels.resistance, out.summary.resistance_levels);
    assert!(out.levels.support.iter().all(|l| l.is_support()));
    assert!(out.levels.resistance.iter().all(|l| l.is_resistance()));
    assert_eq!(out.summary.daily_volatility, out.volatility.current);
}

#[test]
fn state_matches_direct_analysis() {
    let history = synthetic(90, 4);
    let s = settings(90, 14, "twap");
    let state = ForecastState::new(s.clone()).with_history(history.clone());

    let direct = analyze(&history, &s, &mut SeededSource::new(42), NOW).unwrap();
    let held = state.output().unwrap();
    assert_eq!(held.forecast, direct.forecast);
    assert_eq!(held.signal, direct.signal);
    assert_eq!(state.fingerprint(), Some(&fingerprint(&history, &s)));
}

#[test]
fn chunk_statistics_over_a_year() {
    let history = synthetic(365, 5);
    let summary = analyze_chunks(&history, 30).unwrap();
    // 366 points: chunks start at 0, 30, ..., 330
    assert_eq!(summary.price_ranges.len(), 12);
    assert!(summary.avg_volatility > 0.0);
}
