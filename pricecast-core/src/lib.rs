//! PriceCast Core — indicators, pattern detection, level clustering, biased
//! price simulation and strategy signals over a single price series.
//!
//! This crate contains the analysis engine:
//! - Domain types (price points, levels, forecast points, signals)
//! - Indicator engine (SMA, EMA, RSI, MACD, Bollinger)
//! - Volatility and volume analysis
//! - Pattern detector (chart shapes, Fibonacci, five-wave segmentation)
//! - Support/resistance clustering and the historical bias summary
//! - Seeded or entropy-driven forecast simulation
//! - Strategy registry and the end-to-end pipeline
//!
//! Everything is synchronous and pure apart from the data seam in `data`.

pub mod data;
pub mod domain;
pub mod fingerprint;
pub mod history;
pub mod indicators;
pub mod levels;
pub mod math;
pub mod patterns;
pub mod pipeline;
pub mod settings;
pub mod simulation;
pub mod state;
pub mod strategies;
pub mod summary;
pub mod volatility;
pub mod volume;

pub use domain::{ForecastPoint, Level, LevelKind, PricePoint, TradingSignal};
pub use pipeline::{analyze, analyze_from_provider, AnalysisError, AnalysisOutput};
pub use settings::{AnalysisSettings, SettingsError};
pub use simulation::{EntropySource, RandomSource, SeededSource};
pub use state::ForecastState;
