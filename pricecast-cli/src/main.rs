//! PriceCast CLI — analyze a price series, list strategies, generate history.
//!
//! Commands:
//! - `analyze` — run indicators, patterns, levels, forecast and signal over a CSV
//! - `strategies` — list the strategy registry
//! - `synthetic` — write a synthetic daily history as CSV
//!
//! Logs go to stderr so stdout stays clean for JSON/CSV output.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pricecast_core::data::{synthetic_history, write_prices, CsvPriceProvider, PriceProvider, DEFAULT_START_PRICE};
use pricecast_core::fingerprint::fingerprint;
use pricecast_core::settings::SECONDS_PER_DAY;
use pricecast_core::simulation::source_for;
use pricecast_core::summary::HistoricalPatternSummary;
use pricecast_core::{analyze, strategies, AnalysisSettings, PricePoint};

#[derive(Parser)]
#[command(
    name = "pricecast",
    about = "PriceCast CLI — technical analysis and biased price forecasting"
)]
struct Cli {
    /// Emit structured JSON logs instead of human-readable ones.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV price series (timestamp,price[,volume]).
    Analyze {
        /// Path to the price CSV.
        #[arg(long)]
        prices: PathBuf,

        /// Path to a TOML settings file. Defaults apply when omitted.
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Strategy key (see `strategies`).
        #[arg(long)]
        strategy: Option<String>,

        /// Historical window in days.
        #[arg(long)]
        history_days: Option<u64>,

        /// Forecast horizon in days. 0 disables the forecast.
        #[arg(long)]
        forecast_days: Option<u64>,

        /// Seed for a reproducible forecast.
        #[arg(long, conflicts_with = "entropy")]
        seed: Option<u64>,

        /// Draw the forecast from OS entropy instead of a seed.
        #[arg(long, default_value_t = false)]
        entropy: bool,

        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List available trading strategies.
    Strategies,
    /// Write a synthetic daily history ending now, as CSV.
    Synthetic {
        /// Number of days of history (the output has days + 1 rows).
        #[arg(long, default_value_t = 365)]
        days: usize,

        /// Seed for reproducible output. Uses OS entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Starting price.
        #[arg(long, default_value_t = DEFAULT_START_PRICE)]
        start_price: f64,

        /// Write the CSV here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json);

    match cli.command {
        Commands::Analyze {
            prices,
            settings,
            strategy,
            history_days,
            forecast_days,
            seed,
            entropy,
            output,
        } => {
            let overrides = Overrides {
                strategy,
                history_days,
                forecast_days,
                seed,
                entropy,
            };
            run_analyze(&prices, settings.as_deref(), overrides, output.as_deref())
        }
        Commands::Strategies => run_strategies(),
        Commands::Synthetic {
            days,
            seed,
            start_price,
            output,
        } => run_synthetic(days, seed, start_price, output.as_deref()),
    }
}

/// Human-readable logs by default, JSON with `--json`. Filter via `RUST_LOG`.
fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

struct Overrides {
    strategy: Option<String>,
    history_days: Option<u64>,
    forecast_days: Option<u64>,
    seed: Option<u64>,
    entropy: bool,
}

fn resolve_settings(path: Option<&Path>, overrides: Overrides) -> Result<AnalysisSettings> {
    let mut settings = match path {
        Some(path) => AnalysisSettings::load(path)?,
        None => AnalysisSettings::default(),
    };

    if let Some(key) = overrides.strategy {
        settings.strategy_key = key;
    }
    if let Some(days) = overrides.history_days {
        settings.historical_window_seconds = days * SECONDS_PER_DAY;
    }
    if let Some(days) = overrides.forecast_days {
        settings.forecast_window_seconds = days * SECONDS_PER_DAY;
    }
    if overrides.entropy {
        settings.seed = None;
    } else if let Some(seed) = overrides.seed {
        settings.seed = Some(seed);
    }

    settings.validate()?;
    Ok(settings)
}

fn run_analyze(
    prices: &Path,
    settings_path: Option<&Path>,
    overrides: Overrides,
    output: Option<&Path>,
) -> Result<()> {
    let settings = resolve_settings(settings_path, overrides)?;

    let provider = CsvPriceProvider::new(prices);
    let fetched = provider.fetch(settings.historical_window_seconds)?;
    let Some(anchor) = fetched.points.last().map(|p| p.timestamp) else {
        bail!(
            "no price points within the last {} day(s) of {}",
            settings.historical_days(),
            prices.display()
        );
    };
    if fetched.points.len() < 2 {
        warn!(
            points = fetched.points.len(),
            "very short history; most indicators will fall back to neutral values"
        );
    }

    let mut rng = source_for(settings.seed);
    let report = analyze(&fetched.points, &settings, rng.as_mut(), anchor)?;
    let key = fingerprint(&fetched.points, &settings);

    let from = fetched.points.first().and_then(PricePoint::datetime);
    info!(
        provider = provider.name(),
        points = fetched.points.len(),
        from = ?from,
        strategy = %settings.strategy_key,
        forecast_days = settings.forecast_days(),
        seeded = settings.seed.is_some(),
        fingerprint = key.short(),
        signal = %report.signal,
        "analysis complete"
    );

    let json = serde_json::to_string_pretty(&report).context("serialize analysis report")?;
    write_output(output, &json)
}

fn run_strategies() -> Result<()> {
    println!("{:<18} {:<32} DESCRIPTION", "KEY", "NAME");
    for strategy in strategies::list() {
        println!(
            "{:<18} {:<32} {}",
            strategy.key, strategy.name, strategy.description
        );
    }
    Ok(())
}

fn run_synthetic(days: usize, seed: Option<u64>, start_price: f64, output: Option<&Path>) -> Result<()> {
    if !(start_price.is_finite() && start_price > 0.0) {
        bail!("--start-price must be a positive number, got {start_price}");
    }

    let now_ms = chrono::Utc::now().timestamp_millis();
    let mut rng = source_for(seed);
    let points = synthetic_history(
        days,
        start_price,
        &HistoricalPatternSummary::default(),
        now_ms,
        rng.as_mut(),
    );
    info!(rows = points.len(), seeded = seed.is_some(), "generated synthetic history");

    write_output(output, &write_prices(&points)?)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => print!("{content}"),
    }
    Ok(())
}
