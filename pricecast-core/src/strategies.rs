//! Trading strategy registry.
//!
//! Every strategy is a pure rule over the price column of the combined
//! historical + forecast series. Keys are stable identifiers used in settings
//! files and on the command line.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::domain::{prices, PricePoint, TradingSignal};
use crate::math::{mean, population_std, relative_change};

/// Target price for the rebalancing rule.
pub const REBALANCING_TARGET: f64 = 45_000.0;

type Rule = fn(&[f64]) -> TradingSignal;

/// A registry entry.
#[derive(Clone, Copy, Serialize)]
pub struct Strategy {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    rule: Rule,
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Strategy {
    /// Apply the rule. An empty series holds.
    pub fn evaluate(&self, prices: &[f64]) -> TradingSignal {
        if prices.is_empty() {
            return TradingSignal::Hold;
        }
        (self.rule)(prices)
    }
}

static REGISTRY: [Strategy; 7] = [
    Strategy {
        key: "arbitrage",
        name: "Arbitrage",
        description: "Exploits price differences across different timeframes",
        rule: arbitrage,
    },
    Strategy {
        key: "meanReversion",
        name: "Mean Reversion",
        description: "Assumes prices will return to their historical average",
        rule: mean_reversion,
    },
    Strategy {
        key: "trend",
        name: "Trend Following",
        description: "Follows established price trends",
        rule: trend_following,
    },
    Strategy {
        key: "hft",
        name: "High-Frequency Trading",
        description: "Rapid trading based on short-term price movements",
        rule: high_frequency,
    },
    Strategy {
        key: "vwap",
        name: "Volume-Weighted Average Price",
        description: "Uses price and volume data for decision making",
        rule: vwap,
    },
    Strategy {
        key: "indexRebalancing",
        name: "Index Fund Rebalancing",
        description: "Periodic portfolio rebalancing strategy",
        rule: index_rebalancing,
    },
    Strategy {
        key: "twap",
        name: "Time-Weighted Average Price",
        description: "Executes trades based on time-weighted price averages",
        rule: twap,
    },
];

/// All registered strategies in registration order.
pub fn list() -> &'static [Strategy] {
    &REGISTRY
}

pub fn lookup(key: &str) -> Option<&'static Strategy> {
    REGISTRY.iter().find(|s| s.key == key)
}

/// Evaluate strategy `key` on the series. Unknown keys hold.
pub fn evaluate(key: &str, data: &[PricePoint]) -> TradingSignal {
    match lookup(key) {
        Some(strategy) => strategy.evaluate(&prices(data)),
        None => {
            warn!(key, "unknown strategy key, holding");
            TradingSignal::Hold
        }
    }
}

fn tail(prices: &[f64], n: usize) -> &[f64] {
    &prices[prices.len().saturating_sub(n)..]
}

fn last(prices: &[f64]) -> f64 {
    prices[prices.len() - 1]
}

/// Short (5) vs long (20) average; a gap over 5% fades the short side.
fn arbitrage(prices: &[f64]) -> TradingSignal {
    let short = mean(tail(prices, 5));
    let long = mean(tail(prices, 20));
    let diff = (short - long) / long;

    if diff.abs() > 0.05 {
        if diff > 0.0 {
            TradingSignal::Sell
        } else {
            TradingSignal::Buy
        }
    } else {
        TradingSignal::Stay
    }
}

fn mean_reversion(prices: &[f64]) -> TradingSignal {
    let avg = mean(prices);
    let deviation = (last(prices) - avg) / avg;

    if deviation > 0.1 {
        TradingSignal::Sell
    } else if deviation < -0.1 {
        TradingSignal::Buy
    } else {
        TradingSignal::Ride
    }
}

fn trend_following(prices: &[f64]) -> TradingSignal {
    let change = relative_change(tail(prices, 20));

    if change > 0.1 {
        TradingSignal::Buy
    } else if change < -0.1 {
        TradingSignal::Sell
    } else {
        TradingSignal::Ride
    }
}

/// Dispersion is measured in raw price units, so any non-trivial instrument
/// clears the 0.02 bar and the rule reduces to the momentum sign.
fn high_frequency(prices: &[f64]) -> TradingSignal {
    let recent = tail(prices, 10);
    let dispersion = population_std(recent);
    let momentum = relative_change(recent);

    if dispersion > 0.02 && momentum > 0.0 {
        TradingSignal::Buy
    } else if dispersion > 0.02 && momentum < 0.0 {
        TradingSignal::Sell
    } else {
        TradingSignal::Stay
    }
}

/// Unweighted: volume does not enter the average.
fn vwap(prices: &[f64]) -> TradingSignal {
    let avg = mean(prices);
    let price = last(prices);

    if price < avg * 0.95 {
        TradingSignal::Buy
    } else if price > avg * 1.05 {
        TradingSignal::Sell
    } else {
        TradingSignal::Stay
    }
}

fn index_rebalancing(prices: &[f64]) -> TradingSignal {
    let deviation = ((last(prices) - REBALANCING_TARGET) / REBALANCING_TARGET).abs();
    if deviation > 0.1 {
        TradingSignal::Ride
    } else {
        TradingSignal::Stay
    }
}

/// Averages over 5, 10 and 20 points; short series are divided by the
/// nominal period, not the slice length.
fn twap(prices: &[f64]) -> TradingSignal {
    let [a5, a10, a20] = [5, 10, 20].map(|n| tail(prices, n).iter().sum::<f64>() / n as f64);

    if a5 > a10 && a10 > a20 {
        TradingSignal::Buy
    } else if a5 < a10 && a10 < a20 {
        TradingSignal::Sell
    } else {
        TradingSignal::Stay
    }
}
