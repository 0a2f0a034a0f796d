//! Discrete trading signals emitted by the strategy registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading signal.
///
/// `Hold` is reserved for "no strategy answered" (unknown key or no data) and
/// is distinct from `Stay`, which a strategy returns deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingSignal {
    Buy,
    Sell,
    Ride,
    Stay,
    Hold,
}

impl TradingSignal {
    pub const ALL: [TradingSignal; 5] = [
        TradingSignal::Buy,
        TradingSignal::Sell,
        TradingSignal::Ride,
        TradingSignal::Stay,
        TradingSignal::Hold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradingSignal::Buy => "BUY",
            TradingSignal::Sell => "SELL",
            TradingSignal::Ride => "RIDE",
            TradingSignal::Stay => "STAY",
            TradingSignal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for TradingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
