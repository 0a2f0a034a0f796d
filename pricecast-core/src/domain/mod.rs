//! Domain types for PriceCast

pub mod level;
pub mod price_point;
pub mod signal;

pub use level::{Level, LevelKind};
pub use price_point::{prices, volumes, ForecastPoint, PricePoint, DAY_MS};
pub use signal::TradingSignal;
